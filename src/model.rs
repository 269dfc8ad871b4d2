//! Display models built from API resources.
//!
//! A model only carries what the response provided. Related resources are
//! joined from the `included` array by identifier; a missing match leaves
//! the field empty.

use serde::Serialize;

use crate::render::TableRow;
use crate::resources::{
    AppAttributes, BetaBuildLocalizationAttributes, BuildAttributes, CertificateAttributes,
    PreReleaseVersionAttributes, UserAttributes, UserInvitationAttributes,
};
use crate::response::{Document, Resource};

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn flag(value: Option<bool>) -> String {
    value.map(|b| b.to_string()).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

impl From<&Resource<AppAttributes>> for App {
    fn from(app: &Resource<AppAttributes>) -> Self {
        let attributes = app.attributes.clone().unwrap_or_default();
        Self {
            id: app.id.clone(),
            bundle_id: attributes.bundle_id,
            name: attributes.name,
            primary_locale: attributes.primary_locale,
            sku: attributes.sku,
        }
    }
}

impl TableRow for App {
    fn columns() -> &'static [&'static str] {
        &["App ID", "Bundle ID", "Name", "Primary Locale", "SKU"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            cell(&self.bundle_id),
            cell(&self.name),
            cell(&self.primary_locale),
            cell(&self.sku),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_allowed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_apps_visible: Option<bool>,
    /// Bundle IDs of the visible apps, when they were requested and included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_apps: Option<Vec<String>>,
}

impl User {
    pub fn new(user: &Resource<UserAttributes>, response: &Document<UserAttributes>) -> Self {
        let attributes = user.attributes.clone().unwrap_or_default();
        let visible_apps = if response.included.is_empty() {
            None
        } else {
            Some(
                user.related_ids("visibleApps")
                    .into_iter()
                    .filter_map(|id| response.included_app(id))
                    .filter_map(|app| app.attributes.as_ref()?.bundle_id.clone())
                    .collect(),
            )
        };

        Self {
            id: user.id.clone(),
            username: attributes.username,
            first_name: attributes.first_name,
            last_name: attributes.last_name,
            roles: attributes.roles,
            provisioning_allowed: attributes.provisioning_allowed,
            all_apps_visible: attributes.all_apps_visible,
            visible_apps,
        }
    }
}

impl TableRow for User {
    fn columns() -> &'static [&'static str] {
        &[
            "Username",
            "First Name",
            "Last Name",
            "Role",
            "Provisioning Allowed",
            "All Apps Visible",
            "Visible Apps",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            cell(&self.username),
            cell(&self.first_name),
            cell(&self.last_name),
            self.roles.as_deref().unwrap_or_default().join(", "),
            flag(self.provisioning_allowed),
            flag(self.all_apps_visible),
            self.visible_apps.as_deref().unwrap_or_default().join(", "),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInvitation {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_apps_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_allowed: Option<bool>,
}

impl From<&Resource<UserInvitationAttributes>> for UserInvitation {
    fn from(invitation: &Resource<UserInvitationAttributes>) -> Self {
        let attributes = invitation.attributes.clone().unwrap_or_default();
        Self {
            id: invitation.id.clone(),
            email: attributes.email,
            first_name: attributes.first_name,
            last_name: attributes.last_name,
            roles: attributes.roles,
            expiration_date: attributes.expiration_date,
            all_apps_visible: attributes.all_apps_visible,
            provisioning_allowed: attributes.provisioning_allowed,
        }
    }
}

impl TableRow for UserInvitation {
    fn columns() -> &'static [&'static str] {
        &[
            "Email",
            "First Name",
            "Last Name",
            "Roles",
            "Expiration Date",
            "All Apps Visible",
            "Provisioning Allowed",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            cell(&self.email),
            cell(&self.first_name),
            cell(&self.last_name),
            self.roles.as_deref().unwrap_or_default().join(", "),
            cell(&self.expiration_date),
            flag(self.all_apps_visible),
            flag(self.provisioning_allowed),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl From<&Resource<CertificateAttributes>> for Certificate {
    fn from(certificate: &Resource<CertificateAttributes>) -> Self {
        let attributes = certificate.attributes.clone().unwrap_or_default();
        Self {
            id: certificate.id.clone(),
            name: attributes.name,
            display_name: attributes.display_name,
            certificate_type: attributes.certificate_type,
            serial_number: attributes.serial_number,
            platform: attributes.platform,
            expiration_date: attributes.expiration_date,
            content: attributes.certificate_content,
        }
    }
}

impl TableRow for Certificate {
    fn columns() -> &'static [&'static str] {
        &[
            "ID",
            "Name",
            "Display Name",
            "Type",
            "Serial Number",
            "Platform",
            "Expiration Date",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            cell(&self.name),
            cell(&self.display_name),
            cell(&self.certificate_type),
            cell(&self.serial_number),
            cell(&self.platform),
            cell(&self.expiration_date),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<App>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_release_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_os_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_state: Option<String>,
}

impl Build {
    pub fn new(build: &Resource<BuildAttributes>, response: &Document<BuildAttributes>) -> Self {
        let attributes = build.attributes.clone().unwrap_or_default();
        let app = build
            .related_id("app")
            .and_then(|id| response.included_app(id))
            .map(App::from);
        let pre_release_version = build.related_id("preReleaseVersion").and_then(|id| {
            response
                .included_pre_release_versions()
                .find(|version| version.id == id)
                .and_then(|version| version.attributes.as_ref()?.version.clone())
        });

        Self {
            id: build.id.clone(),
            app,
            version: attributes.version,
            pre_release_version,
            uploaded_date: attributes.uploaded_date,
            expiration_date: attributes.expiration_date,
            expired: attributes.expired,
            min_os_version: attributes.min_os_version,
            processing_state: attributes.processing_state,
        }
    }
}

impl TableRow for Build {
    fn columns() -> &'static [&'static str] {
        &[
            "Build ID",
            "Bundle ID",
            "Version",
            "Build Number",
            "Processing State",
            "Min OS Version",
            "Uploaded Date",
            "Expired",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.app
                .as_ref()
                .and_then(|app| app.bundle_id.clone())
                .unwrap_or_default(),
            cell(&self.pre_release_version),
            cell(&self.version),
            cell(&self.processing_state),
            cell(&self.min_os_version),
            cell(&self.uploaded_date),
            flag(self.expired),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildLocalization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whats_new: Option<String>,
}

impl From<&Resource<BetaBuildLocalizationAttributes>> for BuildLocalization {
    fn from(localization: &Resource<BetaBuildLocalizationAttributes>) -> Self {
        let attributes = localization.attributes.clone().unwrap_or_default();
        Self {
            locale: attributes.locale,
            whats_new: attributes.whats_new,
        }
    }
}

impl TableRow for BuildLocalization {
    fn columns() -> &'static [&'static str] {
        &["Locale", "What's New"]
    }

    // Multi-line release notes do not fit a table cell.
    fn row(&self) -> Vec<String> {
        vec![
            cell(&self.locale),
            "Rendering whatsNew in a table is not supported, use --output json or yaml".to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreReleaseVersion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<App>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl PreReleaseVersion {
    pub fn new(
        version: &Resource<PreReleaseVersionAttributes>,
        response: &Document<PreReleaseVersionAttributes>,
    ) -> Self {
        let attributes = version.attributes.clone().unwrap_or_default();
        let app = version
            .related_id("app")
            .and_then(|id| response.included_app(id))
            .map(App::from);

        Self {
            app,
            platform: attributes.platform,
            version: attributes.version,
        }
    }
}

impl TableRow for PreReleaseVersion {
    fn columns() -> &'static [&'static str] {
        &["App ID", "App Bundle ID", "App Name", "Platform", "Version"]
    }

    fn row(&self) -> Vec<String> {
        let app = self.app.as_ref();
        vec![
            app.map(|a| a.id.clone()).unwrap_or_default(),
            app.and_then(|a| a.bundle_id.clone()).unwrap_or_default(),
            app.and_then(|a| a.name.clone()).unwrap_or_default(),
            cell(&self.platform),
            cell(&self.version),
        ]
    }
}
