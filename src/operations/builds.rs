use thiserror::Error;
use tracing::info;

use super::{ApiOperation, GetAppsError, GetAppsOperation};
use crate::endpoint;
use crate::error::ApiError;
use crate::model::{Build, BuildLocalization};
use crate::requestor::EndpointRequestor;

#[derive(Debug, Clone, Default)]
pub struct ListBuildsOptions {
    /// Apps whose builds are listed. At least one is required.
    pub bundle_ids: Vec<String>,
    /// Build numbers (`CFBundleVersion`).
    pub versions: Vec<String>,
    /// Marketing versions (`CFBundleShortVersionString`).
    pub pre_release_versions: Vec<String>,
    pub processing_states: Vec<String>,
    pub expired: Option<bool>,
    pub sort: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Error)]
pub enum ListBuildsError {
    #[error("No builds found matching filters: {0}")]
    NoBuildsFound(String),

    #[error(transparent)]
    Apps(#[from] GetAppsError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Lists builds of the given apps, joined with their app and marketing version.
#[derive(Debug, Clone)]
pub struct ListBuildsOperation {
    options: ListBuildsOptions,
}

impl ListBuildsOperation {
    pub fn new(options: ListBuildsOptions) -> Self {
        Self { options }
    }
}

impl ApiOperation for ListBuildsOperation {
    type Output = Vec<Build>;
    type Error = ListBuildsError;

    fn execute<R: EndpointRequestor>(&self, requestor: &R) -> Result<Vec<Build>, ListBuildsError> {
        let options = &self.options;

        let app_ids: Vec<String> = GetAppsOperation::new(options.bundle_ids.clone())
            .execute(requestor)?
            .into_iter()
            .map(|app| app.id)
            .collect();
        info!(apps = app_ids.len(), "listing builds");

        let expired: Vec<String> = options.expired.map(|e| e.to_string()).into_iter().collect();
        let endpoint = endpoint::builds()
            .filter("app", &app_ids)
            .filter("version", &options.versions)
            .filter("preReleaseVersion.version", &options.pre_release_versions)
            .filter("processingState", &options.processing_states)
            .filter("expired", &expired)
            .include(&["app", "preReleaseVersion"])
            .sort(options.sort.as_deref())
            .limit(options.limit);
        let response = requestor.request(&endpoint)?;

        if response.data.is_empty() {
            return Err(ListBuildsError::NoBuildsFound(
                endpoint.request().describe_filters(),
            ));
        }
        Ok(response
            .data
            .iter()
            .map(|build| Build::new(build, &response))
            .collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListBuildLocalizationsOptions {
    pub build_id: String,
    pub locales: Vec<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Error)]
pub enum ListBuildLocalizationsError {
    #[error("No localizations found for build {0}")]
    NoLocalizationsFound(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone)]
pub struct ListBuildLocalizationsOperation {
    options: ListBuildLocalizationsOptions,
}

impl ListBuildLocalizationsOperation {
    pub fn new(options: ListBuildLocalizationsOptions) -> Self {
        Self { options }
    }
}

impl ApiOperation for ListBuildLocalizationsOperation {
    type Output = Vec<BuildLocalization>;
    type Error = ListBuildLocalizationsError;

    fn execute<R: EndpointRequestor>(
        &self,
        requestor: &R,
    ) -> Result<Vec<BuildLocalization>, ListBuildLocalizationsError> {
        let options = &self.options;
        let endpoint = endpoint::beta_build_localizations()
            .filter("build", &[options.build_id.as_str()])
            .filter("locale", &options.locales)
            .limit(options.limit);
        let response = requestor.request(&endpoint)?;

        if response.data.is_empty() {
            return Err(ListBuildLocalizationsError::NoLocalizationsFound(
                options.build_id.clone(),
            ));
        }
        Ok(response.data.iter().map(BuildLocalization::from).collect())
    }
}
