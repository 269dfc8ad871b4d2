//! JSON:API envelopes returned by App Store Connect.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::resources::{AppAttributes, PreReleaseVersionAttributes};

/// A collection response: `data` array plus optional `included` resources.
#[derive(Debug, Clone, Deserialize)]
pub struct Document<A> {
    pub data: Vec<Resource<A>>,
    #[serde(default)]
    pub included: Vec<Included>,
    pub links: DocumentLinks,
    #[serde(default)]
    pub meta: Option<PagingMeta>,
}

/// A single-resource response, as returned when creating a resource.
#[derive(Debug, Clone, Deserialize)]
pub struct SingleDocument<A> {
    pub data: Resource<A>,
    #[serde(default)]
    pub included: Vec<Included>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resource<A> {
    pub id: String,
    pub attributes: Option<A>,
    #[serde(default)]
    pub relationships: BTreeMap<String, Relationship>,
}

impl<A> Resource<A> {
    /// Identifier of a to-one relationship, if the server sent its linkage.
    pub fn related_id(&self, name: &str) -> Option<&str> {
        match self.relationships.get(name)?.data.as_ref()? {
            Linkage::One(identifier) => Some(identifier.id.as_str()),
            Linkage::Many(_) => None,
        }
    }

    /// Identifiers of a to-many relationship. Empty when no linkage was sent.
    pub fn related_ids(&self, name: &str) -> Vec<&str> {
        match self.relationships.get(name).and_then(|r| r.data.as_ref()) {
            Some(Linkage::Many(identifiers)) => identifiers.iter().map(|i| i.id.as_str()).collect(),
            Some(Linkage::One(identifier)) => vec![identifier.id.as_str()],
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<Linkage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    One(ResourceIdentifier),
    Many(Vec<ResourceIdentifier>),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// Related resources that can appear in an `included` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Included {
    #[serde(rename = "apps")]
    App(Resource<AppAttributes>),
    #[serde(rename = "preReleaseVersions")]
    PreReleaseVersion(Resource<PreReleaseVersionAttributes>),
    #[serde(other)]
    Other,
}

impl<A> Document<A> {
    pub fn included_apps(&self) -> impl Iterator<Item = &Resource<AppAttributes>> {
        self.included.iter().filter_map(|included| match included {
            Included::App(app) => Some(app),
            _ => None,
        })
    }

    pub fn included_pre_release_versions(
        &self,
    ) -> impl Iterator<Item = &Resource<PreReleaseVersionAttributes>> {
        self.included.iter().filter_map(|included| match included {
            Included::PreReleaseVersion(version) => Some(version),
            _ => None,
        })
    }

    /// The included app whose identifier equals `id`.
    pub fn included_app(&self, id: &str) -> Option<&Resource<AppAttributes>> {
        self.included_apps().find(|app| app.id == id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagingMeta {
    pub paging: Paging,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging {
    pub total: u64,
    pub limit: u64,
}

/// Body of a non-success response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorResponse {
    /// First human-readable message in the body: `detail`, then `title`.
    pub fn message(&self) -> Option<String> {
        self.errors
            .iter()
            .find_map(|e| e.detail.clone().or_else(|| e.title.clone()))
    }
}
