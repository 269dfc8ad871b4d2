use thiserror::Error;
use tracing::info;

use super::ApiOperation;
use crate::endpoint;
use crate::error::ApiError;
use crate::model::App;
use crate::requestor::EndpointRequestor;

#[derive(Debug, Error)]
pub enum GetAppsError {
    #[error("No bundle IDs were given to look up.")]
    NoBundleIds,

    #[error("No apps were found matching {0:?}.")]
    NoAppsMatching(Vec<String>),

    #[error("Specified apps were not found / do not exist: {0:?}.")]
    AppsDoNotExist(Vec<String>),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Resolves bundle identifiers to apps.
///
/// The server's `bundleId` filter is not an exact match, so the response is
/// narrowed to the requested identifiers. Any identifier left unresolved
/// fails the whole lookup, and so does an empty identifier list.
#[derive(Debug, Clone)]
pub struct GetAppsOperation {
    bundle_ids: Vec<String>,
}

impl GetAppsOperation {
    pub fn new(bundle_ids: Vec<String>) -> Self {
        Self { bundle_ids }
    }
}

impl ApiOperation for GetAppsOperation {
    type Output = Vec<App>;
    type Error = GetAppsError;

    fn execute<R: EndpointRequestor>(&self, requestor: &R) -> Result<Vec<App>, GetAppsError> {
        if self.bundle_ids.is_empty() {
            return Err(GetAppsError::NoBundleIds);
        }
        let endpoint = endpoint::apps().filter("bundleId", &self.bundle_ids);
        let response = requestor.request(&endpoint)?;

        if response.data.is_empty() {
            return Err(GetAppsError::NoAppsMatching(self.bundle_ids.clone()));
        }

        let apps: Vec<App> = response
            .data
            .iter()
            .map(App::from)
            .filter(|app| {
                app.bundle_id
                    .as_ref()
                    .is_some_and(|bundle_id| self.bundle_ids.contains(bundle_id))
            })
            .collect();

        let missing: Vec<String> = self
            .bundle_ids
            .iter()
            .filter(|requested| {
                !apps
                    .iter()
                    .any(|app| app.bundle_id.as_deref() == Some(requested.as_str()))
            })
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(GetAppsError::AppsDoNotExist(missing));
        }

        info!(count = apps.len(), "resolved apps by bundle id");
        Ok(apps)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListAppsOptions {
    pub bundle_ids: Vec<String>,
    pub names: Vec<String>,
    pub skus: Vec<String>,
    pub sort: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Error)]
pub enum ListAppsError {
    #[error("No apps found matching filters: {0}")]
    NoAppsFound(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone)]
pub struct ListAppsOperation {
    options: ListAppsOptions,
}

impl ListAppsOperation {
    pub fn new(options: ListAppsOptions) -> Self {
        Self { options }
    }
}

impl ApiOperation for ListAppsOperation {
    type Output = Vec<App>;
    type Error = ListAppsError;

    fn execute<R: EndpointRequestor>(&self, requestor: &R) -> Result<Vec<App>, ListAppsError> {
        let options = &self.options;
        let endpoint = endpoint::apps()
            .filter("bundleId", &options.bundle_ids)
            .filter("name", &options.names)
            .filter("sku", &options.skus)
            .sort(options.sort.as_deref())
            .limit(options.limit);
        let response = requestor.request(&endpoint)?;

        if response.data.is_empty() {
            return Err(ListAppsError::NoAppsFound(
                endpoint.request().describe_filters(),
            ));
        }
        Ok(response.data.iter().map(App::from).collect())
    }
}
