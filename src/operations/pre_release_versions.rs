use thiserror::Error;

use super::{ApiOperation, GetAppsError, GetAppsOperation};
use crate::endpoint;
use crate::error::ApiError;
use crate::model::PreReleaseVersion;
use crate::requestor::EndpointRequestor;

#[derive(Debug, Clone, Default)]
pub struct ListPreReleaseVersionsOptions {
    /// Narrows the listing to these apps. Empty means every app.
    pub bundle_ids: Vec<String>,
    pub platforms: Vec<String>,
    pub versions: Vec<String>,
    pub sort: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Error)]
pub enum ListPreReleaseVersionsError {
    #[error("No pre-release versions found matching filters: {0}")]
    NoPreReleaseVersionsFound(String),

    #[error(transparent)]
    Apps(#[from] GetAppsError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone)]
pub struct ListPreReleaseVersionsOperation {
    options: ListPreReleaseVersionsOptions,
}

impl ListPreReleaseVersionsOperation {
    pub fn new(options: ListPreReleaseVersionsOptions) -> Self {
        Self { options }
    }
}

impl ApiOperation for ListPreReleaseVersionsOperation {
    type Output = Vec<PreReleaseVersion>;
    type Error = ListPreReleaseVersionsError;

    fn execute<R: EndpointRequestor>(
        &self,
        requestor: &R,
    ) -> Result<Vec<PreReleaseVersion>, ListPreReleaseVersionsError> {
        let options = &self.options;

        let app_ids: Vec<String> = if options.bundle_ids.is_empty() {
            Vec::new()
        } else {
            GetAppsOperation::new(options.bundle_ids.clone())
                .execute(requestor)?
                .into_iter()
                .map(|app| app.id)
                .collect()
        };

        let endpoint = endpoint::pre_release_versions()
            .filter("app", &app_ids)
            .filter("platform", &options.platforms)
            .filter("version", &options.versions)
            .include(&["app"])
            .sort(options.sort.as_deref())
            .limit(options.limit);
        let response = requestor.request(&endpoint)?;

        if response.data.is_empty() {
            return Err(ListPreReleaseVersionsError::NoPreReleaseVersionsFound(
                endpoint.request().describe_filters(),
            ));
        }
        Ok(response
            .data
            .iter()
            .map(|version| PreReleaseVersion::new(version, &response))
            .collect())
    }
}
