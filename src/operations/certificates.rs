use thiserror::Error;

use super::ApiOperation;
use crate::endpoint;
use crate::error::ApiError;
use crate::model::Certificate;
use crate::requestor::EndpointRequestor;

#[derive(Debug, Clone, Default)]
pub struct ListCertificatesOptions {
    pub serial_numbers: Vec<String>,
    pub certificate_types: Vec<String>,
    pub display_names: Vec<String>,
    pub sort: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Error)]
pub enum ListCertificatesError {
    #[error("Couldn't find certificate with input filters: {0}")]
    CouldNotFindCertificate(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone)]
pub struct ListCertificatesOperation {
    options: ListCertificatesOptions,
}

impl ListCertificatesOperation {
    pub fn new(options: ListCertificatesOptions) -> Self {
        Self { options }
    }
}

impl ApiOperation for ListCertificatesOperation {
    type Output = Vec<Certificate>;
    type Error = ListCertificatesError;

    fn execute<R: EndpointRequestor>(
        &self,
        requestor: &R,
    ) -> Result<Vec<Certificate>, ListCertificatesError> {
        let options = &self.options;
        let endpoint = endpoint::certificates()
            .filter("serialNumber", &options.serial_numbers)
            .filter("certificateType", &options.certificate_types)
            .filter("displayName", &options.display_names)
            .sort(options.sort.as_deref())
            .limit(options.limit);
        let response = requestor.request(&endpoint)?;

        if response.data.is_empty() {
            return Err(ListCertificatesError::CouldNotFindCertificate(
                endpoint.request().describe_filters(),
            ));
        }
        Ok(response.data.iter().map(Certificate::from).collect())
    }
}
