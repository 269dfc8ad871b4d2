//! Blocking request adapter.
//!
//! The CLI runs one request at a time and waits for each to finish. The
//! async client is driven by a private current-thread runtime, so callers
//! only ever see synchronous `&self` methods.

use serde::de::DeserializeOwned;
use tokio::runtime::{Builder, Runtime};

use crate::asc::AppStoreConnectClient;
use crate::endpoint::{Endpoint, NoContent, Request};
use crate::error::ApiError;

/// Issues requests on behalf of operations.
///
/// Implementors provide [`send`](EndpointRequestor::send); decoding is shared.
pub trait EndpointRequestor {
    /// Performs exactly one HTTP request and blocks until it resolves,
    /// returning the raw response body.
    fn send(&self, request: &Request) -> Result<String, ApiError>;

    fn request<T: DeserializeOwned>(&self, endpoint: &Endpoint<T>) -> Result<T, ApiError> {
        let body = self.send(endpoint.request())?;
        Ok(serde_json::from_str(&body)?)
    }

    fn request_empty(&self, endpoint: &Endpoint<NoContent>) -> Result<(), ApiError> {
        self.send(endpoint.request()).map(|_| ())
    }
}

pub struct BlockingRequestor {
    runtime: Runtime,
    client: AppStoreConnectClient,
}

impl BlockingRequestor {
    pub fn new(client: AppStoreConnectClient) -> Result<Self, ApiError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ApiError::Runtime)?;
        Ok(Self { runtime, client })
    }
}

impl EndpointRequestor for BlockingRequestor {
    fn send(&self, request: &Request) -> Result<String, ApiError> {
        self.runtime.block_on(self.client.send(request))
    }
}
