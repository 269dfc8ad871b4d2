pub mod asc;
pub mod cli;
pub mod endpoint;
pub mod error;
pub mod model;
pub mod operations;
pub mod render;
pub mod requestor;
pub mod resources;
pub mod response;
pub mod service;

pub use asc::{AppStoreConnectClient, Config};
pub use error::{ApiError, ConfigError};
pub use requestor::{BlockingRequestor, EndpointRequestor};
pub use service::AppStoreConnectService;
