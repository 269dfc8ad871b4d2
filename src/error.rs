use thiserror::Error;

/// Failures raised below the operation layer: building, sending or decoding
/// a single request. Underlying causes stay in the source chain.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    #[error("App Store Connect returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response")]
    Decode(#[from] serde_json::Error),

    #[error("invalid request URL")]
    Url(#[from] url::ParseError),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("failed to start request runtime")]
    Runtime(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing issuer ID (pass --api-issuer or set APPSTORE_CONNECT_ISSUER_ID)")]
    MissingIssuer,

    #[error("Missing API key ID (pass --api-key-id or set APPSTORE_CONNECT_API_KEY_ID)")]
    MissingKeyId,

    #[error(
        "Missing private key (pass --api-private-key, --api-private-key-path, or place it at {0})"
    )]
    MissingPrivateKey(String),

    #[error("Failed to read private key {path}")]
    ReadPrivateKey {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
