//! Error types for the web client.
//!
//! # Design
//! The client does not translate failures. Non-2xx responses land in
//! `HttpError` with the raw status and body, transport failures carry the
//! underlying `reqwest::Error`, and everything else describes a request that
//! could not be built.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured host is not a valid URL.
    #[error("invalid host {host:?}: {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },

    /// The host parsed but cannot be used as a base for HTTP requests.
    #[error("unsupported host: {0}")]
    UnsupportedHost(String),

    /// A required configuration value was not provided.
    #[error("missing configuration value: {0}")]
    MissingConfig(&'static str),

    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request could not be sent or the response could not be read.
    #[error("transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// A file referenced by an upload could not be read.
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
