//! Client configuration.
//!
//! The only setting is the base URL every request targets. It is read once,
//! at construction, and never changes for the lifetime of the client.

use crate::error::ApiError;

/// Environment variable holding the base URL.
pub const HOST_VAR: &str = "HOST";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    /// Read the host from the process environment.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the host through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(HOST_VAR) {
            Some(host) if !host.trim().is_empty() => Ok(Self::new(host.trim())),
            _ => Err(ApiError::MissingConfig(HOST_VAR)),
        }
    }
}
