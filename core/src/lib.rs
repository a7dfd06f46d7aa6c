//! Asynchronous HTTP request dispatcher for a single configured host.
//!
//! # Overview
//! `SimpleWebClient` issues GET/POST/PUT/PATCH/DELETE requests with optional
//! query parameters, a custom header, JSON bodies, multipart file uploads and
//! form-encoded bodies, and returns the response body as text.
//!
//! # Design
//! - The client is stateless; it holds only the parsed host and a `Transport`.
//! - Each operation is split into `build_*` (produces an `HttpRequest` as plain
//!   data) and an async method that executes it, so request shapes are
//!   testable without a network.
//! - Transport and protocol failures propagate unchanged as `ApiError`; there
//!   are no retries or fallbacks.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod multipart;
pub mod transport;
pub mod types;

pub use client::{SimpleWebClient, CUSTOM_HEADER_NAME, CUSTOM_HEADER_VALUE};
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};
pub use multipart::FilePart;
pub use transport::Transport;
pub use types::RequestBody;
