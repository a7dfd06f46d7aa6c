//! Request dispatcher for a single configured host.
//!
//! # Design
//! `SimpleWebClient` holds only the parsed host and a `Transport`, and carries
//! no mutable state between calls. Every operation is split into a `build_*`
//! method that produces an `HttpRequest` and an async method that sends it and
//! parses the response. The build half is deterministic and tested without a
//! network; the async half is exercised against the mock server.

use std::future::Future;
use std::path::Path;

use tracing::warn;
use url::form_urlencoded;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};
use crate::multipart::FilePart;
use crate::transport::Transport;
use crate::types::RequestBody;

pub const CUSTOM_HEADER_NAME: &str = "X-Custom-Header";
pub const CUSTOM_HEADER_VALUE: &str = "some-value";

const CONTENT_TYPE: &str = "content-type";
const APPLICATION_JSON: &str = "application/json";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Asynchronous, stateless client bound to one host.
///
/// Every operation builds one `HttpRequest` against the host, sends it
/// through the `Transport` and hands back the response body. Nothing is
/// retried or cached, and calls do not affect each other.
#[derive(Debug, Clone)]
pub struct SimpleWebClient {
    host: Url,
    transport: Transport,
}

impl SimpleWebClient {
    /// Create a client for `host`, which must be an absolute http(s) URL.
    pub fn new(host: &str) -> Result<Self, ApiError> {
        Ok(Self {
            host: parse_host(host)?,
            transport: Transport::new(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(&config.host)
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    pub fn host(&self) -> &Url {
        &self.host
    }

    // -----------------------------------------------------------------------
    // Request builders
    // -----------------------------------------------------------------------

    pub fn build_get_with_optional_query_param(&self, id: Option<&str>) -> HttpRequest {
        let mut url = self.host.clone();
        if let Some(id) = id {
            url.query_pairs_mut().append_pair("id", id);
        }
        request(HttpMethod::Get, url)
    }

    pub fn build_get_with_optional_query_param_with_custom_header(
        &self,
        id: Option<&str>,
    ) -> HttpRequest {
        with_custom_header(self.build_get_with_optional_query_param(id))
    }

    pub fn build_post_with_json_request_body(
        &self,
        body: &RequestBody,
    ) -> Result<HttpRequest, ApiError> {
        let json = serde_json::to_vec(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut req = request(HttpMethod::Post, self.host.clone());
        req.headers
            .push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
        req.body = Some(HttpBody::Bytes(json));
        Ok(req)
    }

    pub fn build_put_with_custom_header(&self) -> HttpRequest {
        with_custom_header(request(HttpMethod::Put, self.host.clone()))
    }

    /// The multipart content type and boundary are set when the request is sent.
    pub fn build_put_with_file_request_body(&self, file: &Path, name: &str) -> HttpRequest {
        let mut req = request(HttpMethod::Put, self.host.clone());
        req.body = Some(HttpBody::Multipart(vec![FilePart::new(name, file)]));
        req
    }

    pub fn build_patch_with_custom_header(&self) -> HttpRequest {
        with_custom_header(request(HttpMethod::Patch, self.host.clone()))
    }

    pub fn build_patch_with_form_request_body(&self, body: &RequestBody) -> HttpRequest {
        let form = form_urlencoded::Serializer::new(String::new())
            .append_pair("id", &body.id)
            .append_pair("name", &body.name)
            .finish();
        let mut req = request(HttpMethod::Patch, self.host.clone());
        req.headers
            .push((CONTENT_TYPE.to_string(), FORM_URLENCODED.to_string()));
        req.body = Some(HttpBody::Bytes(form.into_bytes()));
        req
    }

    pub fn build_delete_with_path_segment(&self, id: &str) -> HttpRequest {
        let mut url = self.host.clone();
        // parse_host rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        request(HttpMethod::Delete, url)
    }

    // -----------------------------------------------------------------------
    // Response parsers
    // -----------------------------------------------------------------------

    pub fn parse_text(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response)?;
        Ok(response.body)
    }

    pub fn parse_string_list(&self, response: HttpResponse) -> Result<Vec<String>, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    pub async fn get_with_optional_query_param(&self, id: Option<&str>) -> Result<String, ApiError> {
        let req = self.build_get_with_optional_query_param(id);
        self.send_for_text(req).await
    }

    pub async fn get_with_optional_query_param_with_custom_header(
        &self,
        id: Option<&str>,
    ) -> Result<String, ApiError> {
        let req = self.build_get_with_optional_query_param_with_custom_header(id);
        self.send_for_text(req).await
    }

    /// Like `get_with_optional_query_param`, but decodes a JSON array of strings.
    pub async fn get_string_list_with_optional_query_param(
        &self,
        id: Option<&str>,
    ) -> Result<Vec<String>, ApiError> {
        let req = self.build_get_with_optional_query_param(id);
        let response = self.transport.execute(req).await?;
        self.parse_string_list(response)
    }

    pub async fn post_with_json_request_body(&self, body: &RequestBody) -> Result<String, ApiError> {
        let req = self.build_post_with_json_request_body(body)?;
        self.send_for_text(req).await
    }

    /// Post the single value produced by `source` once it resolves.
    pub async fn post_with_json_request_source<F>(&self, source: F) -> Result<String, ApiError>
    where
        F: Future<Output = RequestBody>,
    {
        let body = source.await;
        self.post_with_json_request_body(&body).await
    }

    pub async fn put_with_custom_header(&self) -> Result<String, ApiError> {
        let req = self.build_put_with_custom_header();
        self.send_for_text(req).await
    }

    /// Upload `file` as a single multipart part named `name`.
    pub async fn put_with_file_request_body(&self, file: &Path, name: &str) -> Result<String, ApiError> {
        let req = self.build_put_with_file_request_body(file, name);
        self.send_for_text(req).await
    }

    pub async fn patch_with_custom_header(&self) -> Result<String, ApiError> {
        let req = self.build_patch_with_custom_header();
        self.send_for_text(req).await
    }

    pub async fn patch_with_form_request_body(&self, body: &RequestBody) -> Result<String, ApiError> {
        let req = self.build_patch_with_form_request_body(body);
        self.send_for_text(req).await
    }

    pub async fn delete_with_path_segment(&self, id: &str) -> Result<String, ApiError> {
        let req = self.build_delete_with_path_segment(id);
        self.send_for_text(req).await
    }

    async fn send_for_text(&self, req: HttpRequest) -> Result<String, ApiError> {
        let response = self.transport.execute(req).await?;
        self.parse_text(response)
    }
}

fn parse_host(host: &str) -> Result<Url, ApiError> {
    let url = Url::parse(host).map_err(|source| ApiError::InvalidHost {
        host: host.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ApiError::UnsupportedHost(host.to_string()));
    }
    Ok(url)
}

fn request(method: HttpMethod, url: Url) -> HttpRequest {
    HttpRequest {
        method,
        url: url.into(),
        headers: Vec::new(),
        body: None,
    }
}

fn with_custom_header(mut req: HttpRequest) -> HttpRequest {
    req.headers
        .push((CUSTOM_HEADER_NAME.to_string(), CUSTOM_HEADER_VALUE.to_string()));
    req
}

/// Surface any non-2xx status as `ApiError::HttpError`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    warn!(status = response.status, "request failed");
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
