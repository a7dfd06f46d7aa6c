//! Network execution of `HttpRequest` values.
//!
//! `Transport` is a thin wrapper over `reqwest::Client`. It sends exactly what
//! the request describes and returns whatever the server answered; status
//! interpretation is left to the client's `parse_*` methods.

use reqwest::Method;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};
use crate::multipart;

#[derive(Debug, Clone, Default)]
pub struct Transport {
    inner: reqwest::Client,
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS roots, timeouts).
    pub fn with_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    pub async fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %req.method, url = %req.url, "sending request");

        let mut builder = self.inner.request(to_reqwest(req.method), &req.url);
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        match req.body {
            Some(HttpBody::Bytes(bytes)) => builder = builder.body(bytes),
            Some(HttpBody::Multipart(parts)) => {
                builder = builder.multipart(multipart::to_form(&parts).await?)
            }
            None => {}
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        debug!(status, bytes = body.len(), "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn to_reqwest(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_method() {
        for method in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
        ] {
            assert_eq!(to_reqwest(method).as_str(), method.as_str());
        }
    }
}
