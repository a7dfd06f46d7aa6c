//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! client's `build_*` methods produce `HttpRequest` values without touching
//! the network; `Transport` is the only place that performs I/O. Keeping the
//! two apart means every request shape can be asserted in a plain unit test.
//!
//! Request bodies are either ready-made bytes or a list of file parts that
//! the transport turns into a multipart form. Response bodies are decoded to
//! text by the transport.

use std::fmt;

use crate::multipart::FilePart;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `SimpleWebClient::build_*` methods and executed by `Transport`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<HttpBody>,
}

/// Payload of an `HttpRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpBody {
    /// Sent verbatim; the content type is one of the request headers.
    Bytes(Vec<u8>),
    /// Sent as `multipart/form-data`; the transport sets the content type.
    Multipart(Vec<FilePart>),
}

impl HttpBody {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            HttpBody::Bytes(bytes) => Some(bytes.as_slice()),
            HttpBody::Multipart(_) => None,
        }
    }
}

impl HttpRequest {
    /// Case-insensitive lookup of the first header named `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The body when it is plain bytes.
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_ref().and_then(HttpBody::as_bytes)
    }
}

/// An HTTP response described as plain data.
///
/// Produced by `Transport::execute`, then handed to the client's `parse_*`
/// methods which decide whether the exchange succeeded.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_renders_as_wire_token() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost:3000/".to_string(),
            headers: vec![("X-Custom-Header".to_string(), "some-value".to_string())],
            body: None,
        };
        assert_eq!(req.header("x-custom-header"), Some("some-value"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn multipart_body_has_no_bytes() {
        let body = HttpBody::Multipart(vec![FilePart::new("file", "a.txt")]);
        assert_eq!(body.as_bytes(), None);
        assert_eq!(HttpBody::Bytes(b"x".to_vec()).as_bytes(), Some(&b"x"[..]));
    }

    #[test]
    fn only_2xx_counts_as_success() {
        let mut response = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 302;
        assert!(!response.is_success());
        response.status = 500;
        assert!(!response.is_success());
    }
}
