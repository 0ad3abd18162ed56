//! HTTP exchange types described as plain data.
//!
//! # Design
//! The client builds `HttpRequest` values and classifies `HttpResponse`
//! values without touching the network; a `Transport` performs the actual
//! round-trip in between. Keeping the exchange as owned data makes the
//! request side inspectable in tests and the response side trivially
//! constructible.

pub const ACCEPT: &str = "Accept";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A request ready to be executed by a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A completed response. Only produced when the server actually answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Raw body bytes; `None` when the status arrived but the body could not
    /// be read.
    pub body: Option<Vec<u8>>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: Some(body.into()),
        }
    }

    pub fn unreadable(status: u16) -> Self {
        Self { status, body: None }
    }
}

/// Headers injected into every outgoing request, whatever the operation.
pub fn default_headers() -> Vec<(String, String)> {
    vec![
        (ACCEPT.to_string(), APPLICATION_JSON.to_string()),
        (CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()),
    ]
}
