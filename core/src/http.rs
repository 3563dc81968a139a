//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `PipedriveClient` builds an
//! `HttpRequest`, a `Transport` turns it into an `HttpResponse`, and the
//! client parses the result. Keeping the wire step behind plain values lets
//! tests script responses without a network.
//!
//! The request URL carries the API token in its query string, so `Debug`
//! and logging go through `redacted_url` instead of the raw field.

use std::fmt;

/// Placeholder written in place of the API token in logs.
pub const REDACTED: &str = "***";

/// A GET request described as plain data.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// The URL with the value of `api_token` replaced by `***`.
    pub fn redacted_url(&self) -> String {
        redact_token(&self.url)
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("url", &self.redacted_url())
            .field("headers", &self.headers)
            .finish()
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport`, then passed to `PipedriveClient::parse_page`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

fn redact_token(url: &str) -> String {
    let Some((head, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let query: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some(("api_token", _)) => format!("api_token={REDACTED}"),
            _ => pair.to_string(),
        })
        .collect();
    format!("{head}?{}", query.join("&"))
}
