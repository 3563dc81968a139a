//! Error types for the Pipedrive client.
//!
//! # Design
//! 401 gets a dedicated variant because it always means the token is bad and
//! no amount of re-asking will help. Every other non-200 response lands in
//! `Request` with the raw status and body. Transport failures and malformed
//! bodies are kept apart so callers can tell "never reached Pipedrive" from
//! "Pipedrive answered with something unexpected". All variants are fatal to
//! the call that produced them; nothing is retried.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by `PipedriveClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The subdomain, token or base URL handed to `ClientConfig` is unusable.
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// The server returned 401: the API token is invalid or expired.
    #[error("authentication failed: API token is invalid or expired")]
    Authentication { body: String },

    /// The server returned a status other than 200 or 401.
    #[error("request failed with HTTP {status}: {body}")]
    Request { status: u16, body: String },

    /// The request never produced an HTTP response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A 200 response whose body is not the expected JSON envelope.
    #[error("malformed response: {0}")]
    Parse(String),

    /// `fetch_all_with_page_size` was called with a page size of zero.
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    /// The next pagination offset does not fit in `u32`.
    #[error("pagination offset overflowed: {start} + {page_size}")]
    OffsetOverflow { start: u32, page_size: u32 },
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Authentication { .. } => Some(401),
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}
