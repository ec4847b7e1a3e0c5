//! Classified failures for catalog searches.
//!
//! Every variant's `Display` string is the human-readable message stored in
//! the search state's `error` field and shown to the user verbatim.

use thiserror::Error;

/// Classified failure of a catalog search request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Caller misuse of the search API. The typed criteria make most of the
    /// legacy cases unrepresentable; the variant remains for completeness.
    #[error("Invalid search criteria provided.")]
    InvalidInput,
    /// The request exceeded the configured timeout.
    #[error("Request timed out. Please check your internet connection.")]
    Timeout,
    /// HTTP 403 from the catalog service.
    #[error("Access denied. The catalog service may be temporarily unavailable.")]
    AccessDenied,
    /// HTTP 429 from the catalog service.
    #[error("Too many requests. Please wait a moment before searching again.")]
    RateLimited,
    /// Any HTTP 5xx from the catalog service.
    #[error("The catalog service is temporarily unavailable. Please try again later.")]
    ServiceUnavailable,
    /// Any other non-success HTTP status.
    #[error("Search failed with status {0}")]
    RequestFailed(u16),
    /// The request never produced a response (connect or transport failure).
    #[error("Unable to connect to the catalog service. Please check your internet connection.")]
    NetworkUnreachable,
    /// The response body was not the expected JSON shape.
    #[error("Invalid response format from the catalog service.")]
    InvalidResponse,
}

impl SearchError {
    /// Classify a non-success HTTP status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            403 => Self::AccessDenied,
            429 => Self::RateLimited,
            s if s >= 500 => Self::ServiceUnavailable,
            s => Self::RequestFailed(s),
        }
    }
}
