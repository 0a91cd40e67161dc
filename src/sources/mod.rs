//! Book lookup sources behind a common trait.
//!
//! This module defines the [`BookLookup`] trait implemented by everything that
//! can answer a title query:
//!
//! - [`OpenLibrarySource`]: the Open Library search API (the primary path)
//! - [`StaticCatalog`]: the hardcoded reference list (the offline fallback)
//! - [`MockLookup`]: canned answers or failures for tests
//!
//! The [`SearchEngine`](crate::search::SearchEngine) pairs an optional remote
//! lookup with a catalog and decides which one produced the results.

mod catalog;
pub mod mock;
mod open_library;

pub use catalog::StaticCatalog;
pub use mock::MockLookup;
pub use open_library::{OpenLibrarySource, OPEN_LIBRARY_API_BASE};

use crate::models::ReferenceBook;
use async_trait::async_trait;

/// The BookLookup trait defines the interface for all book search backends.
///
/// Implementations return every match they know about, in their own order.
/// Capping and the "No results" placeholder are applied by the search engine.
#[async_trait]
pub trait BookLookup: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this lookup (e.g., "openlibrary", "catalog")
    fn id(&self) -> &str;

    /// Human-readable name of this lookup
    fn name(&self) -> &str;

    /// Find books whose title matches the query
    async fn search(&self, query: &str) -> Result<Vec<ReferenceBook>, LookupError>;
}

/// Errors that can occur when talking to a lookup backend
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not finish in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The service answered with a non-success status
    #[error("API error: {0}")]
    Api(String),

    /// The response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Timeout(err.to_string())
        } else if err.is_decode() {
            LookupError::Parse(err.to_string())
        } else {
            LookupError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Parse(format!("JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_becomes_parse_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let lookup_err: LookupError = err.into();
        assert!(matches!(lookup_err, LookupError::Parse(_)));
        assert!(lookup_err.to_string().starts_with("Parse error: JSON:"));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            LookupError::Api("status 503".to_string()).to_string(),
            "API error: status 503"
        );
    }
}
