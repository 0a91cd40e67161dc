//! Search query and result models.

use serde::{Deserialize, Serialize};

use crate::models::ReferenceBook;

/// Default cap on the number of results kept from either search path
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Where a result set came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchOutcome {
    /// The remote lookup answered
    Remote,

    /// The remote lookup failed and the static catalog was filtered instead
    Fallback {
        /// Why the remote lookup was abandoned
        reason: String,
    },

    /// The remote lookup is disabled; only the static catalog was consulted
    Offline,
}

impl SearchOutcome {
    /// Whether the static catalog produced the results
    pub fn used_catalog(&self) -> bool {
        !matches!(self, SearchOutcome::Remote)
    }

    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            SearchOutcome::Remote => "remote",
            SearchOutcome::Fallback { .. } => "fallback",
            SearchOutcome::Offline => "offline",
        }
    }
}

/// A full, replace-only result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Query that was executed
    pub query: String,

    /// Books found, or the single "No results" placeholder
    pub books: Vec<ReferenceBook>,

    /// Which path produced the books
    pub outcome: SearchOutcome,
}

impl SearchResults {
    /// Create a new result set
    pub fn new(query: impl Into<String>, books: Vec<ReferenceBook>, outcome: SearchOutcome) -> Self {
        Self {
            query: query.into(),
            books,
            outcome,
        }
    }

    /// Whether the set holds only the "No results" placeholder
    pub fn is_empty_placeholder(&self) -> bool {
        self.books.len() == 1 && self.books[0].is_no_results()
    }
}
