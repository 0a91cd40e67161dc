//! Mock lookup for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::models::ReferenceBook;
use crate::sources::{BookLookup, LookupError};

#[derive(Debug, Clone)]
enum Behavior {
    Respond(Vec<ReferenceBook>),
    Fail(String),
}

/// A mock lookup that returns predefined books or a predefined failure.
#[derive(Debug)]
pub struct MockLookup {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl MockLookup {
    /// Create a mock that answers every query with no books.
    pub fn new() -> Self {
        Self::responding(Vec::new())
    }

    /// Create a mock that answers every query with these books.
    pub fn responding(books: Vec<ReferenceBook>) -> Self {
        Self {
            behavior: Behavior::Respond(books),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock whose lookups fail with a network error.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Fail(reason.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of lookups performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookLookup for MockLookup {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Lookup"
    }

    async fn search(&self, _query: &str) -> Result<Vec<ReferenceBook>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Respond(books) => Ok(books.clone()),
            Behavior::Fail(reason) => Err(LookupError::Network(reason.clone())),
        }
    }
}

/// Helper function to create a mock book for testing.
pub fn make_book(title: &str) -> ReferenceBook {
    ReferenceBook::new(title, "Test Author", "2000")
}
