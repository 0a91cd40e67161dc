//! Static reference catalog used when the remote lookup is unavailable.

use async_trait::async_trait;

use crate::models::ReferenceBook;
use crate::sources::{BookLookup, LookupError};

/// Read-only list of books seeded at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCatalog {
    books: Vec<ReferenceBook>,
}

impl StaticCatalog {
    /// Create a catalog from any list of books
    pub fn new(books: Vec<ReferenceBook>) -> Self {
        Self { books }
    }

    /// The built-in reference list
    pub fn seeded() -> Self {
        Self::new(vec![
            ReferenceBook::new("A Door in the Dark", "Scott Reintgen", "2024-03-05"),
            ReferenceBook::new("Children of Blood and Bone", "Tomi Adeyemi", "2018-03-06"),
            ReferenceBook::new("You've Reached Sam", "Dustin Thao", "2021-11-09"),
            ReferenceBook::new("The Hunger Games", "Suzanne Collins", "2008-09-14"),
            ReferenceBook::new("Begin Again", "Emma Lord", "2024-01-09"),
        ])
    }

    /// All books, in catalog order
    pub fn books(&self) -> &[ReferenceBook] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Every book whose title contains the query, ignoring case.
    ///
    /// An empty query matches the whole catalog.
    pub fn filter(&self, query: &str) -> Vec<ReferenceBook> {
        self.books
            .iter()
            .filter(|book| book.title_matches(query))
            .cloned()
            .collect()
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl BookLookup for StaticCatalog {
    fn id(&self) -> &str {
        "catalog"
    }

    fn name(&self) -> &str {
        "Reference Catalog"
    }

    async fn search(&self, query: &str) -> Result<Vec<ReferenceBook>, LookupError> {
        Ok(self.filter(query))
    }
}
