//! Book model representing a search result, from the static catalog or a remote lookup.

use serde::{Deserialize, Serialize};

/// Author placeholder used when a lookup document carries no author names
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Date placeholder used when a lookup document carries no publish year
pub const UNKNOWN_DATE: &str = "Unknown Date";

/// Title of the placeholder entry shown in place of an empty result set
pub const NO_RESULTS_TITLE: &str = "No results";

/// A book record shown as a search result
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceBook {
    /// Book title
    pub title: String,

    /// Author names, comma-separated when there are several
    pub author: String,

    /// Release date or first-publish year
    pub release_date: String,
}

impl ReferenceBook {
    /// Create a new book
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        release_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            release_date: release_date.into(),
        }
    }

    /// The placeholder entry substituted for an empty result set
    pub fn no_results() -> Self {
        Self::new(NO_RESULTS_TITLE, "", "")
    }

    /// Whether this is the "No results" placeholder
    pub fn is_no_results(&self) -> bool {
        self.title == NO_RESULTS_TITLE && self.author.is_empty() && self.release_date.is_empty()
    }

    /// Case-insensitive substring match against the title only
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }

    /// Canonical text used for TBR entries and duplicate detection
    pub fn display_text(&self) -> String {
        format!("{} by {} ({})", self.title, self.author, self.release_date)
    }
}

impl std::fmt::Display for ReferenceBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_text())
    }
}

/// Builder for books decoded from a lookup response, where every field may be missing
#[derive(Debug, Clone, Default)]
pub struct ReferenceBookBuilder {
    title: String,
    authors: Vec<String>,
    year: Option<i64>,
}

impl ReferenceBookBuilder {
    /// Create a new builder with the title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the author names
    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Set the first-publish year
    pub fn year(mut self, year: Option<i64>) -> Self {
        self.year = year;
        self
    }

    /// Build the book, filling in placeholders for missing data
    pub fn build(self) -> ReferenceBook {
        let author = if self.authors.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            self.authors.join(", ")
        };

        let release_date = self
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| UNKNOWN_DATE.to_string());

        ReferenceBook {
            title: self.title,
            author,
            release_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text() {
        let book = ReferenceBook::new("Dune", "Frank Herbert", "1965");
        assert_eq!(book.display_text(), "Dune by Frank Herbert (1965)");
        assert_eq!(book.to_string(), "Dune by Frank Herbert (1965)");
    }

    #[test]
    fn test_title_matches_is_case_insensitive() {
        let book = ReferenceBook::new("The Hunger Games", "Suzanne Collins", "2008-09-14");
        assert!(book.title_matches("hunger"));
        assert!(book.title_matches("THE"));
        assert!(book.title_matches(""));
        assert!(!book.title_matches("collins"));
        assert!(!book.title_matches("2008"));
    }

    #[test]
    fn test_builder_placeholders() {
        let book = ReferenceBookBuilder::new("Untitled Draft").build();
        assert_eq!(book.author, UNKNOWN_AUTHOR);
        assert_eq!(book.release_date, UNKNOWN_DATE);
    }

    #[test]
    fn test_builder_joins_authors() {
        let book = ReferenceBookBuilder::new("Good Omens")
            .authors(["Terry Pratchett", "Neil Gaiman"])
            .year(Some(1990))
            .build();
        assert_eq!(book.author, "Terry Pratchett, Neil Gaiman");
        assert_eq!(book.release_date, "1990");
    }

    #[test]
    fn test_no_results_sentinel() {
        let sentinel = ReferenceBook::no_results();
        assert_eq!(sentinel.title, "No results");
        assert!(sentinel.author.is_empty());
        assert!(sentinel.release_date.is_empty());
        assert!(sentinel.is_no_results());
        assert!(!ReferenceBook::new("No results", "Someone", "2001").is_no_results());
    }

    #[test]
    fn test_serializes_release_date_camel_case() {
        let json = serde_json::to_value(ReferenceBook::new("Dune", "Frank Herbert", "1965")).unwrap();
        assert_eq!(json["releaseDate"], "1965");
    }
}
