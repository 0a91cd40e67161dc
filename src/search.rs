//! Remote-then-local title search.
//!
//! A [`SearchEngine`] asks its remote lookup first. When that fails for any
//! reason (transport error, bad status, undecodable body, timeout) it filters
//! the static catalog instead, and records which path answered in the
//! [`SearchOutcome`]. Failures are logged, never returned.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::models::{ReferenceBook, SearchOutcome, SearchResults, DEFAULT_MAX_RESULTS};
use crate::sources::{BookLookup, LookupError, OpenLibrarySource, StaticCatalog};
use crate::utils::HttpClient;

/// Title search over an optional remote lookup with a catalog fallback
#[derive(Debug, Clone)]
pub struct SearchEngine {
    remote: Option<Arc<dyn BookLookup>>,
    catalog: StaticCatalog,
    max_results: usize,
    sentinel: bool,
}

impl SearchEngine {
    /// Create an engine that tries `remote` before the catalog
    pub fn new(remote: Arc<dyn BookLookup>, catalog: StaticCatalog) -> Self {
        Self {
            remote: Some(remote),
            catalog,
            max_results: DEFAULT_MAX_RESULTS,
            sentinel: true,
        }
    }

    /// Create an engine that only ever filters the catalog
    pub fn offline(catalog: StaticCatalog) -> Self {
        Self {
            remote: None,
            catalog,
            max_results: DEFAULT_MAX_RESULTS,
            sentinel: true,
        }
    }

    /// Build the engine described by the configuration, with the seeded catalog
    pub fn from_config(config: &Config) -> Result<Self, LookupError> {
        let engine = if config.lookup.enabled {
            let timeout = match config.lookup.timeout_seconds {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            };
            let client = HttpClient::with_timeout(timeout)?;
            let source = OpenLibrarySource::with_client(client, config.lookup.base_url.clone());
            Self::new(Arc::new(source), StaticCatalog::seeded())
        } else {
            Self::offline(StaticCatalog::seeded())
        };

        Ok(engine
            .max_results(config.search.max_results)
            .sentinel(config.search.sentinel))
    }

    /// Set the result cap
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Enable/disable the "No results" placeholder
    pub fn sentinel(mut self, enabled: bool) -> Self {
        self.sentinel = enabled;
        self
    }

    /// The fallback catalog
    pub fn catalog(&self) -> &StaticCatalog {
        &self.catalog
    }

    /// Whether a remote lookup is configured
    pub fn is_online(&self) -> bool {
        self.remote.is_some()
    }

    /// Filter the catalog only, capped and with the placeholder applied
    pub fn offline_search(&self, query: &str) -> Vec<ReferenceBook> {
        self.finish(self.catalog.filter(query))
    }

    /// Run the two-step search
    pub async fn search(&self, query: &str) -> SearchResults {
        let Some(remote) = &self.remote else {
            return SearchResults::new(query, self.offline_search(query), SearchOutcome::Offline);
        };

        match remote.search(query).await {
            Ok(books) => {
                tracing::debug!("{} returned {} books", remote.name(), books.len());
                SearchResults::new(query, self.finish(books), SearchOutcome::Remote)
            }
            Err(e) => {
                tracing::warn!(
                    "{} lookup failed, using reference catalog: {}",
                    remote.name(),
                    e
                );
                SearchResults::new(
                    query,
                    self.offline_search(query),
                    SearchOutcome::Fallback {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }

    fn finish(&self, mut books: Vec<ReferenceBook>) -> Vec<ReferenceBook> {
        books.truncate(self.max_results);
        if books.is_empty() && self.sentinel {
            books.push(ReferenceBook::no_results());
        }
        books
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::mock::make_book;
    use crate::sources::MockLookup;

    fn titles(books: &[ReferenceBook]) -> Vec<&str> {
        books.iter().map(|b| b.title.as_str()).collect()
    }

    fn big_catalog() -> StaticCatalog {
        StaticCatalog::new((1..=8).map(|i| make_book(&format!("Saga {}", i))).collect())
    }

    #[tokio::test]
    async fn test_remote_success() {
        let remote = Arc::new(MockLookup::responding(vec![make_book("Dune")]));
        let engine = SearchEngine::new(remote.clone(), StaticCatalog::seeded());

        let results = engine.search("dune").await;
        assert_eq!(results.outcome, SearchOutcome::Remote);
        assert_eq!(titles(&results.books), vec!["Dune"]);
        assert_eq!(results.query, "dune");
        assert_eq!(remote.calls(), 1);
    }

    #[tokio::test]
    async fn test_remote_results_are_capped() {
        let books = (1..=12).map(|i| make_book(&format!("Book {}", i))).collect();
        let engine = SearchEngine::new(Arc::new(MockLookup::responding(books)), StaticCatalog::seeded());

        let results = engine.search("book").await;
        assert_eq!(results.books.len(), 5);
        assert_eq!(results.books[4].title, "Book 5");
    }

    #[tokio::test]
    async fn test_remote_empty_gives_sentinel() {
        let engine = SearchEngine::new(Arc::new(MockLookup::new()), StaticCatalog::seeded());

        let results = engine.search("hunger").await;
        assert_eq!(results.outcome, SearchOutcome::Remote);
        assert!(results.is_empty_placeholder());
    }

    #[tokio::test]
    async fn test_failure_matches_offline_filter() {
        let engine = SearchEngine::new(
            Arc::new(MockLookup::failing("connection refused")),
            StaticCatalog::seeded(),
        );

        for query in ["the", "HUNGER", "", "zzz"] {
            let results = engine.search(query).await;
            assert_eq!(results.books, engine.offline_search(query));
            match results.outcome {
                SearchOutcome::Fallback { reason } => assert!(reason.contains("connection refused")),
                other => panic!("Expected fallback, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_offline_engine_never_calls_remote() {
        let engine = SearchEngine::offline(StaticCatalog::seeded());
        let results = engine.search("the").await;
        assert_eq!(results.outcome, SearchOutcome::Offline);
        assert_eq!(titles(&results.books), vec!["A Door in the Dark", "The Hunger Games"]);
        assert!(!engine.is_online());
    }

    #[test]
    fn test_offline_search_caps_in_catalog_order() {
        let engine = SearchEngine::offline(big_catalog());
        assert_eq!(
            titles(&engine.offline_search("saga")),
            vec!["Saga 1", "Saga 2", "Saga 3", "Saga 4", "Saga 5"]
        );
    }

    #[test]
    fn test_offline_search_no_match_sentinel() {
        let engine = SearchEngine::offline(StaticCatalog::seeded());
        assert_eq!(engine.offline_search("zzz"), vec![ReferenceBook::no_results()]);
    }

    #[test]
    fn test_sentinel_disabled_and_custom_cap() {
        let engine = SearchEngine::offline(big_catalog())
            .sentinel(false)
            .max_results(3);
        assert!(engine.offline_search("zzz").is_empty());
        assert_eq!(engine.offline_search("").len(), 3);
    }

    #[test]
    fn test_from_config_offline() {
        let mut config = Config::default();
        config.lookup.enabled = false;
        config.search.max_results = 2;

        let engine = SearchEngine::from_config(&config).unwrap();
        assert!(!engine.is_online());
        assert_eq!(engine.offline_search("").len(), 2);
    }

    #[test]
    fn test_from_config_online() {
        let engine = SearchEngine::from_config(&Config::default()).unwrap();
        assert!(engine.is_online());
        assert_eq!(engine.catalog().len(), 5);
    }
}
