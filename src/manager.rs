//! The list manager: all TBR and search state behind one controller.
//!
//! [`ListManager`] owns the TBR list, the current query, the current result
//! set and the loading flag. Every user intent is a method; the presentation
//! layer reads a [`Snapshot`] and never touches the state directly.
//!
//! Searching is split in two so the loading flag is observable while the
//! lookup is in flight:
//!
//! ```rust,no_run
//! use book_bound::manager::ListManager;
//! use book_bound::search::SearchEngine;
//! use book_bound::sources::StaticCatalog;
//!
//! # async fn example() {
//! let mut manager = ListManager::new(SearchEngine::offline(StaticCatalog::seeded()));
//! manager.set_query("hunger");
//!
//! let pending = manager.start_search();
//! assert!(manager.snapshot().loading);
//!
//! let done = pending.run().await;
//! manager.finish_search(done);
//! assert!(!manager.snapshot().loading);
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Config;
use crate::models::{ListItem, ReferenceBook, SearchOutcome, SearchResults};
use crate::search::SearchEngine;
use crate::sources::LookupError;

/// How adding a book that is already on the list is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Adding a book whose display text is already listed does nothing
    #[default]
    Reject,
    /// Every add appends a new entry
    Allow,
}

/// Read-only view of the manager state for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub query: String,
    pub results: Vec<ReferenceBook>,
    pub loading: bool,
    pub last_outcome: Option<SearchOutcome>,
    pub items: Vec<ListItem>,
}

/// A search that has been started but not yet applied
#[derive(Debug)]
#[must_use = "a pending search does nothing until it is run and finished"]
pub struct PendingSearch {
    seq: u64,
    query: String,
    engine: Arc<SearchEngine>,
}

impl PendingSearch {
    /// Query captured when the search started
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Perform the lookup. Does not touch the manager.
    pub async fn run(self) -> CompletedSearch {
        let results = self.engine.search(&self.query).await;
        CompletedSearch {
            seq: self.seq,
            results,
        }
    }
}

/// Results of a pending search, ready to be applied
#[derive(Debug, Clone)]
pub struct CompletedSearch {
    seq: u64,
    results: SearchResults,
}

/// Controller owning the TBR list and the transient search state
#[derive(Debug)]
pub struct ListManager {
    engine: Arc<SearchEngine>,
    policy: DuplicatePolicy,
    items: Vec<ListItem>,
    query: String,
    results: Vec<ReferenceBook>,
    last_outcome: Option<SearchOutcome>,
    loading: bool,
    // sequence number of the newest search started (or invalidated)
    latest_search: u64,
    last_id: i64,
}

impl ListManager {
    /// Create a manager with an empty list and duplicate rejection
    pub fn new(engine: SearchEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            policy: DuplicatePolicy::default(),
            items: Vec::new(),
            query: String::new(),
            results: Vec::new(),
            last_outcome: None,
            loading: false,
            latest_search: 0,
            last_id: 0,
        }
    }

    /// Build the manager described by the configuration
    pub fn from_config(config: &Config) -> Result<Self, LookupError> {
        Ok(Self::new(SearchEngine::from_config(config)?).with_policy(config.list.duplicates))
    }

    /// Set the duplicate policy
    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    // ========== SEARCH STATE ==========

    /// Replace the query text
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[ReferenceBook] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Which path produced the current results, if a search has completed
    pub fn last_outcome(&self) -> Option<&SearchOutcome> {
        self.last_outcome.as_ref()
    }

    /// Mark a search for the current query as in flight
    pub fn start_search(&mut self) -> PendingSearch {
        self.latest_search += 1;
        self.loading = true;
        tracing::debug!("search #{} started for {:?}", self.latest_search, self.query);

        PendingSearch {
            seq: self.latest_search,
            query: self.query.clone(),
            engine: Arc::clone(&self.engine),
        }
    }

    /// Apply a finished search.
    ///
    /// Results from a search that was superseded by a newer one, or by
    /// [`clear_search`](Self::clear_search), are dropped and `false` is
    /// returned; the loading flag then stays as the newer search left it.
    pub fn finish_search(&mut self, done: CompletedSearch) -> bool {
        if done.seq != self.latest_search {
            tracing::debug!(
                "discarding results of search #{} (latest is #{})",
                done.seq,
                self.latest_search
            );
            return false;
        }

        self.loading = false;
        self.results = done.results.books;
        self.last_outcome = Some(done.results.outcome);
        true
    }

    /// Search for the current query and apply the results
    pub async fn submit_search(&mut self) -> SearchOutcome {
        let pending = self.start_search();
        let done = pending.run().await;
        let outcome = done.results.outcome.clone();
        self.finish_search(done);
        outcome
    }

    /// Set the query, then search for it
    pub async fn search_for(&mut self, query: impl Into<String>) -> SearchOutcome {
        self.set_query(query);
        self.submit_search().await
    }

    /// Empty the result set and the query. Any search still in flight is abandoned.
    pub fn clear_search(&mut self) {
        self.results.clear();
        self.query.clear();
        self.last_outcome = None;
        self.loading = false;
        self.latest_search += 1;
    }

    // ========== TBR LIST ==========

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn get(&self, id: i64) -> Option<&ListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether an entry with exactly this text is listed
    pub fn contains_text(&self, text: &str) -> bool {
        self.items.iter().any(|item| item.display_text == text)
    }

    /// Add a search result to the list.
    ///
    /// Returns the new entry, or `None` when nothing was added: the book is
    /// the "No results" placeholder, or it is already listed under
    /// [`DuplicatePolicy::Reject`].
    pub fn add_from_search(&mut self, book: &ReferenceBook) -> Option<&ListItem> {
        if book.is_no_results() {
            return None;
        }

        let text = book.display_text();
        if self.policy == DuplicatePolicy::Reject && self.contains_text(&text) {
            tracing::debug!("{:?} is already on the list", text);
            return None;
        }

        Some(self.push(text))
    }

    /// Add the result at `index` (zero-based) of the current result set
    pub fn add_result(&mut self, index: usize) -> Option<&ListItem> {
        let book = self.results.get(index)?.clone();
        self.add_from_search(&book)
    }

    /// Add a free-text entry. Free text is never checked for duplicates.
    pub fn add_text(&mut self, text: impl Into<String>) -> &ListItem {
        self.push(text.into())
    }

    /// Flip the completed flag of the entry with this id. Returns whether one matched.
    pub fn toggle_completed(&mut self, id: i64) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                *item = item.toggled();
                true
            }
            None => false,
        }
    }

    /// Remove the entry with this id. Returns whether one was removed.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Copy of the current state for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            query: self.query.clone(),
            results: self.results.clone(),
            loading: self.loading,
            last_outcome: self.last_outcome.clone(),
            items: self.items.clone(),
        }
    }

    fn push(&mut self, text: String) -> &ListItem {
        let id = self.next_id();
        self.items.push(ListItem::new(id, text));
        &self.items[self.items.len() - 1]
    }

    /// Creation time in milliseconds, bumped past the previous id when the clock has not moved
    fn next_id(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }
}
