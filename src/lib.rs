//! # Book Bound
//!
//! Search for books and keep a to-be-read (TBR) list.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (ReferenceBook, ListItem, SearchResults)
//! - [`sources`]: Lookup backends behind the [`BookLookup`] trait (Open Library, static catalog)
//! - [`search`]: Remote-then-local search with a recorded [`SearchOutcome`](models::SearchOutcome)
//! - [`manager`]: The [`ListManager`] controller owning all list and search state
//! - [`shell`]: Line commands for the interactive front end
//! - [`ui`]: Terminal rendering
//! - [`utils`]: HTTP client and text helpers
//! - [`config`]: Configuration management

pub mod config;
pub mod manager;
pub mod models;
pub mod search;
pub mod shell;
pub mod sources;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use manager::{DuplicatePolicy, ListManager, Snapshot};
pub use models::{ListItem, ReferenceBook};
pub use search::SearchEngine;
pub use sources::{BookLookup, StaticCatalog};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
