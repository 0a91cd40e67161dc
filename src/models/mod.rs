//! Core data models for books, TBR entries and search results.

mod book;
mod item;
mod search;

pub use book::{
    ReferenceBook, ReferenceBookBuilder, NO_RESULTS_TITLE, UNKNOWN_AUTHOR, UNKNOWN_DATE,
};
pub use item::ListItem;
pub use search::{SearchOutcome, SearchResults, DEFAULT_MAX_RESULTS};
