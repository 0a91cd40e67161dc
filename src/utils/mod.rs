//! Utility modules.
//!
//! - [`HttpClient`]: reqwest client with a user agent and timeouts
//! - [`truncate_with_ellipsis`]: unicode-aware truncation for table cells

mod http;
mod text;

pub use http::{HttpClient, DEFAULT_TIMEOUT};
pub use text::truncate_with_ellipsis;
