//! Open Library search source implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::{ReferenceBook, ReferenceBookBuilder};
use crate::sources::{BookLookup, LookupError};
use crate::utils::HttpClient;

/// Default Open Library endpoint
pub const OPEN_LIBRARY_API_BASE: &str = "https://openlibrary.org";

/// Open Library search source
///
/// Uses the public `search.json` endpoint, which needs no API key.
#[derive(Debug, Clone)]
pub struct OpenLibrarySource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl OpenLibrarySource {
    /// Create a source with a prepared client and base URL (mirrors, test servers)
    pub fn with_client(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client: Arc::new(client),
            base_url: base_url.into(),
        }
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search.json?q={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(query)
        )
    }

    /// Map one search document into a book
    fn parse_doc(doc: OLDoc) -> ReferenceBook {
        ReferenceBookBuilder::new(doc.title.unwrap_or_default())
            .authors(doc.author_name.unwrap_or_default())
            .year(doc.first_publish_year)
            .build()
    }

    /// Decode a raw response body
    pub(crate) fn parse_body(body: &str) -> Result<Vec<ReferenceBook>, LookupError> {
        let data: OLResponse = serde_json::from_str(body)?;
        Ok(data.docs.into_iter().map(Self::parse_doc).collect())
    }
}

#[async_trait]
impl BookLookup for OpenLibrarySource {
    fn id(&self) -> &str {
        "openlibrary"
    }

    fn name(&self) -> &str {
        "Open Library"
    }

    async fn search(&self, query: &str) -> Result<Vec<ReferenceBook>, LookupError> {
        let url = self.search_url(query);
        tracing::debug!("Open Library request: {}", url);

        let response = self.client.client().get(&url).send().await?;

        if !response.status().is_success() {
            return Err(LookupError::Api(format!(
                "Open Library returned status: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let books = Self::parse_body(&body)?;

        tracing::debug!("Open Library returned {} documents for {:?}", books.len(), query);
        Ok(books)
    }
}

// ===== Open Library API Types =====

#[derive(Debug, Deserialize)]
struct OLResponse {
    docs: Vec<OLDoc>,
}

#[derive(Debug, Deserialize)]
struct OLDoc {
    title: Option<String>,
    author_name: Option<Vec<String>>,
    first_publish_year: Option<i64>,
}
