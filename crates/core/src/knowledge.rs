//! Knowledge-base lookups used to confirm candidate keywords.
//!
//! A [`KnowledgeBase`] answers a search term with an ordered list of result
//! titles. The validator only tests membership, so ranking is irrelevant.

use std::future::Future;

use crate::Result;

/// Search-by-term service.
///
/// Implementations must be shareable across tasks: the validator issues
/// one concurrent lookup per candidate term.
pub trait KnowledgeBase: Send + Sync + 'static {
    /// Returns the result titles for `term`.
    fn search(&self, term: &str) -> impl Future<Output = Result<Vec<String>>> + Send;
}

#[cfg(feature = "wikipedia")]
pub use wikipedia::{WikipediaClient, WikipediaConfig};

#[cfg(feature = "wikipedia")]
mod wikipedia {
    use reqwest::Client;
    use serde::Deserialize;
    use url::Url;

    use super::KnowledgeBase;
    use crate::{LemmataError, Result};
    use crate::fetch::{FetchConfig, build_client, get_text, parse_url};

    /// Settings for the MediaWiki search API.
    #[derive(Debug, Clone)]
    pub struct WikipediaConfig {
        /// `api.php` endpoint.
        pub endpoint: String,
        /// Maximum titles returned per search.
        pub results: usize,
        pub fetch: FetchConfig,
    }

    impl Default for WikipediaConfig {
        fn default() -> Self {
            Self { endpoint: "https://en.wikipedia.org/w/api.php".to_string(), results: 10, fetch: FetchConfig::default() }
        }
    }

    /// Full-text title search against Wikipedia.
    #[derive(Debug, Clone)]
    pub struct WikipediaClient {
        client: Client,
        endpoint: Url,
        config: WikipediaConfig,
    }

    #[derive(Debug, Deserialize)]
    struct SearchResponse {
        #[serde(default)]
        query: Option<SearchQuery>,
        #[serde(default)]
        error: Option<ApiError>,
    }

    /// MediaWiki reports API errors in the body of a 200 response.
    #[derive(Debug, Deserialize)]
    struct ApiError {
        #[serde(default)]
        code: String,
        #[serde(default)]
        info: String,
    }

    #[derive(Debug, Deserialize)]
    struct SearchQuery {
        #[serde(default)]
        search: Vec<SearchHit>,
    }

    #[derive(Debug, Deserialize)]
    struct SearchHit {
        title: String,
    }

    impl WikipediaClient {
        pub fn new(config: WikipediaConfig) -> Result<Self> {
            let endpoint = parse_url(&config.endpoint)?;
            let client = build_client(&config.fetch)?;
            Ok(Self { client, endpoint, config })
        }

        pub fn config(&self) -> &WikipediaConfig {
            &self.config
        }
    }

    impl KnowledgeBase for WikipediaClient {
        async fn search(&self, term: &str) -> Result<Vec<String>> {
            let limit = self.config.results.to_string();
            let query = [
                ("action", "query"),
                ("list", "search"),
                ("srsearch", term),
                ("srlimit", limit.as_str()),
                ("srprop", ""),
                ("format", "json"),
            ];

            let body = get_text(&self.client, self.endpoint.clone(), &query, &self.config.fetch).await?;
            parse_search_response(term, &body)
        }
    }

    /// Extracts result titles from a `list=search` response body.
    ///
    /// An `error` object fails the lookup for `term`; a response without
    /// `query` means no results.
    pub(super) fn parse_search_response(term: &str, body: &str) -> Result<Vec<String>> {
        let response: SearchResponse = serde_json::from_str(body)?;
        if let Some(error) = response.error {
            let reason = if error.info.is_empty() { error.code } else { format!("{}: {}", error.code, error.info) };
            return Err(LemmataError::Lookup { term: term.to_string(), reason });
        }
        Ok(response
            .query
            .map(|q| q.search.into_iter().map(|hit| hit.title).collect())
            .unwrap_or_default())
    }
}
