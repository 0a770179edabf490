//! Shared HTTP plumbing for the feed source and the knowledge base.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{LemmataError, Result};

/// HTTP client configuration.
///
/// This struct controls timeout and user agent settings for HTTP requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: format!("lemmata/{} (keyword extraction)", env!("CARGO_PKG_VERSION")) }
    }
}

/// Builds a client that applies the configured timeout and User-Agent to
/// every request.
pub fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(LemmataError::HttpError)
}

/// Parses and checks an absolute http(s) URL.
pub fn parse_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| LemmataError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(LemmataError::InvalidUrl(format!("unsupported scheme '{}'", other))),
    }
}

/// Performs a GET request with optional query parameters and returns the
/// body of a successful response.
pub async fn get_text(client: &Client, url: Url, query: &[(&str, &str)], config: &FetchConfig) -> Result<String> {
    let url_string = url.to_string();

    let response = client.get(url).query(query).send().await.map_err(|e| {
        if e.is_timeout() {
            LemmataError::Timeout { timeout: config.timeout }
        } else {
            LemmataError::HttpError(e)
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LemmataError::HttpStatus { url: url_string, status: status.as_u16() });
    }

    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("lemmata"));
    }

    #[test]
    fn test_parse_url() {
        assert!(parse_url("http://feeds.feedburner.com/TechCrunch").is_ok());
        assert!(parse_url("https://en.wikipedia.org/w/api.php").is_ok());
        assert!(matches!(parse_url("not-a-url"), Err(LemmataError::InvalidUrl(_))));
        assert!(matches!(parse_url("ftp://example.com"), Err(LemmataError::InvalidUrl(_))));
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(&FetchConfig::default()).is_ok());
    }
}
