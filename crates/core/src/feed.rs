//! RSS and Atom feed source.
//!
//! Feeds are fetched by name relative to a base URL and read with XPath.
//! Element names are matched by `local-name()` so RSS 2.0, RSS 1.0 and Atom
//! documents all work without namespace bindings.

use reqwest::Client;
use sxd_document::parser;
use sxd_xpath::nodeset::Node;
use sxd_xpath::{Context, Factory, Value, XPath};

use crate::document::{Document, html_to_text};
use crate::fetch::{FetchConfig, build_client, get_text, parse_url};
use crate::{LemmataError, Result};

const ENTRIES: &str = "//*[local-name()='item' or local-name()='entry']";
const TITLE: &str = "string(*[local-name()='title'][1])";
const LINK_TEXT: &str = "string(*[local-name()='link'][1])";
const LINK_HREF: &str = "string(*[local-name()='link'][1]/@href)";
const SUMMARY: &[&str] = &[
    "string(*[local-name()='description'][1])",
    "string(*[local-name()='summary'][1])",
    "string(*[local-name()='content'][1])",
    "string(*[local-name()='encoded'][1])",
];

/// Where feeds are fetched from.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Prefix the feed name is appended to.
    pub base_url: String,
    pub fetch: FetchConfig,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { base_url: "http://feeds.feedburner.com/".to_string(), fetch: FetchConfig::default() }
    }
}

/// Fetches feeds by name and maps their entries to documents.
#[derive(Debug, Clone)]
pub struct FeedSource {
    client: Client,
    config: FeedConfig,
}

impl FeedSource {
    pub fn new(config: FeedConfig) -> Result<Self> {
        parse_url(&config.base_url)?;
        let client = build_client(&config.fetch)?;
        Ok(Self { client, config })
    }

    /// URL of the feed called `name`.
    pub fn feed_url(&self, name: &str) -> Result<url::Url> {
        let base = if self.config.base_url.ends_with('/') {
            self.config.base_url.clone()
        } else {
            format!("{}/", self.config.base_url)
        };
        parse_url(&format!("{}{}", base, name.trim()))
    }

    /// Downloads the raw feed body.
    ///
    /// A blank name fails before any request is made; a 404 becomes
    /// [`LemmataError::FeedNotFound`].
    pub async fn fetch_latest(&self, name: &str) -> Result<String> {
        if name.trim().is_empty() {
            return Err(LemmataError::EmptyFeedName);
        }

        let url = self.feed_url(name)?;
        tracing::info!(feed = name.trim(), url = %url, "fetching feed");

        match get_text(&self.client, url, &[], &self.config.fetch).await {
            Err(LemmataError::HttpStatus { status: 404, .. }) => Err(LemmataError::FeedNotFound(name.trim().to_string())),
            other => other,
        }
    }

    /// Fetches and parses the feed called `name`.
    pub async fn documents(&self, name: &str) -> Result<Vec<Document>> {
        let body = self.fetch_latest(name).await?;
        let documents = parse_feed(&body)?;
        tracing::info!(feed = name.trim(), entries = documents.len(), "parsed feed");
        Ok(documents)
    }
}

fn compile(factory: &Factory, xpath: &str) -> Result<XPath> {
    factory
        .build(xpath)
        .map_err(|e| LemmataError::XPathError(format!("Invalid XPath '{}': {}", xpath, e)))?
        .ok_or_else(|| LemmataError::XPathError(format!("Invalid XPath: {}", xpath)))
}

fn string_at<'d>(xpath: &XPath, context: &Context<'d>, node: Node<'d>) -> Result<String> {
    let value = xpath.evaluate(context, node)?;
    Ok(match value {
        Value::String(s) => s.trim().to_string(),
        Value::Nodeset(nodes) => nodes.document_order_first().map(|n| n.string_value()).unwrap_or_default(),
        Value::Boolean(_) | Value::Number(_) => String::new(),
    })
}

/// Maps every feed entry to a [`Document`], in document order.
///
/// # Example
///
/// ```rust
/// use lemmata_core::parse_feed;
///
/// let xml = r#"<rss><channel><item>
///     <title>Rust 1.85</title>
///     <link>https://blog.rust-lang.org/</link>
///     <description>&lt;p&gt;The 2024 edition&lt;/p&gt;</description>
/// </item></channel></rss>"#;
///
/// let docs = parse_feed(xml).unwrap();
/// assert_eq!(docs[0].title, "Rust 1.85");
/// assert_eq!(docs[0].content, "The 2024 edition");
/// ```
pub fn parse_feed(xml: &str) -> Result<Vec<Document>> {
    let package = parser::parse(xml).map_err(|e| LemmataError::FeedParseError(e.to_string()))?;
    let document = package.as_document();

    let factory = Factory::new();
    let context = Context::new();
    let entries = compile(&factory, ENTRIES)?;
    let title = compile(&factory, TITLE)?;
    let link_text = compile(&factory, LINK_TEXT)?;
    let link_href = compile(&factory, LINK_HREF)?;
    let summaries = SUMMARY.iter().map(|x| compile(&factory, x)).collect::<Result<Vec<_>>>()?;

    let nodes = match entries.evaluate(&context, document.root())? {
        Value::Nodeset(nodes) => nodes.document_order(),
        _ => Vec::new(),
    };

    let mut documents = Vec::with_capacity(nodes.len());
    for node in nodes {
        let mut url = string_at(&link_text, &context, node)?;
        if url.is_empty() {
            url = string_at(&link_href, &context, node)?;
        }

        let mut content = String::new();
        for summary in &summaries {
            content = string_at(summary, &context, node)?;
            if !content.is_empty() {
                break;
            }
        }

        documents.push(Document {
            url,
            title: html_to_text(&string_at(&title, &context, node)?),
            content: html_to_text(&content),
        });
    }

    Ok(documents)
}
