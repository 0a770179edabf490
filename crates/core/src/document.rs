//! Feed entry input type.

use serde::{Deserialize, Serialize};

/// A single feed entry handed to the pipeline.
///
/// Documents are immutable input: the pipeline only reads the title and
/// content, and the URL is carried along for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Link to the original article.
    pub url: String,
    /// Entry title.
    pub title: String,
    /// Entry body as plain text.
    pub content: String,
}

impl Document {
    /// Creates a new Document from its parts.
    pub fn new(url: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { url: url.into(), title: title.into(), content: content.into() }
    }

    /// Title and content joined by a single space, as fed to annotation.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }
}

/// Reduces an HTML fragment to plain text.
///
/// Text nodes are joined with spaces so adjacent block elements do not run
/// together, then whitespace is collapsed.
pub fn html_to_text(html: &str) -> String {
    let fragment = scraper::Html::parse_fragment(html);
    let joined = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}
