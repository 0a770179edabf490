//! Per-entry keyword reports for display.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::Result;
use crate::document::Document;

/// Output format for keyword reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Keywords extracted from one feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordReport {
    pub url: String,
    pub title: String,
    pub keywords: BTreeSet<String>,
}

impl KeywordReport {
    pub fn new(document: &Document, keywords: BTreeSet<String>) -> Self {
        Self { url: document.url.clone(), title: document.title.clone(), keywords }
    }

    /// URL, title and keyword set on separate lines, followed by a blank line.
    pub fn to_text(&self) -> String {
        let keywords = self.keywords.iter().map(|k| format!("'{}'", k)).collect::<Vec<_>>().join(", ");
        format!("{}\n{}\n{{{}}}\n\n", self.url, self.title, keywords)
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Renders a batch of reports.
///
/// JSON output is a single pretty-printed array.
pub fn render_reports(reports: &[KeywordReport], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(reports.iter().map(KeywordReport::to_text).collect()),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> KeywordReport {
        let doc = Document::new("https://example.com/a", "Kernel news", "body");
        KeywordReport::new(&doc, ["kernel".to_string(), "compiler".to_string()].into_iter().collect())
    }

    #[test]
    fn test_to_text() {
        assert_eq!(report().to_text(), "https://example.com/a\nKernel news\n{'compiler', 'kernel'}\n\n");
    }

    #[test]
    fn test_to_text_empty_keywords() {
        let doc = Document::new("u", "t", "c");
        assert_eq!(KeywordReport::new(&doc, BTreeSet::new()).to_text(), "u\nt\n{}\n\n");
    }

    #[test]
    fn test_to_json() {
        let json = report().to_json().unwrap();
        assert_eq!(json["url"], "https://example.com/a");
        assert_eq!(json["keywords"][0], "compiler");
    }

    #[test]
    fn test_render_json_array() {
        let rendered = render_reports(&[report(), report()], ReportFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    }
}
