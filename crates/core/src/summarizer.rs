//! Keyword extraction pipeline.
//!
//! [`Summarizer`] runs one document through
//! `normalizing -> (outlier filtering)? -> validating` and returns the
//! confirmed keyword set. Normalization and outlier detection are
//! synchronous; the run only suspends while the validator's lookups are in
//! flight. Dropping the returned future cancels outstanding lookups.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lemmata_core::{CommonWords, Document, Summarizer, SummarizerConfig, WikipediaClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SummarizerConfig::builder().use_outlier_filter(true).build();
//! let wikipedia = WikipediaClient::new(Default::default())?;
//! let summarizer = Summarizer::with_config(Arc::new(CommonWords::embedded()), wikipedia, config);
//!
//! let doc = Document::new("https://example.com", "Rust 2024", "The Rust compiler team ...");
//! let keywords = summarizer.summarize(&doc).await?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::annotate::{Annotator, RuleAnnotator};
use crate::common_words::CommonWords;
use crate::document::Document;
use crate::error::Stage;
use crate::knowledge::KnowledgeBase;
use crate::normalize::Normalizer;
use crate::outlier::detect_outliers;
use crate::validate::{Validator, default_concurrency};
use crate::Result;

/// Pipeline options fixed at construction time.
///
/// # Example
///
/// ```rust
/// use lemmata_core::SummarizerConfig;
///
/// let config = SummarizerConfig::builder()
///     .only_nouns(true)
///     .use_outlier_filter(true)
///     .max_concurrent_lookups(4)
///     .build();
/// assert!(config.only_nouns);
/// ```
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Keep only common and proper nouns (default: false).
    pub only_nouns: bool,

    /// Keep only frequency outliers before validation (default: false).
    pub use_outlier_filter: bool,

    /// Size of the lookup worker pool (default: cores + 4, at most 32).
    pub max_concurrent_lookups: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self { only_nouns: false, use_outlier_filter: false, max_concurrent_lookups: default_concurrency() }
    }
}

impl SummarizerConfig {
    pub fn builder() -> SummarizerConfigBuilder {
        SummarizerConfigBuilder::new()
    }
}

/// Builder for SummarizerConfig.
pub struct SummarizerConfigBuilder {
    config: SummarizerConfig,
}

impl SummarizerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: SummarizerConfig::default() }
    }

    /// Sets whether only nouns are kept.
    pub fn only_nouns(mut self, value: bool) -> Self {
        self.config.only_nouns = value;
        self
    }

    /// Sets whether the outlier filter runs.
    pub fn use_outlier_filter(mut self, value: bool) -> Self {
        self.config.use_outlier_filter = value;
        self
    }

    /// Sets the lookup worker pool size.
    pub fn max_concurrent_lookups(mut self, value: usize) -> Self {
        self.config.max_concurrent_lookups = value.max(1);
        self
    }

    /// Builds the config.
    pub fn build(self) -> SummarizerConfig {
        self.config
    }
}

impl Default for SummarizerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts validated keywords from documents.
///
/// A summarizer is immutable once built and can serve concurrent runs.
#[derive(Debug)]
pub struct Summarizer<K, A = RuleAnnotator> {
    normalizer: Normalizer<A>,
    validator: Validator<K>,
    config: SummarizerConfig,
}

impl<K: KnowledgeBase> Summarizer<K, RuleAnnotator> {
    /// Default configuration with the rule annotator.
    pub fn new(common_words: Arc<CommonWords>, knowledge: K) -> Self {
        Self::with_config(common_words, knowledge, SummarizerConfig::default())
    }

    pub fn with_config(common_words: Arc<CommonWords>, knowledge: K, config: SummarizerConfig) -> Self {
        Self::with_annotator(RuleAnnotator::new(), common_words, knowledge, config)
    }
}

impl<K: KnowledgeBase, A: Annotator> Summarizer<K, A> {
    pub fn with_annotator(annotator: A, common_words: Arc<CommonWords>, knowledge: K, config: SummarizerConfig) -> Self {
        let normalizer = Normalizer::with_annotator(annotator, common_words);
        let validator = Validator::new(knowledge).with_max_concurrency(config.max_concurrent_lookups);
        Self { normalizer, validator, config }
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Candidate terms for a document, before validation.
    pub fn candidates(&self, document: &Document) -> Result<BTreeSet<String>> {
        let lemmas = self
            .normalizer
            .normalize(&document.text(), self.config.only_nouns)
            .map_err(|e| e.in_stage(Stage::Normalizing))?;

        tracing::debug!(url = %document.url, lemmas = lemmas.len(), "normalized document");

        let candidates = if self.config.use_outlier_filter {
            let outliers = detect_outliers(&lemmas);
            tracing::debug!(candidates = outliers.len(), "outlier filtering done");
            outliers
        } else {
            lemmas.into_iter().collect()
        };

        Ok(candidates)
    }

    /// Runs the full pipeline and returns the confirmed keywords.
    ///
    /// A failed lookup only drops its own term. Any other failure aborts
    /// the run and no partial keyword set is returned.
    pub async fn summarize(&self, document: &Document) -> Result<BTreeSet<String>> {
        let candidates = self.candidates(document)?;

        tracing::debug!(url = %document.url, candidates = candidates.len(), "validating candidates");
        let keywords = self.validator.validate(&candidates).await;

        tracing::debug!(url = %document.url, keywords = keywords.len(), "summarized document");
        Ok(keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LemmataError;
    use crate::annotate::Token;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Runtime::new().unwrap().block_on(future)
    }

    struct Echo;

    impl KnowledgeBase for Echo {
        async fn search(&self, term: &str) -> Result<Vec<String>> {
            Ok(vec![term.to_string()])
        }
    }

    struct Failing;

    impl Annotator for Failing {
        fn annotate(&self, _text: &str) -> Result<Vec<Token>> {
            Err(LemmataError::Annotation("model unavailable".to_string()))
        }
    }

    fn common() -> Arc<CommonWords> {
        Arc::new(CommonWords::embedded())
    }

    #[test]
    fn test_summarizer_config_default() {
        let config = SummarizerConfig::default();
        assert!(!config.only_nouns);
        assert!(!config.use_outlier_filter);
        assert!(config.max_concurrent_lookups >= 1);
    }

    #[test]
    fn test_summarizer_config_builder() {
        let config = SummarizerConfig::builder()
            .only_nouns(true)
            .use_outlier_filter(true)
            .max_concurrent_lookups(0)
            .build();

        assert!(config.only_nouns);
        assert!(config.use_outlier_filter);
        assert_eq!(config.max_concurrent_lookups, 1);
    }

    #[test]
    fn test_summarize_end_to_end() {
        let summarizer = Summarizer::new(common(), Echo);
        let doc = Document::new("https://example.com", "Those are words", "Those are not cleaned. this is text.");

        let keywords = block_on(summarizer.summarize(&doc)).unwrap();
        assert_eq!(keywords, BTreeSet::from(["cleaned".to_string(), "text".to_string()]));
    }

    #[test]
    fn test_outlier_filter_drops_small_documents() {
        let config = SummarizerConfig::builder().use_outlier_filter(true).build();
        let summarizer = Summarizer::with_config(common(), Echo, config);
        let doc = Document::new("https://example.com", "Those are words", "Those are not cleaned. this is text.");

        let keywords = block_on(summarizer.summarize(&doc)).unwrap();
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_annotation_failure_aborts_run() {
        let summarizer = Summarizer::with_annotator(Failing, common(), Echo, SummarizerConfig::default());
        let doc = Document::new("https://example.com", "title", "content");

        let result = block_on(summarizer.summarize(&doc));
        assert!(matches!(result, Err(LemmataError::Stage { stage: Stage::Normalizing, .. })));
    }

    #[test]
    fn test_candidates_are_deduplicated() {
        let summarizer = Summarizer::new(common(), Echo);
        let doc = Document::new("u", "kernel", "kernel kernel compiler");

        let candidates = summarizer.candidates(&doc).unwrap();
        assert_eq!(candidates, BTreeSet::from(["compiler".to_string(), "kernel".to_string()]));
    }
}
