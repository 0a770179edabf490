//! Text normalization into candidate lemmas.
//!
//! Raw text is lower-cased, annotated, and filtered down to the tokens that
//! can carry meaning on their own. The result keeps source order and
//! duplicates, since frequency matters to the outlier detector.

use std::sync::Arc;

use crate::Result;
use crate::annotate::{Annotator, RuleAnnotator, Token};
use crate::common_words::CommonWords;

/// Minimum token length in characters.
pub const MIN_TOKEN_LEN: usize = 2;

/// Filters annotated text down to meaningful lemmas.
#[derive(Debug, Clone)]
pub struct Normalizer<A = RuleAnnotator> {
    annotator: A,
    common_words: Arc<CommonWords>,
}

impl Normalizer<RuleAnnotator> {
    /// Normalizer backed by the built-in rule annotator.
    pub fn new(common_words: Arc<CommonWords>) -> Self {
        Self::with_annotator(RuleAnnotator::new(), common_words)
    }
}

impl<A: Annotator> Normalizer<A> {
    pub fn with_annotator(annotator: A, common_words: Arc<CommonWords>) -> Self {
        Self { annotator, common_words }
    }

    /// Lower-cases `raw_text`, annotates it, and returns the lemmas of the
    /// surviving tokens in source order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use lemmata_core::{CommonWords, Normalizer};
    ///
    /// let normalizer = Normalizer::new(Arc::new(CommonWords::embedded()));
    /// let lemmas = normalizer.normalize("Those are not cleaned. this is text.", false).unwrap();
    /// assert_eq!(lemmas, ["cleaned", "text"]);
    /// ```
    pub fn normalize(&self, raw_text: &str, only_nouns: bool) -> Result<Vec<String>> {
        let tokens = self.annotator.annotate(&raw_text.to_lowercase())?;

        Ok(tokens
            .into_iter()
            .filter(|token| self.keep(token, only_nouns))
            .map(|token| token.lemma.to_lowercase())
            .collect())
    }

    /// Whether a token survives normalization.
    pub fn keep(&self, token: &Token, only_nouns: bool) -> bool {
        token.char_len() >= MIN_TOKEN_LEN
            && token.is_alpha
            && !token.is_punct
            && !token.is_stop
            && !self.common_words.contains(&token.text.to_lowercase())
            && (!only_nouns || token.pos.is_noun())
    }
}
