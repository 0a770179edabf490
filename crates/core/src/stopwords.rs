//! Stopword filtering
//!
//! English stopwords come from the NLTK list bundled with the `stop-words`
//! crate, a short list of function words. Custom lists are supported for
//! callers with their own vocabulary.

use rustc_hash::FxHashSet;
use stop_words::{LANGUAGE, get};

/// A set of function words that never become keywords.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Lowercase stopwords
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// The NLTK English list shipped with `stop-words`.
    pub fn english() -> Self {
        let stopwords = get(LANGUAGE::English).iter().map(|s| s.to_lowercase()).collect();
        Self { stopwords }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        let stopwords = words.iter().map(|w| w.to_lowercase()).collect();
        Self { stopwords }
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(word.to_lowercase());
        }
    }

    /// Check if a word is a stopword
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word) || self.stopwords.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_stopwords() {
        let filter = StopwordFilter::english();

        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("The"));
        assert!(filter.is_stopword("is"));
        assert!(filter.is_stopword("not"));
        assert!(!filter.is_stopword("compiler"));
        assert!(!filter.is_stopword("kernel"));
    }

    #[test]
    fn test_english_stopwords_keep_content_words() {
        let filter = StopwordFilter::english();

        for word in ["text", "information", "world", "words", "cleaned"] {
            assert!(!filter.is_stopword(word), "{} should not be a stopword", word);
        }
        assert!(filter.len() < 400);
    }

    #[test]
    fn test_custom_stopwords() {
        let mut filter = StopwordFilter::from_list(&["custom", "Words"]);

        assert!(filter.is_stopword("custom"));
        assert!(filter.is_stopword("words"));
        assert!(!filter.is_stopword("the"));

        filter.add_stopwords(&["extra"]);
        assert!(filter.is_stopword("EXTRA"));
        assert_eq!(filter.len(), 3);
    }
}
