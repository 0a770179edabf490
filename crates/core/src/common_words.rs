//! The frequent-word corpus excluded from keyword candidates.
//!
//! The corpus is a newline-delimited list of exactly [`COMMON_WORDS_LEN`]
//! English words. It is loaded once, never mutated, and shared between
//! pipeline runs behind an `Arc`.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashSet;

use crate::{LemmataError, Result};

/// Number of entries a common-word resource must contain.
pub const COMMON_WORDS_LEN: usize = 1000;

const EMBEDDED: &str = include_str!("../data/en_most_common.txt");

/// Read-only set of frequent words.
#[derive(Debug, Clone)]
pub struct CommonWords {
    words: FxHashSet<String>,
}

impl CommonWords {
    /// The bundled English list.
    pub fn embedded() -> Self {
        Self::from_words(parse_lines(EMBEDDED))
    }

    /// Loads a word list from disk.
    ///
    /// Blank lines are ignored. A missing file or a list that does not hold
    /// exactly [`COMMON_WORDS_LEN`] entries is a fatal initialization error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LemmataError::CommonWordsNotFound(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path)?;
        let entries = parse_lines(&raw);

        if entries.len() != COMMON_WORDS_LEN {
            return Err(LemmataError::CommonWordsCount { found: entries.len(), expected: COMMON_WORDS_LEN });
        }

        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded common-word list");
        Ok(Self::from_words(entries))
    }

    /// Builds a set from arbitrary words without checking the entry count.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn parse_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect()
}
