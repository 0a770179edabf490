//! Concurrent knowledge-base validation of candidate terms.
//!
//! Every distinct term gets exactly one lookup. Lookups run as a bounded
//! fan-out on the tokio runtime and the stage returns only after all of them
//! have resolved. A failed lookup never aborts its siblings: the term is
//! recorded as [`LookupOutcome::Failed`] and left out of the keyword set.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::knowledge::KnowledgeBase;

/// Result of one term's lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Lower-cased result titles.
    Found(FxHashSet<String>),
    /// The lookup failed; the term cannot be confirmed.
    Failed(String),
}

impl LookupOutcome {
    /// Whether `term` is itself one of the results.
    pub fn confirms(&self, term: &str) -> bool {
        match self {
            LookupOutcome::Found(results) => results.contains(&term.to_lowercase()),
            LookupOutcome::Failed(_) => false,
        }
    }
}

/// Default number of simultaneous lookups: available cores plus four,
/// capped at 32.
pub fn default_concurrency() -> usize {
    let cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    (cores + 4).min(32)
}

/// Confirms candidate terms against a knowledge base.
#[derive(Debug)]
pub struct Validator<K> {
    knowledge: Arc<K>,
    max_concurrency: usize,
}

impl<K> Clone for Validator<K> {
    fn clone(&self) -> Self {
        Self { knowledge: Arc::clone(&self.knowledge), max_concurrency: self.max_concurrency }
    }
}

impl<K: KnowledgeBase> Validator<K> {
    pub fn new(knowledge: K) -> Self {
        Self::from_arc(Arc::new(knowledge))
    }

    pub fn from_arc(knowledge: Arc<K>) -> Self {
        Self { knowledge, max_concurrency: default_concurrency() }
    }

    /// Bounds the number of lookups in flight. Zero is treated as one.
    pub fn with_max_concurrency(mut self, value: usize) -> Self {
        self.max_concurrency = value.max(1);
        self
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Looks up every term once and returns each term's outcome.
    ///
    /// An empty input returns immediately without spawning any task.
    pub async fn lookup(&self, terms: &BTreeSet<String>) -> HashMap<String, LookupOutcome> {
        let mut outcomes = HashMap::with_capacity(terms.len());
        if terms.is_empty() {
            return outcomes;
        }

        let permits = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();

        for term in terms {
            let knowledge = Arc::clone(&self.knowledge);
            let permits = Arc::clone(&permits);
            let term = term.clone();

            tasks.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return (term, LookupOutcome::Failed("worker pool closed".to_string()));
                };

                let outcome = match knowledge.search(&term).await {
                    Ok(results) => LookupOutcome::Found(results.iter().map(|r| r.to_lowercase()).collect()),
                    Err(e) => LookupOutcome::Failed(e.to_string()),
                };
                (term, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((term, outcome)) => {
                    if let LookupOutcome::Failed(reason) = &outcome {
                        tracing::warn!(term = %term, reason = %reason, "lookup failed, dropping term");
                    }
                    outcomes.insert(term, outcome);
                }
                Err(e) => tracing::warn!(error = %e, "lookup task did not complete"),
            }
        }

        outcomes
    }

    /// Terms confirmed by their own lookup.
    pub async fn validate(&self, terms: &BTreeSet<String>) -> BTreeSet<String> {
        let outcomes = self.lookup(terms).await;

        terms
            .iter()
            .filter(|term| outcomes.get(*term).is_some_and(|outcome| outcome.confirms(term)))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LemmataError, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Runtime::new().unwrap().block_on(future)
    }

    fn terms(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    /// Returns the term upper-cased, plus a fixed unrelated title.
    #[derive(Default)]
    struct Echo {
        calls: AtomicUsize,
    }

    impl KnowledgeBase for Echo {
        async fn search(&self, term: &str) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![term.to_uppercase(), "Unrelated".to_string()])
        }
    }

    /// Returns other candidate terms but never the queried one.
    struct Others;

    impl KnowledgeBase for Others {
        async fn search(&self, term: &str) -> Result<Vec<String>> {
            Ok(["kernel", "compiler"].iter().filter(|t| **t != term).map(|t| t.to_string()).collect())
        }
    }

    /// Fails for "broken", delays by term length otherwise.
    struct Flaky;

    impl KnowledgeBase for Flaky {
        async fn search(&self, term: &str) -> Result<Vec<String>> {
            if term == "broken" {
                return Err(LemmataError::Lookup { term: term.to_string(), reason: "offline".to_string() });
            }
            tokio::time::sleep(Duration::from_millis(40 - 4 * term.len() as u64)).await;
            Ok(vec![term.to_string()])
        }
    }

    /// Tracks the peak number of concurrent lookups.
    #[derive(Default)]
    struct Gauge {
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    impl KnowledgeBase for Gauge {
        async fn search(&self, term: &str) -> Result<Vec<String>> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);
            Ok(vec![term.to_string()])
        }
    }

    #[test]
    fn test_validate_case_insensitive_match() {
        let validator = Validator::new(Echo::default());
        let validated = block_on(validator.validate(&terms(&["kernel", "compiler"])));
        assert_eq!(validated, terms(&["kernel", "compiler"]));
    }

    #[test]
    fn test_other_terms_do_not_confirm() {
        let validator = Validator::new(Others);
        let validated = block_on(validator.validate(&terms(&["kernel", "compiler"])));
        assert!(validated.is_empty());
    }

    #[test]
    fn test_empty_candidates_issue_no_lookups() {
        let knowledge = Arc::new(Echo::default());
        let validator = Validator::from_arc(Arc::clone(&knowledge));

        let validated = block_on(validator.validate(&BTreeSet::new()));
        assert!(validated.is_empty());
        assert_eq!(knowledge.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_one_lookup_per_term() {
        let knowledge = Arc::new(Echo::default());
        let validator = Validator::from_arc(Arc::clone(&knowledge));

        block_on(validator.validate(&terms(&["kernel", "compiler", "patch"])));
        assert_eq!(knowledge.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_failed_lookup_is_absorbed() {
        let validator = Validator::new(Flaky);
        let candidates = terms(&["broken", "kernel", "compiler", "io"]);

        let outcomes = block_on(validator.lookup(&candidates));
        assert!(matches!(outcomes.get("broken"), Some(LookupOutcome::Failed(_))));
        assert_eq!(outcomes.len(), 4);

        let validated = block_on(validator.validate(&candidates));
        assert_eq!(validated, terms(&["kernel", "compiler", "io"]));
    }

    #[test]
    fn test_concurrency_is_bounded() {
        let knowledge = Arc::new(Gauge::default());
        let validator = Validator::from_arc(Arc::clone(&knowledge)).with_max_concurrency(2);
        let candidates: BTreeSet<String> = (0..8).map(|i| format!("term{}", i)).collect();

        let validated = block_on(validator.validate(&candidates));
        assert_eq!(validated, candidates);
        assert!(knowledge.peak.load(Ordering::SeqCst) <= 2);
    }

    #[test]
    fn test_zero_concurrency_clamped() {
        let validator = Validator::new(Echo::default()).with_max_concurrency(0);
        assert_eq!(validator.max_concurrency(), 1);
    }

    #[test]
    fn test_default_concurrency_range() {
        let n = default_concurrency();
        assert!((5..=32).contains(&n));
    }

    #[test]
    fn test_outcome_confirms() {
        let found = LookupOutcome::Found(["rust".to_string()].into_iter().collect());
        assert!(found.confirms("Rust"));
        assert!(!found.confirms("cargo"));
        assert!(!LookupOutcome::Failed("timeout".to_string()).confirms("rust"));
    }
}
