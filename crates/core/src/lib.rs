pub mod annotate;
pub mod common_words;
pub mod document;
pub mod error;
#[cfg(feature = "feed")]
pub mod feed;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod knowledge;
pub mod normalize;
pub mod outlier;
pub mod report;
pub mod stopwords;
pub mod summarizer;
pub mod validate;

pub use annotate::{Annotator, PartOfSpeech, RuleAnnotator, Token};
pub use common_words::{COMMON_WORDS_LEN, CommonWords};
pub use document::{Document, html_to_text};
pub use error::{LemmataError, Result, Stage};
#[cfg(feature = "feed")]
pub use feed::{FeedConfig, FeedSource, parse_feed};
#[cfg(feature = "fetch")]
pub use fetch::FetchConfig;
pub use knowledge::KnowledgeBase;
#[cfg(feature = "wikipedia")]
pub use knowledge::{WikipediaClient, WikipediaConfig};
pub use normalize::Normalizer;
#[doc(hidden)]
pub use outlier::{Fence, frequencies, percentile};
pub use outlier::detect_outliers;
pub use report::{KeywordReport, ReportFormat, render_reports};
pub use stopwords::StopwordFilter;
pub use summarizer::{Summarizer, SummarizerConfig, SummarizerConfigBuilder};
pub use validate::{LookupOutcome, Validator};
