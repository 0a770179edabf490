//! Linguistic annotation of raw text.
//!
//! The normalizer never talks to a linguistic model directly. It consumes
//! plain [`Token`] records produced by an [`Annotator`], so a statistical
//! tagger can be swapped in without touching the filtering rules.
//!
//! [`RuleAnnotator`] is the built-in implementation: regex tokenization, a
//! closed-class lexicon with suffix heuristics for part-of-speech tags, and a
//! conservative lemmatizer.
//!
//! # Example
//!
//! ```rust
//! use lemmata_core::{Annotator, PartOfSpeech, RuleAnnotator};
//!
//! let tokens = RuleAnnotator::new().annotate("the compilers").unwrap();
//! assert_eq!(tokens[1].lemma, "compiler");
//! assert_eq!(tokens[1].pos, PartOfSpeech::Noun);
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::stopwords::StopwordFilter;
use crate::{LemmataError, Result};

/// Universal part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Adposition,
    Conjunction,
    Particle,
    Numeral,
    Interjection,
    Punctuation,
    Symbol,
    Other,
}

impl PartOfSpeech {
    /// Common or proper noun.
    pub fn is_noun(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::ProperNoun)
    }
}

/// One annotated lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Text as it appeared in the input.
    pub text: String,
    /// Dictionary form.
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub is_alpha: bool,
    pub is_stop: bool,
    pub is_punct: bool,
}

impl Token {
    /// Length of the surface text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Turns text into an ordered sequence of annotated tokens.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Result<Vec<Token>>;
}

/// Default maximum input length, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 1_000_000;

/// Lexicon and suffix based annotator.
#[derive(Debug, Clone)]
pub struct RuleAnnotator {
    stopwords: StopwordFilter,
    max_length: usize,
}

impl Default for RuleAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleAnnotator {
    /// English stopwords and the default length limit.
    pub fn new() -> Self {
        Self::with_stopwords(StopwordFilter::english())
    }

    pub fn with_stopwords(stopwords: StopwordFilter) -> Self {
        Self { stopwords, max_length: DEFAULT_MAX_LENGTH }
    }

    /// Sets the maximum accepted input length in characters.
    pub fn max_length(mut self, value: usize) -> Self {
        self.max_length = value;
        self
    }
}

impl Annotator for RuleAnnotator {
    fn annotate(&self, text: &str) -> Result<Vec<Token>> {
        let length = text.chars().count();
        if length > self.max_length {
            return Err(LemmataError::Annotation(format!(
                "text of length {} exceeds maximum of {}",
                length, self.max_length
            )));
        }

        let mut tokens = Vec::new();
        let mut previous = None;

        for m in token_pattern().find_iter(text) {
            let surface = m.as_str();
            let pos = tag(surface, previous);
            tokens.push(Token {
                text: surface.to_string(),
                lemma: lemmatize(surface, pos),
                pos,
                is_alpha: surface.chars().all(char::is_alphabetic),
                is_stop: self.stopwords.is_stopword(surface),
                is_punct: surface.chars().all(is_punctuation),
            });
            previous = Some(pos);
        }

        Ok(tokens)
    }
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[\p{L}\p{M}\p{N}_]+(?:['’][\p{L}\p{N}]+)*|\S").expect("token pattern is valid")
    })
}

fn is_symbol(c: char) -> bool {
    matches!(c, '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~' | '€' | '£' | '¥' | '©' | '®' | '°')
}

fn is_punctuation(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace() && !is_symbol(c)
}

fn tag(surface: &str, previous: Option<PartOfSpeech>) -> PartOfSpeech {
    let word = surface.to_lowercase();
    let word = word.as_str();

    if word.chars().all(is_punctuation) {
        return PartOfSpeech::Punctuation;
    }
    if word.chars().all(|c| !c.is_alphanumeric()) {
        return PartOfSpeech::Symbol;
    }
    if word.chars().all(|c| c.is_numeric()) || is_number_word(word) {
        return PartOfSpeech::Numeral;
    }
    if let Some(pos) = closed_class(word) {
        return pos;
    }
    if !word.chars().all(char::is_alphabetic) {
        return PartOfSpeech::Other;
    }

    let len = word.chars().count();
    let after_determiner = matches!(previous, Some(PartOfSpeech::Determiner | PartOfSpeech::Adjective));

    if len > 4 && word.ends_with("ly") && !LY_NOUNS.contains(&word) {
        PartOfSpeech::Adverb
    } else if len > 5 && word.ends_with("ing") {
        if after_determiner { PartOfSpeech::Noun } else { PartOfSpeech::Verb }
    } else if len > 4 && word.ends_with("ed") && !word.ends_with("eed") {
        PartOfSpeech::Verb
    } else if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        PartOfSpeech::Adjective
    } else {
        PartOfSpeech::Noun
    }
}

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ical", "ish"];

const LY_NOUNS: &[&str] = &["family", "supply", "reply", "assembly", "anomaly", "monopoly", "butterfly", "italy"];

fn is_number_word(word: &str) -> bool {
    matches!(
        word,
        "zero"
            | "one"
            | "two"
            | "three"
            | "four"
            | "five"
            | "six"
            | "seven"
            | "eight"
            | "nine"
            | "ten"
            | "eleven"
            | "twelve"
            | "twenty"
            | "thirty"
            | "hundred"
            | "thousand"
            | "million"
            | "billion"
    )
}

fn closed_class(word: &str) -> Option<PartOfSpeech> {
    use PartOfSpeech::*;

    let pos = match word {
        "a" | "an" | "the" | "this" | "that" | "these" | "those" | "each" | "every" | "some" | "any" | "no"
        | "another" | "either" | "neither" | "all" | "both" | "such" | "what" | "which" | "whose" | "my" | "your"
        | "his" | "its" | "our" | "their" => Determiner,
        "i" | "me" | "mine" | "myself" | "you" | "yours" | "yourself" | "yourselves" | "he" | "him" | "himself"
        | "she" | "her" | "hers" | "herself" | "it" | "itself" | "we" | "us" | "ours" | "ourselves" | "they"
        | "them" | "theirs" | "themselves" | "who" | "whom" | "someone" | "anyone" | "everyone" | "nobody"
        | "something" | "anything" | "everything" | "nothing" => Pronoun,
        "of" | "in" | "on" | "at" | "by" | "for" | "with" | "about" | "against" | "between" | "into" | "through"
        | "during" | "before" | "after" | "above" | "below" | "to" | "from" | "up" | "down" | "out" | "off"
        | "over" | "under" | "near" | "across" | "along" | "among" | "around" | "behind" | "beside" | "beyond"
        | "inside" | "outside" | "onto" | "toward" | "towards" | "upon" | "within" | "without" | "via" | "per"
        | "since" | "until" => Adposition,
        "and" | "or" | "but" | "nor" | "yet" | "so" | "if" | "because" | "although" | "though" | "while"
        | "whereas" | "unless" | "whether" | "than" => Conjunction,
        "be" | "am" | "is" | "are" | "was" | "were" | "been" | "being" | "have" | "has" | "had" | "having" | "do"
        | "does" | "did" | "will" | "would" | "shall" | "should" | "can" | "could" | "may" | "might" | "must" => {
            Auxiliary
        }
        "not" | "n't" => Particle,
        "very" | "too" | "also" | "just" | "only" | "even" | "still" | "already" | "often" | "never" | "always"
        | "now" | "then" | "here" | "there" | "why" | "how" | "when" | "where" | "soon" | "quite" | "rather"
        | "again" | "once" => Adverb,
        "oh" | "yes" | "hello" | "wow" | "ok" | "okay" => Interjection,
        _ => return None,
    };

    Some(pos)
}

fn irregular_lemma(word: &str) -> Option<&'static str> {
    let lemma = match word {
        "am" | "is" | "are" | "was" | "were" | "been" | "being" => "be",
        "has" | "had" | "having" => "have",
        "does" | "did" | "done" => "do",
        "went" | "gone" => "go",
        "children" => "child",
        "men" => "man",
        "women" => "woman",
        "mice" => "mouse",
        "feet" => "foot",
        "teeth" => "tooth",
        "geese" => "goose",
        _ => return None,
    };
    Some(lemma)
}

const INVARIANT_NOUNS: &[&str] = &[
    "news", "series", "species", "physics", "mathematics", "economics", "politics", "lens", "canvas", "atlas", "chaos",
];

/// Dictionary form of a token given its tag.
///
/// Only irregular forms and regular noun plurals are reduced; every other
/// inflection is kept as written.
fn lemmatize(surface: &str, pos: PartOfSpeech) -> String {
    let word = surface.to_lowercase();

    if let Some(lemma) = irregular_lemma(&word) {
        return lemma.to_string();
    }
    if pos != PartOfSpeech::Noun || INVARIANT_NOUNS.contains(&word.as_str()) || !word.is_ascii() {
        return word;
    }

    if word.len() > 4 && word.ends_with("ies") {
        format!("{}y", &word[..word.len() - 3])
    } else if word.ends_with("sses") || ["ches", "shes", "xes", "zes"].iter().any(|s| word.ends_with(s)) {
        word[..word.len() - 2].to_string()
    } else if word.len() > 3
        && word.ends_with('s')
        && !["ss", "us", "is", "ous"].iter().any(|s| word.ends_with(s))
    {
        word[..word.len() - 1].to_string()
    } else {
        word
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn annotate(text: &str) -> Vec<Token> {
        RuleAnnotator::new().annotate(text).unwrap()
    }

    #[test]
    fn test_tokenization_splits_punctuation() {
        let tokens = annotate("those are not cleaned. this is text.");
        let surfaces: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(surfaces, ["those", "are", "not", "cleaned", ".", "this", "is", "text", "."]);
    }

    #[test]
    fn test_flags() {
        let tokens = annotate("the kernel, v2 $");

        assert!(tokens[0].is_stop);
        assert!(tokens[1].is_alpha && !tokens[1].is_stop && !tokens[1].is_punct);
        assert!(tokens[2].is_punct && !tokens[2].is_alpha);
        assert!(!tokens[3].is_alpha && !tokens[3].is_punct);
        assert!(!tokens[4].is_punct);
        assert_eq!(tokens[4].pos, PartOfSpeech::Symbol);
    }

    #[test]
    fn test_contraction_is_one_non_alpha_token() {
        let tokens = annotate("don't");
        assert_eq!(tokens.len(), 1);
        assert!(!tokens[0].is_alpha);
    }

    #[rstest]
    #[case("compilers", "compiler")]
    #[case("companies", "company")]
    #[case("classes", "class")]
    #[case("boxes", "box")]
    #[case("status", "status")]
    #[case("news", "news")]
    #[case("children", "child")]
    fn test_noun_lemmas(#[case] word: &str, #[case] lemma: &str) {
        assert_eq!(lemmatize(word, PartOfSpeech::Noun), lemma);
    }

    #[test]
    fn test_verb_inflections_are_kept() {
        let tokens = annotate("not cleaned");
        assert_eq!(tokens[1].pos, PartOfSpeech::Verb);
        assert_eq!(tokens[1].lemma, "cleaned");
    }

    #[test]
    fn test_irregular_lemma() {
        let tokens = annotate("it was");
        assert_eq!(tokens[1].lemma, "be");
        assert_eq!(tokens[1].pos, PartOfSpeech::Auxiliary);
    }

    #[rstest]
    #[case("quickly", PartOfSpeech::Adverb)]
    #[case("dangerous", PartOfSpeech::Adjective)]
    #[case("running", PartOfSpeech::Verb)]
    #[case("kernel", PartOfSpeech::Noun)]
    #[case("family", PartOfSpeech::Noun)]
    #[case("42", PartOfSpeech::Numeral)]
    #[case("the", PartOfSpeech::Determiner)]
    fn test_tags(#[case] word: &str, #[case] pos: PartOfSpeech) {
        assert_eq!(tag(word, None), pos);
    }

    #[test]
    fn test_gerund_after_determiner_is_noun() {
        let tokens = annotate("the building");
        assert_eq!(tokens[1].pos, PartOfSpeech::Noun);
    }

    #[test]
    fn test_max_length() {
        let annotator = RuleAnnotator::new().max_length(5);
        let result = annotator.annotate("longer than five");
        assert!(matches!(result, Err(LemmataError::Annotation(_))));
    }
}
