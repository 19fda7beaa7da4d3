use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"[\p{L}\p{N}_]+(?:'[\p{L}\p{N}_]+)*").expect("valid regex");
}

/// Splits raw text into an ordered sequence of lowercase terms.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Default tokenizer: NFKC normalization, lowercase, runs of letters, digits and `_`.
/// Inner apostrophes are kept so contractions stay whole (`don't`, `it's`).
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self { Self }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase().replace('\u{2019}', "'");
        WORD_RE
            .find_iter(&normalized)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Convenience wrapper around the default tokenizer.
pub fn tokenize(text: &str) -> Vec<String> {
    WordTokenizer.tokenize(text)
}
