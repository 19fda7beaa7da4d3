use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::stopwords::Stopwords;
use crate::tokenizer::Tokenizer;

/// Term occurrence counts in first-seen order.
pub type TermCounts = IndexMap<String, u32>;

/// One corpus entry: term counts plus the caller's opaque key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub key: Option<String>,
    pub terms: TermCounts,
}

impl Document {
    pub fn new(terms: TermCounts, key: Option<String>) -> Self {
        Self { key, terms }
    }

    /// Raw count of `term`, 0 when absent.
    pub fn tf(&self, term: &str) -> u32 {
        self.terms.get(term).copied().unwrap_or(0)
    }

    pub fn has_term(&self, term: &str) -> bool {
        self.tf(term) > 0
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Term frequency of `term` within `document`.
pub fn term_frequency(term: &str, document: &Document) -> u32 {
    document.tf(term)
}

/// Query terms: free text to tokenize, or an already tokenized list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terms {
    Text(String),
    List(Vec<String>),
}

impl Terms {
    /// Resolve to an ordered term list. Text is lowercased and tokenized, no stopword filtering.
    pub fn resolve(&self, tokenizer: &dyn Tokenizer) -> Vec<String> {
        match self {
            Terms::Text(text) => tokenizer.tokenize(&text.to_lowercase()),
            Terms::List(list) => list.clone(),
        }
    }
}

impl From<&str> for Terms {
    fn from(s: &str) -> Self { Terms::Text(s.to_string()) }
}

impl From<String> for Terms {
    fn from(s: String) -> Self { Terms::Text(s) }
}

impl From<Vec<String>> for Terms {
    fn from(v: Vec<String>) -> Self { Terms::List(v) }
}

impl From<Vec<&str>> for Terms {
    fn from(v: Vec<&str>) -> Self { Terms::List(v.into_iter().map(String::from).collect()) }
}

impl From<&[&str]> for Terms {
    fn from(v: &[&str]) -> Self { Terms::List(v.iter().map(|s| s.to_string()).collect()) }
}

/// What a document can be built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentInput {
    /// Free text: lowercased, tokenized and stopword filtered.
    Text(String),
    /// Pre-tokenized terms: counted without stopword filtering.
    Terms(Vec<String>),
    /// Ready-made counts, taken verbatim.
    Counts(TermCounts),
}

impl From<&str> for DocumentInput {
    fn from(s: &str) -> Self { DocumentInput::Text(s.to_string()) }
}

impl From<String> for DocumentInput {
    fn from(s: String) -> Self { DocumentInput::Text(s) }
}

impl From<Vec<String>> for DocumentInput {
    fn from(v: Vec<String>) -> Self { DocumentInput::Terms(v) }
}

impl From<Vec<&str>> for DocumentInput {
    fn from(v: Vec<&str>) -> Self { DocumentInput::Terms(v.into_iter().map(String::from).collect()) }
}

impl From<&[&str]> for DocumentInput {
    fn from(v: &[&str]) -> Self { DocumentInput::Terms(v.iter().map(|s| s.to_string()).collect()) }
}

impl From<TermCounts> for DocumentInput {
    fn from(counts: TermCounts) -> Self { DocumentInput::Counts(counts) }
}

impl From<HashMap<String, u32>> for DocumentInput {
    fn from(counts: HashMap<String, u32>) -> Self {
        // hash order is arbitrary; sort so term order is reproducible
        let mut entries: Vec<(String, u32)> = counts.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        DocumentInput::Counts(entries.into_iter().collect())
    }
}

impl From<Terms> for DocumentInput {
    fn from(terms: Terms) -> Self {
        match terms {
            Terms::Text(t) => DocumentInput::Text(t),
            Terms::List(l) => DocumentInput::Terms(l),
        }
    }
}

/// Build a document from `input`, consulting the tokenizer and stopwords for free text.
pub fn build_document(
    input: DocumentInput,
    key: Option<String>,
    tokenizer: &dyn Tokenizer,
    stopwords: &Stopwords,
) -> Document {
    let terms = match input {
        DocumentInput::Text(text) => {
            count_terms(tokenizer.tokenize(&text.to_lowercase()), Some(stopwords))
        }
        DocumentInput::Terms(list) => count_terms(list, None),
        DocumentInput::Counts(counts) => counts,
    };
    Document { key, terms }
}

fn count_terms(terms: Vec<String>, stopwords: Option<&Stopwords>) -> TermCounts {
    let mut counts = TermCounts::new();
    for term in terms {
        if stopwords.is_some_and(|sw| sw.contains(&term)) { continue; }
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}
