//! TF-IDF statistics over an append-only document corpus: lazily cached IDF,
//! per-term and per-document scores, and cosine similarity ranking.

pub mod corpus;
pub mod document;
pub mod error;
pub mod idf;
pub mod persist;
pub mod scoring;
pub mod similarity;
pub mod source;
pub mod stopwords;
pub mod tokenizer;

pub use corpus::{CacheInvalidation, Corpus};
pub use document::{build_document, term_frequency, Document, DocumentInput, TermCounts, Terms};
pub use error::{Error, Result};
pub use scoring::TermScore;
pub use similarity::{cosine_similarity, QueryVector, RankedDocument};
pub use source::Encoding;
pub use stopwords::Stopwords;
pub use tokenizer::{Tokenizer, WordTokenizer};
