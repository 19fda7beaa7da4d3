use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::document::{build_document, Document, DocumentInput};
use crate::error::{Error, Result};
use crate::idf::{idf_value, IdfCache};
use crate::source::{read_text, Encoding};
use crate::stopwords::Stopwords;
use crate::tokenizer::{Tokenizer, WordTokenizer};

/// What happens to cached IDF values when a document is appended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheInvalidation {
    /// Drop every cached value; they are recomputed lazily.
    #[default]
    Clear,
    /// Recompute every cached term against the new corpus right away.
    Recompute,
}

/// Append-only ordered collection of documents with its IDF cache.
///
/// Tokenizer and stopwords belong to this corpus alone.
#[derive(Clone)]
pub struct Corpus {
    documents: Vec<Document>,
    pub(crate) idf_cache: IdfCache,
    pub(crate) tokenizer: Arc<dyn Tokenizer>,
    stopwords: Stopwords,
}

impl Default for Corpus {
    fn default() -> Self { Self::new() }
}

impl fmt::Debug for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Corpus")
            .field("documents", &self.documents.len())
            .field("cached_terms", &self.idf_cache.len())
            .field("stopwords", &self.stopwords.len())
            .finish()
    }
}

impl Corpus {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            idf_cache: IdfCache::new(),
            tokenizer: Arc::new(WordTokenizer),
            stopwords: Stopwords::default(),
        }
    }

    /// Rebuild a corpus from a previously externalized document sequence.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let mut corpus = Self::new();
        corpus.restore_from(documents);
        corpus
    }

    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_stopwords(mut self, stopwords: Stopwords) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn set_tokenizer(&mut self, tokenizer: Arc<dyn Tokenizer>) {
        self.tokenizer = tokenizer;
    }

    pub fn set_stopwords(&mut self, stopwords: Stopwords) {
        self.stopwords = stopwords;
    }

    /// Replace stopwords from untyped input; on rejection the current set is kept.
    pub fn set_stopwords_from_value(&mut self, value: &Value) -> Result<()> {
        self.stopwords = Stopwords::try_from_value(value)?;
        Ok(())
    }

    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }

    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    /// Build a document with this corpus's tokenizer and stopwords without adding it.
    pub fn build(&self, input: impl Into<DocumentInput>, key: Option<String>) -> Document {
        build_document(input.into(), key, self.tokenizer.as_ref(), &self.stopwords)
    }

    pub fn add_document(
        &mut self,
        input: impl Into<DocumentInput>,
        key: Option<String>,
        mode: CacheInvalidation,
    ) {
        let doc = self.build(input, key);
        self.push(doc, mode);
    }

    /// Read `path` with `encoding` and add its text as a document.
    /// The corpus is untouched if the read fails.
    pub fn add_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        encoding: Encoding,
        key: Option<String>,
        mode: CacheInvalidation,
    ) -> Result<()> {
        let text = read_text(path.as_ref(), encoding)?;
        self.add_document(text, key, mode);
        Ok(())
    }

    fn push(&mut self, doc: Document, mode: CacheInvalidation) {
        tracing::debug!(index = self.documents.len(), terms = doc.len(), key = ?doc.key, "adding document");
        self.documents.push(doc);
        match mode {
            CacheInvalidation::Clear => self.idf_cache.clear(),
            CacheInvalidation::Recompute => {
                let terms = self.idf_cache.terms();
                tracing::debug!(cached = terms.len(), num_docs = self.documents.len(), "recomputing idf cache");
                for term in terms {
                    self.idf_with(&term, true);
                }
            }
        }
    }

    /// Reinitialize from an ordered document sequence; the IDF cache starts empty.
    pub fn restore_from(&mut self, documents: Vec<Document>) {
        tracing::debug!(num_docs = documents.len(), "restoring corpus");
        self.documents = documents;
        self.idf_cache.clear();
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }

    pub fn document(&self, index: usize) -> Result<&Document> {
        self.documents
            .get(index)
            .ok_or(Error::DocumentOutOfRange { index, len: self.documents.len() })
    }

    /// Number of documents holding `term` with a positive count.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.documents.iter().filter(|d| d.has_term(term)).count()
    }

    pub fn idf(&self, term: &str) -> f64 {
        self.idf_with(term, false)
    }

    /// IDF of `term`, served from cache unless `force` is set. The result is cached.
    pub fn idf_with(&self, term: &str, force: bool) -> f64 {
        if !force {
            if let Some(v) = self.idf_cache.get(term) {
                return v;
            }
        }
        let df = self.document_frequency(term);
        let idf = idf_value(self.documents.len(), df);
        tracing::trace!(term, df, num_docs = self.documents.len(), idf, "computed idf");
        self.idf_cache.insert(term, idf);
        idf
    }

    pub fn cached_idf(&self, term: &str) -> Option<f64> {
        self.idf_cache.get(term)
    }

    pub fn cache_len(&self) -> usize {
        self.idf_cache.len()
    }
}
