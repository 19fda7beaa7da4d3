use serde::Serialize;

use crate::corpus::Corpus;
use crate::document::Terms;
use crate::error::Result;
use crate::idf::effective_idf;

/// One row of [`Corpus::list_terms`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermScore {
    pub term: String,
    pub tf: u32,
    /// Raw IDF, may be non-finite for an empty corpus.
    pub idf: f64,
    pub tfidf: f64,
}

impl Corpus {
    fn resolve(&self, terms: &Terms) -> Vec<String> {
        terms.resolve(self.tokenizer.as_ref())
    }

    /// IDF with non-finite values replaced by zero.
    pub fn effective_idf(&self, term: &str) -> f64 {
        let idf = self.idf(term);
        if !idf.is_finite() {
            tracing::trace!(term, idf, "non-finite idf treated as zero");
        }
        effective_idf(idf)
    }

    pub fn term_frequency(&self, term: &str, index: usize) -> Result<u32> {
        Ok(self.document(index)?.tf(term))
    }

    /// Sum of `tf * idf` over the resolved terms for document `index`.
    pub fn tfidf(&self, terms: impl Into<Terms>, index: usize) -> Result<f64> {
        let terms = self.resolve(&terms.into());
        self.tfidf_terms(&terms, index)
    }

    pub(crate) fn tfidf_terms(&self, terms: &[String], index: usize) -> Result<f64> {
        let doc = self.document(index)?;
        Ok(terms
            .iter()
            .map(|t| doc.tf(t) as f64 * self.effective_idf(t))
            .sum())
    }

    /// Per-term `tf * idf` in term order, duplicates and zeros kept.
    pub fn tfidf_vector(&self, terms: impl Into<Terms>, index: usize) -> Result<Vec<f64>> {
        let terms = self.resolve(&terms.into());
        self.tfidf_vector_terms(&terms, index)
    }

    pub(crate) fn tfidf_vector_terms(&self, terms: &[String], index: usize) -> Result<Vec<f64>> {
        let doc = self.document(index)?;
        Ok(terms
            .iter()
            .map(|t| doc.tf(t) as f64 * self.effective_idf(t))
            .collect())
    }

    /// Every stored term of document `index`, highest TF-IDF first.
    /// Ties keep the document's term order.
    pub fn list_terms(&self, index: usize) -> Result<Vec<TermScore>> {
        let doc = self.document(index)?;
        let mut out: Vec<TermScore> = doc
            .terms
            .iter()
            .map(|(term, &tf)| {
                let idf = self.idf(term);
                TermScore { term: term.clone(), tf, idf, tfidf: tf as f64 * effective_idf(idf) }
            })
            .collect();
        out.sort_by(|a, b| b.tfidf.total_cmp(&a.tfidf));
        Ok(out)
    }

    /// `tfidf(terms, i)` for every document, in index order.
    pub fn all_scores(&self, terms: impl Into<Terms>) -> Vec<f64> {
        self.all_scores_with(terms, |_, _, _| {})
    }

    /// As [`Corpus::all_scores`], calling `observer(index, score, key)` per document.
    pub fn all_scores_with<F>(&self, terms: impl Into<Terms>, mut observer: F) -> Vec<f64>
    where
        F: FnMut(usize, f64, Option<&str>),
    {
        let terms = self.resolve(&terms.into());
        self.documents()
            .iter()
            .enumerate()
            .map(|(i, doc)| {
                let score: f64 = terms
                    .iter()
                    .map(|t| doc.tf(t) as f64 * self.effective_idf(t))
                    .sum();
                observer(i, score, doc.key());
                score
            })
            .collect()
    }
}
