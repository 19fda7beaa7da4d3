use serde::Serialize;

use crate::corpus::Corpus;
use crate::document::{DocumentInput, Terms};
use crate::idf::query_idf;

pub const EPSILON: f64 = 1e-10;

pub fn dot_product(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(ai, bi)| ai * bi).sum()
}

pub fn vector_magnitude(v: &[f64]) -> f64 {
    v.iter().map(|vi| vi * vi).sum::<f64>().sqrt()
}

/// Cosine of the angle between `a` and `b`; 0.0 when either has no magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let mag_a = vector_magnitude(a);
    let mag_b = vector_magnitude(b);
    if mag_a < EPSILON || mag_b < EPSILON {
        return 0.0;
    }
    dot_product(a, b) / (mag_a * mag_b)
}

/// A document scored against a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDocument {
    pub index: usize,
    pub key: Option<String>,
    /// TF-IDF of each query term in this document, aligned with [`QueryVector::terms`].
    pub vector: Vec<f64>,
    pub cosine: f64,
}

/// Weighted query built from its own term counts.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryVector {
    pub terms: Vec<String>,
    pub weights: Vec<f64>,
}

impl Corpus {
    /// Turn a query into its distinct terms and their weights.
    ///
    /// The weights ignore the corpus: every term gets `count * (1 + ln(1/2))`.
    pub fn query_vector(&self, query: impl Into<Terms>) -> QueryVector {
        let terms: Terms = query.into();
        let doc = self.build(DocumentInput::from(terms), None);
        let idf = query_idf();
        let (terms, weights) = doc
            .terms
            .into_iter()
            .map(|(term, count)| (term, count as f64 * idf))
            .unzip();
        QueryVector { terms, weights }
    }

    pub fn rank_by_similarity(&self, query: impl Into<Terms>) -> Vec<RankedDocument> {
        self.rank_by_similarity_with(query, |_, _, _| {})
    }

    /// Rank every document by cosine similarity to `query`, best first.
    /// `observer(index, vector, key)` runs as each document is scored, before sorting.
    ///
    /// Document vectors are built over [`QueryVector::terms`], the query's distinct
    /// terms after stopword filtering, so they line up with the query weights.
    /// They differ from [`Corpus::tfidf_vector`] of the raw query whenever the
    /// query repeats a term or contains a stopword: for `"the cat cat"` the ranked
    /// vector has one entry for `cat` while `tfidf_vector` has three.
    pub fn rank_by_similarity_with<F>(&self, query: impl Into<Terms>, mut observer: F) -> Vec<RankedDocument>
    where
        F: FnMut(usize, &[f64], Option<&str>),
    {
        let query = self.query_vector(query);
        let mut ranked: Vec<RankedDocument> = self
            .documents()
            .iter()
            .enumerate()
            .map(|(index, doc)| {
                let vector: Vec<f64> = query
                    .terms
                    .iter()
                    .map(|t| doc.tf(t) as f64 * self.effective_idf(t))
                    .collect();
                let cosine = cosine_similarity(&query.weights, &vector);
                observer(index, &vector, doc.key());
                RankedDocument { index, key: doc.key.clone(), vector, cosine }
            })
            .collect();
        // stable: equal scores stay in index order
        ranked.sort_by(|a, b| b.cosine.total_cmp(&a.cosine));
        tracing::debug!(terms = query.terms.len(), num_docs = ranked.len(), "ranked corpus");
        ranked
    }
}
