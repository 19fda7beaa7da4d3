use parking_lot::RwLock;
use std::collections::HashMap;

/// `1 + ln(n / (1 + df))`. Negative infinity for an empty corpus.
pub fn idf_value(num_docs: usize, doc_freq: usize) -> f64 {
    1.0 + (num_docs as f64 / (1 + doc_freq) as f64).ln()
}

/// IDF as used in products: non-finite values count as zero.
pub fn effective_idf(idf: f64) -> f64 {
    if idf.is_finite() { idf } else { 0.0 }
}

/// Weight applied to query terms when ranking, computed as if the query were
/// the only document and contained every one of its terms.
pub fn query_idf() -> f64 {
    idf_value(1, 1)
}

/// Memoized per-term IDF values for one corpus.
///
/// Interior locking lets scoring take `&self`; insertion into the corpus
/// needs `&mut`, so a read never overlaps a mutation.
#[derive(Debug, Default)]
pub struct IdfCache {
    values: RwLock<HashMap<String, f64>>,
}

impl Clone for IdfCache {
    fn clone(&self) -> Self {
        Self { values: RwLock::new(self.values.read().clone()) }
    }
}

impl IdfCache {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, term: &str) -> Option<f64> {
        self.values.read().get(term).copied()
    }

    pub fn insert(&self, term: &str, idf: f64) {
        self.values.write().insert(term.to_string(), idf);
    }

    pub fn clear(&self) {
        self.values.write().clear();
    }

    /// Snapshot of the cached terms.
    pub fn terms(&self) -> Vec<String> {
        self.values.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}
