use std::sync::Arc;

use tfidf_core::{CacheInvalidation, Corpus, Stopwords, Tokenizer};

fn cat_dog() -> Corpus {
    let mut c = Corpus::new().with_stopwords(Stopwords::new(["the"]));
    c.add_document("the cat sat", Some("doc0".into()), CacheInvalidation::Clear);
    c.add_document("the dog sat", Some("doc1".into()), CacheInvalidation::Clear);
    c
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn cat_dog_scenario() {
    let c = cat_dog();
    let d0 = c.document(0).unwrap();
    let d1 = c.document(1).unwrap();
    assert_eq!(d0.terms.len(), 2);
    assert_eq!((d0.tf("cat"), d0.tf("sat")), (1, 1));
    assert_eq!((d1.tf("dog"), d1.tf("sat")), (1, 1));

    assert!(close(c.idf("cat"), 1.0));
    assert!(close(c.idf("sat"), 0.594535));
    assert!(close(c.tfidf("cat", 0).unwrap(), 1.0));
    assert!(close(c.tfidf("sat", 0).unwrap(), 0.594535));

    let terms = c.list_terms(0).unwrap();
    assert_eq!(terms[0].term, "cat");
    assert_eq!(terms[1].term, "sat");
    assert_eq!(terms[0].tf, 1);

    let ranked = c.rank_by_similarity("cat");
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].index, 0);
    assert_eq!(ranked[0].key.as_deref(), Some("doc0"));
    assert!(close(ranked[0].cosine, 1.0));
    assert_eq!(ranked[1].index, 1);
    assert_eq!(ranked[1].cosine, 0.0);
}

#[test]
fn tfidf_is_sum_of_products() {
    let mut c = cat_dog();
    c.add_document("cat cat bird", None, CacheInvalidation::Clear);
    let terms = vec!["cat", "sat", "bird", "cat", "fish"];
    for d in 0..c.len() {
        let doc = c.document(d).unwrap();
        let expected: f64 = terms
            .iter()
            .map(|t| doc.tf(t) as f64 * c.effective_idf(t))
            .sum();
        assert!(close(c.tfidf(terms.clone(), d).unwrap(), expected));
    }
}

#[test]
fn idf_is_non_increasing_in_document_frequency() {
    let mut c = Corpus::new();
    c.add_document(vec!["a", "b", "c"], None, CacheInvalidation::Clear);
    c.add_document(vec!["a", "b"], None, CacheInvalidation::Clear);
    c.add_document(vec!["a"], None, CacheInvalidation::Clear);
    c.add_document(vec!["z"], None, CacheInvalidation::Clear);
    let order = ["q", "c", "b", "a"];
    for pair in order.windows(2) {
        assert!(c.document_frequency(pair[0]) < c.document_frequency(pair[1]));
        assert!(c.idf(pair[0]) >= c.idf(pair[1]));
    }
}

#[test]
fn clear_and_recompute_agree_with_fresh_values() {
    let mut cleared = cat_dog();
    let mut warmed = cat_dog();
    for c in [&cleared, &warmed] {
        c.idf("cat");
        c.idf("sat");
    }
    cleared.add_document("cat fish", None, CacheInvalidation::Clear);
    warmed.add_document("cat fish", None, CacheInvalidation::Recompute);

    assert_eq!(cleared.cached_idf("cat"), None);
    let fresh = 1.0 + (3.0f64 / 3.0).ln();
    assert!(close(warmed.cached_idf("cat").unwrap(), fresh));
    assert!(close(warmed.cached_idf("sat").unwrap(), 1.0 + (3.0f64 / 3.0).ln()));
    assert!(close(cleared.idf("cat"), fresh));
}

#[test]
fn restored_corpus_scores_identically() {
    let mut c = cat_dog();
    c.add_document("a cat and a hat", Some("doc2".into()), CacheInvalidation::Recompute);
    c.idf("cat");
    let restored = Corpus::from_documents(c.documents().to_vec());
    assert_eq!(restored.cache_len(), 0);
    for d in 0..c.len() {
        assert_eq!(c.tfidf("cat hat sat", d).unwrap(), restored.tfidf("cat hat sat", d).unwrap());
        assert_eq!(c.list_terms(d).unwrap(), restored.list_terms(d).unwrap());
    }
}

#[test]
fn ranking_is_sorted_and_total() {
    assert!(Corpus::new().rank_by_similarity("anything").is_empty());

    let mut c = Corpus::new();
    for text in ["red fish", "blue fish", "red red car", "green tree", "fish fish fish"] {
        c.add_document(text, None, CacheInvalidation::Clear);
    }
    let mut observed = Vec::new();
    let ranked = c.rank_by_similarity_with("red fish", |i, v, _| observed.push((i, v.len())));
    assert_eq!(ranked.len(), 5);
    assert_eq!(observed, vec![(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]);
    for pair in ranked.windows(2) {
        assert!(pair[0].cosine >= pair[1].cosine);
    }
    assert_eq!(ranked[0].index, 0);
    // "green tree" shares nothing and sorts last
    assert_eq!(ranked[4].index, 3);
}

#[test]
fn equal_scores_keep_index_order() {
    let mut c = Corpus::new();
    for _ in 0..4 {
        c.add_document("nothing relevant", None, CacheInvalidation::Clear);
    }
    let idx: Vec<usize> = c.rank_by_similarity("cat").iter().map(|r| r.index).collect();
    assert_eq!(idx, vec![0, 1, 2, 3]);
}

struct CommaTokenizer;

impl Tokenizer for CommaTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
    }
}

#[test]
fn custom_tokenizer_is_used_for_documents_and_queries() {
    let mut c = Corpus::new()
        .with_tokenizer(Arc::new(CommaTokenizer))
        .with_stopwords(Stopwords::empty());
    c.add_document("New York, Paris", None, CacheInvalidation::Clear);
    c.add_document("Paris", None, CacheInvalidation::Clear);
    assert_eq!(c.document(0).unwrap().tf("new york"), 1);
    assert!(c.tfidf("new york", 0).unwrap() > 0.0);
    assert_eq!(c.tfidf("new york", 1).unwrap(), 0.0);
}

#[test]
fn out_of_range_is_reported() {
    let c = cat_dog();
    assert!(c.list_terms(5).is_err());
    assert!(c.tfidf_vector("cat", 2).is_err());
    assert!(c.term_frequency("cat", 9).is_err());
}
