use lazy_static::lazy_static;
use serde_json::Value;
use std::collections::HashSet;

use crate::error::{Error, Result};

lazy_static! {
    static ref DEFAULT_STOPWORDS: Vec<&'static str> = vec![
        "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
        "be","because","been","before","being","below","between","both","but","by",
        "can","can't","cannot","could","couldn't",
        "did","didn't","do","does","doesn't","doing","don't","down","during",
        "each","few","for","from","further",
        "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
        "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
        "let's","me","more","most","mustn't","my","myself",
        "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
        "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
        "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
        "under","until","up","very",
        "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
        "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
    ];
}

/// Terms dropped when a document is built from free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new(DEFAULT_STOPWORDS.iter().copied())
    }
}

impl Stopwords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { words: words.into_iter().map(Into::into).collect() }
    }

    pub fn empty() -> Self {
        Self { words: HashSet::new() }
    }

    /// Build from untyped input, accepting only an array of strings.
    pub fn try_from_value(value: &Value) -> Result<Self> {
        let arr = value
            .as_array()
            .ok_or_else(|| Error::InvalidStopwords(format!("expected an array, got {value}")))?;
        let mut words = HashSet::with_capacity(arr.len());
        for (pos, item) in arr.iter().enumerate() {
            match item.as_str() {
                Some(s) => { words.insert(s.to_string()); }
                None => return Err(Error::InvalidStopwords(format!("element {pos} is not a string: {item}"))),
            }
        }
        Ok(Self { words })
    }

    pub fn contains(&self, term: &str) -> bool {
        self.words.contains(term)
    }

    pub fn insert(&mut self, term: impl Into<String>) -> bool {
        self.words.insert(term.into())
    }

    pub fn remove(&mut self, term: &str) -> bool {
        self.words.remove(term)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_list_has_common_words() {
        let sw = Stopwords::default();
        assert!(sw.contains("the"));
        assert!(sw.contains("and"));
        assert!(!sw.contains("cat"));
    }

    #[test]
    fn rejects_non_arrays_and_non_strings() {
        assert!(matches!(Stopwords::try_from_value(&json!("the")), Err(Error::InvalidStopwords(_))));
        assert!(matches!(Stopwords::try_from_value(&json!(["a", 1])), Err(Error::InvalidStopwords(_))));
        let sw = Stopwords::try_from_value(&json!(["foo", "bar"])).unwrap();
        assert_eq!(sw.len(), 2);
        assert!(sw.contains("foo"));
    }
}
