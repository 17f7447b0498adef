//! Per-document word frequency aggregation.
//!
//! A [`WordCount`] maps every distinct token of one document to the number of
//! times it occurs. It is built in a single pass over a token stream and is
//! never modified afterwards. Counting is order independent, so documents can
//! be aggregated on any thread in any order.
//!
//! No length filtering happens here; short or long words are filtered at
//! query time.
//!
//! # Examples
//!
//! ```
//! use gutensearch::aggregation::WordCount;
//! use gutensearch::analysis::tokenizer::LetterTokenizer;
//!
//! let counts = WordCount::from_text(&LetterTokenizer::new(), "to be or not to be");
//! assert_eq!(counts.get("to"), 2);
//! assert_eq!(counts.get("not"), 1);
//! assert_eq!(counts.total(), 6);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// Read buffer used when streaming documents from disk.
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Occurrence counts of the distinct words of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    counts: AHashMap<String, u64>,
}

impl WordCount {
    /// Count the tokens of an already materialized stream.
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = Token>,
    {
        let mut counts: AHashMap<String, u64> = AHashMap::new();
        for token in tokens {
            *counts.entry(token.text).or_insert(0) += 1;
        }
        WordCount { counts }
    }

    /// Count plain words, without going through a tokenizer.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts: AHashMap<String, u64> = AHashMap::new();
        for word in words {
            *counts.entry(word.into()).or_insert(0) += 1;
        }
        WordCount { counts }
    }

    /// Tokenize and count an in-memory text.
    pub fn from_text(tokenizer: &dyn Tokenizer, text: &str) -> Self {
        Self::from_tokens(tokenizer.tokenize(text))
    }

    /// Tokenize and count everything a reader yields.
    ///
    /// A read error discards the partial count, so callers either get the
    /// complete result for the document or an error.
    pub fn from_reader<'a, R>(tokenizer: &dyn Tokenizer, reader: R) -> Result<Self>
    where
        R: BufRead + 'a,
    {
        let mut counts: AHashMap<String, u64> = AHashMap::new();
        for token in tokenizer.tokenize_reader(Box::new(reader)) {
            *counts.entry(token?.text).or_insert(0) += 1;
        }
        Ok(WordCount { counts })
    }

    /// Tokenize and count the document stored at `path`.
    pub fn from_path<P: AsRef<Path>>(tokenizer: &dyn Tokenizer, path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(tokenizer, BufReader::with_capacity(READ_BUFFER_SIZE, file))
    }

    /// Occurrences of `word`, zero if it never occurs.
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if the document produced no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of tokens counted.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate over `(word, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, &count)| (word.as_str(), count))
    }

    /// The `n` most frequent words, by count descending then word ascending.
    pub fn most_common(&self, n: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self.iter().collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }
}

impl<'a> IntoIterator for &'a WordCount {
    type Item = (&'a str, u64);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, u64)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
