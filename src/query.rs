//! Query types and execution against a word store.
//!
//! Two lookups are supported:
//!
//! - [`WordQuery`]: documents containing a word. The word may be a SQL-style
//!   pattern (`%` matches any run of characters, `_` exactly one), or it may
//!   be resolved fuzzily against the corpus of distinct words. The two modes
//!   are mutually exclusive.
//! - [`DocumentQuery`]: the most frequent words of one document, optionally
//!   restricted to a word length range.
//!
//! Result rows are ordered by descending count.
//!
//! # Examples
//!
//! ```
//! use gutensearch::query::{WordQuery, execute_word_query};
//! use gutensearch::record::{DocumentId, Record};
//! use gutensearch::storage::{MemoryStore, RecordSink};
//!
//! # fn main() -> gutensearch::error::Result<()> {
//! let store = MemoryStore::new();
//! store.insert_records(vec![
//!     Record::new("whale", DocumentId::parse("2701")?, 1226),
//!     Record::new("whale", DocumentId::parse("15")?, 3),
//! ])?;
//!
//! let outcome = execute_word_query(&store, &WordQuery::new("whael").fuzzy(true))?;
//! assert_eq!(outcome.resolved_word.as_deref(), Some("whale"));
//! assert_eq!(outcome.rows[0].document_id.as_str(), "2701");
//!
//! assert!(execute_word_query(&store, &WordQuery::new("wh%").fuzzy(true)).is_err());
//! # Ok(())
//! # }
//! ```

use std::cmp::Ordering;

use log::debug;
use regex::Regex;

use crate::error::{GutensearchError, Result};
use crate::record::{DocumentId, Record};
use crate::spelling::matcher::best_match;
use crate::storage::WordStore;

/// Characters that turn a query word into a pattern.
const WILDCARDS: [char; 2] = ['%', '_'];

/// A validated query word.
#[derive(Debug, Clone)]
pub enum WordPattern {
    /// Matches exactly one word.
    Exact(String),
    /// Matches every word accepted by the translated pattern.
    Wildcard {
        /// The pattern as written (lowercased).
        pattern: String,
        /// Anchored regex equivalent of `pattern`.
        regex: Regex,
    },
}

impl WordPattern {
    /// Parse a query word. Letters are lowercased to match indexed tokens.
    pub fn parse(word: &str) -> Result<Self> {
        let word = word.trim().to_ascii_lowercase();
        if word.is_empty() {
            return Err(GutensearchError::invalid_query("query word is empty"));
        }

        if !word.contains(WILDCARDS) {
            return Ok(WordPattern::Exact(word));
        }

        let mut translated = String::with_capacity(word.len() + 8);
        translated.push('^');
        for c in word.chars() {
            match c {
                '%' => translated.push_str(".*"),
                '_' => translated.push('.'),
                other => translated.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
            }
        }
        translated.push('$');

        let regex = Regex::new(&translated).map_err(|e| {
            GutensearchError::invalid_query(format!("invalid pattern '{word}': {e}"))
        })?;

        Ok(WordPattern::Wildcard {
            pattern: word,
            regex,
        })
    }

    /// The query text as written.
    pub fn as_str(&self) -> &str {
        match self {
            WordPattern::Exact(word) => word,
            WordPattern::Wildcard { pattern, .. } => pattern,
        }
    }

    /// Check if this is a wildcard pattern.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, WordPattern::Wildcard { .. })
    }

    /// Check whether `word` is accepted by this pattern.
    pub fn matches(&self, word: &str) -> bool {
        match self {
            WordPattern::Exact(expected) => expected == word,
            WordPattern::Wildcard { regex, .. } => regex.is_match(word),
        }
    }
}

/// Look up the documents containing a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordQuery {
    /// Word or pattern to look up.
    pub word: String,
    /// Resolve the word to its closest corpus entry first.
    pub fuzzy: bool,
    /// Maximum number of rows to return.
    pub limit: Option<usize>,
}

impl WordQuery {
    /// Create an exact (or pattern) query for `word`.
    pub fn new<S: Into<String>>(word: S) -> Self {
        WordQuery {
            word: word.into(),
            fuzzy: false,
            limit: None,
        }
    }

    /// Enable or disable fuzzy resolution.
    pub fn fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    /// Cap the number of rows returned.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Parse the word and reject conflicting modes.
    pub fn validate(&self) -> Result<WordPattern> {
        let pattern = WordPattern::parse(&self.word)?;
        if pattern.is_wildcard() && self.fuzzy {
            return Err(GutensearchError::invalid_query(format!(
                "'{}' contains a wildcard and cannot be matched fuzzily",
                pattern.as_str()
            )));
        }
        Ok(pattern)
    }
}

/// Look up the most frequent words of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentQuery {
    /// Document to inspect.
    pub document_id: DocumentId,
    /// Maximum number of rows to return.
    pub limit: Option<usize>,
    /// Skip words shorter than this many characters.
    pub min_length: Option<usize>,
    /// Skip words longer than this many characters.
    pub max_length: Option<usize>,
}

impl DocumentQuery {
    /// Create a query for all words of `document_id`.
    pub fn new(document_id: DocumentId) -> Self {
        DocumentQuery {
            document_id,
            limit: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Cap the number of rows returned.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Restrict words to `min..=max` characters; either bound may be open.
    pub fn length_range(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Reject an empty length range.
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(GutensearchError::invalid_query(format!(
                    "minimum word length {min} exceeds maximum {max}"
                )));
            }
        }
        Ok(())
    }

    fn accepts(&self, word: &str) -> bool {
        let len = word.chars().count();
        self.min_length.is_none_or(|min| len >= min) && self.max_length.is_none_or(|max| len <= max)
    }
}

/// Rows of a word lookup, with the corpus word a fuzzy query resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    /// The corpus word used in place of the query word, for fuzzy queries.
    pub resolved_word: Option<String>,
    /// Similarity between the query word and `resolved_word`.
    pub similarity: Option<f64>,
    /// Matching rows, by descending count.
    pub rows: Vec<Record>,
}

/// Count descending, then document id, then word.
fn by_count_desc(a: &Record, b: &Record) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| a.document_id.cmp(&b.document_id))
        .then_with(|| a.word.cmp(&b.word))
}

/// Run a word lookup.
///
/// A fuzzy query first loads the whole sorted corpus, resolves the word with
/// the closest match, then looks the resolved word up exactly.
pub fn execute_word_query<S: WordStore + ?Sized>(store: &S, query: &WordQuery) -> Result<QueryOutcome> {
    let pattern = query.validate()?;

    let (pattern, resolved_word, similarity) = if query.fuzzy {
        let corpus = store.corpus()?;
        let resolved = best_match(pattern.as_str(), corpus)?;
        debug!(
            "resolved '{}' to '{}' (ratio {:.3})",
            pattern.as_str(),
            resolved.word,
            resolved.ratio
        );
        (
            WordPattern::Exact(resolved.word.clone()),
            Some(resolved.word),
            Some(resolved.ratio),
        )
    } else {
        (pattern, None, None)
    };

    let mut rows = store.find_word(&pattern)?;
    rows.sort_unstable_by(by_count_desc);
    if let Some(limit) = query.limit {
        rows.truncate(limit);
    }

    Ok(QueryOutcome {
        resolved_word,
        similarity,
        rows,
    })
}

/// Run a document lookup.
pub fn execute_document_query<S: WordStore + ?Sized>(
    store: &S,
    query: &DocumentQuery,
) -> Result<Vec<Record>> {
    query.validate()?;

    let mut rows: Vec<Record> = store
        .document_words(&query.document_id)?
        .into_iter()
        .filter(|record| query.accepts(&record.word))
        .collect();
    rows.sort_unstable_by(by_count_desc);
    if let Some(limit) = query.limit {
        rows.truncate(limit);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, RecordSink};

    fn id(raw: &str) -> DocumentId {
        DocumentId::parse(raw).unwrap()
    }

    fn sample_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_records(vec![
                Record::new("fish", id("1"), 4),
                Record::new("fist", id("1"), 1),
                Record::new("dog", id("1"), 9),
                Record::new("fish", id("2"), 7),
                Record::new("a", id("2"), 30),
                Record::new("elephant", id("2"), 2),
            ])
            .unwrap();
        store
    }

    #[test]
    fn test_pattern_parsing() {
        assert!(matches!(WordPattern::parse("Fish").unwrap(), WordPattern::Exact(w) if w == "fish"));
        assert!(WordPattern::parse("fi%").unwrap().is_wildcard());
        assert!(WordPattern::parse("f_sh").unwrap().is_wildcard());
        assert!(WordPattern::parse("   ").is_err());
    }

    #[test]
    fn test_wildcard_matching() {
        let pattern = WordPattern::parse("fi%").unwrap();
        assert!(pattern.matches("fi"));
        assert!(pattern.matches("fish"));
        assert!(!pattern.matches("afish"));

        let pattern = WordPattern::parse("f_sh").unwrap();
        assert!(pattern.matches("fish"));
        assert!(!pattern.matches("fsh"));
        assert!(!pattern.matches("fiish"));

        // Regex metacharacters are literal.
        let pattern = WordPattern::parse("a.c%").unwrap();
        assert!(pattern.matches("a.cde"));
        assert!(!pattern.matches("abcde"));
    }

    #[test]
    fn test_wildcard_and_fuzzy_conflict() {
        let result = WordQuery::new("fi%").fuzzy(true).validate();
        assert!(matches!(result, Err(GutensearchError::InvalidQuery(_))));
        assert!(WordQuery::new("fi%").validate().is_ok());
        assert!(WordQuery::new("fish").fuzzy(true).validate().is_ok());
    }

    #[test]
    fn test_exact_query_orders_by_count() {
        let store = sample_store();
        let outcome = execute_word_query(&store, &WordQuery::new("fish")).unwrap();

        assert_eq!(outcome.resolved_word, None);
        let rows: Vec<(&str, u64)> = outcome
            .rows
            .iter()
            .map(|r| (r.document_id.as_str(), r.count))
            .collect();
        assert_eq!(rows, vec![("2", 7), ("1", 4)]);
    }

    #[test]
    fn test_wildcard_query() {
        let store = sample_store();
        let outcome = execute_word_query(&store, &WordQuery::new("fi%")).unwrap();
        let words: Vec<&str> = outcome.rows.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["fish", "fish", "fist"]);

        let outcome = execute_word_query(&store, &WordQuery::new("fi%").limit(1)).unwrap();
        assert_eq!(outcome.rows.len(), 1);
    }

    #[test]
    fn test_fuzzy_query_resolves_first() {
        let store = sample_store();
        let outcome = execute_word_query(&store, &WordQuery::new("fsh").fuzzy(true)).unwrap();

        assert_eq!(outcome.resolved_word.as_deref(), Some("fish"));
        assert!(outcome.similarity.unwrap() > 0.85);
        assert_eq!(outcome.rows.len(), 2);
        assert!(outcome.rows.iter().all(|r| r.word == "fish"));
    }

    #[test]
    fn test_fuzzy_query_on_empty_store() {
        let store = MemoryStore::new();
        let result = execute_word_query(&store, &WordQuery::new("fish").fuzzy(true));
        assert!(matches!(result, Err(GutensearchError::EmptyCorpus(_))));
    }

    #[test]
    fn test_unknown_word_has_no_rows() {
        let store = sample_store();
        let outcome = execute_word_query(&store, &WordQuery::new("cat")).unwrap();
        assert!(outcome.rows.is_empty());
    }

    #[test]
    fn test_document_query_with_length_filter() {
        let store = sample_store();

        let all = execute_document_query(&store, &DocumentQuery::new(id("2"))).unwrap();
        let words: Vec<&str> = all.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["a", "fish", "elephant"]);

        let query = DocumentQuery::new(id("2")).length_range(Some(2), Some(5));
        let words: Vec<String> = execute_document_query(&store, &query)
            .unwrap()
            .into_iter()
            .map(|r| r.word)
            .collect();
        assert_eq!(words, vec!["fish"]);

        let query = DocumentQuery::new(id("1")).limit(2);
        let words: Vec<String> = execute_document_query(&store, &query)
            .unwrap()
            .into_iter()
            .map(|r| r.word)
            .collect();
        assert_eq!(words, vec!["dog", "fish"]);
    }

    #[test]
    fn test_document_query_rejects_inverted_range() {
        let store = sample_store();
        let query = DocumentQuery::new(id("1")).length_range(Some(5), Some(2));
        assert!(execute_document_query(&store, &query).is_err());
    }
}
