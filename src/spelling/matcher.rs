//! Corpus-level fuzzy matching.
//!
//! [`closest_match`] scans a corpus once and keeps the candidate with the
//! strictly highest similarity, so the first candidate reaching the maximum
//! wins a tie. Results therefore depend on corpus order; callers wanting
//! reproducible answers pass a sorted corpus.
//!
//! Candidates whose cheap upper bounds cannot beat the current best are
//! skipped without computing the full score. Skipping never changes the
//! result, only the time it takes.

use crate::error::{GutensearchError, Result};
use crate::spelling::similarity::{SequenceMatcher, quick_ratio, real_quick_ratio};

/// A corpus word together with its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<S> {
    /// The matched corpus entry.
    pub word: S,
    /// Similarity to the query, in `[0.0, 1.0]`.
    pub ratio: f64,
}

/// Find the corpus entry most similar to `word`, with its ratio.
pub fn best_match<I, S>(word: &str, corpus: I) -> Result<MatchResult<S>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let query: Vec<char> = word.chars().collect();
    let mut candidate_chars: Vec<char> = Vec::new();
    let mut best: Option<MatchResult<S>> = None;

    for candidate in corpus {
        let threshold = best.as_ref().map(|b| b.ratio);
        if threshold.is_some_and(|t| t >= 1.0) {
            break;
        }

        candidate_chars.clear();
        candidate_chars.extend(candidate.as_ref().chars());

        if let Some(t) = threshold {
            if real_quick_ratio(query.len(), candidate_chars.len()) <= t
                || quick_ratio(&query, &candidate_chars) <= t
            {
                continue;
            }
        }

        let ratio = SequenceMatcher::new(&query, &candidate_chars).ratio();
        if threshold.is_none_or(|t| ratio > t) {
            best = Some(MatchResult {
                word: candidate,
                ratio,
            });
        }
    }

    best.ok_or_else(|| {
        GutensearchError::empty_corpus(format!("no candidates to match '{word}' against"))
    })
}

/// Find the corpus entry most similar to `word`.
///
/// # Examples
///
/// ```
/// use gutensearch::spelling::closest_match;
///
/// let corpus = ["fish", "fist", "dog"];
/// assert_eq!(closest_match("fsh", corpus).unwrap(), "fish");
/// assert!(closest_match("fsh", Vec::<String>::new()).is_err());
/// ```
pub fn closest_match<I, S>(word: &str, corpus: I) -> Result<S>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    best_match(word, corpus).map(|m| m.word)
}

/// Up to `n` corpus entries scoring at least `cutoff`, best first.
///
/// Entries with equal scores keep their corpus order. An empty corpus simply
/// yields no matches.
pub fn close_matches<I, S>(word: &str, corpus: I, n: usize, cutoff: f64) -> Result<Vec<MatchResult<S>>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if n == 0 {
        return Err(GutensearchError::invalid_query(
            "number of matches must be positive",
        ));
    }
    if !(0.0..=1.0).contains(&cutoff) {
        return Err(GutensearchError::invalid_query(format!(
            "cutoff must be within [0.0, 1.0], got {cutoff}"
        )));
    }

    let query: Vec<char> = word.chars().collect();
    let mut candidate_chars: Vec<char> = Vec::new();
    let mut matches: Vec<MatchResult<S>> = Vec::new();

    for candidate in corpus {
        candidate_chars.clear();
        candidate_chars.extend(candidate.as_ref().chars());

        if real_quick_ratio(query.len(), candidate_chars.len()) < cutoff
            || quick_ratio(&query, &candidate_chars) < cutoff
        {
            continue;
        }

        let ratio = SequenceMatcher::new(&query, &candidate_chars).ratio();
        if ratio >= cutoff {
            matches.push(MatchResult {
                word: candidate,
                ratio,
            });
        }
    }

    // Stable sort keeps corpus order among equal ratios.
    matches.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
    matches.truncate(n);
    Ok(matches)
}
