//! Approximate word matching for gutensearch.
//!
//! Misspelled or partial query words are resolved against the corpus of
//! distinct indexed words by block-matching similarity. The module provides
//! the similarity measure itself and the corpus-level matchers built on it.

pub mod matcher;
pub mod similarity;

pub use matcher::{MatchResult, close_matches, closest_match};
