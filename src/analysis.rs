//! Text analysis module for gutensearch.
//!
//! This module turns raw document text into a stream of normalized word
//! tokens. Tokens contain only the lowercase ASCII letters `a`-`z`; every
//! other byte acts as a separator.

pub mod token;
pub mod tokenizer;
