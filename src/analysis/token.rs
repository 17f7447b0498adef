//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows from a tokenizer into the word counter.
//! Its text is never empty and, for the canonical tokenizer, only contains
//! the characters `a`-`z`.
//!
//! # Examples
//!
//! ```
//! use gutensearch::analysis::token::Token;
//!
//! let token = Token::new("hello", 0);
//! assert_eq!(token.text, "hello");
//! assert_eq!(token.position, 0);
//! assert_eq!(token.len(), 5);
//! ```

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};

/// A token represents a single normalized word produced by a tokenizer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// The normalized text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
        }
    }

    /// Get the length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Consume the token, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// A lazy, single-pass stream of tokens borrowed from some input text.
pub type TokenStream<'a> = Box<dyn Iterator<Item = Token> + 'a>;

/// A lazy, single-pass stream of tokens read from an I/O source.
///
/// The first read error ends the stream.
pub type ReaderTokenStream<'a> = Box<dyn Iterator<Item = io::Result<Token>> + 'a>;
