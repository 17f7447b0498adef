//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of the indexing pipeline, responsible for
//! splitting document text into normalized word tokens.
//!
//! # Available Tokenizers
//!
//! - [`letter::LetterTokenizer`] - Character scan where every non-letter is a
//!   hard boundary. This is the tokenizer used when loading documents.
//! - [`strip::StripTokenizer`] - Splits on whitespace, then strips non-letters
//!   from each word (`"don't"` becomes `"dont"`).
//!
//! The two are not interchangeable: they disagree whenever punctuation sits
//! between letters inside one whitespace-delimited word.
//!
//! # Examples
//!
//! ```
//! use gutensearch::analysis::tokenizer::Tokenizer;
//! use gutensearch::analysis::tokenizer::letter::LetterTokenizer;
//!
//! let tokenizer = LetterTokenizer::new();
//! let words: Vec<String> = tokenizer
//!     .tokenize("Don't panic!")
//!     .map(|t| t.text)
//!     .collect();
//! assert_eq!(words, vec!["don", "t", "panic"]);
//! ```

use std::io::BufRead;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::token::{ReaderTokenStream, TokenStream};

pub mod letter;
pub mod strip;

pub use letter::LetterTokenizer;
pub use strip::StripTokenizer;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a single tokenizer can be shared by
/// every worker of the indexing pool. Both methods return lazy streams; each
/// call starts from a fresh scan state.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize<'a>(&self, text: &'a str) -> TokenStream<'a>;

    /// Tokenize everything a reader yields, in bounded memory.
    fn tokenize_reader<'a>(&self, reader: Box<dyn BufRead + 'a>) -> ReaderTokenStream<'a>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Selects which tokenizer the indexing pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// Character scan, every non-letter is a boundary.
    #[default]
    Letter,
    /// Whitespace split followed by non-letter stripping.
    Strip,
}

impl TokenizerKind {
    /// Build a shareable tokenizer of this kind.
    pub fn build(self) -> Arc<dyn Tokenizer> {
        match self {
            TokenizerKind::Letter => Arc::new(LetterTokenizer::new()),
            TokenizerKind::Strip => Arc::new(StripTokenizer::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_builds_named_tokenizer() {
        assert_eq!(TokenizerKind::default(), TokenizerKind::Letter);
        assert_eq!(TokenizerKind::Letter.build().name(), "letter");
        assert_eq!(TokenizerKind::Strip.build().name(), "strip");
    }

    #[test]
    fn test_variants_disagree_on_inner_punctuation() {
        let letter: Vec<String> = TokenizerKind::Letter
            .build()
            .tokenize("don't")
            .map(|t| t.text)
            .collect();
        let strip: Vec<String> = TokenizerKind::Strip
            .build()
            .tokenize("don't")
            .map(|t| t.text)
            .collect();

        assert_eq!(letter, vec!["don", "t"]);
        assert_eq!(strip, vec!["dont"]);
    }

    #[test]
    fn test_kind_serde_names() {
        let kind: TokenizerKind = serde_json::from_str("\"strip\"").unwrap();
        assert_eq!(kind, TokenizerKind::Strip);
    }
}
