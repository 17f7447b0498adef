//! Whitespace-split, strip-non-letters tokenizer.
//!
//! Each whitespace-delimited word has every non-letter removed and is then
//! lowercased. Letters on both sides of an inner punctuation mark are joined,
//! so `"don't"` yields the single token `"dont"`. Words left empty after
//! stripping are skipped.

use std::io::{self, BufRead};

use lazy_static::lazy_static;
use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{ReaderTokenStream, Token, TokenStream};

lazy_static! {
    static ref NON_LETTERS: Regex =
        Regex::new(r"[^A-Za-z]+").expect("non-letter pattern should be valid");
}

/// Normalize one whitespace-delimited word. Returns `None` if nothing remains.
fn normalize(word: &str) -> Option<String> {
    let stripped = NON_LETTERS.replace_all(word, "");
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_ascii_lowercase())
    }
}

/// A tokenizer that splits on whitespace and strips non-letters per word.
#[derive(Clone, Debug, Default)]
pub struct StripTokenizer;

impl StripTokenizer {
    /// Create a new strip tokenizer.
    pub fn new() -> Self {
        StripTokenizer
    }
}

/// Token stream reading a [`BufRead`] line by line.
struct StripReaderTokens<R> {
    reader: R,
    line: Vec<u8>,
    pending: std::vec::IntoIter<String>,
    position: usize,
    done: bool,
}

impl<R: BufRead> Iterator for StripReaderTokens<R> {
    type Item = io::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(text) = self.pending.next() {
                let token = Token::new(text, self.position);
                self.position += 1;
                return Some(Ok(token));
            }

            if self.done {
                return None;
            }

            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&self.line);
                    let words: Vec<String> = line.split_whitespace().filter_map(normalize).collect();
                    self.pending = words.into_iter();
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl Tokenizer for StripTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> TokenStream<'a> {
        Box::new(
            text.split_whitespace()
                .filter_map(normalize)
                .enumerate()
                .map(|(position, text)| Token::new(text, position)),
        )
    }

    fn tokenize_reader<'a>(&self, reader: Box<dyn BufRead + 'a>) -> ReaderTokenStream<'a> {
        Box::new(StripReaderTokens {
            reader,
            line: Vec::new(),
            pending: Vec::new().into_iter(),
            position: 0,
            done: false,
        })
    }

    fn name(&self) -> &'static str {
        "strip"
    }
}
