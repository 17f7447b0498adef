//! Letter-scan tokenizer implementation.
//!
//! The scan looks at one byte at a time. ASCII letters are lowercased and
//! appended to a buffer; any other byte (digits, punctuation, whitespace,
//! every byte of a multi-byte UTF-8 sequence) closes the buffer and emits it
//! as a token if it is non-empty. A buffer still open at the end of input is
//! flushed as the final token.
//!
//! Because only ASCII letters are kept, the scan works directly on bytes and
//! never needs the input to be valid UTF-8. Non-ASCII letters are dropped.

use std::io::{self, BufRead};

use super::Tokenizer;
use crate::analysis::token::{ReaderTokenStream, Token, TokenStream};

/// Scan state shared by the chunk and reader streams.
#[derive(Debug, Default)]
struct Scanner {
    buffer: String,
    position: usize,
}

impl Scanner {
    /// Feed one byte. Returns `true` when the byte closed a non-empty word.
    #[inline]
    fn feed(&mut self, byte: u8) -> bool {
        if byte.is_ascii_alphabetic() {
            self.buffer.push(char::from(byte.to_ascii_lowercase()));
            false
        } else {
            !self.buffer.is_empty()
        }
    }

    fn take(&mut self) -> Token {
        let token = Token::new(std::mem::take(&mut self.buffer), self.position);
        self.position += 1;
        token
    }

    fn flush(&mut self) -> Option<Token> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.take())
        }
    }
}

/// Pull-based token stream over a sequence of text chunks.
///
/// The word buffer persists across chunk boundaries, so splitting the input
/// at arbitrary points never splits a word.
pub struct LetterTokens<I: Iterator> {
    chunks: I,
    current: Option<I::Item>,
    offset: usize,
    scanner: Scanner,
    exhausted: bool,
}

impl<I: Iterator> LetterTokens<I>
where
    I::Item: AsRef<[u8]>,
{
    /// Create a stream over the given chunks.
    pub fn new<C: IntoIterator<IntoIter = I>>(chunks: C) -> Self {
        LetterTokens {
            chunks: chunks.into_iter(),
            current: None,
            offset: 0,
            scanner: Scanner::default(),
            exhausted: false,
        }
    }
}

impl<I: Iterator> Iterator for LetterTokens<I>
where
    I::Item: AsRef<[u8]>,
{
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(chunk) = self.current.as_ref() {
                let bytes = chunk.as_ref();
                let mut closed = false;
                while self.offset < bytes.len() {
                    let byte = bytes[self.offset];
                    self.offset += 1;
                    if self.scanner.feed(byte) {
                        closed = true;
                        break;
                    }
                }
                if closed {
                    return Some(self.scanner.take());
                }
                self.current = None;
            }

            if self.exhausted {
                return None;
            }

            match self.chunks.next() {
                Some(chunk) => {
                    self.current = Some(chunk);
                    self.offset = 0;
                }
                None => {
                    self.exhausted = true;
                    return self.scanner.flush();
                }
            }
        }
    }
}

/// Pull-based token stream reading from a [`BufRead`] source.
///
/// Memory use is bounded by the reader's buffer plus the longest word.
/// The first read error is yielded once and ends the stream.
pub struct ReaderTokens<R> {
    reader: R,
    scanner: Scanner,
    done: bool,
}

impl<R: BufRead> ReaderTokens<R> {
    /// Create a stream over the given reader.
    pub fn new(reader: R) -> Self {
        ReaderTokens {
            reader,
            scanner: Scanner::default(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for ReaderTokens<R> {
    type Item = io::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            if available.is_empty() {
                self.done = true;
                return self.scanner.flush().map(Ok);
            }

            let mut consumed = 0;
            let mut closed = false;
            for &byte in available {
                consumed += 1;
                if self.scanner.feed(byte) {
                    closed = true;
                    break;
                }
            }
            self.reader.consume(consumed);

            if closed {
                return Some(Ok(self.scanner.take()));
            }
        }
    }
}

/// A tokenizer that keeps runs of ASCII letters, lowercased.
#[derive(Clone, Debug, Default)]
pub struct LetterTokenizer;

impl LetterTokenizer {
    /// Create a new letter tokenizer.
    pub fn new() -> Self {
        LetterTokenizer
    }

    /// Tokenize a sequence of chunks (lines, buffers, ...) as one text.
    pub fn tokenize_chunks<C>(&self, chunks: C) -> LetterTokens<C::IntoIter>
    where
        C: IntoIterator,
        C::Item: AsRef<[u8]>,
    {
        LetterTokens::new(chunks)
    }
}

impl Tokenizer for LetterTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> TokenStream<'a> {
        Box::new(LetterTokens::new(std::iter::once(text.as_bytes())))
    }

    fn tokenize_reader<'a>(&self, reader: Box<dyn BufRead + 'a>) -> ReaderTokenStream<'a> {
        Box::new(ReaderTokens::new(reader))
    }

    fn name(&self) -> &'static str {
        "letter"
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Cursor, Read};

    use rand::Rng;

    use super::*;

    fn words(text: &str) -> Vec<String> {
        LetterTokenizer::new().tokenize(text).map(|t| t.text).collect()
    }

    #[test]
    fn test_letter_tokenizer() {
        assert_eq!(
            words("The cat sat on the CAT's mat."),
            vec!["the", "cat", "sat", "on", "the", "cat", "s", "mat"]
        );
    }

    #[test]
    fn test_positions_are_sequential() {
        let tokens: Vec<Token> = LetterTokenizer::new().tokenize("a1b2c").collect();
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_and_separator_only_input() {
        assert!(words("").is_empty());
        assert!(words("  12,.;\n\t--").is_empty());
    }

    #[test]
    fn test_final_buffer_is_flushed() {
        assert_eq!(words("trailing word"), vec!["trailing", "word"]);
    }

    #[test]
    fn test_digits_and_non_ascii_are_separators() {
        assert_eq!(words("abc123def"), vec!["abc", "def"]);
        assert_eq!(words("café naïve"), vec!["caf", "na", "ve"]);
    }

    #[test]
    fn test_words_span_chunk_boundaries() {
        let tokens: Vec<String> = LetterTokenizer::new()
            .tokenize_chunks(["hel", "lo wo", "", "rld\n", "again"])
            .map(|t| t.text)
            .collect();
        assert_eq!(tokens, vec!["hello", "world", "again"]);
    }

    #[test]
    fn test_lines_keep_newline_boundaries() {
        let tokens: Vec<String> = LetterTokenizer::new()
            .tokenize_chunks(["first\n", "second\n"])
            .map(|t| t.text)
            .collect();
        assert_eq!(tokens, vec!["first", "second"]);
    }

    #[test]
    fn test_reader_with_tiny_buffer() {
        let text = "Alpha beta, GAMMA-delta\nepsilon";
        let reader = BufReader::with_capacity(3, Cursor::new(text.as_bytes()));
        let tokens: Vec<String> = ReaderTokens::new(reader)
            .map(|t| t.unwrap().text)
            .collect();
        assert_eq!(tokens, vec!["alpha", "beta", "gamma", "delta", "epsilon"]);
    }

    #[test]
    fn test_reader_accepts_invalid_utf8() {
        let bytes: &[u8] = b"ok\xff\xfeyes";
        let tokens: Vec<String> = ReaderTokens::new(Cursor::new(bytes))
            .map(|t| t.unwrap().text)
            .collect();
        assert_eq!(tokens, vec!["ok", "yes"]);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk gone"))
        }
    }

    #[test]
    fn test_reader_error_ends_stream() {
        let mut tokens = ReaderTokens::new(BufReader::new(FailingReader));
        assert!(tokens.next().unwrap().is_err());
        assert!(tokens.next().is_none());
    }

    #[test]
    fn test_random_text_yields_lowercase_letters_only() {
        let mut rng = rand::rng();
        let alphabet: Vec<char> = "aBc Z9_'\n-é.xY".chars().collect();

        for _ in 0..200 {
            let len = rng.random_range(0..64);
            let text: String = (0..len)
                .map(|_| alphabet[rng.random_range(0..alphabet.len())])
                .collect();

            let first = words(&text);
            assert!(
                first
                    .iter()
                    .all(|w| !w.is_empty() && w.bytes().all(|b| b.is_ascii_lowercase()))
            );
            // Re-tokenizing gives the same sequence.
            assert_eq!(first, words(&text));

            let split = rng.random_range(0..=text.len());
            if text.is_char_boundary(split) {
                let (left, right) = text.split_at(split);
                let chunked: Vec<String> = LetterTokenizer::new()
                    .tokenize_chunks([left, right])
                    .map(|t| t.text)
                    .collect();
                assert_eq!(first, chunked);
            }
        }
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(LetterTokenizer::new().name(), "letter");
    }
}
