//! # gutensearch
//!
//! Word frequency indexing and search for plain-text book collections such
//! as Project Gutenberg.
//!
//! ## Features
//!
//! - Streaming ASCII-letter tokenizer over arbitrarily large documents
//! - Per-document word counting and `(word, document_id, count)` records
//! - Parallel indexing with per-document failure isolation
//! - Fuzzy word lookup using sequence-matcher similarity
//! - In-memory store with single-file persistence
//!
//! ## Example
//!
//! ```
//! use gutensearch::aggregation::WordCount;
//! use gutensearch::analysis::tokenizer::LetterTokenizer;
//! use gutensearch::record::{DocumentId, build_records};
//! use gutensearch::spelling::closest_match;
//!
//! # fn main() -> gutensearch::error::Result<()> {
//! let counts = WordCount::from_text(&LetterTokenizer::new(), "The cat sat on the mat.");
//! assert_eq!(counts.get("the"), 2);
//!
//! let records = build_records(&DocumentId::parse("1234")?, &counts);
//! assert_eq!(records.len(), 5);
//!
//! assert_eq!(closest_match("fsh", ["fish", "dog"])?, "fish");
//! # Ok(())
//! # }
//! ```

pub mod aggregation;
pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod parallel_index;
pub mod query;
pub mod record;
pub mod spelling;
pub mod storage;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
