//! Command line argument parsing for the gutensearch CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

/// gutensearch - word frequency search over Project Gutenberg documents
#[derive(Parser, Debug, Clone)]
#[command(name = "gutensearch")]
#[command(about = "Index word frequencies of plain-text books and search them")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct GutensearchArgs {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Store file holding the indexed records
    #[arg(
        long,
        env = "GUTENSEARCH_STORE",
        default_value = "gutensearch.store",
        global = true
    )]
    pub store: PathBuf,

    /// Indexing configuration file (JSON)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl GutensearchArgs {
    /// Get the effective verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }

    /// Log level for the effective verbosity.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse a directory of documents into the store
    Load(LoadArgs),

    /// List the documents containing a word
    Search(SearchArgs),

    /// Show the most frequent words of a document
    Top(TopArgs),

    /// Suggest corpus words close to a word
    Closest(ClosestArgs),

    /// Show store statistics
    Stats,
}

/// Arguments for loading documents
#[derive(Args, Debug, Clone)]
pub struct LoadArgs {
    /// Directory containing the document files
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Number of parsing threads (default: number of CPUs)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Load only the document ids listed in the given file
    #[arg(long, value_name = "FILE")]
    pub only: Option<PathBuf>,

    /// Load every document except the ids listed in the given file
    #[arg(long, value_name = "FILE", conflicts_with = "only")]
    pub exclude: Option<PathBuf>,

    /// Load only the documents listed in a Project Gutenberg catalog (GUTINDEX)
    #[arg(long, value_name = "FILE", conflicts_with_all = ["only", "exclude"])]
    pub catalog: Option<PathBuf>,
}

/// Arguments for word searches
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Word to look up; `%` and `_` act as wildcards
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Search for the closest known word instead
    #[arg(short, long)]
    pub fuzzy: bool,

    /// Maximum number of documents to list
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

/// Arguments for document word listings
#[derive(Args, Debug, Clone)]
pub struct TopArgs {
    /// Document id
    #[arg(value_name = "DOCUMENT_ID")]
    pub document_id: String,

    /// Maximum number of words to list
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// Skip words shorter than this
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Skip words longer than this
    #[arg(long)]
    pub max_length: Option<usize>,
}

/// Arguments for spelling suggestions
#[derive(Args, Debug, Clone)]
pub struct ClosestArgs {
    /// Word to match against the corpus
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Number of suggestions to show
    #[arg(short, long, default_value = "5")]
    pub suggestions: usize,

    /// Minimum similarity in [0, 1]
    #[arg(short, long, default_value = "0.6")]
    pub cutoff: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity() {
        let args = GutensearchArgs::parse_from(["gutensearch", "stats"]);
        assert_eq!(args.verbosity(), 1);

        let args = GutensearchArgs::parse_from(["gutensearch", "-vv", "stats"]);
        assert_eq!(args.verbosity(), 3);

        let args = GutensearchArgs::parse_from(["gutensearch", "stats", "-q", "-v"]);
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_log_level() {
        let level = |argv: &[&str]| GutensearchArgs::parse_from(argv).log_level();

        assert_eq!(level(&["gutensearch", "-q", "stats"]), LevelFilter::Error);
        assert_eq!(level(&["gutensearch", "stats"]), LevelFilter::Warn);
        assert_eq!(level(&["gutensearch", "-v", "stats"]), LevelFilter::Info);
        assert_eq!(level(&["gutensearch", "stats", "-vv"]), LevelFilter::Debug);
        assert_eq!(level(&["gutensearch", "-vvvv", "stats"]), LevelFilter::Debug);
    }

    #[test]
    fn test_parse_load() {
        let args = GutensearchArgs::parse_from([
            "gutensearch",
            "--store",
            "books.store",
            "load",
            "books/",
            "--threads",
            "4",
            "--only",
            "ids.txt",
        ]);
        assert_eq!(args.store, PathBuf::from("books.store"));
        match args.command {
            Command::Load(load) => {
                assert_eq!(load.dir, PathBuf::from("books/"));
                assert_eq!(load.threads, Some(4));
                assert_eq!(load.only, Some(PathBuf::from("ids.txt")));
                assert_eq!(load.exclude, None);
                assert_eq!(load.catalog, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_only_conflicts_with_exclude() {
        let result = GutensearchArgs::try_parse_from([
            "gutensearch",
            "load",
            "books/",
            "--only",
            "a.txt",
            "--exclude",
            "b.txt",
        ]);
        assert!(result.is_err());

        let result = GutensearchArgs::try_parse_from([
            "gutensearch",
            "load",
            "books/",
            "--catalog",
            "GUTINDEX.ALL",
            "--exclude",
            "b.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_search_defaults() {
        let args = GutensearchArgs::parse_from(["gutensearch", "search", "whale", "--fuzzy"]);
        match args.command {
            Command::Search(search) => {
                assert_eq!(search.word, "whale");
                assert!(search.fuzzy);
                assert_eq!(search.limit, 10);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
