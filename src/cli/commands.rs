//! Command implementations for the gutensearch CLI.

use std::io::{self, Write};

use log::info;

use crate::catalog::{IdFilter, read_catalog, read_id_list};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::IndexConfig;
use crate::error::Result;
use crate::parallel_index::{IndexingPipeline, collect_documents};
use crate::query::{DocumentQuery, WordQuery, execute_document_query, execute_word_query};
use crate::record::DocumentId;
use crate::spelling::close_matches;
use crate::storage::{MemoryStore, WordStore};

/// Execute a CLI command.
pub fn execute_command(args: GutensearchArgs) -> Result<()> {
    match &args.command {
        Command::Load(load_args) => load_documents(load_args, &args),
        Command::Search(search_args) => search_word(search_args, &args),
        Command::Top(top_args) => top_words(top_args, &args),
        Command::Closest(closest_args) => closest_words(closest_args, &args),
        Command::Stats => show_stats(&args),
    }
}

fn load_config(cli_args: &GutensearchArgs) -> Result<IndexConfig> {
    match &cli_args.config {
        Some(path) => IndexConfig::from_file(path),
        None => Ok(IndexConfig::default()),
    }
}

fn open_store(cli_args: &GutensearchArgs) -> Result<MemoryStore> {
    MemoryStore::open_or_default(&cli_args.store)
}

/// Build the document filter selected by the load options.
fn id_filter(args: &LoadArgs) -> Result<IdFilter> {
    let filter = if let Some(path) = &args.only {
        IdFilter::Only(read_id_list(path)?.into_iter().collect())
    } else if let Some(path) = &args.exclude {
        IdFilter::Exclude(read_id_list(path)?.into_iter().collect())
    } else if let Some(path) = &args.catalog {
        IdFilter::Only(read_catalog(path)?.into_iter().collect())
    } else {
        IdFilter::All
    };
    Ok(filter)
}

/// Parse a directory of documents into the store.
fn load_documents(args: &LoadArgs, cli_args: &GutensearchArgs) -> Result<()> {
    let mut config = load_config(cli_args)?;
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }

    let filter = id_filter(args)?;
    let paths = filter.apply(collect_documents(&args.dir, &config.file_extension)?);
    if cli_args.verbosity() > 1 {
        println!(
            "Loading {} documents from {} with {} threads",
            paths.len(),
            args.dir.display(),
            config.threads()
        );
    }

    let pipeline = IndexingPipeline::new(config)?;
    let store = open_store(cli_args)?;
    let summary = pipeline.index_into(&paths, &store)?;
    store.save(&cli_args.store)?;
    info!("store written to {}", cli_args.store.display());

    let mut out = io::stdout().lock();
    write_load_summary(&mut out, &summary, cli_args.verbosity())?;
    out.flush()?;
    Ok(())
}

/// List the documents containing a word.
fn search_word(args: &SearchArgs, cli_args: &GutensearchArgs) -> Result<()> {
    let store = open_store(cli_args)?;
    let query = WordQuery::new(args.word.as_str())
        .fuzzy(args.fuzzy)
        .limit(args.limit);
    let outcome = execute_word_query(&store, &query)?;

    let mut out = io::stdout().lock();
    write_word_rows(&mut out, &args.word.to_lowercase(), &outcome)?;
    out.flush()?;
    Ok(())
}

/// Show the most frequent words of a document.
fn top_words(args: &TopArgs, cli_args: &GutensearchArgs) -> Result<()> {
    let document_id = DocumentId::parse(&args.document_id)?;
    let store = open_store(cli_args)?;
    let query = DocumentQuery::new(document_id)
        .limit(args.limit)
        .length_range(args.min_length, args.max_length);
    let rows = execute_document_query(&store, &query)?;

    let mut out = io::stdout().lock();
    write_document_rows(&mut out, query.document_id.as_str(), &rows)?;
    out.flush()?;
    Ok(())
}

/// Suggest corpus words close to a word.
fn closest_words(args: &ClosestArgs, cli_args: &GutensearchArgs) -> Result<()> {
    let store = open_store(cli_args)?;
    let word = args.word.trim().to_lowercase();
    let matches = close_matches(&word, store.corpus()?, args.suggestions, args.cutoff)?;

    let mut out = io::stdout().lock();
    write_matches(&mut out, &word, &matches)?;
    out.flush()?;
    Ok(())
}

/// Show store statistics.
fn show_stats(cli_args: &GutensearchArgs) -> Result<()> {
    let store = open_store(cli_args)?;
    if cli_args.verbosity() > 1 {
        println!("Store: {}", cli_args.store.display());
    }

    let mut out = io::stdout().lock();
    write_stats(&mut out, &store.stats()?)?;
    out.flush()?;
    Ok(())
}
