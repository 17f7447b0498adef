//! Plain-text rendering of command results.

use std::io::Write;

use crate::error::Result;
use crate::parallel_index::LoadSummary;
use crate::query::QueryOutcome;
use crate::record::Record;
use crate::spelling::MatchResult;
use crate::storage::StoreStats;

/// Write the rows of a word search.
pub fn write_word_rows<W: Write>(out: &mut W, query: &str, outcome: &QueryOutcome) -> Result<()> {
    if let (Some(word), Some(ratio)) = (&outcome.resolved_word, outcome.similarity) {
        if word != query {
            writeln!(out, "Showing results for '{word}' (similarity {ratio:.3})")?;
        }
    }

    if outcome.rows.is_empty() {
        writeln!(out, "No documents contain '{query}'")?;
        return Ok(());
    }

    let width = outcome
        .rows
        .iter()
        .map(|r| r.document_id.as_str().len())
        .max()
        .unwrap_or(0)
        .max("DOCUMENT".len());
    writeln!(out, "{:<width$}  {:>8}  WORD", "DOCUMENT", "COUNT")?;
    for record in &outcome.rows {
        writeln!(
            out,
            "{:<width$}  {:>8}  {}",
            record.document_id, record.count, record.word
        )?;
    }
    Ok(())
}

/// Write the rows of a document listing.
pub fn write_document_rows<W: Write>(out: &mut W, document_id: &str, rows: &[Record]) -> Result<()> {
    if rows.is_empty() {
        writeln!(out, "No words recorded for document {document_id}")?;
        return Ok(());
    }

    let width = rows
        .iter()
        .map(|r| r.word.len())
        .max()
        .unwrap_or(0)
        .max("WORD".len());
    writeln!(out, "{:<width$}  {:>8}", "WORD", "COUNT")?;
    for record in rows {
        writeln!(out, "{:<width$}  {:>8}", record.word, record.count)?;
    }
    Ok(())
}

/// Write spelling suggestions.
pub fn write_matches<W: Write>(out: &mut W, word: &str, matches: &[MatchResult<String>]) -> Result<()> {
    if matches.is_empty() {
        writeln!(out, "No close matches for '{word}'")?;
        return Ok(());
    }
    for m in matches {
        writeln!(out, "{:.3}  {}", m.ratio, m.word)?;
    }
    Ok(())
}

/// Write the outcome of a load.
pub fn write_load_summary<W: Write>(out: &mut W, summary: &LoadSummary, verbosity: u8) -> Result<()> {
    writeln!(
        out,
        "Loaded {} documents ({} records) in {:.2}s",
        summary.documents_loaded,
        summary.records_inserted,
        summary.elapsed.as_secs_f64()
    )?;

    if !summary.failures.is_empty() {
        writeln!(out, "{} documents failed", summary.failures.len())?;
        if verbosity > 0 {
            for failure in &summary.failures {
                writeln!(out, "  {}: {}", failure.path.display(), failure.error)?;
            }
        }
    }
    Ok(())
}

/// Write store statistics.
pub fn write_stats<W: Write>(out: &mut W, stats: &StoreStats) -> Result<()> {
    writeln!(out, "Documents:      {}", stats.documents)?;
    writeln!(out, "Distinct words: {}", stats.distinct_words)?;
    writeln!(out, "Records:        {}", stats.records)?;
    Ok(())
}
