// src/report.rs
// =============================================================================
// Writes scan results to disk.
//
// Two formats:
// - csv: a title line naming the search term, a `url,found,context` header,
//   then one row per page (quoting handled by the csv crate)
// - json: the results as a JSON array (keyword/context omitted when empty)
//
// Results are expected to be sorted by URL already.
// =============================================================================

use anyhow::{Context as _, Result};
use csv::{Terminator, WriterBuilder};
use keyword_scanner::{Context, ResultSet};
use std::fs;
use std::path::Path;

use crate::cli::Format;

pub fn write_report(path: &Path, results: &ResultSet, term: &str, format: Format) -> Result<()> {
    let bytes = match format {
        Format::Csv => render_csv(results, term)?.into_bytes(),
        Format::Json => serde_json::to_vec_pretty(results)?,
    };

    fs::write(path, bytes).with_context(|| format!("could not write report to {}", path.display()))
}

pub fn render_csv(results: &ResultSet, term: &str) -> Result<String> {
    // flexible: the first line is a one-column title above the real header
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record([format!("search for {}", term)])?;
    writer.write_record(["url", "found", "context"])?;

    for result in results {
        let context = match &result.context {
            Context::Snippet(text) => text.clone(),
            Context::Matches(items) => items.join(" "),
        };
        writer.write_record([result.url.as_str(), bool_field(result.found), context.as_str()])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

fn bool_field(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why the csv crate for writing?
//    - Context snippets are HTML and often contain commas and quotes
//    - csv::Writer quotes those fields and doubles inner quotes for us
//
// 2. What is into_inner()?
//    - The writer buffers output; into_inner() flushes it and hands back
//      the Vec<u8> it was writing into
// -----------------------------------------------------------------------------
