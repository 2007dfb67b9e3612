// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Three subcommands, one per kind of search:
//   keyword-scanner keyword "Connect with friends" --in urls.txt --out hits.csv
//   keyword-scanner pattern "connect\s+with"       --in urls/     --out hits.json --format json
//   keyword-scanner email --filter noreply          --in urls.txt --out emails.csv
//
// The scanning options (input, output, concurrency, depth, ...) are the same
// for every subcommand, so they live in one ScanArgs struct that each
// subcommand flattens in.
// =============================================================================

use clap::{Args, Parser, Subcommand, ValueEnum};
use keyword_scanner::scanner::DEFAULT_CONCURRENCY;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "keyword-scanner",
    version,
    about = "Search lists of websites for a keyword, a regular expression or email addresses",
    long_about = "keyword-scanner reads URLs from a file (or a directory of files), scans every page \
                  concurrently and writes one result line per page to a report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for a literal keyword (case-insensitive)
    ///
    /// Example: keyword-scanner keyword "Connect with friends" --in urls.txt --out hits.csv
    Keyword {
        /// The text to look for
        keyword: String,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Search for a regular expression (case-insensitive unless it says "(?-i)")
    Pattern {
        /// The regular expression to look for
        pattern: String,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Collect email addresses
    Email {
        /// Custom email pattern instead of the built-in one
        #[arg(long)]
        pattern: Option<String>,

        /// Drop addresses containing this text (repeatable)
        #[arg(long = "filter")]
        filters: Vec<String>,

        #[command(flatten)]
        scan: ScanArgs,
    },
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// File with one URL per line (or "rank,url" lines), or a directory of such files
    #[arg(long = "in", short = 'i')]
    pub input: PathBuf,

    /// Where to write the report
    #[arg(long = "out", short = 'o')]
    pub output: PathBuf,

    /// Maximum number of pages scanned at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Same-site links to scan per URL, the URL itself included (0 = no crawling)
    #[arg(long, default_value_t = 0)]
    pub depth: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Print scan progress to stderr
    #[arg(long)]
    pub logging: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[command(flatten)] do?
//    - It copies every field of ScanArgs into the subcommand's own flags
//    - So --in, --out, --depth work the same after keyword, pattern and email
//
// 2. What is ValueEnum?
//    - Lets clap turn "--format json" straight into Format::Json
//    - Unknown values are rejected with a helpful list of the valid ones
//
// 3. Why PathBuf instead of String for --in and --out?
//    - PathBuf is the owned type for file system paths
//    - Paths don't have to be valid UTF-8 on every platform
// -----------------------------------------------------------------------------
