// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Read the URL list from a file or directory
// 3. Start one scan task per URL; the Scanner's gate limits how many run
// 4. Sort the results by URL and write the report
// 5. Exit with proper code (0 = all scans ran, 1 = some scans failed, 2 = error)
// =============================================================================

mod cli;
mod input;
mod report;

use anyhow::{anyhow, Result};
use clap::Parser;
use keyword_scanner::{Scanner, ScannerConfig};
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ScanArgs};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// The search every URL in this run gets
#[derive(Debug, Clone)]
enum Search {
    Keyword(String),
    Pattern(Regex),
    Email {
        pattern: Option<Regex>,
        filters: Vec<String>,
    },
}

impl Search {
    async fn run(&self, scanner: &Scanner, url: &str) -> keyword_scanner::Result<()> {
        match self {
            Search::Keyword(keyword) => scanner.search(url, keyword).await,
            Search::Pattern(pattern) => scanner.search_with_pattern(url, pattern.clone()).await,
            Search::Email { pattern, filters } => {
                scanner
                    .search_for_email(url, pattern.clone(), Some(filters.clone()))
                    .await
            }
        }
    }

    // Shown in the report header
    fn describe(&self) -> String {
        match self {
            Search::Keyword(keyword) => format!("keyword {}", keyword),
            Search::Pattern(pattern) => format!("pattern {}", pattern.as_str()),
            Search::Email { .. } => "email addresses".to_string(),
        }
    }
}

fn split_command(command: Commands) -> Result<(Search, ScanArgs)> {
    Ok(match command {
        Commands::Keyword { keyword, scan } => {
            if keyword.is_empty() {
                return Err(anyhow!("keyword cannot be empty"));
            }
            (Search::Keyword(keyword), scan)
        }
        Commands::Pattern { pattern, scan } => (Search::Pattern(Regex::new(&pattern)?), scan),
        Commands::Email {
            pattern,
            filters,
            scan,
        } => {
            let pattern = pattern.as_deref().map(Regex::new).transpose()?;
            (Search::Email { pattern, filters }, scan)
        }
    })
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let (search, args) = split_command(cli.command)?;

    if args.logging {
        init_logging()?;
    }

    let urls = input::read_urls(&args.input)?;
    if urls.is_empty() {
        println!("⚠️  No URLs found in {}", args.input.display());
        return Ok(0);
    }

    let config = ScannerConfig::default()
        .with_concurrency_limit(args.concurrency)
        .with_depth_limit(args.depth)
        .with_request_timeout(Duration::from_secs(args.timeout))
        .with_logging(args.logging);
    let scanner = Arc::new(Scanner::with_config(config)?);

    println!("🔍 Scanning {} URL(s) for {}", urls.len(), search.describe());

    // Spawn everything up front; the gate decides what actually runs
    let tasks: Vec<_> = urls
        .into_iter()
        .map(|url| {
            let scanner = Arc::clone(&scanner);
            let search = search.clone();
            tokio::spawn(async move {
                let outcome = search.run(&scanner, &url).await;
                (url, outcome)
            })
        })
        .collect();

    let mut failed = 0;
    for joined in futures::future::join_all(tasks).await {
        let (url, outcome) = joined?;
        if let Err(e) = outcome {
            failed += 1;
            eprintln!("   ❌ {}: {}", url, e);
        }
    }

    let mut results = scanner.results();
    results.sort_by_url();
    report::write_report(&args.output, &results, &search.describe(), args.format)?;

    let found = results.iter().filter(|r| r.found).count();
    println!("📊 Summary:");
    println!("   ✅ Found: {}", found);
    println!("   ➖ Not found: {}", results.len() - found);
    println!("   ❌ Failed scans: {}", failed);
    println!("   📄 Report: {}", args.output.display());

    Ok(if failed > 0 { 1 } else { 0 })
}

// Only the binary decides where log events go; RUST_LOG overrides the level
fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("could not initialize logging: {}", e))
}
