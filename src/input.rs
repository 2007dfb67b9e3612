// src/input.rs
// =============================================================================
// Reads the list of URLs to scan.
//
// The input path can be a single file or a directory. Directories are walked
// recursively and every non-hidden file in them is read (so .DS_Store and
// friends are skipped).
//
// Each line is either a bare URL or a CSV row like `1,"google.com"` (the
// format of the common "top sites" lists), in which case the second column
// is the URL. Blank lines are ignored.
//
// We use the `csv` crate to read the rows, so quoted fields work:
//   1,"example.com/a,b/c"   -> example.com/a,b/c
// =============================================================================

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs;
use std::path::Path;

/// Every URL listed under `path`, in file order.
pub fn read_urls(path: &Path) -> Result<Vec<String>> {
    let metadata =
        fs::metadata(path).with_context(|| format!("could not read {}", path.display()))?;

    let mut urls = Vec::new();
    if metadata.is_dir() {
        read_directory(path, &mut urls)?;
    } else {
        read_file(path, &mut urls)?;
    }
    Ok(urls)
}

fn read_directory(dir: &Path, urls: &mut Vec<String>) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("could not read directory {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;

    // read_dir order is platform dependent
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type()?.is_dir() {
            read_directory(&path, urls)?;
        } else {
            read_file(&path, urls)?;
        }
    }
    Ok(())
}

fn read_file(path: &Path, urls: &mut Vec<String>) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("could not read file {}", path.display()))?;

    let parsed = parse_urls(&content)
        .with_context(|| format!("could not parse {}", path.display()))?;
    urls.extend(parsed);
    Ok(())
}

/// Pulls the URLs out of the contents of one input file.
pub fn parse_urls(content: &str) -> Result<Vec<String>> {
    // No header row, and rows may have one column (bare URL) or several
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut urls = Vec::new();
    for record in reader.records() {
        if let Some(url) = url_from_record(&record?) {
            urls.push(url);
        }
    }
    Ok(urls)
}

// "rank,url" rows give the second column. Anything else is a bare URL that
// happened to contain commas, so the columns are glued back together.
fn url_from_record(record: &StringRecord) -> Option<String> {
    let is_ranked = record.len() >= 2
        && record
            .get(0)
            .is_some_and(|rank| !rank.is_empty() && rank.chars().all(|c| c.is_ascii_digit()));

    let url = if is_ranked {
        record.get(1).unwrap_or_default().to_string()
    } else {
        record.iter().collect::<Vec<_>>().join(",")
    };

    if url.is_empty() {
        None
    } else {
        Some(url)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a CSV reader instead of line.split(',')?
//    - A quoted field like "example.com/a,b" contains a comma that is *not*
//      a column separator
//    - csv::Reader understands quoting, so we get the field back intact
//
// 2. What do the ReaderBuilder options mean?
//    - has_headers(false): the first line is data, not column names
//    - flexible(true): rows may have different numbers of columns
//    - trim(Trim::All): strips spaces around every field
//
// 3. Why does read_directory call itself?
//    - Directories can contain directories
//    - Recursion is the simplest way to walk a tree of unknown depth
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ranked_and_bare_rows() {
        let content = "google.com\n1,\"youtube.com\"\n  2, facebook.com \n\n3,\n";
        let urls = parse_urls(content).unwrap();
        assert_eq!(urls, vec!["google.com", "youtube.com", "facebook.com"]);
    }

    #[test]
    fn test_quoted_url_with_comma() {
        let urls = parse_urls("1,\"example.com/a,b/c\"\n").unwrap();
        assert_eq!(urls, vec!["example.com/a,b/c"]);
    }

    #[test]
    fn test_bare_url_with_comma() {
        let urls = parse_urls("https://example.com/search?q=a,b\n").unwrap();
        assert_eq!(urls, vec!["https://example.com/search?q=a,b"]);
    }

    #[test]
    fn test_read_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("urls.csv");
        fs::write(&file, "1,\"google.com\"\n\n2,\"facebook.com\"\n").unwrap();

        let urls = read_urls(&file).unwrap();
        assert_eq!(urls, vec!["google.com", "facebook.com"]);
    }

    #[test]
    fn test_read_directory_tree_skips_hidden_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a.com\n").unwrap();
        fs::write(dir.path().join(".DS_Store"), "junk.com\n").unwrap();
        fs::create_dir(dir.path().join("more")).unwrap();
        fs::write(dir.path().join("more").join("b.txt"), "b.com\n").unwrap();

        let urls = read_urls(dir.path()).unwrap();
        assert_eq!(urls, vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_urls(&dir.path().join("nope.txt")).is_err());
    }
}
