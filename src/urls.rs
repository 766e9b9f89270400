//! URL list input

use std::path::Path;
use crate::{Error, Result};

/// Parse a URL list: one URL per line, blank lines and `#` comments skipped
pub fn parse_url_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read a URL list from a file
pub fn load_urls_from_file(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)?;
    let urls = parse_url_list(&contents);
    tracing::info!("Loaded {} URLs from {}", urls.len(), path.display());
    Ok(urls)
}

/// URL list for a crawl, from a file or from the command line.
///
/// The file wins when both are given. A file without a single usable URL and
/// a missing source are both errors.
pub fn resolve_urls(urls: Option<&[String]>, file: Option<&Path>) -> Result<Vec<String>> {
    if let Some(path) = file {
        let urls = load_urls_from_file(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        if urls.is_empty() {
            return Err(Error::Config(format!("No valid URL found in {}", path.display())));
        }
        return Ok(urls);
    }

    match urls {
        Some(urls) if !urls.is_empty() => Ok(urls.to_vec()),
        _ => Err(Error::Config(
            "one of --urls or --file is required unless --check-takeover is used".to_string(),
        )),
    }
}
