// src/watch/paths.rs

//! Watch entry expansion.
//!
//! A watch entry may name a file, a directory, or a directory glob such as
//! `src/*`. Globs are expanded once, at registration time, against the
//! pattern's literal prefix directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};

/// Whether `entry` needs glob expansion before it can be watched.
pub fn is_glob(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}

/// Expand a glob entry into concrete paths, sorted for a stable
/// registration order.
pub fn expand_glob(entry: &str) -> Result<Vec<PathBuf>> {
    let normalized = entry.strip_prefix("./").unwrap_or(entry);
    let matcher = Glob::new(normalized)
        .with_context(|| format!("invalid watch glob '{entry}'"))?
        .compile_matcher();

    let prefix = literal_prefix(normalized);
    let mut matches = Vec::new();
    collect_matches(&prefix, &matcher, &mut matches)?;
    matches.sort();
    Ok(matches)
}

/// Longest leading run of components without glob metacharacters.
fn literal_prefix(pattern: &str) -> PathBuf {
    let mut prefix = PathBuf::new();
    for comp in Path::new(pattern).components() {
        if is_glob(&comp.as_os_str().to_string_lossy()) {
            break;
        }
        prefix.push(comp);
    }

    if prefix.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        prefix
    }
}

fn collect_matches(dir: &Path, matcher: &GlobMatcher, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("reading watch directory {dir:?}"))?;

    for entry in entries {
        let path = entry?.path();
        if matcher.is_match(path.strip_prefix("./").unwrap_or(&path)) {
            out.push(path.clone());
        }
        if path.is_dir() {
            collect_matches(&path, matcher, out)?;
        }
    }

    Ok(())
}
