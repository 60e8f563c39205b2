//! Bounded list of recently searched locations, persisted as a JSON array.

use anyhow::{Context, Result};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Storage key; the backing file is `<key>.json`.
pub const RECENT_SEARCHES_KEY: &str = "recentSearches";

pub const MAX_RECENT_SEARCHES: usize = 5;

/// Append `location` to `current`, keeping only the newest entries.
///
/// Returns `None` when `location` is already present (exact match), in which
/// case nothing should change.
pub fn append_recent(current: &[String], location: &str) -> Option<Vec<String>> {
    if current.iter().any(|s| s == location) {
        return None;
    }

    let mut updated = current.to_vec();
    updated.push(location.to_string());
    if updated.len() > MAX_RECENT_SEARCHES {
        updated.drain(..updated.len() - MAX_RECENT_SEARCHES);
    }
    Some(updated)
}

#[derive(Debug, Clone)]
pub struct RecentSearchStore {
    path: PathBuf,
}

impl RecentSearchStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store using the standard file name inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{RECENT_SEARCHES_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted list. Never fails: a missing, unreadable or corrupt
    /// file yields an empty list.
    pub fn load(&self) -> Vec<String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read recent searches");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&contents) {
            Ok(saved) => bounded(saved),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring corrupt recent searches");
                Vec::new()
            }
        }
    }

    /// Record a successful search. Already-present locations leave the list
    /// untouched and skip the write.
    pub fn record(&self, location: &str, current: &[String]) -> Result<Vec<String>> {
        let Some(updated) = append_recent(current, location) else {
            return Ok(current.to_vec());
        };

        self.persist(&updated)?;
        tracing::debug!(location, count = updated.len(), "Recorded recent search");
        Ok(updated)
    }

    pub fn clear(&self) -> Result<Vec<String>> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to remove recent searches: {}", self.path.display())
                });
            }
        }
        Ok(Vec::new())
    }

    fn persist(&self, searches: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string(searches).context("Failed to serialize recent searches")?;

        fs::write(&self.path, json).with_context(|| {
            format!("Failed to write recent searches: {}", self.path.display())
        })
    }
}

/// Drop duplicates and anything beyond the newest `MAX_RECENT_SEARCHES`, for
/// files edited by hand.
fn bounded(saved: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(saved.len());
    for s in saved {
        if !out.contains(&s) {
            out.push(s);
        }
    }
    if out.len() > MAX_RECENT_SEARCHES {
        out.drain(..out.len() - MAX_RECENT_SEARCHES);
    }
    out
}
