use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Video URLs in order of first discovery, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    seen: HashSet<String>,
    urls: Vec<String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a URL; returns false if the exact same string is already present
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.urls.push(url);
        true
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// One URL per line, no header, no trailing newline
    pub fn to_payload(&self) -> String {
        self.urls.join("\n")
    }

    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }
}

impl<S: Into<String>> FromIterator<S> for ResultSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        for url in iter {
            set.insert(url);
        }
        set
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of sub-pages that passed the filter
    pub candidates: usize,

    /// Sub-pages a video URL was extracted from (before deduplication)
    pub found: usize,

    /// Sub-pages where no pattern matched
    pub skipped: usize,

    /// Sub-pages whose fetch failed
    pub failed: usize,

    /// Final deduplicated links
    pub links: Vec<String>,
}
