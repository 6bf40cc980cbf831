use regex::Regex;
use serde::{Deserialize, Serialize};

/// Configuration for deciding which table links are video sub-pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateFilterConfig {
    /// Substrings of which at least one must appear in the URL (case-sensitive)
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// Regex patterns for URLs to drop even when a keyword matches
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Default keywords: sub-pages are PHP views or video pages
pub fn default_keywords() -> Vec<String> {
    vec!["php".to_string(), "video".to_string()]
}

impl Default for CandidateFilterConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            exclude_patterns: Vec::new(),
        }
    }
}

/// Keeps the table links that point at video sub-pages
#[derive(Debug)]
pub struct CandidateFilter {
    keywords: Vec<String>,
    exclude_regexes: Vec<Regex>,
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self::new(CandidateFilterConfig::default()).expect("Default filter has no patterns")
    }
}

impl CandidateFilter {
    /// Create a new candidate filter from configuration
    pub fn new(config: CandidateFilterConfig) -> Result<Self, regex::Error> {
        let mut exclude_regexes = Vec::with_capacity(config.exclude_patterns.len());
        for pattern in &config.exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            keywords: config.keywords,
            exclude_regexes,
        })
    }

    /// Determine if a URL is a candidate sub-page
    pub fn is_candidate(&self, url: &str) -> bool {
        if !self.keywords.iter().any(|k| url.contains(k.as_str())) {
            return false;
        }

        for regex in &self.exclude_regexes {
            if regex.is_match(url) {
                ::log::debug!("Exclude pattern {} rejected: {}", regex, url);
                return false;
            }
        }

        true
    }

    /// Filter URLs down to candidates, keeping table order
    pub fn select(&self, urls: &[String]) -> Vec<String> {
        urls.iter()
            .filter(|url| {
                let keep = self.is_candidate(url);
                if !keep {
                    ::log::debug!("Not a video sub-page: {}", url);
                }
                keep
            })
            .cloned()
            .collect()
    }
}
