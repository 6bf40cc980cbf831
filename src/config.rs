use crate::filter::{CandidateFilterConfig, default_keywords};
use crate::parsers::DEFAULT_TABLE_SELECTOR;
use crate::ui::Locale;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for an extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Course page holding the video table
    pub page_url: String,

    /// CSS selector of the table body holding the sub-page links
    #[serde(default = "default_table_selector")]
    pub table_selector: String,

    /// Substrings that mark a link as a video sub-page
    #[serde(default = "default_keywords")]
    pub candidate_keywords: Vec<String>,

    /// Regex patterns for sub-page URLs to skip
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Extra video URL patterns, tried before the generic `.mp4` fallback
    #[serde(default)]
    pub extra_video_patterns: Vec<String>,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Language of notifications and overlay labels
    #[serde(default)]
    pub locale: Locale,

    /// How long the "copied" label stays before resetting
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,

    /// Whether to copy the result list to the system clipboard
    #[serde(default = "default_clipboard")]
    pub clipboard: bool,

    /// Also write the result list to this file
    #[serde(default)]
    pub output_file: Option<PathBuf>,

    /// Draw the button and progress readout inside the page
    #[serde(default)]
    pub overlay: bool,

    /// Wait for the injected button to be clicked before extracting
    #[serde(default)]
    pub wait_for_click: bool,
}

/// Default value for table_selector
fn default_table_selector() -> String {
    DEFAULT_TABLE_SELECTOR.to_string()
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default value for reset_delay_ms
fn default_reset_delay_ms() -> u64 {
    3000
}

fn default_clipboard() -> bool {
    true
}

impl ExtractorConfig {
    /// Create a new configuration with default values
    pub fn new(page_url: &str) -> Self {
        Self {
            page_url: page_url.to_string(),
            table_selector: default_table_selector(),
            candidate_keywords: default_keywords(),
            exclude_patterns: Vec::new(),
            extra_video_patterns: Vec::new(),
            webdriver_url: default_webdriver_url(),
            locale: Locale::default(),
            reset_delay_ms: default_reset_delay_ms(),
            clipboard: default_clipboard(),
            output_file: None,
            overlay: false,
            wait_for_click: false,
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Filter settings derived from this configuration
    pub fn filter_config(&self) -> CandidateFilterConfig {
        CandidateFilterConfig {
            keywords: self.candidate_keywords.clone(),
            exclude_patterns: self.exclude_patterns.clone(),
        }
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}
