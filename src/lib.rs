pub mod browser;
pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod output;
pub mod parsers;
pub mod queue;
pub mod results;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ExtractorConfig;
pub use error::{ExtractError, FetchError};
pub use extract::{RunSettings, extract_links};
pub use results::RunSummary;

use browser::{BrowserFetcher, PageOverlay};
use fantoccini::Client;
use filter::CandidateFilter;
use output::{LinksFile, OutputSink, SystemClipboard};
use parsers::MatcherChain;
use std::error::Error;
use std::path::{Path, PathBuf};
use ui::{Locale, Messages, TerminalSurface, UiState};
use url::Url;

/// Builder for a single extraction run against a live browser
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create a new Extractor for the given course page
    pub fn new(page_url: &str) -> Self {
        Self {
            config: ExtractorConfig::new(page_url),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let config = ExtractorConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, json: &str) -> Result<Self, Box<dyn Error>> {
        let config = ExtractorConfig::from_json(json)?;
        Ok(self.with_config(config))
    }

    pub fn with_page_url(mut self, page_url: &str) -> Self {
        self.config.page_url = page_url.to_string();
        self
    }

    pub fn with_webdriver_url(mut self, webdriver_url: &str) -> Self {
        self.config.webdriver_url = webdriver_url.to_string();
        self
    }

    /// Apply a `WEBDRIVER_URL` value; empty values are ignored
    pub fn with_webdriver_env(mut self, value: Option<String>) -> Self {
        if let Some(webdriver_url) = value.filter(|url| !url.is_empty()) {
            self.config.webdriver_url = webdriver_url;
        }
        self
    }

    pub fn with_table_selector(mut self, selector: &str) -> Self {
        self.config.table_selector = selector.to_string();
        self
    }

    /// Also write the links to a file
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_file = Some(path.into());
        self
    }

    /// Skip the system clipboard
    pub fn without_clipboard(mut self) -> Self {
        self.config.clipboard = false;
        self
    }

    /// Draw the button and progress readout inside the page
    pub fn with_overlay(mut self) -> Self {
        self.config.overlay = true;
        self
    }

    /// Start only once the injected button is clicked
    pub fn wait_for_click(mut self) -> Self {
        self.config.overlay = true;
        self.config.wait_for_click = true;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.config.locale = locale;
        self
    }

    pub fn with_reset_delay_ms(mut self, millis: u64) -> Self {
        self.config.reset_delay_ms = millis;
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Build the run settings from the configuration
    pub fn settings(&self) -> Result<RunSettings, ExtractError> {
        Ok(RunSettings {
            table_selector: self.config.table_selector.clone(),
            filter: CandidateFilter::new(self.config.filter_config())?,
            matchers: MatcherChain::with_extra_patterns(&self.config.extra_video_patterns)?,
            messages: Messages::new(self.config.locale),
            reset_delay: self.config.reset_delay(),
        })
    }

    /// Output sinks selected by the configuration, the links file first
    pub fn sinks(&self) -> Vec<Box<dyn OutputSink>> {
        let mut sinks: Vec<Box<dyn OutputSink>> = Vec::new();
        if let Some(path) = &self.config.output_file {
            sinks.push(Box::new(LinksFile::new(path)));
        }
        if self.config.clipboard {
            sinks.push(Box::new(SystemClipboard::new()));
        }
        sinks
    }

    /// Connect to the browser, open the course page and run the extraction.
    ///
    /// On Linux this returns only once another application has taken the
    /// clipboard over.
    pub async fn run(self) -> Result<RunSummary, Box<dyn Error>> {
        let mut sinks = self.sinks();
        let summary = self.run_with_sinks(&mut sinks).await?;
        output::finish_sinks(&mut sinks);
        Ok(summary)
    }

    /// Like `run`, but writes to the given sinks and leaves finishing them
    /// to the caller
    pub async fn run_with_sinks(
        self,
        sinks: &mut [Box<dyn OutputSink>],
    ) -> Result<RunSummary, Box<dyn Error>> {
        let settings = self.settings()?;
        if sinks.is_empty() {
            ::log::warn!("Clipboard disabled and no output file set; links will not be saved");
        }

        ::log::info!("Opening {}", self.config.page_url);
        let client = browser::connect(&self.config.webdriver_url).await?;

        let result = self.run_session(&client, &settings, sinks).await;

        if let Err(e) = client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }

        Ok(result?)
    }

    async fn run_session(
        &self,
        client: &Client,
        settings: &RunSettings,
        sinks: &mut [Box<dyn OutputSink>],
    ) -> Result<RunSummary, ExtractError> {
        client.goto(&self.config.page_url).await?;

        let mut fetcher = BrowserFetcher::new(client.clone());

        if !self.config.overlay {
            let (html, page_url) = read_page(client).await?;
            let mut surface = TerminalSurface::new();
            return extract_links(&html, &page_url, settings, &mut fetcher, &mut surface, sinks)
                .await;
        }

        let mut overlay = PageOverlay::new(client.clone());
        if self.config.wait_for_click {
            let idle = UiState::Idle.view(&settings.messages);
            overlay
                .wait_for_click(&idle)
                .await
                .map_err(|e| ExtractError::WebDriver(e.to_string()))?;
        }

        // The user may have navigated before clicking
        let (html, page_url) = read_page(client).await?;
        extract_links(&html, &page_url, settings, &mut fetcher, &mut overlay, sinks).await
    }
}

/// Current page source and URL
async fn read_page(client: &Client) -> Result<(String, Url), ExtractError> {
    let html = client.source().await?;
    let page_url = client.current_url().await?;
    ::log::debug!("Read {} bytes from {}", html.len(), page_url);
    Ok((html, page_url))
}
