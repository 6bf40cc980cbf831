pub mod fetch;
pub mod overlay;

pub use fetch::{BrowserFetcher, PageFetcher};
pub use overlay::PageOverlay;

use crate::error::ExtractError;
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;

/// Endpoints tried when the configured WebDriver URL does not answer
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Largest script timeout WebDriver accepts (2^53 - 1 ms)
const UNBOUNDED_SCRIPT_TIMEOUT_MS: u64 = (1 << 53) - 1;

/// Session timeouts for an extraction run.
///
/// In-page fetches run as async scripts and must not time out. A `None`
/// script timeout is left out of the request and keeps the driver's 30 s
/// default, so the maximum is sent explicitly.
pub fn session_timeouts() -> TimeoutConfiguration {
    TimeoutConfiguration::new(
        Some(Duration::from_millis(UNBOUNDED_SCRIPT_TIMEOUT_MS)),
        Some(Duration::from_secs(300)),
        Some(Duration::from_secs(0)),
    )
}

/// Connects to the WebDriver instance, falling back to common local endpoints
pub async fn connect(webdriver_url: &str) -> Result<Client, ExtractError> {
    let client = match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            Some(client)
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
            connect_fallback(webdriver_url).await
        }
    };

    let client = client.ok_or_else(|| {
        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        ExtractError::WebDriver("failed to connect to any WebDriver server".to_string())
    })?;

    client.update_timeouts(session_timeouts()).await?;

    Ok(client)
}

async fn connect_fallback(webdriver_url: &str) -> Option<Client> {
    for url in FALLBACK_WEBDRIVER_URLS.iter() {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Some(client);
        }
    }
    None
}
