use thiserror::Error;

/// Errors that end an extraction run
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The video table could not be found on the page
    #[error("video table not found ({selector})")]
    MissingTable { selector: String },

    /// The table had no links that look like video sub-pages
    #[error("no video links found in the table")]
    NoCandidates,

    /// The configured table selector does not parse
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A configured regex pattern does not compile
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Writing the result list to the clipboard or a file failed
    #[error("failed to write results to {target}: {reason}")]
    Output { target: String, reason: String },

    /// Talking to the WebDriver server failed
    #[error("webdriver: {0}")]
    WebDriver(String),
}

impl From<fantoccini::error::CmdError> for ExtractError {
    fn from(e: fantoccini::error::CmdError) -> Self {
        ExtractError::WebDriver(e.to_string())
    }
}

/// Failure of a single sub-page fetch. Never fatal to the run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("response for {url} was not text")]
    NotText { url: String },
}

/// Failure to draw or notify on a UI surface
#[derive(Debug, Error)]
#[error("surface: {0}")]
pub struct SurfaceError(pub String);

impl From<fantoccini::error::CmdError> for SurfaceError {
    fn from(e: fantoccini::error::CmdError) -> Self {
        SurfaceError(e.to_string())
    }
}
