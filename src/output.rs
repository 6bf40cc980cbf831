use crate::error::ExtractError;
use arboard::Clipboard;
use std::fs;
use std::path::PathBuf;

/// Destination for the final newline-joined link list
pub trait OutputSink {
    /// Name used in logs and errors
    fn name(&self) -> String;

    fn write_text(&mut self, text: &str) -> Result<(), ExtractError>;

    /// Called once the run is over, before the process exits
    fn finish(&mut self) {}
}

/// Lets every sink wrap up, in order
pub fn finish_sinks(sinks: &mut [Box<dyn OutputSink>]) {
    for sink in sinks.iter_mut() {
        sink.finish();
    }
}

/// The system clipboard
///
/// On Linux the contents are served by this process and vanish when it
/// exits, so `finish` blocks until another application takes the clipboard.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
    copied: Option<String>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputSink for SystemClipboard {
    fn name(&self) -> String {
        "clipboard".to_string()
    }

    fn write_text(&mut self, text: &str) -> Result<(), ExtractError> {
        if self.clipboard.is_none() {
            self.clipboard = Some(Clipboard::new().map_err(clipboard_error)?);
        }
        if let Some(clipboard) = self.clipboard.as_mut() {
            clipboard.set_text(text).map_err(clipboard_error)?;
        }
        self.copied = Some(text.to_string());
        ::log::debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }

    #[cfg(target_os = "linux")]
    fn finish(&mut self) {
        use arboard::SetExtLinux;

        let (Some(clipboard), Some(text)) = (self.clipboard.as_mut(), self.copied.take()) else {
            return;
        };
        ::log::warn!(
            "Holding the clipboard until another application copies something; press Ctrl+C to quit"
        );
        if let Err(e) = clipboard.set().wait().text(text) {
            ::log::error!("Failed to hold clipboard contents: {}", e);
        }
    }
}

fn clipboard_error(e: arboard::Error) -> ExtractError {
    ExtractError::Output {
        target: "clipboard".to_string(),
        reason: e.to_string(),
    }
}

/// A links file for the downstream converter, one URL per line
pub struct LinksFile {
    path: PathBuf,
}

impl LinksFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSink for LinksFile {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn write_text(&mut self, text: &str) -> Result<(), ExtractError> {
        let mut contents = text.to_string();
        if !contents.is_empty() {
            contents.push('\n');
        }
        fs::write(&self.path, contents).map_err(|e| ExtractError::Output {
            target: self.name(),
            reason: e.to_string(),
        })?;
        ::log::info!("Wrote links to {}", self.path.display());
        Ok(())
    }
}
