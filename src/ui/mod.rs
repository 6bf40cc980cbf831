pub mod messages;
pub mod terminal;

pub use messages::{Locale, Messages};
pub use terminal::TerminalSurface;

use crate::error::SurfaceError;

/// State of the extractor as seen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    /// Waiting for the user to start a run
    Idle,
    /// Resolving sub-pages
    Running { processed: usize, total: usize },
    /// Results were copied; the label resets to idle after a short delay
    Done { count: usize },
}

/// What a surface should show for a given state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub label: String,
    pub disabled: bool,
    /// Progress readout; hidden when `None`
    pub progress: Option<String>,
}

impl UiState {
    /// Render step: maps the state onto the two visible affordances
    pub fn view(&self, messages: &Messages) -> View {
        match *self {
            UiState::Idle => View {
                label: messages.idle_label(),
                disabled: false,
                progress: None,
            },
            UiState::Running { processed, total } => View {
                label: messages.running_label(),
                disabled: true,
                progress: Some(messages.progress(processed, total)),
            },
            UiState::Done { .. } => View {
                label: messages.done_label(),
                disabled: false,
                progress: None,
            },
        }
    }
}

/// Somewhere the extractor can show its state and notifications
#[allow(async_fn_in_trait)]
pub trait Surface {
    /// Draw the current view
    async fn render(&mut self, view: &View) -> Result<(), SurfaceError>;

    /// Show a blocking notification to the user
    async fn notify(&mut self, message: &str) -> Result<(), SurfaceError>;
}
