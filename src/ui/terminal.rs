use crate::error::SurfaceError;
use crate::ui::{Surface, View};

/// Shows progress on stderr and notifications on stdout
#[derive(Debug, Default)]
pub struct TerminalSurface {
    last: Option<View>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for TerminalSurface {
    async fn render(&mut self, view: &View) -> Result<(), SurfaceError> {
        if self.last.as_ref() == Some(view) {
            return Ok(());
        }
        match &view.progress {
            Some(progress) => eprintln!("[{}] {}", view.label, progress),
            None => eprintln!("[{}]", view.label),
        }
        self.last = Some(view.clone());
        Ok(())
    }

    async fn notify(&mut self, message: &str) -> Result<(), SurfaceError> {
        println!("{}", message);
        Ok(())
    }
}
