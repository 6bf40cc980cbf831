use crate::error::SurfaceError;
use crate::ui::{Surface, View};
use fantoccini::Client;
use serde_json::{Value, json};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// How many polls to wait for an alert to appear before giving up on it
const ALERT_OPEN_POLLS: usize = 20;

/// Creates the button and progress box if missing, applies the view, and
/// returns (and clears) the clicked flag.
const OVERLAY_SCRIPT: &str = r#"
const [label, disabled, progress] = arguments;
let btn = document.getElementById('lms-video-links-btn');
if (!btn) {
    btn = document.createElement('button');
    btn.id = 'lms-video-links-btn';
    btn.style = 'position:fixed;top:20px;right:20px;z-index:9999;padding:12px;background:#ff4444;color:white;border:none;border-radius:8px;font-weight:bold;cursor:pointer;box-shadow:0 4px 6px rgba(0,0,0,0.2);';
    btn.onclick = () => { window.__lmsVideoLinksClicked = true; };
    document.body.appendChild(btn);
}
let box = document.getElementById('lms-video-links-progress');
if (!box) {
    box = document.createElement('div');
    box.id = 'lms-video-links-progress';
    box.style = 'position:fixed;top:70px;right:20px;z-index:9999;padding:8px 12px;background:#333;color:white;border-radius:6px;font-size:12px;display:none;';
    document.body.appendChild(box);
}
btn.textContent = label;
btn.disabled = disabled;
if (progress === null) {
    box.style.display = 'none';
} else {
    box.textContent = progress;
    box.style.display = 'block';
}
const clicked = window.__lmsVideoLinksClicked === true;
window.__lmsVideoLinksClicked = false;
return clicked;
"#;

const ALERT_SCRIPT: &str = "const msg = arguments[0]; setTimeout(() => alert(msg), 0);";

/// Button and progress readout injected into the driven page
#[derive(Clone)]
pub struct PageOverlay {
    client: Client,
}

impl PageOverlay {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn apply(&self, view: &View) -> Result<bool, SurfaceError> {
        let result = self
            .client
            .execute(
                OVERLAY_SCRIPT,
                vec![json!(view.label), json!(view.disabled), json!(view.progress)],
            )
            .await?;
        Ok(result.as_bool().unwrap_or(false))
    }

    /// Shows `idle` and waits until the user clicks the button.
    ///
    /// The overlay is re-applied on every poll, so it survives the user
    /// navigating (e.g. logging in) before clicking.
    pub async fn wait_for_click(&self, idle: &View) -> Result<(), SurfaceError> {
        ::log::info!("Waiting for the extract button to be clicked");
        loop {
            match self.apply(idle).await {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                // Page is mid-navigation; try again on the next poll
                Err(e) => ::log::debug!("Overlay not ready: {}", e),
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

impl Surface for PageOverlay {
    async fn render(&mut self, view: &View) -> Result<(), SurfaceError> {
        self.apply(view).await.map(|_| ())
    }

    async fn notify(&mut self, message: &str) -> Result<(), SurfaceError> {
        self.client
            .execute(ALERT_SCRIPT, vec![Value::String(message.to_string())])
            .await?;

        // Block until the user dismisses the alert
        let mut seen = false;
        let mut polls = 0;
        loop {
            tokio::time::sleep(POLL_INTERVAL).await;
            match self.client.get_alert_text().await {
                Ok(_) => seen = true,
                Err(_) if seen => return Ok(()),
                Err(_) => {
                    polls += 1;
                    if polls >= ALERT_OPEN_POLLS {
                        ::log::warn!("Alert never appeared: {}", message);
                        return Ok(());
                    }
                }
            }
        }
    }
}
