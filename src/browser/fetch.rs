use crate::error::FetchError;
use fantoccini::Client;
use serde_json::{Value, json};

/// Something that can GET a sub-page and hand back its body as text
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch_text(&mut self, url: &str) -> Result<String, FetchError>;
}

/// Fetches from inside the driven page, so the browser's session cookies apply
const FETCH_SCRIPT: &str = r#"
const url = arguments[0];
const done = arguments[arguments.length - 1];
fetch(url, { credentials: 'include' })
    .then(response => response.text())
    .then(body => done({ ok: true, body: body }))
    .catch(err => done({ ok: false, error: String(err) }));
"#;

/// Runs `fetch()` in the page through WebDriver
#[derive(Clone)]
pub struct BrowserFetcher {
    client: Client,
}

impl BrowserFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl PageFetcher for BrowserFetcher {
    async fn fetch_text(&mut self, url: &str) -> Result<String, FetchError> {
        let value = self
            .client
            .execute_async(FETCH_SCRIPT, vec![json!(url)])
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        parse_fetch_result(url, &value)
    }
}

/// Interprets the object the fetch script passes to its callback
fn parse_fetch_result(url: &str, value: &Value) -> Result<String, FetchError> {
    if value.get("ok").and_then(Value::as_bool) != Some(true) {
        let reason = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(FetchError::Request {
            url: url.to_string(),
            reason,
        });
    }

    value
        .get("body")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| FetchError::NotText {
            url: url.to_string(),
        })
}
