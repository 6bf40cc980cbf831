use crate::browser::PageFetcher;
use crate::error::ExtractError;
use crate::filter::CandidateFilter;
use crate::output::OutputSink;
use crate::parsers::{self, MatcherChain};
use crate::queue::{Completion, Outcome, ResolutionQueue};
use crate::results::{ResultSet, RunSummary};
use crate::ui::{Messages, Surface, UiState};
use std::time::Duration;
use url::Url;

/// Everything a run needs besides its I/O
pub struct RunSettings {
    pub table_selector: String,
    pub filter: CandidateFilter,
    pub matchers: MatcherChain,
    pub messages: Messages,
    pub reset_delay: Duration,
}

/// Extracts direct video links from the course page and writes them to `sinks`.
///
/// Fatal problems (missing table, no candidates) are shown on `surface` and
/// returned before any sub-page is fetched. Per-page failures are logged and
/// skipped.
pub async fn extract_links<F, S>(
    page_html: &str,
    page_url: &Url,
    settings: &RunSettings,
    fetcher: &mut F,
    surface: &mut S,
    sinks: &mut [Box<dyn OutputSink>],
) -> Result<RunSummary, ExtractError>
where
    F: PageFetcher,
    S: Surface,
{
    let messages = &settings.messages;

    // Step 1: locate the table
    let links = match parsers::collect_links(page_html, &settings.table_selector, page_url) {
        Ok(links) => links,
        Err(e) => {
            if let ExtractError::MissingTable { selector } = &e {
                notify(surface, &messages.missing_table(selector)).await;
            }
            return Err(e);
        }
    };

    // Step 2: keep sub-page links
    let candidates = settings.filter.select(&links);
    if candidates.is_empty() {
        ::log::warn!("None of the {} table links look like video pages", links.len());
        notify(surface, &messages.no_candidates()).await;
        return Err(ExtractError::NoCandidates);
    }
    ::log::info!(
        "Found {} candidate sub-pages out of {} links",
        candidates.len(),
        links.len()
    );

    // Step 3: resolve one sub-page at a time
    let mut queue = ResolutionQueue::new(candidates);
    let mut summary = RunSummary {
        candidates: queue.total(),
        ..RunSummary::default()
    };
    let mut collected = Vec::new();
    render(surface, messages, UiState::Running {
        processed: 0,
        total: queue.total(),
    })
    .await;

    while let Some(job) = queue.next_job() {
        let outcome = resolve(fetcher, &settings.matchers, &job.url).await;
        let completion = queue.complete(job, outcome);
        record(&completion, &mut summary, &mut collected);
        render(surface, messages, UiState::Running {
            processed: completion.processed,
            total: completion.total,
        })
        .await;
    }

    // Step 4: dedupe, copy, report
    let results: ResultSet = collected.into_iter().collect();
    let payload = results.to_payload();

    ::log::info!("=== Direct Video Links ===");
    for url in results.urls() {
        ::log::info!("{}", url);
    }
    write_sinks(sinks, &payload)?;

    render(surface, messages, UiState::Done {
        count: results.len(),
    })
    .await;
    notify(surface, &messages.summary(results.len())).await;

    tokio::time::sleep(settings.reset_delay).await;
    render(surface, messages, UiState::Idle).await;

    summary.links = results.into_urls();
    Ok(summary)
}

/// Writes `payload` to every sink.
///
/// A failing sink does not stop the others; the run only fails when no sink
/// took the links.
fn write_sinks(sinks: &mut [Box<dyn OutputSink>], payload: &str) -> Result<(), ExtractError> {
    let mut last_error = None;
    let mut written = 0;
    for sink in sinks.iter_mut() {
        match sink.write_text(payload) {
            Ok(()) => written += 1,
            Err(e) => {
                ::log::error!("Failed to write links to {}: {}", sink.name(), e);
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if written == 0 => {
            ::log::error!("Links that could not be saved:\n{}", payload);
            Err(e)
        }
        _ => Ok(()),
    }
}

/// Fetches one sub-page and runs the matcher chain over it
async fn resolve<F: PageFetcher>(fetcher: &mut F, matchers: &MatcherChain, url: &str) -> Outcome {
    match fetcher.fetch_text(url).await {
        Ok(body) => match matchers.find(&body) {
            Some(found) => Outcome::Found(found),
            None => Outcome::NotFound,
        },
        Err(e) => Outcome::Failed(e.to_string()),
    }
}

fn record(completion: &Completion, summary: &mut RunSummary, collected: &mut Vec<String>) {
    match &completion.outcome {
        Outcome::Found(found) => {
            ::log::info!("✅ Found ({}): {}", found.matcher, found.url);
            summary.found += 1;
            collected.push(found.url.clone());
        }
        Outcome::NotFound => {
            ::log::warn!("❌ No video found in: {}", completion.url);
            summary.skipped += 1;
        }
        Outcome::Failed(reason) => {
            ::log::error!("Error fetching {}: {}", completion.url, reason);
            summary.failed += 1;
        }
    }
}

async fn render<S: Surface>(surface: &mut S, messages: &Messages, state: UiState) {
    if let Err(e) = surface.render(&state.view(messages)).await {
        ::log::warn!("Failed to render {:?}: {}", state, e);
    }
}

async fn notify<S: Surface>(surface: &mut S, message: &str) {
    if let Err(e) = surface.notify(message).await {
        ::log::warn!("Failed to show notification: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, SurfaceError};
    use crate::ui::{Locale, View};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Serves canned bodies; URLs without an entry fail like a network error
    #[derive(Default)]
    struct FakeFetcher {
        bodies: HashMap<String, String>,
        requested: Vec<String>,
    }

    impl FakeFetcher {
        fn with(mut self, url: &str, body: &str) -> Self {
            self.bodies.insert(url.to_string(), body.to_string());
            self
        }
    }

    impl PageFetcher for FakeFetcher {
        async fn fetch_text(&mut self, url: &str) -> Result<String, FetchError> {
            self.requested.push(url.to_string());
            self.bodies
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::Request {
                    url: url.to_string(),
                    reason: "connection refused".to_string(),
                })
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        views: Vec<View>,
        notifications: Vec<String>,
    }

    impl Surface for RecordingSurface {
        async fn render(&mut self, view: &View) -> Result<(), SurfaceError> {
            self.views.push(view.clone());
            Ok(())
        }

        async fn notify(&mut self, message: &str) -> Result<(), SurfaceError> {
            self.notifications.push(message.to_string());
            Ok(())
        }
    }

    struct MemorySink(Arc<Mutex<Vec<String>>>);

    impl OutputSink for MemorySink {
        fn name(&self) -> String {
            "memory".to_string()
        }

        fn write_text(&mut self, text: &str) -> Result<(), ExtractError> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct BrokenSink;

    impl OutputSink for BrokenSink {
        fn name(&self) -> String {
            "broken".to_string()
        }

        fn write_text(&mut self, _text: &str) -> Result<(), ExtractError> {
            Err(ExtractError::Output {
                target: self.name(),
                reason: "no display".to_string(),
            })
        }
    }

    fn settings() -> RunSettings {
        RunSettings {
            table_selector: parsers::DEFAULT_TABLE_SELECTOR.to_string(),
            filter: CandidateFilter::default(),
            matchers: MatcherChain::standard(),
            messages: Messages::new(Locale::En),
            reset_delay: Duration::ZERO,
        }
    }

    fn page_url() -> Url {
        Url::parse("https://lms.example.edu/course/list").unwrap()
    }

    fn table(hrefs: &[&str]) -> String {
        let rows: String = hrefs
            .iter()
            .map(|h| format!("<tr><td><a href=\"{}\">video</a></td></tr>", h))
            .collect();
        format!(
            "<html><body><table id=\"videoslist_table\"><tbody>{}</tbody></table></body></html>",
            rows
        )
    }

    fn memory_sink() -> (Vec<Box<dyn OutputSink>>, Arc<Mutex<Vec<String>>>) {
        let written = Arc::new(Mutex::new(Vec::new()));
        let sinks: Vec<Box<dyn OutputSink>> = vec![Box::new(MemorySink(Arc::clone(&written)))];
        (sinks, written)
    }

    #[tokio::test]
    async fn test_end_to_end_filters_and_extracts() {
        let html = table(&["a.php", "b.html", "c/video/1"]);
        let mut fetcher = FakeFetcher::default()
            .with(
                "https://lms.example.edu/course/a.php",
                r#"<video src="https://d1x.cloudfront.net/lec/a.mp4"></video>"#,
            )
            .with(
                "https://lms.example.edu/course/c/video/1",
                r#"<source src="/files/c.mp4">"#,
            );
        let mut surface = RecordingSurface::default();
        let (mut sinks, written) = memory_sink();

        let summary = extract_links(
            &html,
            &page_url(),
            &settings(),
            &mut fetcher,
            &mut surface,
            &mut sinks,
        )
        .await
        .unwrap();

        assert_eq!(
            fetcher.requested,
            vec![
                "https://lms.example.edu/course/a.php",
                "https://lms.example.edu/course/c/video/1",
            ]
        );
        assert_eq!(summary.candidates, 2);
        assert_eq!(summary.found, 2);
        assert_eq!(
            summary.links,
            vec!["https://d1x.cloudfront.net/lec/a.mp4", "/files/c.mp4"]
        );
        assert_eq!(
            *written.lock().unwrap(),
            vec!["https://d1x.cloudfront.net/lec/a.mp4\n/files/c.mp4"]
        );
        assert_eq!(surface.notifications.len(), 1);
        assert!(surface.notifications[0].starts_with("Extracted 2 "));
    }

    #[tokio::test]
    async fn test_identical_results_collapse() {
        let html = table(&["one.php", "two.php"]);
        let body = r#"<video src="https://d9.cloudfront.net/same.mp4"></video>"#;
        let mut fetcher = FakeFetcher::default()
            .with("https://lms.example.edu/course/one.php", body)
            .with("https://lms.example.edu/course/two.php", body);
        let mut surface = RecordingSurface::default();
        let (mut sinks, written) = memory_sink();

        let summary = extract_links(
            &html,
            &page_url(),
            &settings(),
            &mut fetcher,
            &mut surface,
            &mut sinks,
        )
        .await
        .unwrap();

        assert_eq!(summary.found, 2);
        assert_eq!(summary.links, vec!["https://d9.cloudfront.net/same.mp4"]);
        assert_eq!(
            *written.lock().unwrap(),
            vec!["https://d9.cloudfront.net/same.mp4"]
        );
    }

    #[tokio::test]
    async fn test_no_candidates_aborts_before_fetching() {
        let html = table(&["b.html", "notes.pdf"]);
        let mut fetcher = FakeFetcher::default();
        let mut surface = RecordingSurface::default();
        let (mut sinks, written) = memory_sink();

        let result = extract_links(
            &html,
            &page_url(),
            &settings(),
            &mut fetcher,
            &mut surface,
            &mut sinks,
        )
        .await;

        assert!(matches!(result, Err(ExtractError::NoCandidates)));
        assert!(fetcher.requested.is_empty());
        assert!(written.lock().unwrap().is_empty());
        assert_eq!(
            surface.notifications,
            vec!["No video links found in the table!"]
        );
        assert!(surface.views.is_empty());
    }

    #[tokio::test]
    async fn test_missing_table_aborts_before_fetching() {
        let mut fetcher = FakeFetcher::default();
        let mut surface = RecordingSurface::default();
        let (mut sinks, _written) = memory_sink();

        let result = extract_links(
            "<html><body><p>Nothing here</p></body></html>",
            &page_url(),
            &settings(),
            &mut fetcher,
            &mut surface,
            &mut sinks,
        )
        .await;

        assert!(matches!(result, Err(ExtractError::MissingTable { .. })));
        assert!(fetcher.requested.is_empty());
        assert_eq!(
            surface.notifications,
            vec!["Video table not found! (#videoslist_table > tbody)"]
        );
    }

    #[tokio::test]
    async fn test_failures_and_misses_do_not_stop_the_batch() {
        let html = table(&["down.php", "plain.php", "ok.php"]);
        let mut fetcher = FakeFetcher::default()
            .with(
                "https://lms.example.edu/course/plain.php",
                "<html><body>No media here</body></html>",
            )
            .with(
                "https://lms.example.edu/course/ok.php",
                r#"<a href="http://media.example.edu/ok.mp4">dl</a>"#,
            );
        let mut surface = RecordingSurface::default();
        let (mut sinks, _written) = memory_sink();

        let summary = extract_links(
            &html,
            &page_url(),
            &settings(),
            &mut fetcher,
            &mut surface,
            &mut sinks,
        )
        .await
        .unwrap();

        assert_eq!(fetcher.requested.len(), 3);
        assert_eq!((summary.found, summary.skipped, summary.failed), (1, 1, 1));
        assert_eq!(summary.links, vec!["http://media.example.edu/ok.mp4"]);

        let progress: Vec<_> = surface
            .views
            .iter()
            .filter_map(|v| v.progress.clone())
            .collect();
        assert_eq!(
            progress,
            vec![
                "Processing 0/3...",
                "Processing 1/3...",
                "Processing 2/3...",
                "Processing 3/3...",
            ]
        );
    }

    #[tokio::test]
    async fn test_ui_ends_done_then_idle() {
        let html = table(&["a.php"]);
        let mut fetcher = FakeFetcher::default();
        let mut surface = RecordingSurface::default();
        let (mut sinks, written) = memory_sink();
        let s = settings();

        let summary = extract_links(&html, &page_url(), &s, &mut fetcher, &mut surface, &mut sinks)
            .await
            .unwrap();

        assert!(summary.links.is_empty());
        assert_eq!(*written.lock().unwrap(), vec![""]);

        let n = surface.views.len();
        assert_eq!(surface.views[n - 2], UiState::Done { count: 0 }.view(&s.messages));
        assert_eq!(surface.views[n - 1], UiState::Idle.view(&s.messages));
        assert!(surface.views[..n - 2].iter().all(|v| v.disabled));
    }

    #[tokio::test]
    async fn test_output_failure_is_returned_when_every_sink_fails() {
        let html = table(&["a.php"]);
        let mut fetcher = FakeFetcher::default().with(
            "https://lms.example.edu/course/a.php",
            r#"<video src="x.mp4">"#,
        );
        let mut surface = RecordingSurface::default();
        let mut sinks: Vec<Box<dyn OutputSink>> = vec![Box::new(BrokenSink)];

        let result = extract_links(
            &html,
            &page_url(),
            &settings(),
            &mut fetcher,
            &mut surface,
            &mut sinks,
        )
        .await;

        assert!(matches!(result, Err(ExtractError::Output { .. })));
    }

    #[tokio::test]
    async fn test_broken_sink_does_not_block_later_sinks() {
        let html = table(&["a.php"]);
        let mut fetcher = FakeFetcher::default().with(
            "https://lms.example.edu/course/a.php",
            r#"<video src="https://d1x.cloudfront.net/lec/a.mp4"></video>"#,
        );
        let mut surface = RecordingSurface::default();
        let written = Arc::new(Mutex::new(Vec::new()));
        let mut sinks: Vec<Box<dyn OutputSink>> = vec![
            Box::new(BrokenSink),
            Box::new(MemorySink(Arc::clone(&written))),
        ];

        let summary = extract_links(
            &html,
            &page_url(),
            &settings(),
            &mut fetcher,
            &mut surface,
            &mut sinks,
        )
        .await
        .unwrap();

        assert_eq!(summary.links, vec!["https://d1x.cloudfront.net/lec/a.mp4"]);
        assert_eq!(
            *written.lock().unwrap(),
            vec!["https://d1x.cloudfront.net/lec/a.mp4"]
        );
        assert!(surface.notifications[0].starts_with("Extracted 1 "));
    }
}
