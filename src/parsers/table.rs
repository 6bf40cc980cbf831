use crate::error::ExtractError;
use scraper::{Html, Selector};
use url::Url;

/// Default location of the video list on the course page
pub const DEFAULT_TABLE_SELECTOR: &str = "#videoslist_table > tbody";

/// Finds the video table and returns the absolute URL of every link inside it
///
/// Links are returned in document order. Relative `href`s are resolved
/// against the document's first `<base href>` if it has one, otherwise
/// against `base_url`, the same way the browser exposes `a.href`.
pub fn collect_links(html: &str, selector: &str, base_url: &Url) -> Result<Vec<String>, ExtractError> {
    let table_selector = parse_selector(selector)?;
    let link_selector = Selector::parse("a[href]").unwrap();

    let doc = Html::parse_document(html);
    let base_url = document_base(&doc, base_url);
    let table = doc
        .select(&table_selector)
        .next()
        .ok_or_else(|| ExtractError::MissingTable {
            selector: selector.to_string(),
        })?;

    let links = table
        .select(&link_selector)
        .filter_map(|e| e.value().attr("href"))
        .filter_map(|href| match base_url.join(href.trim()) {
            Ok(resolved) => Some(resolved.to_string()),
            Err(e) => {
                ::log::debug!("Dropping unresolvable link {}: {}", href, e);
                None
            }
        })
        .collect::<Vec<String>>();

    ::log::debug!("Video table has {} links", links.len());
    if !links.is_empty() {
        ::log::debug!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    Ok(links)
}

/// The document base URL: `<base href>` resolved against the page URL
fn document_base(doc: &Html, page_url: &Url) -> Url {
    let base_selector = Selector::parse("base[href]").unwrap();
    doc.select(&base_selector)
        .next()
        .and_then(|e| e.value().attr("href"))
        .and_then(|href| page_url.join(href.trim()).ok())
        .unwrap_or_else(|| page_url.clone())
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}
