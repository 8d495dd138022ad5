use crate::error::{Result, ScrapeError};
use scraper::{Html, Selector};
use url::Url;

/// Reads `attribute` from every element of `html` matching `selector`.
///
/// Values are resolved against `base_url` the way a browser resolves `href`;
/// a value that cannot be resolved is kept as written. Document order is
/// preserved and duplicates are kept.
pub fn extract_links(
    html: &str,
    base_url: &str,
    selector: &str,
    attribute: &str,
) -> Result<Vec<String>> {
    let selector = parse_selector(selector)?;
    let base = Url::parse(base_url).ok();
    let doc = Html::parse_document(html);

    let mut skipped = 0;
    let links = doc
        .select(&selector)
        .filter_map(|e| {
            let value = e.value().attr(attribute);
            if value.is_none() {
                skipped += 1;
            }
            value
        })
        .map(|value| resolve(base.as_ref(), value))
        .collect::<Vec<String>>();

    if skipped > 0 {
        ::log::debug!(
            "Skipped {} matched elements without a `{}` attribute",
            skipped,
            attribute
        );
    }

    ::log::debug!("Selector matched {} links", links.len());
    if !links.is_empty() {
        ::log::debug!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    Ok(links)
}

/// Parses a CSS selector, reporting the original text on failure
pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| ScrapeError::InvalidSelector(selector.to_string()))
}

fn resolve(base: Option<&Url>, value: &str) -> String {
    match base.map(|b| b.join(value.trim())) {
        Some(Ok(resolved)) => resolved.to_string(),
        _ => value.to_string(),
    }
}
