use crate::browser::{Browser, WebDriverBrowser};
use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use crate::extract::extract_links;
use crate::loader::load_page;
use crate::results::PlaylistCollection;
use crate::scroll::scroll_until_stable;

/// Connects to WebDriver and runs a full scrape
pub async fn run(config: &ScrapeConfig) -> Result<PlaylistCollection> {
    config.validate()?;
    let browser = WebDriverBrowser::connect(config).await?;
    run_with(browser, config).await
}

/// Runs a scrape on an already acquired browser session.
///
/// The session is closed exactly once whether or not the scrape succeeds.
/// A scrape error takes precedence over a close error.
pub async fn run_with<B: Browser>(browser: B, config: &ScrapeConfig) -> Result<PlaylistCollection> {
    let start_time = std::time::Instant::now();
    let outcome = scrape(&browser, config).await;

    let released = browser.close().await;
    ::log::debug!("Browser session closed");

    match (outcome, released) {
        (Ok(collection), Ok(())) => {
            ::log::info!(
                "Scrape complete - {} playlists in {:.2} seconds",
                collection.len(),
                start_time.elapsed().as_secs_f64()
            );
            Ok(collection)
        }
        (Ok(_), Err(e)) => Err(e),
        (Err(e), released) => {
            if let Err(close_err) = released {
                ::log::warn!("Failed to close browser session: {}", close_err);
            }
            Err(e)
        }
    }
}

/// Load, scroll, extract and write, without releasing the session
async fn scrape<B: Browser>(browser: &B, config: &ScrapeConfig) -> Result<PlaylistCollection> {
    load_page(browser, config).await?;

    let outcome = scroll_until_stable(browser, &config.scroll_policy()).await?;
    ::log::debug!("Scrolling finished: {:?}", outcome);

    let html = browser.source().await?;
    let page_url = browser.current_url().await?;
    let links = extract_links(&html, &page_url, &config.selector, &config.link_attribute)?;

    if links.is_empty() {
        if config.fail_on_empty {
            return Err(ScrapeError::NoMatches {
                selector: config.selector.clone(),
            });
        }
        ::log::warn!(
            "Selector `{}` matched nothing on {}; the page markup may have changed",
            config.selector,
            page_url
        );
    }

    let collection = PlaylistCollection::new(links);
    collection.write_to(&config.output_path)?;
    Ok(collection)
}
