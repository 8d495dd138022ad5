use crate::browser::Browser;
use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Navigates to the configured page and waits until it is usable.
///
/// Waits for `document.readyState == "complete"` (an error on timeout), then
/// for the ready selector to match (a warning on timeout), then the settle delay.
pub async fn load_page<B: Browser>(browser: &B, config: &ScrapeConfig) -> Result<()> {
    ::log::info!("Loading {}", config.profile_url);
    browser.goto(&config.profile_url).await?;

    let timeout = config.ready_timeout();
    let started = Instant::now();

    if !poll_until(started, timeout, move || async move {
        Ok::<_, ScrapeError>(browser.ready_state().await? == "complete")
    })
    .await?
    {
        return Err(ScrapeError::PageNotReady {
            url: config.profile_url.clone(),
            timeout_secs: config.ready_timeout_secs,
        });
    }
    ::log::debug!("Document ready after {:.2}s", started.elapsed().as_secs_f64());

    let ready_selector = config.ready_selector();
    if poll_until(started, timeout, move || browser.has_element(ready_selector)).await? {
        ::log::debug!("Found `{}` on the page", ready_selector);
    } else {
        ::log::warn!(
            "No element matched `{}` within {}s; the page markup may have changed",
            ready_selector,
            config.ready_timeout_secs
        );
    }

    let settle = config.settle_delay();
    if !settle.is_zero() {
        tokio::time::sleep(settle).await;
    }
    Ok(())
}

/// Polls `check` until it returns true or `timeout` has passed since `started`.
/// The check always runs at least once.
async fn poll_until<F, Fut>(started: Instant, timeout: Duration, mut check: F) -> Result<bool>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<bool>>,
{
    loop {
        if check().await? {
            return Ok(true);
        }
        if started.elapsed() >= timeout {
            return Ok(false);
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}
