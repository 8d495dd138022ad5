use crate::browser::Browser;
use crate::error::{Result, ScrapeError};
use std::time::{Duration, Instant};

/// Bounds for the scroll convergence loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPolicy {
    /// Pause between a scroll and the next height reading
    pub interval: Duration,
    /// Stop with `DidNotConverge` after this many scrolls
    pub max_scrolls: Option<usize>,
    /// Stop with `DidNotConverge` once this much time has passed
    pub max_duration: Option<Duration>,
}

/// How the loop ended when the page settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOutcome {
    /// Scroll commands issued
    pub scrolls: usize,
    /// The height that was read twice in a row
    pub final_height: u64,
}

/// Scrolls to the bottom until two consecutive height readings agree.
///
/// Lazily loaded listings grow as they are scrolled, so an unchanged height
/// after a scroll means nothing more was loaded.
pub async fn scroll_until_stable<B: Browser>(
    browser: &B,
    policy: &ScrollPolicy,
) -> Result<ScrollOutcome> {
    let started = Instant::now();
    let mut last_height = browser.scroll_height().await?;
    let mut scrolls = 0;
    ::log::debug!("Initial page height: {}", last_height);

    loop {
        if policy.max_scrolls.is_some_and(|max| scrolls >= max)
            || policy.max_duration.is_some_and(|max| started.elapsed() >= max)
        {
            ::log::warn!(
                "Giving up after {} scrolls in {:.1}s; height still changing",
                scrolls,
                started.elapsed().as_secs_f64()
            );
            return Err(ScrapeError::DidNotConverge {
                scrolls,
                last_height,
            });
        }

        browser.scroll_to_bottom().await?;
        scrolls += 1;
        if !policy.interval.is_zero() {
            tokio::time::sleep(policy.interval).await;
        }

        let new_height = browser.scroll_height().await?;
        ::log::trace!("Scroll {}: height {} -> {}", scrolls, last_height, new_height);
        if new_height == last_height {
            ::log::info!(
                "Page height settled at {} after {} scrolls",
                new_height,
                scrolls
            );
            return Ok(ScrollOutcome {
                scrolls,
                final_height: new_height,
            });
        }
        last_height = new_height;
    }
}
