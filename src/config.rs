use crate::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Profile whose playlists are scraped when nothing else is configured
pub const DEFAULT_PROFILE: &str = "saxurn";

/// Selector for playlist title links on a profile's sets page
pub const DEFAULT_SELECTOR: &str = ".sc-classic .soundTitle.streamContext .soundTitle__title";

/// Configuration for a playlist scrape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Listing page to load
    #[serde(default = "default_profile_url")]
    pub profile_url: String,

    /// CSS selector matching the playlist link elements
    #[serde(default = "default_selector")]
    pub selector: String,

    /// Attribute read from each matched element
    #[serde(default = "default_link_attribute")]
    pub link_attribute: String,

    /// Where the JSON result is written (overwritten on every run)
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Ask the driver for a headless browser
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Element to wait for after navigation; falls back to `selector`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_selector: Option<String>,

    /// Upper bound on waiting for the page to become ready
    #[serde(default = "default_ready_timeout_secs")]
    pub ready_timeout_secs: u64,

    /// Extra pause after the page is ready, for late client-side rendering
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Pause between a scroll and the following height reading
    #[serde(default = "default_scroll_interval_ms")]
    pub scroll_interval_ms: u64,

    /// Maximum number of scroll commands (0 = no count bound)
    #[serde(default = "default_max_scrolls")]
    pub max_scrolls: usize,

    /// Maximum wall time spent scrolling (0 = no time bound)
    #[serde(default = "default_max_scroll_duration_secs")]
    pub max_scroll_duration_secs: u64,

    /// Treat a selector that matches nothing as an error
    #[serde(default)]
    pub fail_on_empty: bool,
}

/// Builds the sets listing URL for a SoundCloud user
pub fn profile_sets_url(user: &str) -> String {
    format!("https://soundcloud.com/{}/sets", user.trim_matches('/'))
}

/// Default value for profile_url
fn default_profile_url() -> String {
    profile_sets_url(DEFAULT_PROFILE)
}

/// Default value for selector
fn default_selector() -> String {
    DEFAULT_SELECTOR.to_string()
}

/// Default value for link_attribute
fn default_link_attribute() -> String {
    "href".to_string()
}

/// Default value for output_path
fn default_output_path() -> PathBuf {
    PathBuf::from("soundcloud_playlists.json")
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default value for headless
fn default_headless() -> bool {
    true
}

/// Default value for ready_timeout_secs
fn default_ready_timeout_secs() -> u64 {
    30
}

/// Default value for settle_delay_ms
fn default_settle_delay_ms() -> u64 {
    1000
}

/// Default value for scroll_interval_ms
fn default_scroll_interval_ms() -> u64 {
    2000
}

/// Default value for max_scrolls
fn default_max_scrolls() -> usize {
    200
}

/// Default value for max_scroll_duration_secs
fn default_max_scroll_duration_secs() -> u64 {
    300
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            profile_url: default_profile_url(),
            selector: default_selector(),
            link_attribute: default_link_attribute(),
            output_path: default_output_path(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            ready_selector: None,
            ready_timeout_secs: default_ready_timeout_secs(),
            settle_delay_ms: default_settle_delay_ms(),
            scroll_interval_ms: default_scroll_interval_ms(),
            max_scrolls: default_max_scrolls(),
            max_scroll_duration_secs: default_max_scroll_duration_secs(),
            fail_on_empty: false,
        }
    }
}

impl ScrapeConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Override the WebDriver URL with the WEBDRIVER_URL environment variable if provided
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                ::log::debug!("Using WEBDRIVER_URL from environment: {}", webdriver_url);
                self.webdriver_url = webdriver_url;
            }
        }
    }

    /// Checks the settings that would otherwise fail midway through a run
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.profile_url)?;
        if self.selector.trim().is_empty() {
            return Err(ScrapeError::Config("selector must not be empty".into()));
        }
        crate::extract::parse_selector(&self.selector)?;
        crate::extract::parse_selector(self.ready_selector())?;
        if self.link_attribute.trim().is_empty() {
            return Err(ScrapeError::Config("link attribute must not be empty".into()));
        }
        if self.max_scrolls == 0 && self.max_scroll_duration_secs == 0 {
            return Err(ScrapeError::Config(
                "at least one of max_scrolls or max_scroll_duration_secs must be non-zero".into(),
            ));
        }
        Ok(())
    }

    pub fn ready_selector(&self) -> &str {
        self.ready_selector.as_deref().unwrap_or(&self.selector)
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn scroll_interval(&self) -> Duration {
        Duration::from_millis(self.scroll_interval_ms)
    }

    /// Scroll bounds in the form the convergence loop takes them
    pub fn scroll_policy(&self) -> crate::scroll::ScrollPolicy {
        crate::scroll::ScrollPolicy {
            interval: self.scroll_interval(),
            max_scrolls: (self.max_scrolls > 0).then_some(self.max_scrolls),
            max_duration: (self.max_scroll_duration_secs > 0)
                .then(|| Duration::from_secs(self.max_scroll_duration_secs)),
        }
    }
}
