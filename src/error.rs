use thiserror::Error;

/// Errors produced while scraping a playlist listing
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// No WebDriver session could be created at any of the tried URLs
    #[error("failed to connect to a WebDriver server (tried {tried}): {source}")]
    Connect {
        tried: String,
        #[source]
        source: fantoccini::error::NewSessionError,
    },

    /// A WebDriver command failed after the session was established
    #[error("WebDriver command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    /// A script returned a value of the wrong type
    #[error("script `{script}` returned unexpected value: {value}")]
    UnexpectedScript { script: String, value: String },

    /// The document never reported `readyState == "complete"`
    #[error("page {url} did not finish loading within {timeout_secs}s")]
    PageNotReady { url: String, timeout_secs: u64 },

    /// Page height kept changing past the configured scroll bounds
    #[error("page height did not stabilize after {scrolls} scrolls (last height {last_height})")]
    DidNotConverge { scrolls: usize, last_height: u64 },

    /// A selector that does not parse as CSS
    #[error("invalid CSS selector `{0}`")]
    InvalidSelector(String),

    /// Nothing matched and empty results are configured to fail
    #[error("selector `{selector}` matched no elements")]
    NoMatches { selector: String },

    /// A URL that could not be parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A configuration value that cannot be used
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Reading the config or writing the output failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed JSON in the config, or serialization of the output failed
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;
