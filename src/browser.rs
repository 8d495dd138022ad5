use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Value, json};

const SCROLL_HEIGHT_SCRIPT: &str = "return document.body.scrollHeight";
const SCROLL_TO_BOTTOM_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight);";
const READY_STATE_SCRIPT: &str = "return document.readyState";

/// Driver URLs tried when the configured one refuses a session
const FALLBACK_WEBDRIVER_URLS: [&str; 3] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // geckodriver / Selenium default
    "http://127.0.0.1:4444",
];

/// The browser operations a scrape needs.
///
/// `close` consumes the session so it can only be released once.
#[allow(async_fn_in_trait)]
pub trait Browser {
    /// Navigate to `url`
    async fn goto(&self, url: &str) -> Result<()>;

    /// Current value of `document.readyState`
    async fn ready_state(&self) -> Result<String>;

    /// Whether at least one element matches the CSS selector
    async fn has_element(&self, selector: &str) -> Result<bool>;

    /// Current `document.body.scrollHeight`
    async fn scroll_height(&self) -> Result<u64>;

    /// Scroll the window to the bottom of the document
    async fn scroll_to_bottom(&self) -> Result<()>;

    /// Serialized DOM as currently rendered
    async fn source(&self) -> Result<String>;

    /// URL of the loaded document, after any redirects
    async fn current_url(&self) -> Result<String>;

    /// End the session
    async fn close(self) -> Result<()>;
}

/// A browser session driven over the WebDriver protocol
pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    /// Opens a WebDriver session, falling back to common driver ports
    pub async fn connect(config: &ScrapeConfig) -> Result<Self> {
        let caps = capabilities(config.headless);

        let mut tried = vec![config.webdriver_url.clone()];
        let mut last_error = match connect_to(&config.webdriver_url, &caps).await {
            Ok(client) => return Ok(Self { client }),
            Err(e) => {
                ::log::warn!(
                    "Failed to connect to WebDriver at {}: {}",
                    config.webdriver_url,
                    e
                );
                e
            }
        };

        for url in FALLBACK_WEBDRIVER_URLS {
            if url == config.webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            tried.push(url.to_string());
            match connect_to(url, &caps).await {
                Ok(client) => return Ok(Self { client }),
                Err(e) => last_error = e,
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(ScrapeError::Connect {
            tried: tried.join(", "),
            source: last_error,
        })
    }
}

async fn connect_to(
    webdriver_url: &str,
    caps: &Capabilities,
) -> std::result::Result<Client, fantoccini::error::NewSessionError> {
    let client = ClientBuilder::native()
        .capabilities(caps.clone())
        .connect(webdriver_url)
        .await?;
    ::log::debug!("Connected to WebDriver at {}", webdriver_url);
    Ok(client)
}

/// Session capabilities understood by chromedriver and geckodriver
fn capabilities(headless: bool) -> Capabilities {
    let mut caps = Capabilities::new();
    if headless {
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({ "args": ["--headless=new", "--disable-gpu"] }),
        );
        caps.insert(
            "moz:firefoxOptions".to_string(),
            json!({ "args": ["-headless"] }),
        );
    }
    caps
}

/// Interprets a script result as a non-negative height
fn as_height(value: &Value) -> Result<u64> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|h| *h >= 0.0).map(|h| h as u64))
        .ok_or_else(|| ScrapeError::UnexpectedScript {
            script: SCROLL_HEIGHT_SCRIPT.to_string(),
            value: value.to_string(),
        })
}

/// Interprets a script result as a `document.readyState` string
fn as_ready_state(value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ScrapeError::UnexpectedScript {
            script: READY_STATE_SCRIPT.to_string(),
            value: value.to_string(),
        })
}

impl Browser for WebDriverBrowser {
    async fn goto(&self, url: &str) -> Result<()> {
        self.client.goto(url).await?;
        Ok(())
    }

    async fn ready_state(&self) -> Result<String> {
        let value = self.client.execute(READY_STATE_SCRIPT, vec![]).await?;
        as_ready_state(&value)
    }

    async fn has_element(&self, selector: &str) -> Result<bool> {
        let found = self.client.find_all(Locator::Css(selector)).await?;
        Ok(!found.is_empty())
    }

    async fn scroll_height(&self) -> Result<u64> {
        let value = self.client.execute(SCROLL_HEIGHT_SCRIPT, vec![]).await?;
        as_height(&value)
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.client.execute(SCROLL_TO_BOTTOM_SCRIPT, vec![]).await?;
        Ok(())
    }

    async fn source(&self) -> Result<String> {
        Ok(self.client.source().await?)
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.client.current_url().await?.to_string())
    }

    async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}
