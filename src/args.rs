use clap::Parser;
use scrape_playlists::ScrapeConfig;
use scrape_playlists::config::profile_sets_url;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scrape-playlists")]
#[command(about = "Collects playlist links from a SoundCloud profile into a JSON file")]
#[command(version)]
pub struct Args {
    /// JSON configuration file (flags override its values)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// SoundCloud user whose sets page is scraped
    #[arg(short, long, conflicts_with = "url")]
    pub user: Option<String>,

    /// Listing page URL to scrape
    #[arg(long)]
    pub url: Option<String>,

    /// CSS selector for the playlist link elements
    #[arg(short, long)]
    pub selector: Option<String>,

    /// Attribute read from each matched element
    #[arg(short, long)]
    pub attribute: Option<String>,

    /// Output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// WebDriver server URL
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Maximum scrolls before giving up (0 = unbounded count)
    #[arg(long)]
    pub max_scrolls: Option<usize>,

    /// Pause after each scroll in milliseconds
    #[arg(long)]
    pub scroll_interval_ms: Option<u64>,

    /// Fail instead of writing an empty list when nothing matches
    #[arg(long)]
    pub fail_on_empty: bool,
}

impl Args {
    /// Resolve the run configuration: defaults, then file, then environment, then flags
    pub fn into_config(self) -> Result<ScrapeConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ScrapeConfig::from_file(path)?,
            None => ScrapeConfig::default(),
        };
        config.apply_env();

        if let Some(user) = self.user {
            config.profile_url = profile_sets_url(&user);
        }
        if let Some(url) = self.url {
            config.profile_url = url;
        }
        if let Some(selector) = self.selector {
            config.selector = selector;
        }
        if let Some(attribute) = self.attribute {
            config.link_attribute = attribute;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(webdriver_url) = self.webdriver_url {
            config.webdriver_url = webdriver_url;
        }
        if self.headed {
            config.headless = false;
        }
        if let Some(max_scrolls) = self.max_scrolls {
            config.max_scrolls = max_scrolls;
        }
        if let Some(interval) = self.scroll_interval_ms {
            config.scroll_interval_ms = interval;
        }
        if self.fail_on_empty {
            config.fail_on_empty = true;
        }

        Ok(config)
    }
}
