// Re-export modules
pub mod browser;
pub mod config;
pub mod error;
pub mod extract;
pub mod loader;
pub mod pipeline;
pub mod results;
pub mod scroll;

#[cfg(test)]
mod tests;

// Re-export commonly used types for convenience
pub use browser::{Browser, WebDriverBrowser};
pub use config::ScrapeConfig;
pub use error::ScrapeError;
pub use pipeline::{run, run_with};
pub use results::PlaylistCollection;
