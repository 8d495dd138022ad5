use clap::Parser;
use std::error::Error;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::init();

    let config = Args::parse().into_config()?;
    ::log::info!("Scraping playlists from {}", config.profile_url);
    ::log::debug!("Configuration: {:?}", config);

    let collection = scrape_playlists::run(&config).await?;

    println!("Found {} playlists", collection.len());
    Ok(())
}
