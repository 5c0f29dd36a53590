use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use eyre::Result;
use log::{debug, info};

mod cli;

use cli::Cli;
use ytgw::metadata::{MetadataAugmenter, NoAugmentation, PageScraper};
use ytgw::server::AppState;
use ytgw::youtube::{InnerTube, TranscriptProvider};

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();

    // Load config file (non-fatal if missing/invalid)
    let config = ytgw::config::Config::load().unwrap_or_default();

    // CLI flags take priority over the config file
    let host = cli.host.clone().unwrap_or_else(|| config.host.clone());
    let port = cli.port.unwrap_or(config.port);
    let scrape = config.scrape_metadata && !cli.no_scrape;

    if cli.verbose {
        let config_path = ytgw::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
        debug!(
            "provider_timeout={}s page_timeout={}s scrape={scrape}",
            config.provider_timeout_secs, config.page_timeout_secs
        );
    }

    // One shared client; the provider-call timeout bounds every outbound
    // request unless a per-request timeout overrides it
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.provider_timeout_secs))
        .build()?;

    let provider: Arc<dyn TranscriptProvider> = Arc::new(InnerTube::new(client.clone()));

    let augmenter: Arc<dyn MetadataAugmenter> = if scrape {
        Arc::new(PageScraper::new(
            client.clone(),
            Duration::from_secs(config.page_timeout_secs),
        ))
    } else {
        info!("Metadata scraping disabled; serving placeholder fields");
        Arc::new(NoAugmentation)
    };

    let state = AppState { provider, augmenter };
    ytgw::server::serve(state, &host, port).await
}
