use clap::Parser;

#[derive(Parser)]
#[command(name = "ytgw", about = "YouTube transcript HTTP gateway", version)]
pub struct Cli {
    /// Bind address (overrides config file)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides config file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Skip the watch-page metadata scrape; serve placeholder fields
    #[arg(long)]
    pub no_scrape: bool,

    /// Show config source and startup details
    #[arg(short, long)]
    pub verbose: bool,
}
