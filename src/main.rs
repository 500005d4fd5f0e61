//! norma-crawler - Norma Comics Marvel catalog scraper
//!
//! Renders the paginated catalog in headless Chromium and exports one
//! CSV row per comic.

use anyhow::Result;
use clap::Parser;
use norma_crawler::commands::ScrapeCommand;
use norma_crawler::config::Config;
use norma_crawler::renderer::ChromeRenderer;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "norma-crawler",
    version,
    about = "Norma Comics Marvel catalog scraper",
    long_about = "Renders the Marvel catalog of normacomics.com in headless Chromium, \
                  follows every item's detail page, and writes comics_marvel.csv."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output CSV path
    #[arg(short, long, env = "NORMA_OUTPUT")]
    output: Option<PathBuf>,

    /// First listing page to fetch
    #[arg(long)]
    first_page: Option<u32>,

    /// Last listing page to fetch, inclusive
    #[arg(long)]
    last_page: Option<u32>,

    /// Path to the Chromium binary
    #[arg(long, env = "NORMA_CHROME")]
    chrome: Option<PathBuf>,

    /// Seconds to wait for a page's marker element
    #[arg(long, env = "NORMA_TIMEOUT")]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(first) = cli.first_page {
        config.first_page = first;
    }
    if let Some(last) = cli.last_page {
        config.last_page = last;
    }
    if let Some(chrome) = cli.chrome {
        config.chrome_binary = chrome;
    }
    if let Some(timeout) = cli.timeout {
        config.wait_timeout_secs = timeout;
    }

    let output = config.output.clone();
    let cmd = ScrapeCommand::new(config.clone());

    // The browser is torn down on every exit path: run the pipeline,
    // shut down, then propagate the pipeline result.
    let renderer = ChromeRenderer::launch(&config).await?;
    let result = cmd.execute(&renderer).await;
    let shutdown = renderer.shutdown().await;

    let summary = result?;
    shutdown?;

    println!("{}", summary);
    println!("Output: {}", output.display());

    Ok(())
}
