mod prompt;
mod shell;

use std::time::Duration;

use clap::Parser;
use tracing::{info, Level};

use cv_core::Result;
use cv_scraper::Session;

#[derive(Parser, Debug)]
#[command(name = "cvgen")]
#[command(about = "Scrape a LinkedIn profile and generate a resume document", long_about = None)]
struct Cli {
    /// WebDriver endpoint the browser is driven through
    #[arg(long, default_value = "http://localhost:4444")]
    webdriver: String,

    /// Seconds to wait for a page to finish client-side rendering
    #[arg(long, default_value_t = 10)]
    page_timeout: u64,

    /// Run the browser headless. Verification challenges cannot be completed
    /// without a visible window.
    #[arg(long)]
    headless: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🌐 Connecting to WebDriver at {}", cli.webdriver);
    let session = Session::connect(
        &cli.webdriver,
        Duration::from_secs(cli.page_timeout),
        cli.headless,
    )
    .await?;

    shell::run(session).await
}
