// Pulseplan - AI workout and nutrition plans in the terminal
// Main entry point

use anyhow::Result;
use clap::Parser;

use pulseplan::app::AppContext;
use pulseplan::cli::{self, Cli};
use pulseplan::config::load_config;
use pulseplan::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Load configuration
    let mut config = load_config()?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    // Initialize tracing
    logging::init(args.debug || config.logging.debug);

    let ctx = AppContext::init(config)?;
    let result = cli::run(&ctx, args.command).await;
    ctx.shutdown();

    result
}
