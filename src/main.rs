use anyhow::Result;
use clap::Parser;

use vestibular_llm::{logger, App, Cli, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging first, everything else reports through it
    logger::init();

    let cli = Cli::parse();
    let config = Config::from_env();

    App::initialize(cli, config).run().await?;

    Ok(())
}
