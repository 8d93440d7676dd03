//! quizdocs CLI: regenerates the README badges of a quiz collection.
//!
//! Rewrites the challenge list in each locale's index document and the
//! header/footer of every quiz document, leaving hand-written text alone.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
