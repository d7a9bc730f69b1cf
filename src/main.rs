use anyhow::Result;
use clap::Parser;
use weather_overlay::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    weather_overlay::run(cli).await
}
