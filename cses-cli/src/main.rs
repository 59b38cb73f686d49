//! CSES CLI - Command line tool for scoring streamflow models at USGS gauges.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cses-cli",
    version,
    about = "Community Streamflow Evaluation System toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: cses_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cses_cmd::run(cli.command).await
}
