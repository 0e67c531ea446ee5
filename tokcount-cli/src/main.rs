use clap::Parser;
use tokcount_cli::commands::Commands;

/// Token frequency counting and token-id sequence conversion
#[derive(Debug, Parser)]
#[command(name = "tokcount", version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
