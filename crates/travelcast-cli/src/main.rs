// travelcast entry point.
//
// 1. Initialize tracing (stderr, so stdout carries only the report)
// 2. Parse arguments
// 3. Run the subcommand against stdout

use anyhow::Context;
use clap::Parser;
use tracing::info;

use travelcast_cli::args::Cli;
use travelcast_cli::commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    info!("travelcast starting: {:?}", cli.command);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(cli, &mut out).await
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("travelcast=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
