use anyhow::Context;
use clap::Parser;
use eobills::config::load_config;
use eobills::services::output::print_failure;
use eobills::{DataSource, Session};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::Cli;
use commands::{handle_ingest_commands, handle_reference_commands};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("EOBILLS_LOG")
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = load_config()?;
    if let Some(data) = &cli.data {
        config.data_source = data.clone();
    }

    if handle_reference_commands(cli, &config)? {
        return Ok(());
    }

    let source = DataSource::from_spec(&config.data_source, config.timeout_ms);
    let mut session =
        Session::open(source, &config.order_index).context("Failed to load executive orders")?;

    if !handle_ingest_commands(cli, &mut session)? {
        anyhow::bail!("unhandled command");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        print_failure(cli.json, &format!("{:#}", err))?;
        return Err(err);
    }
    Ok(())
}
