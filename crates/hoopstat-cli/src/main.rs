// hoopstat entry point.
//
// 1. Parse arguments and initialize tracing (stderr; stdout carries the summary)
// 2. Resolve config (flags > hoopstat.toml > defaults)
// 3. Run the batch: load, resolve columns, compute metrics, export

mod cli;
mod config;

use anyhow::Context;
use clap::Parser;
use hoopstat_core::pipeline;
use tracing::info;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.default_log_filter())?;

    let config = config::load_config(&cli).context("failed to load configuration")?;
    info!(
        input = %config.input.display(),
        output_dir = %config.output_dir.display(),
        "configuration loaded"
    );

    let summary = pipeline::run(&config.input, &config.output_dir, config.delimiter)
        .with_context(|| {
            format!(
                "failed to process {} into {}",
                config.input.display(),
                config.output_dir.display()
            )
        })?;

    println!("Saved outputs to: {}", summary.output_dir.display());
    println!(" Total player-season rows analyzed: {}", summary.rows);
    Ok(())
}

/// Initialize tracing to stderr. `RUST_LOG` takes precedence over `default_filter`.
fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
