//! Manual exercise for the progress line.
//!
//! Iterates `0..num` in steps of `step`, sleeping between items, then prints the
//! collected values. Logs go to stderr and are controlled with `RUST_LOG`.

use std::{thread, time::Duration};

use anyhow::{Context as _, Result};
use clap::Parser;
use line_progress::ProgressBuilder;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Draw a progress line over a counted loop
#[derive(Debug, Parser)]
#[command(name = "progress-demo", version)]
struct Cli {
    /// Upper bound of the range to iterate
    #[arg(long, default_value_t = 100)]
    num: u64,

    /// Label printed before the bar
    #[arg(long, default_value = "Desc")]
    desc: String,

    /// Throughput unit label
    #[arg(long, default_value = "it")]
    unit: String,

    /// Stride through the range
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    step: u64,

    /// Seconds to sleep per item
    #[arg(long, default_value_t = 0.01)]
    sleep_time: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let pause = Duration::try_from_secs_f64(cli.sleep_time)
        .with_context(|| format!("invalid --sleep-time {}", cli.sleep_time))?;
    let step = usize::try_from(cli.step).context("--step does not fit in usize")?;
    let data: Vec<u64> = (0..cli.num).step_by(step).collect();

    info!(items = data.len(), ?pause, "starting demo");

    let progress = ProgressBuilder::new()
        .with_description(cli.desc)
        .with_unit(cli.unit)
        .wrap(&data)
        .context("progress-demo needs an interactive terminal")?;

    let mut collected = Vec::with_capacity(data.len());
    for &item in progress {
        thread::sleep(pause);
        collected.push(item);
    }

    println!("{collected:?}");
    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
