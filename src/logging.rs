//! Logging Setup
//!
//! Maps the `-v` count to a log level and builds the `tracing` subscriber.
//! The subscriber is installed once at startup and never reconfigured.

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

/// 0 => errors only, 1 => info, 2 or more => debug
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

/// Build a subscriber that writes events at or above `level` to `writer`
pub fn subscriber<W>(level: LevelFilter, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(writer)
        .finish()
}

/// Install the stderr subscriber for the given verbosity as the process default
pub fn init(verbosity: u8) -> Result<()> {
    let subscriber = subscriber(level_for(verbosity), std::io::stderr);
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install log subscriber")?;
    Ok(())
}
