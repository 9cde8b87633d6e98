//! Log output for the CLI.

use crate::config::LoggingConfig;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Install the stderr subscriber.
///
/// The base level comes from the config, each `-v` raises it by one step and
/// `--quiet` drops it to errors. `RUST_LOG` directives still apply on top.
pub fn init(cfg: &LoggingConfig, verbose: u8, quiet: bool) {
    let level = effective_level(cfg, verbose, quiet);

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    // A subscriber may already be set (tests driving `run` twice).
    let _ = tracing_subscriber::registry().with(layer).try_init();
}

fn effective_level(cfg: &LoggingConfig, verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }

    let base = parse_level(&cfg.level).unwrap_or(LevelFilter::WARN);
    (0..verbose).fold(base, |level, _| raise(level))
}

fn raise(level: LevelFilter) -> LevelFilter {
    const STEPS: [LevelFilter; 6] = [
        LevelFilter::OFF,
        LevelFilter::ERROR,
        LevelFilter::WARN,
        LevelFilter::INFO,
        LevelFilter::DEBUG,
        LevelFilter::TRACE,
    ];

    STEPS
        .iter()
        .position(|step| *step == level)
        .and_then(|i| STEPS.get(i + 1))
        .copied()
        .unwrap_or(LevelFilter::TRACE)
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "off" => Some(LevelFilter::OFF),
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}
