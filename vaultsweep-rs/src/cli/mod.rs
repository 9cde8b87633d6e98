//! CLI command implementations.

pub mod args;
pub mod clean;
pub mod logging;
pub mod output;

pub use args::Cli;
pub use output::Output;
