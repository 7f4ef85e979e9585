/// ScanWatch CLI: terminal frontend.
///
/// This crate contains argument parsing, configuration layering, and text
/// rendering. Business logic lives in `scanwatch-core`.
pub mod commands;
pub mod config;
pub mod render;
pub mod state;

pub use commands::{run, Cli, Commands, ExitCode};
