//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the main application runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{load_merged_config, run_analyze, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{AnalyzeOptions, Cli, Commands, ConfigAction};
pub use config_cmd::handle_config_command;
pub use presenter::Presenter;
