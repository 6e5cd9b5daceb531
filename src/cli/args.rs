//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::recording::Duration;

/// AuthVoice - voice deepfake detection
#[derive(Parser, Debug)]
#[command(name = "authvoice")]
#[command(version)]
#[command(about = "Record a voice sample and check it for deepfake synthesis")]
#[command(long_about = None)]
pub struct Cli {
    /// Recording duration (e.g., 5s, 30s, 1m)
    #[arg(short = 'd', long, value_name = "TIME", conflicts_with = "input")]
    pub duration: Option<String>,

    /// Detection service endpoint (overrides config and AUTHVOICE_ENDPOINT)
    #[arg(short = 'e', long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Analyze an existing WAV file instead of recording
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed analyze options
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub duration: Duration,
    pub endpoint: String,
    pub input: Option<PathBuf>,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["endpoint", "duration"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["authvoice"]);
        assert!(cli.duration.is_none());
        assert!(cli.endpoint.is_none());
        assert!(cli.input.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_duration() {
        let cli = Cli::parse_from(["authvoice", "-d", "30s"]);
        assert_eq!(cli.duration, Some("30s".to_string()));
    }

    #[test]
    fn cli_parses_endpoint() {
        let cli = Cli::parse_from(["authvoice", "-e", "http://detector:9000"]);
        assert_eq!(cli.endpoint, Some("http://detector:9000".to_string()));
    }

    #[test]
    fn cli_parses_input_file() {
        let cli = Cli::parse_from(["authvoice", "--input", "sample.wav"]);
        assert_eq!(cli.input, Some(PathBuf::from("sample.wav")));
    }

    #[test]
    fn duration_conflicts_with_input() {
        let result = Cli::try_parse_from(["authvoice", "-d", "5s", "-i", "sample.wav"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["authvoice", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["authvoice", "config", "set", "endpoint", "http://x:1"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "endpoint");
            assert_eq!(value, "http://x:1");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("endpoint"));
        assert!(is_valid_config_key("duration"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
