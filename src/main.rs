//! AuthVoice CLI entry point

use std::process::ExitCode;

use clap::Parser;

use authvoice::cli::{
    app::{load_merged_config, run_analyze, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{AnalyzeOptions, Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use authvoice::domain::config::AppConfig;
use authvoice::domain::recording::Duration;
use authvoice::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        endpoint: cli.endpoint.clone(),
        duration: cli.duration.clone(),
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    // Parse duration
    let duration = match config.duration.as_ref() {
        Some(s) => match s.parse::<Duration>() {
            Ok(d) => d,
            Err(e) => {
                presenter.error(&format!("Invalid duration: {}", e));
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => Duration::default_duration(),
    };

    let options = AnalyzeOptions {
        duration,
        endpoint: config.endpoint_or_default(),
        input: cli.input,
    };

    run_analyze(options).await
}
