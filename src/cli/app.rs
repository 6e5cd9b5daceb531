//! Main app runner

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::application::ports::{ConfigStore, DeepfakeDetector};
use crate::application::{AnalyzeCallbacks, AnalyzeInput, AnalyzeVoiceUseCase};
use crate::domain::config::AppConfig;
use crate::domain::detection::present;
use crate::domain::recording::{AudioMimeType, VoiceArtifact};
use crate::infrastructure::{CpalRecorder, HttpDetectionClient, XdgConfigStore};

use super::args::AnalyzeOptions;
use super::presenter::Presenter;
use super::signals::StopSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Build the status spinner shared by the recording callbacks
fn status_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.cyan} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(StdDuration::from_millis(80));
    spinner
}

/// Run the record-and-analyze flow (or analyze an existing file)
pub async fn run_analyze(options: AnalyzeOptions) -> ExitCode {
    let presenter = Presenter::new();
    let detector = HttpDetectionClient::new(options.endpoint.clone());

    if let Some(path) = options.input.as_deref() {
        return analyze_file(path, &detector, &presenter).await;
    }

    let recorder = CpalRecorder::new();
    let use_case = AnalyzeVoiceUseCase::new(recorder, detector);

    // Ctrl-C stops the recording early instead of killing the process
    let stop = StopSignal::new(use_case.stop_flag());
    stop.listen();

    let input = AnalyzeInput {
        duration: options.duration,
    };

    let spinner = status_spinner();
    spinner.set_message("Opening audio device...");

    let progress_fmt = Presenter::new();
    let start_spinner = spinner.clone();
    let progress_spinner = spinner.clone();
    let end_spinner = spinner.clone();
    let analysis_spinner = spinner.clone();

    let callbacks = AnalyzeCallbacks {
        on_recording_start: Some(Box::new(move || {
            start_spinner.set_message("Recording... press Ctrl-C to stop early");
        })),
        on_progress: Some(Arc::new(move |elapsed: u64, total: u64| {
            progress_spinner.set_message(format!(
                "Recording... {}",
                progress_fmt.format_progress(elapsed, total)
            ));
        })),
        on_recording_end: Some(Box::new(move |size: &str| {
            end_spinner.println(format!("✓ Recording complete ({})", size));
        })),
        on_analysis_start: Some(Box::new(move || {
            analysis_spinner.set_message("Analyzing voice...");
        })),
    };

    let outcome = use_case.execute(input, callbacks).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(output) => {
            presenter.detection_report(&output.render);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Analyze an existing WAV file without recording
async fn analyze_file(
    path: &Path,
    detector: &HttpDetectionClient,
    presenter: &Presenter,
) -> ExitCode {
    let bytes = match tokio::fs::read(path).await {
        Ok(b) => b,
        Err(e) => {
            presenter.error(&format!("Failed to read {}: {}", path.display(), e));
            return ExitCode::from(EXIT_ERROR);
        }
    };
    if bytes.is_empty() {
        presenter.warn(&format!("{} is empty", path.display()));
    }

    let artifact = VoiceArtifact::new(bytes, AudioMimeType::Wav);
    presenter.info(&format!(
        "Analyzing {} ({})",
        path.display(),
        artifact.human_readable_size()
    ));

    match detector.analyze(&artifact).await {
        Ok(result) => {
            presenter.detection_report(&present(&result));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Build env config
    let env_config = AppConfig {
        endpoint: env::var("AUTHVOICE_ENDPOINT").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
