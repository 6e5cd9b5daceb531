//! CLI presenter for output formatting

use colored::*;

use crate::domain::detection::RenderModel;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Format recording progress bar
    pub fn format_progress(&self, elapsed_ms: u64, total_ms: u64) -> String {
        let elapsed_secs = elapsed_ms / 1000;
        let total_secs = total_ms / 1000;
        let percent = if total_ms > 0 {
            (elapsed_ms as f64 / total_ms as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        let bar_width = 20;
        let filled = ((percent / 100.0) * bar_width as f64) as usize;
        let empty = bar_width - filled;

        format!(
            "[{}{}] {:>3}s / {}s",
            "█".repeat(filled).cyan(),
            "░".repeat(empty),
            elapsed_secs,
            total_secs
        )
    }

    /// Print the detection verdict card to stdout
    pub fn detection_report(&self, model: &RenderModel) {
        let verdict = match model.verdict_class {
            "authentic" => format!("{} {}", "✅".green(), model.verdict_label.green().bold()),
            _ => format!("{} {}", "❌".red(), model.verdict_label.red().bold()),
        };

        println!();
        println!("{}", verdict);
        println!();
        println!("  {:<18} {}", "Risk level:".dimmed(), self.risk_colored(model));
        println!("  {:<18} {}", "Confidence:".dimmed(), model.confidence_label);
        println!("  {:<18} {}", "Prediction score:".dimmed(), model.score_label);
        println!();
        println!("{}", model.recommendation);
    }

    /// Color the risk tier by its style class
    fn risk_colored(&self, model: &RenderModel) -> ColoredString {
        match model.risk_class {
            "low" => model.risk_label.green(),
            "medium" => model.risk_label.yellow(),
            "high" => model.risk_label.red(),
            _ => model.risk_label.red().bold(),
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
