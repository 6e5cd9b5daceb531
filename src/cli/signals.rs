//! Signal handling for stop-early

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Stop signal for the recording window.
///
/// Ctrl-C during recording is the CLI equivalent of the Stop button: it ends
/// the capture early and lets the analysis proceed with what was recorded.
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    /// Create a handler around a shared stop flag
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    /// Check if a stop was requested
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Start listening for Ctrl-C; sets the flag on the first signal
    pub fn listen(&self) {
        let flag = Arc::clone(&self.flag);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                flag.store(true, Ordering::SeqCst);
            }
        });
    }
}
