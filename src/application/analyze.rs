//! Analyze voice use case

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::time::{interval, Duration as TokioDuration};

use crate::domain::detection::{present, DetectionResult, RenderModel};
use crate::domain::recording::{
    AudioMimeType, Duration, InvalidTransition, RecordingSession,
};

use super::ports::{DeepfakeDetector, DetectionError, RecordingError, VoiceRecorder};

/// Errors from the analyze use case
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Recording failed: {0}")]
    Recording(#[from] RecordingError),

    #[error("{0}")]
    Session(#[from] InvalidTransition),

    #[error("Analysis failed: {0}")]
    Detection(#[from] DetectionError),
}

/// Input parameters for the analyze use case
#[derive(Debug, Clone, Default)]
pub struct AnalyzeInput {
    /// How long to record before stopping automatically
    pub duration: Duration,
}

/// Output from the analyze use case
#[derive(Debug, Clone)]
pub struct AnalyzeOutput {
    /// The validated detection result
    pub result: DetectionResult,
    /// Display-ready view of the result
    pub render: RenderModel,
    /// Captured audio size in human-readable form
    pub audio_size: String,
}

/// Progress callback type, called with (elapsed_ms, total_ms)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Callbacks for progress and status updates
#[derive(Default)]
pub struct AnalyzeCallbacks {
    /// Called when the microphone opens
    pub on_recording_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called during recording with (elapsed_ms, total_ms)
    pub on_progress: Option<ProgressCallback>,
    /// Called when recording ends, with the captured size
    pub on_recording_end: Option<Box<dyn Fn(&str) + Send + Sync>>,
    /// Called when the upload/analysis round trip starts
    pub on_analysis_start: Option<Box<dyn Fn() + Send + Sync>>,
}

/// One-shot record-and-analyze use case.
///
/// Drives the recording session through its legal transitions: the device
/// stream opens only on Idle -> Recording, the artifact is assembled exactly
/// once on Recording -> Captured, and analysis runs as a single attempt
/// against the captured artifact.
pub struct AnalyzeVoiceUseCase<R, D>
where
    R: VoiceRecorder,
    D: DeepfakeDetector,
{
    recorder: R,
    detector: D,
    stop_flag: Arc<AtomicBool>,
}

impl<R, D> AnalyzeVoiceUseCase<R, D>
where
    R: VoiceRecorder,
    D: DeepfakeDetector,
{
    /// Create a new use case instance
    pub fn new(recorder: R, detector: D) -> Self {
        Self {
            recorder,
            detector,
            stop_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the stop flag for external signal handling
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_flag)
    }

    /// Signal to stop recording early
    pub fn stop_early(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Execute the record-and-analyze workflow
    pub async fn execute(
        &self,
        input: AnalyzeInput,
        callbacks: AnalyzeCallbacks,
    ) -> Result<AnalyzeOutput, AnalyzeError> {
        // Reset stop flag
        self.stop_flag.store(false, Ordering::SeqCst);

        let mut session = RecordingSession::new();

        // Acquire the device first; the session only enters Recording once
        // the stream is actually open.
        self.recorder.start().await?;
        session.start_recording()?;

        if let Some(ref cb) = callbacks.on_recording_start {
            cb();
        }

        // Wait out the recording window, honoring early stop. A recorder
        // that stops reporting is_recording has lost its stream; bail out
        // and let stop() surface the device error.
        let total_ms = input.duration.as_millis();
        let mut ticker = interval(TokioDuration::from_millis(100));
        loop {
            ticker.tick().await;
            let elapsed = self.recorder.elapsed_ms();
            if let Some(ref progress) = callbacks.on_progress {
                progress(elapsed.min(total_ms), total_ms);
            }
            if elapsed >= total_ms
                || self.stop_flag.load(Ordering::SeqCst)
                || !self.recorder.is_recording()
            {
                break;
            }
        }

        // stop() releases the device stream on every exit path
        let chunks = self.recorder.stop().await?;
        for chunk in chunks {
            session.append_chunk(chunk)?;
        }
        let artifact = session.stop_recording(AudioMimeType::Wav)?;
        let audio_size = artifact.human_readable_size();

        if let Some(ref cb) = callbacks.on_recording_end {
            cb(&audio_size);
        }
        if let Some(ref cb) = callbacks.on_analysis_start {
            cb();
        }

        // Single attempt, no retry; the captured artifact survives a failure
        // so the caller may retry the analysis step.
        let result = self.detector.analyze(artifact).await?;
        let render = present(&result);

        Ok(AnalyzeOutput {
            result,
            render,
            audio_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detection::{RiskLevel, RECOMMEND_PROCEED};
    use crate::domain::recording::VoiceArtifact;
    use super::super::ports::AudioChunk;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // Mock implementations for testing

    struct MockRecorder {
        chunks: Vec<Vec<u8>>,
        recording: AtomicBool,
    }

    impl MockRecorder {
        fn with_chunks(chunks: Vec<Vec<u8>>) -> Self {
            Self {
                chunks,
                recording: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl VoiceRecorder for MockRecorder {
        async fn start(&self) -> Result<(), RecordingError> {
            self.recording.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn stop(&self) -> Result<Vec<AudioChunk>, RecordingError> {
            self.recording.store(false, Ordering::SeqCst);
            Ok(self.chunks.clone())
        }

        fn is_recording(&self) -> bool {
            self.recording.load(Ordering::SeqCst)
        }

        fn elapsed_ms(&self) -> u64 {
            // Pretend the window elapsed immediately so tests don't sleep
            u64::MAX
        }
    }

    struct FailingRecorder;

    #[async_trait]
    impl VoiceRecorder for FailingRecorder {
        async fn start(&self) -> Result<(), RecordingError> {
            Err(RecordingError::DeviceUnavailable)
        }

        async fn stop(&self) -> Result<Vec<AudioChunk>, RecordingError> {
            Err(RecordingError::CaptureFailed("not started".to_string()))
        }

        fn is_recording(&self) -> bool {
            false
        }

        fn elapsed_ms(&self) -> u64 {
            0
        }
    }

    // Recorder whose stream dies after start() succeeds: the recording flag
    // clears while elapsed time never advances.
    struct DyingRecorder;

    #[async_trait]
    impl VoiceRecorder for DyingRecorder {
        async fn start(&self) -> Result<(), RecordingError> {
            Ok(())
        }

        async fn stop(&self) -> Result<Vec<AudioChunk>, RecordingError> {
            Err(RecordingError::DeviceUnavailable)
        }

        fn is_recording(&self) -> bool {
            false
        }

        fn elapsed_ms(&self) -> u64 {
            0
        }
    }

    struct MockDetector {
        seen_bytes: Mutex<Option<Vec<u8>>>,
        result: Result<DetectionResult, DetectionError>,
    }

    impl MockDetector {
        fn returning(result: Result<DetectionResult, DetectionError>) -> Self {
            Self {
                seen_bytes: Mutex::new(None),
                result,
            }
        }
    }

    #[async_trait]
    impl DeepfakeDetector for MockDetector {
        async fn analyze(
            &self,
            artifact: &VoiceArtifact,
        ) -> Result<DetectionResult, DetectionError> {
            *self.seen_bytes.lock().unwrap() = Some(artifact.data().to_vec());
            self.result.clone()
        }
    }

    fn real_result() -> DetectionResult {
        DetectionResult::new(true, 0.92, RiskLevel::Low, 0.08).unwrap()
    }

    #[tokio::test]
    async fn execute_assembles_chunks_in_order() {
        let recorder = MockRecorder::with_chunks(vec![vec![1, 2], vec![3, 4]]);
        let detector = MockDetector::returning(Ok(real_result()));
        let use_case = AnalyzeVoiceUseCase::new(recorder, detector);

        let output = use_case
            .execute(AnalyzeInput::default(), AnalyzeCallbacks::default())
            .await
            .unwrap();

        let seen = use_case.detector.seen_bytes.lock().unwrap().clone();
        assert_eq!(seen, Some(vec![1, 2, 3, 4]));
        assert!(output.result.is_real());
        assert_eq!(output.render.verdict_class, "authentic");
        assert_eq!(output.render.confidence_label, "92.0%");
        assert_eq!(output.render.recommendation, RECOMMEND_PROCEED);
        assert_eq!(output.audio_size, "4 B");
    }

    #[test]
    fn default_input_uses_default_duration() {
        assert_eq!(
            AnalyzeInput::default().duration,
            Duration::default_duration()
        );
    }

    #[tokio::test]
    async fn stream_death_during_wait_surfaces_device_error() {
        let use_case = AnalyzeVoiceUseCase::new(
            DyingRecorder,
            MockDetector::returning(Ok(real_result())),
        );

        // A window far longer than the test: without the liveness check the
        // wait loop would spin here with elapsed stuck at zero.
        let input = AnalyzeInput {
            duration: Duration::from_secs(3600),
        };

        let err = use_case
            .execute(input, AnalyzeCallbacks::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AnalyzeError::Recording(RecordingError::DeviceUnavailable)
        ));
    }

    #[tokio::test]
    async fn device_unavailable_propagates() {
        let use_case = AnalyzeVoiceUseCase::new(
            FailingRecorder,
            MockDetector::returning(Ok(real_result())),
        );

        let err = use_case
            .execute(AnalyzeInput::default(), AnalyzeCallbacks::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AnalyzeError::Recording(RecordingError::DeviceUnavailable)
        ));
    }

    #[tokio::test]
    async fn detection_failure_propagates() {
        let recorder = MockRecorder::with_chunks(vec![vec![1]]);
        let detector = MockDetector::returning(Err(DetectionError::ServiceError {
            status: 500,
            message: "boom".to_string(),
        }));
        let use_case = AnalyzeVoiceUseCase::new(recorder, detector);

        let err = use_case
            .execute(AnalyzeInput::default(), AnalyzeCallbacks::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AnalyzeError::Detection(DetectionError::ServiceError { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn callbacks_fire_in_order() {
        let recorder = MockRecorder::with_chunks(vec![vec![1, 2, 3]]);
        let detector = MockDetector::returning(Ok(real_result()));
        let use_case = AnalyzeVoiceUseCase::new(recorder, detector);

        let events: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let e1 = Arc::clone(&events);
        let e2 = Arc::clone(&events);
        let e3 = Arc::clone(&events);

        let callbacks = AnalyzeCallbacks {
            on_recording_start: Some(Box::new(move || e1.lock().unwrap().push("rec-start"))),
            on_progress: None,
            on_recording_end: Some(Box::new(move |_| e2.lock().unwrap().push("rec-end"))),
            on_analysis_start: Some(Box::new(move || e3.lock().unwrap().push("analysis"))),
        };

        use_case
            .execute(AnalyzeInput::default(), callbacks)
            .await
            .unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec!["rec-start", "rec-end", "analysis"]
        );
    }
}
