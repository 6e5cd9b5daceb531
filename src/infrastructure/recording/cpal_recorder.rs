//! Cross-platform microphone capture using cpal
//!
//! Captures mono PCM from the default input device and finalizes it as a
//! 16kHz WAV chunk on stop. The cpal stream lives on a dedicated thread
//! (cpal::Stream is not Send) and is dropped as soon as the recording flag
//! clears, so the hardware handle never outlives the Recording state.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use tokio::time::{sleep, Duration as TokioDuration};

use super::wav::{encode_wav, TARGET_SAMPLE_RATE};
use crate::application::ports::{AudioChunk, RecordingError, VoiceRecorder};

/// Microphone recorder backed by cpal
pub struct CpalRecorder {
    /// Captured audio samples (mono, i16, at device sample rate)
    sample_buffer: Arc<StdMutex<Vec<i16>>>,
    /// Device sample rate (may differ from the 16kHz target)
    device_sample_rate: Arc<AtomicU32>,
    /// Recording state; the stream thread exits when this clears
    is_recording: Arc<AtomicBool>,
    /// Elapsed capture time in milliseconds
    elapsed_ms: Arc<AtomicU64>,
    /// Error reported by the stream thread during startup
    start_error: Arc<StdMutex<Option<RecordingError>>>,
}

impl CpalRecorder {
    /// Create a new cpal-based recorder
    pub fn new() -> Self {
        Self {
            sample_buffer: Arc::new(StdMutex::new(Vec::new())),
            device_sample_rate: Arc::new(AtomicU32::new(0)),
            is_recording: Arc::new(AtomicBool::new(false)),
            elapsed_ms: Arc::new(AtomicU64::new(0)),
            start_error: Arc::new(StdMutex::new(None)),
        }
    }

    /// Get the default input device
    fn get_input_device() -> Result<cpal::Device, RecordingError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(RecordingError::DeviceUnavailable)
    }

    /// Get a suitable input configuration
    fn get_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let supported_configs = device.supported_input_configs().map_err(|e| match e {
            cpal::SupportedStreamConfigsError::DeviceNotAvailable => {
                RecordingError::DeviceUnavailable
            }
            other => RecordingError::StartFailed(format!("Failed to get configs: {}", other)),
        })?;

        // Prefer mono configs that include the 16kHz target rate; accept
        // stereo (mixed down) and other rates (resampled) otherwise.
        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let includes_target = config.min_sample_rate().0 <= TARGET_SAMPLE_RATE
                && config.max_sample_rate().0 >= TARGET_SAMPLE_RATE;

            let is_better = match &best_config {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate =
                        includes_target && current.min_sample_rate().0 > TARGET_SAMPLE_RATE;
                    fewer_channels || better_rate
                }
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config.ok_or(RecordingError::StartFailed(
            "No suitable input config found".into(),
        ))?;

        let sample_rate = if config_range.min_sample_rate().0 <= TARGET_SAMPLE_RATE
            && config_range.max_sample_rate().0 >= TARGET_SAMPLE_RATE
        {
            SampleRate(TARGET_SAMPLE_RATE)
        } else {
            config_range.min_sample_rate()
        };

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Mix interleaved multi-channel samples down to mono
    fn downmix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    fn map_build_error(e: cpal::BuildStreamError) -> RecordingError {
        match e {
            cpal::BuildStreamError::DeviceNotAvailable => RecordingError::DeviceUnavailable,
            other => RecordingError::StartFailed(other.to_string()),
        }
    }

    /// Record a startup failure and clear the recording flag
    fn fail_start(
        error: RecordingError,
        start_error: &Arc<StdMutex<Option<RecordingError>>>,
        is_recording: &Arc<AtomicBool>,
    ) {
        if let Ok(mut slot) = start_error.lock() {
            *slot = Some(error);
        }
        is_recording.store(false, Ordering::SeqCst);
    }
}

impl Default for CpalRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VoiceRecorder for CpalRecorder {
    async fn start(&self) -> Result<(), RecordingError> {
        if self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::StartFailed(
                "Recording already in progress".to_string(),
            ));
        }

        // Reset capture state
        if let Ok(mut buffer) = self.sample_buffer.lock() {
            buffer.clear();
        }
        if let Ok(mut slot) = self.start_error.lock() {
            *slot = None;
        }
        self.elapsed_ms.store(0, Ordering::SeqCst);
        self.is_recording.store(true, Ordering::SeqCst);

        let sample_buffer = Arc::clone(&self.sample_buffer);
        let device_sample_rate = Arc::clone(&self.device_sample_rate);
        let is_recording = Arc::clone(&self.is_recording);
        let elapsed_ms = Arc::clone(&self.elapsed_ms);
        let start_error = Arc::clone(&self.start_error);

        // The stream lives on this thread; it is dropped the moment the
        // recording flag clears, on success and failure alike.
        std::thread::spawn(move || {
            let device = match CpalRecorder::get_input_device() {
                Ok(d) => d,
                Err(e) => {
                    CpalRecorder::fail_start(e, &start_error, &is_recording);
                    return;
                }
            };

            let (config, sample_format) = match CpalRecorder::get_input_config(&device) {
                Ok(c) => c,
                Err(e) => {
                    CpalRecorder::fail_start(e, &start_error, &is_recording);
                    return;
                }
            };

            let sample_rate = config.sample_rate.0;
            let channels = config.channels;
            device_sample_rate.store(sample_rate, Ordering::SeqCst);

            let buffer_i16 = Arc::clone(&sample_buffer);
            let recording_i16 = Arc::clone(&is_recording);

            let stream_result = match sample_format {
                SampleFormat::I16 => device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        if recording_i16.load(Ordering::SeqCst) {
                            let mono = CpalRecorder::downmix_to_mono(data, channels);
                            if let Ok(mut buffer) = buffer_i16.lock() {
                                buffer.extend_from_slice(&mono);
                            }
                        }
                    },
                    |err| eprintln!("Audio stream error: {}", err),
                    None,
                ),

                SampleFormat::F32 => {
                    let buffer_f32 = Arc::clone(&sample_buffer);
                    let recording_f32 = Arc::clone(&is_recording);

                    device.build_input_stream(
                        &config,
                        move |data: &[f32], _: &cpal::InputCallbackInfo| {
                            if recording_f32.load(Ordering::SeqCst) {
                                let i16_data: Vec<i16> =
                                    data.iter().map(|&s| (s * 32767.0) as i16).collect();
                                let mono = CpalRecorder::downmix_to_mono(&i16_data, channels);
                                if let Ok(mut buffer) = buffer_f32.lock() {
                                    buffer.extend_from_slice(&mono);
                                }
                            }
                        },
                        |err| eprintln!("Audio stream error: {}", err),
                        None,
                    )
                }

                _ => {
                    CpalRecorder::fail_start(
                        RecordingError::StartFailed("Unsupported sample format".into()),
                        &start_error,
                        &is_recording,
                    );
                    return;
                }
            };

            let stream = match stream_result {
                Ok(s) => s,
                Err(e) => {
                    CpalRecorder::fail_start(
                        CpalRecorder::map_build_error(e),
                        &start_error,
                        &is_recording,
                    );
                    return;
                }
            };

            if let Err(e) = stream.play() {
                CpalRecorder::fail_start(
                    RecordingError::StartFailed(e.to_string()),
                    &start_error,
                    &is_recording,
                );
                return;
            }

            let started = std::time::Instant::now();
            while is_recording.load(Ordering::SeqCst) {
                elapsed_ms.store(started.elapsed().as_millis() as u64, Ordering::SeqCst);
                std::thread::sleep(std::time::Duration::from_millis(50));
            }

            drop(stream);
        });

        // Give the thread a moment to open the device
        sleep(TokioDuration::from_millis(50)).await;

        if !self.is_recording.load(Ordering::SeqCst) {
            let error = self
                .start_error
                .lock()
                .ok()
                .and_then(|mut slot| slot.take())
                .unwrap_or_else(|| {
                    RecordingError::StartFailed("Failed to start recording".into())
                });
            return Err(error);
        }

        Ok(())
    }

    async fn stop(&self) -> Result<Vec<AudioChunk>, RecordingError> {
        if !self.is_recording.load(Ordering::SeqCst) {
            // The stream thread may have died after start() returned;
            // surface its error instead of a generic one.
            if let Some(error) = self.start_error.lock().ok().and_then(|mut s| s.take()) {
                return Err(error);
            }
            return Err(RecordingError::CaptureFailed(
                "No recording in progress".to_string(),
            ));
        }

        // Clearing the flag releases the stream before any fallible work
        self.is_recording.store(false, Ordering::SeqCst);

        // Give the stream thread a moment to wind down
        sleep(TokioDuration::from_millis(100)).await;

        let sample_rate = self.device_sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(RecordingError::CaptureFailed(
                "Device sample rate not set".into(),
            ));
        }

        let samples = match self.sample_buffer.lock() {
            Ok(mut buffer) => std::mem::take(&mut *buffer),
            Err(_) => {
                return Err(RecordingError::CaptureFailed(
                    "Sample buffer poisoned".into(),
                ))
            }
        };

        // WAV finalization is CPU-bound; keep it off the async threads
        let wav = tokio::task::spawn_blocking(move || encode_wav(&samples, sample_rate))
            .await
            .map_err(|e| RecordingError::CaptureFailed(format!("Encode task error: {}", e)))??;

        Ok(vec![wav])
    }

    fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }

    fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms.load(Ordering::SeqCst)
    }
}
