//! WAV finalization for captured PCM
//!
//! The detection model works on 16kHz mono audio, so captured samples are
//! resampled from the device rate before being wrapped in a WAV container.

use std::io::Cursor;

use rubato::{FftFixedIn, Resampler};

use crate::application::ports::RecordingError;

/// Sample rate the detection service expects
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Resample mono i16 samples from the device rate to 16kHz
fn resample_to_16k(samples: &[i16], source_rate: u32) -> Result<Vec<i16>, RecordingError> {
    if source_rate == TARGET_SAMPLE_RATE {
        return Ok(samples.to_vec());
    }

    let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

    let ratio = TARGET_SAMPLE_RATE as f64 / source_rate as f64;
    let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        TARGET_SAMPLE_RATE as usize,
        1024, // Chunk size
        2,    // Sub-chunks
        1,    // Mono
    )
    .map_err(|e| RecordingError::CaptureFailed(format!("Resampler init failed: {}", e)))?;

    let mut output = Vec::with_capacity(output_len);
    let mut input_pos = 0;

    while input_pos < samples_f32.len() {
        let frames_needed = resampler.input_frames_next();
        let end_pos = (input_pos + frames_needed).min(samples_f32.len());

        let mut chunk = samples_f32[input_pos..end_pos].to_vec();
        if chunk.len() < frames_needed {
            chunk.resize(frames_needed, 0.0);
        }

        let resampled = resampler
            .process(&[chunk], None)
            .map_err(|e| RecordingError::CaptureFailed(format!("Resampling failed: {}", e)))?;

        output.extend(resampled[0].iter().map(|&s| (s * 32767.0) as i16));
        input_pos = end_pos;
    }

    output.truncate(output_len);

    Ok(output)
}

/// Resample captured mono samples to 16kHz and wrap them in a WAV container
pub fn encode_wav(samples: &[i16], source_rate: u32) -> Result<Vec<u8>, RecordingError> {
    if samples.is_empty() {
        return Err(RecordingError::CaptureFailed(
            "No audio data captured".to_string(),
        ));
    }

    let resampled = resample_to_16k(samples, source_rate)?;

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: TARGET_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| RecordingError::CaptureFailed(format!("WAV init failed: {}", e)))?;
        for &sample in &resampled {
            writer
                .write_sample(sample)
                .map_err(|e| RecordingError::CaptureFailed(format!("WAV write failed: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| RecordingError::CaptureFailed(format!("WAV finalize failed: {}", e)))?;
    }

    Ok(cursor.into_inner())
}
