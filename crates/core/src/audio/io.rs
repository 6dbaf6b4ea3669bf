//! Audio I/O: WAV read/write, duration, range extraction.

use anyhow::{Context, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Read a WAV file and return (samples_f64_normalized, sample_rate).
///
/// - Normalizes integer PCM to f64 in [-1, 1]
/// - Passes through float WAVs as f64
/// - Takes the first channel if stereo/multi-channel
pub fn read_wav(path: &Path) -> Result<(Vec<f64>, u32)> {
    let reader = WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;

    let spec = reader.spec();
    let sample_rate = spec.sample_rate;
    let channels = spec.channels.max(1) as usize;

    let samples: Vec<f64> = match spec.sample_format {
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .step_by(channels)
                .map(|s| s.map(|v| v as f64 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()
                .context("Failed to read WAV samples")?
        }
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .step_by(channels)
            .map(|s| s.map(|v| v as f64))
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("Failed to read WAV samples")?,
    };

    Ok((samples, sample_rate))
}

/// Write f64 samples to a 16-bit PCM mono WAV file.
///
/// Clips values to [-1, 1] before conversion.
/// Creates parent directories if needed.
pub fn write_wav(path: &Path, samples: &[f64], sample_rate: u32) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;

    for &sample in samples {
        let clipped = sample.clamp(-1.0, 1.0);
        writer.write_sample((clipped * 32767.0) as i16)?;
    }

    writer.finalize().context("Failed to finalize WAV file")?;
    Ok(())
}

/// Duration of a WAV file in seconds.
pub fn get_wav_duration(path: &Path) -> Result<f64> {
    let reader = WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;
    Ok(reader.duration() as f64 / reader.spec().sample_rate as f64)
}

/// Copy out the samples between two times. Clamps to valid bounds.
pub fn extract_range(samples: &[f64], sample_rate: u32, start_s: f64, end_s: f64) -> Vec<f64> {
    let to_index = |t: f64| ((t.max(0.0) * sample_rate as f64).round() as usize).min(samples.len());
    let (start_idx, end_idx) = (to_index(start_s), to_index(end_s));
    if start_idx >= end_idx {
        return vec![];
    }
    samples[start_idx..end_idx].to_vec()
}
