// Test utilities and common constants
//
// This file provides shared utilities used across multiple test files.
// Instead of checked-in sample recordings, the tests synthesize their own
// signals so the expected notes are known exactly.
//
// The utilities include:
// - Constants for commonly used sample rates and amplitudes
// - Tone generators producing integer PCM channels
// - Helpers writing synthesized channels to temporary WAV files

use hound::{SampleFormat, WavSpec, WavWriter};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

/// CD-quality sample rate used by the end-to-end scenarios
#[allow(dead_code)]
pub const CD_SAMPLE_RATE: u32 = 44100;

/// Low sample rate keeping transforms small in the quicker tests
pub const LOW_SAMPLE_RATE: u32 = 8000;

/// Amplitude of synthesized tones, comfortably inside the 16-bit range
pub const TONE_AMPLITUDE: f64 = 8000.0;

/// Phase offset keeping the first sample away from zero, so silence
/// trimming never shortens a synthesized channel
pub const PHASE_OFFSET: f64 = 0.5;

/// Generate a channel holding the sum of sine tones.
///
/// # Arguments
/// * `frequencies` - Frequencies of the tones in Hz
/// * `seconds` - Duration of the channel
/// * `sample_rate` - Sample rate in Hz
/// * `phase` - Phase of every tone at the first sample, in radians
///
/// # Returns
/// * `Vec<i32>` - Rounded integer samples
pub fn tone_with_phase(
    frequencies: &[f64],
    seconds: f64,
    sample_rate: u32,
    phase: f64,
) -> Vec<i32> {
    let count = (seconds * f64::from(sample_rate)).round() as usize;
    (0..count)
        .map(|n| {
            let t = n as f64 / f64::from(sample_rate);
            frequencies
                .iter()
                .map(|f| TONE_AMPLITUDE * (2.0 * PI * f * t + phase).sin())
                .sum::<f64>()
                .round() as i32
        })
        .collect()
}

/// Generate a channel of sine tones starting with a non-zero sample.
#[allow(dead_code)]
pub fn tone(frequencies: &[f64], seconds: f64, sample_rate: u32) -> Vec<i32> {
    tone_with_phase(frequencies, seconds, sample_rate, PHASE_OFFSET)
}

/// Write integer channels to a 16-bit WAV file.
///
/// # Panics
/// * If the channels have different lengths or the file cannot be written
#[allow(dead_code)]
pub fn write_test_wav(path: &Path, channels: &[Vec<i32>], sample_rate: u32) {
    let spec = WavSpec {
        channels: channels.len() as u16,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).expect("Failed to create WAV file");

    let frames = channels[0].len();
    assert!(channels.iter().all(|c| c.len() == frames), "Channels must have equal length");
    for frame in 0..frames {
        for channel in channels {
            writer
                .write_sample(channel[frame] as i16)
                .expect("Failed to write sample");
        }
    }
    writer.finalize().expect("Failed to finalize WAV file");
}

/// Create a temporary directory and return it with a file path inside it.
///
/// The directory is removed when the returned guard is dropped.
#[allow(dead_code)]
pub fn temp_file(name: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    (dir, path)
}

/// Test that verifies the tone generator behaves as the other tests assume.
///
/// This meta-test ensures that generated channels have the requested length
/// and never start with a silent sample.
#[test]
fn test_tone_generator() {
    let channel = tone(&[440.0], 0.5, LOW_SAMPLE_RATE);
    assert_eq!(channel.len(), 4000);
    assert_ne!(channel[0], 0);
    assert!(channel.iter().all(|s| s.abs() <= TONE_AMPLITUDE as i32));
}
