use crate::audio::{write_wav_file, AnalysisResult, AudioError, ChannelResult, SegmentChord};
use serde::Deserialize;
use std::f64::consts::PI;
use std::path::Path;

/// Settings for rendering detected notes back into audio
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Peak amplitude of a rendered chord
    pub peak_amplitude: f64,
    /// Upper bound for the fade-in and fade-out length of each segment
    pub max_fade_samples: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        SynthesisConfig {
            peak_amplitude: f64::from(i16::MAX) - 4.0,
            max_fade_samples: 175,
        }
    }
}

/// Renders every channel of an analysis result as 16-bit samples.
pub fn render(result: &AnalysisResult, config: &SynthesisConfig) -> Vec<Vec<i16>> {
    result
        .channels
        .iter()
        .map(|channel| render_channel(channel, result.sample_rate, config))
        .collect()
}

/// Concatenates the rendered segments of one channel.
pub fn render_channel(
    channel: &ChannelResult,
    sample_rate: u32,
    config: &SynthesisConfig,
) -> Vec<i16> {
    channel
        .segments
        .iter()
        .flat_map(|chord| render_chord(chord, sample_rate, config))
        .collect()
}

/// Renders one chord as a sum of sines lasting the chord's duration.
///
/// The waveform is scaled so that the sum of all notes peaks at
/// `config.peak_amplitude`, and faded in and out linearly over at most
/// `config.max_fade_samples` samples (or a twentieth of the segment) to avoid
/// clicks between segments. A chord without notes renders as silence.
pub fn render_chord(chord: &SegmentChord, sample_rate: u32, config: &SynthesisConfig) -> Vec<i16> {
    let count = (chord.duration * f64::from(sample_rate)).round() as usize;
    if chord.notes.is_empty() {
        return vec![0; count];
    }

    let gain = config.peak_amplitude / chord.notes.len() as f64;
    let fade_len = (count / 20).min(config.max_fade_samples);
    let fade_out_start = count - fade_len;
    let rate = f64::from(sample_rate);

    (0..count)
        .map(|i| {
            let t = i as f64 / rate;
            let value: f64 = chord
                .notes
                .iter()
                .map(|note| (2.0 * PI * note.frequency * t).sin())
                .sum();

            let envelope = if fade_len == 0 {
                1.0
            } else if i >= fade_out_start {
                1.0 - (i - fade_out_start + 1) as f64 / fade_len as f64
            } else if i < fade_len {
                i as f64 / fade_len as f64
            } else {
                1.0
            };

            (value * gain * envelope)
                .round()
                .clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
        })
        .collect()
}

/// Renders an analysis result and writes it as a 16-bit WAV file.
///
/// # Errors
/// * If the result has no channels
/// * If the file cannot be written
pub fn write_audio(
    path: &Path,
    result: &AnalysisResult,
    config: &SynthesisConfig,
) -> Result<(), AudioError> {
    write_wav_file(path, &render(result, config), result.sample_rate)
}
