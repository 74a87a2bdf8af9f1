use super::fft::fft_in_place;
use super::peaks::{find_peaks, PeakCandidate};
use super::spectrum::{apply_hann_window, extend_buffer, power_spectral_density};
use super::types::{
    AnalysisConfig, AnalysisResult, AudioError, ChannelResult, SegmentChord, SilenceTrim, WavData,
};
use crate::note::{NoteClassifier, NoteLabel};
use std::borrow::Cow;
use tracing::{debug, info};

/// Analyzes every channel of a WAV recording to find its dominant notes.
///
/// This function performs the following steps:
/// 1. Validates the analysis configuration
/// 2. Splits each channel into windows of the configured duration
/// 3. Finds the strongest spectral peaks of every window
/// 4. Labels the peaks with note names
///
/// # Arguments
/// * `wav_data` - The WAV data to analyze
/// * `config` - Configuration parameters for the analysis
///
/// # Returns
/// * `Result<AnalysisResult, AudioError>` - One chord sequence per channel
///
/// # Errors
/// * If the configuration is invalid
/// * If there's an error during FFT processing
pub fn analyze_audio(
    wav_data: &WavData,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AudioError> {
    config.validate(wav_data.sample_rate)?;

    info!(
        channels = wav_data.channels.len(),
        sample_rate = wav_data.sample_rate,
        duration = wav_data.duration(),
        "Analyzing recording"
    );

    let channels = wav_data
        .channels
        .iter()
        .enumerate()
        .map(|(index, channel)| -> Result<ChannelResult, AudioError> {
            let result = analyze_channel(channel, wav_data.sample_rate, config)?;
            info!(channel = index + 1, segments = result.segments.len(), "Channel analyzed");
            Ok(result)
        })
        .collect::<Result<Vec<ChannelResult>, AudioError>>()?;

    Ok(AnalysisResult {
        sample_rate: wav_data.sample_rate,
        channels,
    })
}

/// Analyzes one channel window by window.
///
/// Silence is trimmed first, then the channel is cut into windows of
/// `config.window_duration` seconds. The last window holds whatever is left
/// and may be shorter.
///
/// # Arguments
/// * `channel` - Integer samples of the channel
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Configuration parameters for the analysis
///
/// # Returns
/// * `Result<ChannelResult, AudioError>` - One chord per window, in temporal order
///
/// # Errors
/// * If the configuration is invalid
pub fn analyze_channel(
    channel: &[i32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> Result<ChannelResult, AudioError> {
    config.validate(sample_rate)?;

    let samples = trim_silence(channel, config.trim);
    let window = config.window_samples(sample_rate, samples.len());
    if samples.is_empty() || window == 0 {
        return Ok(ChannelResult::default());
    }

    let segments = samples
        .chunks(window)
        .map(|segment| analyze_segment(segment, sample_rate, config))
        .collect::<Result<Vec<SegmentChord>, AudioError>>()?;

    Ok(ChannelResult { segments })
}

/// Removes zero-valued samples according to the trim mode.
pub fn trim_silence(channel: &[i32], trim: SilenceTrim) -> Cow<'_, [i32]> {
    match trim {
        SilenceTrim::Leading => {
            let start = channel.iter().position(|&s| s != 0).unwrap_or(channel.len());
            Cow::Borrowed(&channel[start..])
        }
        SilenceTrim::All => Cow::Owned(channel.iter().copied().filter(|&s| s != 0).collect()),
    }
}

/// Finds the dominant notes of a single window.
///
/// The window is Hann-tapered, extended to the transform length, transformed
/// and reduced to its power spectral density, whose ranked peaks are then
/// classified.
fn analyze_segment(
    segment: &[i32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> Result<SegmentChord, AudioError> {
    let duration = segment.len() as f64 / f64::from(sample_rate);

    let mut windowed: Vec<f64> = segment.iter().map(|&s| f64::from(s)).collect();
    apply_hann_window(&mut windowed);

    let mut buffer = extend_buffer(&windowed, sample_rate, config.padding);
    fft_in_place(&mut buffer)?;

    let psd = power_spectral_density(&buffer, sample_rate);
    let peaks = find_peaks(&psd, sample_rate, buffer.len());
    let notes = select_dominant_notes(&peaks, config.num_dominant, NoteClassifier::shared());

    debug!(
        samples = segment.len(),
        fft_len = buffer.len(),
        peaks = peaks.len(),
        notes = ?notes.iter().map(NoteLabel::to_string).collect::<Vec<_>>(),
        "Segment analyzed"
    );

    Ok(SegmentChord { notes, duration })
}

/// Picks the first `num_dominant` distinct notes from ranked peaks.
///
/// Peaks outside the note table and notes already picked are skipped. The
/// result is sorted by ascending frequency.
pub fn select_dominant_notes(
    peaks: &[PeakCandidate],
    num_dominant: usize,
    classifier: &NoteClassifier,
) -> Vec<NoteLabel> {
    let mut notes: Vec<NoteLabel> = Vec::with_capacity(num_dominant);

    for peak in peaks {
        if notes.len() >= num_dominant {
            break;
        }
        let Some(note) = classifier.classify(peak.frequency) else {
            continue;
        };
        if notes.iter().all(|picked| picked.index != note.index) {
            notes.push(note);
        }
    }

    notes.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));
    notes
}
