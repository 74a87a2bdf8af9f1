/// Audio processing module for detecting the dominant notes of WAV recordings.
///
/// This module provides functionality to:
/// - Read and write WAV files
/// - Transform audio windows into power spectra
/// - Rank spectral peaks and label them with note names
mod analysis;
pub mod fft;
pub mod peaks;
pub mod spectrum;
mod types;
mod wav;

pub use analysis::{analyze_audio, analyze_channel, select_dominant_notes, trim_silence};
pub use peaks::PeakCandidate;
pub use types::{
    AnalysisConfig, AnalysisResult, AudioError, ChannelResult, PaddingMode, SegmentChord,
    SilenceTrim, WavData,
};
pub use wav::{read_wav_file, write_wav_file, OUTPUT_BITS_PER_SAMPLE};
