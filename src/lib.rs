//! Dominant-note detection for WAV recordings.
//!
//! Each channel is cut into fixed-length windows, every window is transformed
//! into a power spectrum, and its strongest peaks are labelled with
//! equal-tempered note names. The resulting [`audio::AnalysisResult`] can be
//! rendered as a transcript, resynthesized into audio or exported as JSON.

pub mod audio;
pub mod config;
pub mod note;
pub mod output;
