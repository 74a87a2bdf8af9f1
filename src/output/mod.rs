/// Consumers of analysis results: transcripts, resynthesized audio and JSON.
mod export;
mod synthesis;
mod transcript;

pub use export::{to_json, write_json};
pub use synthesis::{render, render_channel, render_chord, write_audio, SynthesisConfig};
pub use transcript::{render_transcript, write_transcript, TranscriptLayout};
