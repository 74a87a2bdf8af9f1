use crate::audio::{AnalysisResult, AudioError};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct ResultDocument {
    sample_rate: u32,
    channels: Vec<ChannelDocument>,
}

#[derive(Serialize)]
struct ChannelDocument {
    segments: Vec<SegmentDocument>,
}

#[derive(Serialize)]
struct SegmentDocument {
    duration: f64,
    notes: Vec<NoteDocument>,
}

#[derive(Serialize)]
struct NoteDocument {
    label: String,
    frequency: f64,
    reference_frequency: f64,
}

impl From<&AnalysisResult> for ResultDocument {
    fn from(result: &AnalysisResult) -> Self {
        ResultDocument {
            sample_rate: result.sample_rate,
            channels: result
                .channels
                .iter()
                .map(|channel| ChannelDocument {
                    segments: channel
                        .segments
                        .iter()
                        .map(|chord| SegmentDocument {
                            duration: chord.duration,
                            notes: chord
                                .notes
                                .iter()
                                .map(|note| NoteDocument {
                                    label: note.to_string(),
                                    frequency: note.frequency,
                                    reference_frequency: note.reference_frequency(),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Serializes an analysis result as pretty-printed JSON.
pub fn to_json(result: &AnalysisResult) -> Result<String, AudioError> {
    Ok(serde_json::to_string_pretty(&ResultDocument::from(result))?)
}

/// Writes an analysis result as JSON to a file.
pub fn write_json(path: &Path, result: &AnalysisResult) -> Result<(), AudioError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &ResultDocument::from(result))?;
    writeln!(writer)?;
    Ok(())
}
