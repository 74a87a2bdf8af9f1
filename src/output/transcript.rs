use crate::audio::{AnalysisResult, AudioError};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column layout of a transcript
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptLayout {
    /// Width of the duration column preceding each channel column
    pub duration_width: usize,
    /// Width of each channel's note column
    pub channel_width: usize,
    /// Separator between channel columns
    pub delimiter: char,
}

impl Default for TranscriptLayout {
    fn default() -> Self {
        TranscriptLayout {
            duration_width: 15,
            channel_width: 70,
            delimiter: '|',
        }
    }
}

/// Renders an analysis result as a fixed-width table.
///
/// Rows are time segments, columns are channels. Only the first channel
/// column shows the segment duration; each cell lists the notes of the
/// segment in ascending frequency order.
pub fn render_transcript(result: &AnalysisResult, layout: &TranscriptLayout) -> String {
    let mut out = String::new();

    out.push_str(&fixed_width("duration(s):", layout.duration_width));
    for i in 0..result.channels.len() {
        out.push_str(&fixed_width(
            &format!("channel {}", i + 1),
            layout.duration_width + layout.channel_width,
        ));
    }
    out.push('\n');

    let rows = result
        .channels
        .iter()
        .map(|ch| ch.segments.len())
        .max()
        .unwrap_or(0);

    for row in 0..rows {
        for (col, channel) in result.channels.iter().enumerate() {
            let chord = channel.segments.get(row);

            let duration = match chord {
                Some(chord) if col == 0 => format_duration(chord.duration),
                _ => String::new(),
            };
            out.push_str(&fixed_width(&duration, layout.duration_width));

            let notes: String = chord
                .map(|chord| chord.notes.iter().map(|n| format!("{} ", n)).collect())
                .unwrap_or_default();
            out.push_str(&fixed_width(&notes, layout.channel_width));

            if col + 1 < result.channels.len() {
                out.push(layout.delimiter);
            }
        }
        out.push('\n');
    }

    out
}

/// Writes the transcript of an analysis result to a file.
pub fn write_transcript(
    path: &Path,
    result: &AnalysisResult,
    layout: &TranscriptLayout,
) -> Result<(), AudioError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(render_transcript(result, layout).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Pads with spaces or truncates to exactly `width` characters.
fn fixed_width(text: &str, width: usize) -> String {
    let mut cell: String = text.chars().take(width).collect();
    let len = cell.chars().count();
    cell.extend(std::iter::repeat(' ').take(width - len));
    cell
}

/// Seconds with at most six decimals and no trailing zeros.
fn format_duration(seconds: f64) -> String {
    let text = format!("{:.6}", seconds);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
