//! Equal-tempered note classification.
//!
//! Frequencies are mapped onto a table of 108 reference pitches spanning
//! C0 to B8. A frequency is assigned to the nearest reference note, using the
//! quarter step above the lower neighbour as the decision boundary.

use std::fmt;
use std::sync::OnceLock;

/// Frequency ratio between adjacent semitones, 2^(1/12)
pub const SEMITONE_RATIO: f64 = 1.059_463_094_359_295_3;

/// Frequency ratio of half a semitone, 2^(1/24)
pub const QUARTER_STEP_RATIO: f64 = 1.029_302_236_643_492;

/// Number of octaves covered by the reference table
pub const OCTAVES: usize = 9;

/// Number of notes in one octave
pub const NOTES_PER_OCTAVE: usize = 12;

/// Frequency of C in each octave, C0 through C8
const C_FREQUENCIES: [f64; OCTAVES] = [
    16.352, 32.703, 65.406, 130.813, 261.626, 523.251, 1046.502, 2093.005, 4186.009,
];

/// Pitch-class names, starting at C
pub const PITCH_CLASSES: [&str; NOTES_PER_OCTAVE] = [
    "C", "C#/Db", "D", "D#/Eb", "E", "F", "F#/Gb", "G", "G#/Ab", "A", "A#/Bb", "B",
];

/// A frequency classified as a note of the reference table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteLabel {
    /// Position in the reference table (0 is C0, 107 is B8)
    pub index: usize,
    /// The frequency that was classified, in Hz
    pub frequency: f64,
}

impl NoteLabel {
    /// Pitch-class name, e.g. `"C#/Db"`
    pub fn name(&self) -> &'static str {
        PITCH_CLASSES[self.index % NOTES_PER_OCTAVE]
    }

    /// Octave number, 0 through 8
    pub fn octave(&self) -> usize {
        self.index / NOTES_PER_OCTAVE
    }

    /// Tabulated frequency of the note this label refers to
    pub fn reference_frequency(&self) -> f64 {
        NoteClassifier::shared().frequencies[self.index]
    }
}

impl fmt::Display for NoteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.octave())
    }
}

/// Maps frequencies to the nearest equal-tempered note.
#[derive(Debug, Clone)]
pub struct NoteClassifier {
    frequencies: Vec<f64>,
}

impl Default for NoteClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteClassifier {
    /// Builds the reference table by stacking semitones on top of each octave's C.
    pub fn new() -> Self {
        let mut frequencies = Vec::with_capacity(OCTAVES * NOTES_PER_OCTAVE);
        for &c in &C_FREQUENCIES {
            let mut note = c;
            for _ in 0..NOTES_PER_OCTAVE {
                frequencies.push(note);
                note *= SEMITONE_RATIO;
            }
        }
        NoteClassifier { frequencies }
    }

    /// Process-wide classifier, built on first use
    pub fn shared() -> &'static NoteClassifier {
        static CLASSIFIER: OnceLock<NoteClassifier> = OnceLock::new();
        CLASSIFIER.get_or_init(NoteClassifier::new)
    }

    /// Reference frequencies in ascending order
    pub fn reference_frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Classifies a frequency.
    ///
    /// # Arguments
    /// * `freq` - Frequency in Hz
    ///
    /// # Returns
    /// * `Some(NoteLabel)` - The nearest note
    /// * `None` - The frequency lies more than a quarter step outside the table
    pub fn classify(&self, freq: f64) -> Option<NoteLabel> {
        if !freq.is_finite() || freq <= 0.0 {
            return None;
        }

        let lowest = 0;
        let highest = self.frequencies.len() - 1;

        let index = if freq <= self.frequencies[lowest] {
            (freq > self.frequencies[lowest] / QUARTER_STEP_RATIO).then_some(lowest)
        } else if freq >= self.frequencies[highest] {
            (freq < self.frequencies[highest] * QUARTER_STEP_RATIO).then_some(highest)
        } else {
            self.frequencies
                .windows(2)
                .position(|pair| pair[0] <= freq && freq <= pair[1])
                .map(|lower| {
                    let midway = self.frequencies[lower] * QUARTER_STEP_RATIO;
                    if freq < midway {
                        lower
                    } else {
                        lower + 1
                    }
                })
        }?;

        Some(NoteLabel {
            index,
            frequency: freq,
        })
    }
}
