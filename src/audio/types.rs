use crate::note::NoteLabel;
use serde::Deserialize;

/// Represents the data from a WAV file after reading
#[derive(Debug, Clone)]
pub struct WavData {
    /// De-interleaved integer samples, one vector per channel
    pub channels: Vec<Vec<i32>>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bit depth of the integer samples
    pub bits_per_sample: u16,
}

impl WavData {
    /// Number of samples in each channel
    pub fn samples_per_channel(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Duration of the recording in seconds
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples_per_channel() as f64 / f64::from(self.sample_rate)
    }
}

/// How the windowed segment is extended up to the transform length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingMode {
    /// Fill the tail with zeros
    #[default]
    Zero,
    /// Repeat the windowed samples periodically
    Cyclic,
}

/// Which zero-valued samples are dropped before segmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SilenceTrim {
    /// Only the run of zeros at the start of the channel
    #[default]
    Leading,
    /// Every zero sample, wherever it occurs
    All,
}

/// Configuration for note analysis
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Length of each analysis window in seconds (0 analyzes the whole channel at once)
    pub window_duration: f64,
    /// Maximum number of distinct notes reported per window
    pub num_dominant: usize,
    /// Extension strategy for the transform buffer
    pub padding: PaddingMode,
    /// Silence removal strategy
    pub trim: SilenceTrim,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            window_duration: 0.0,
            num_dominant: 1,
            padding: PaddingMode::default(),
            trim: SilenceTrim::default(),
        }
    }
}

/// The dominant notes of one analysis window together with its duration
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentChord {
    /// Distinct notes, ascending by detected frequency
    pub notes: Vec<NoteLabel>,
    /// Duration of the window in seconds
    pub duration: f64,
}

impl SegmentChord {
    /// Text of every note label, in chord order
    pub fn labels(&self) -> Vec<String> {
        self.notes.iter().map(NoteLabel::to_string).collect()
    }
}

/// Analysis results of one channel, in temporal order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelResult {
    pub segments: Vec<SegmentChord>,
}

/// Analysis results of a whole recording, in channel order
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Sample rate shared by every analyzed channel
    pub sample_rate: u32,
    pub channels: Vec<ChannelResult>,
}

/// Errors that can occur during audio processing
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// IO errors when reading/writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors during WAV file parsing or writing
    #[error("WAV error: {0}")]
    WavParse(String),

    /// Invalid parameter values
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Transform input whose length is not a power of two
    #[error("FFT input length {0} is not a power of two")]
    FftLength(usize),

    /// Malformed configuration file
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Errors serializing the analysis result
    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),
}

impl AnalysisConfig {
    /// Validates the configuration against the sample rate of a recording
    ///
    /// # Arguments
    /// * `sample_rate` - The sample rate the configuration will be applied to
    ///
    /// # Returns
    /// * `Ok(())` if the configuration is valid
    /// * `Err(AudioError)` if the configuration is invalid
    pub fn validate(&self, sample_rate: u32) -> Result<(), AudioError> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidParams(
                "Sample rate must be positive".to_string(),
            ));
        }

        if !self.window_duration.is_finite() || self.window_duration < 0.0 {
            return Err(AudioError::InvalidParams(format!(
                "Window duration must be a non-negative number of seconds, got {}",
                self.window_duration
            )));
        }

        if self.num_dominant == 0 {
            return Err(AudioError::InvalidParams(
                "At least one dominant note must be requested".to_string(),
            ));
        }

        if self.window_duration > 0.0 && self.window_samples(sample_rate, usize::MAX) == 0 {
            return Err(AudioError::InvalidParams(format!(
                "Window of {}s is shorter than one sample at {}Hz",
                self.window_duration, sample_rate
            )));
        }

        Ok(())
    }

    /// Number of samples per analysis window.
    ///
    /// A zero window duration means the whole channel, so `channel_len` is returned.
    pub fn window_samples(&self, sample_rate: u32, channel_len: usize) -> usize {
        if self.window_duration == 0.0 {
            channel_len
        } else {
            (self.window_duration * f64::from(sample_rate)).round() as usize
        }
    }
}
