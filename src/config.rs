use crate::audio::{AnalysisConfig, AudioError};
use crate::output::{SynthesisConfig, TranscriptLayout};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration shared by the library and the CLI
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub synthesis: SynthesisConfig,
    pub transcript: TranscriptLayout,
}

/// Load configuration from config.toml in the working directory
pub fn load_config() -> Result<Config, AudioError> {
    load_config_from(Path::new(DEFAULT_CONFIG_PATH))
}

/// Load configuration from a TOML file.
///
/// A missing file yields the default configuration; any other read failure
/// or malformed content is an error.
pub fn load_config_from(path: &Path) -> Result<Config, AudioError> {
    match fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(AudioError::Io(e)),
    }
}

/// Parse configuration from TOML text
pub fn parse_config(contents: &str) -> Result<Config, AudioError> {
    Ok(toml::from_str(contents)?)
}
