use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use audio_transcriber::audio::{self, AudioError, PaddingMode, SilenceTrim};
use audio_transcriber::config::{self, Config};
use audio_transcriber::output;

/// Detect the dominant notes of a WAV recording
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the input WAV file
    #[arg(required = true)]
    input: PathBuf,

    /// Write a WAV file resynthesized from the detected notes
    #[arg(short, long, value_name = "FILE")]
    output_audio: Option<PathBuf>,

    /// Write a transcript of the detected notes
    #[arg(short, long, value_name = "FILE")]
    transcript: Option<PathBuf>,

    /// Write the analysis result as JSON
    #[arg(short, long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Number of dominant notes to detect in each window
    #[arg(short, long, alias = "num-frequencies", value_name = "N")]
    num_dominant: Option<usize>,

    /// Window length in seconds (0 analyzes the whole recording at once)
    #[arg(short, long, alias = "segment-size", value_name = "SECONDS")]
    window: Option<f64>,

    /// How each window is padded before the FFT
    #[arg(long, value_enum)]
    padding: Option<PaddingArg>,

    /// Which zero samples are removed before analysis
    #[arg(long, value_enum)]
    trim: Option<TrimArg>,

    /// Configuration file
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaddingArg {
    Zero,
    Cyclic,
}

#[derive(Clone, Copy, ValueEnum)]
enum TrimArg {
    Leading,
    All,
}

impl From<PaddingArg> for PaddingMode {
    fn from(arg: PaddingArg) -> Self {
        match arg {
            PaddingArg::Zero => PaddingMode::Zero,
            PaddingArg::Cyclic => PaddingMode::Cyclic,
        }
    }
}

impl From<TrimArg> for SilenceTrim {
    fn from(arg: TrimArg) -> Self {
        match arg {
            TrimArg::Leading => SilenceTrim::Leading,
            TrimArg::All => SilenceTrim::All,
        }
    }
}

/// Overlay command line values on top of the configuration file
fn merge_config(cli: &Cli, mut config: Config) -> Config {
    if let Some(n) = cli.num_dominant {
        config.analysis.num_dominant = n;
    }
    if let Some(window) = cli.window {
        config.analysis.window_duration = window;
    }
    if let Some(padding) = cli.padding {
        config.analysis.padding = padding.into();
    }
    if let Some(trim) = cli.trim {
        config.analysis.trim = trim.into();
    }
    config
}

fn run_analysis(cli: &Cli) -> Result<(), AudioError> {
    // Check if WAV file exists
    if !Path::new(&cli.input).exists() {
        return Err(AudioError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("WAV file not found: {}", cli.input.display()),
        )));
    }

    let config = merge_config(cli, config::load_config_from(&cli.config)?);
    let wav_data = audio::read_wav_file(&cli.input)?;
    let result = audio::analyze_audio(&wav_data, &config.analysis)?;

    if let Some(path) = &cli.output_audio {
        output::write_audio(path, &result, &config.synthesis)?;
        tracing::info!("Resynthesized audio written to {}", path.display());
    }

    if let Some(path) = &cli.transcript {
        output::write_transcript(path, &result, &config.transcript)?;
        tracing::info!("Transcript written to {}", path.display());
    }

    if let Some(path) = &cli.json {
        output::write_json(path, &result)?;
        tracing::info!("JSON written to {}", path.display());
    }

    if cli.output_audio.is_none() && cli.transcript.is_none() && cli.json.is_none() {
        // Output to console
        let transcript = output::render_transcript(&result, &config.transcript);
        io::stdout().write_all(transcript.as_bytes())?;
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audio_transcriber=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    run_analysis(&cli)?;

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("\nERROR: {}\n", err);
        match err.downcast_ref::<AudioError>() {
            Some(AudioError::Io(ref io_err)) if io_err.kind() == io::ErrorKind::NotFound => {
                eprintln!("Please check that:");
                eprintln!("1. The file path is correct");
                eprintln!("2. The file exists");
                eprintln!("3. You have permission to read the file");
            }
            Some(AudioError::InvalidParams(_)) => {
                eprintln!("Check the --num-dominant and --window values or the config file.");
            }
            _ => {}
        }
        process::exit(1);
    }
}
