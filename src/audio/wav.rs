use super::types::{AudioError, WavData};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Bit depth of the WAV files written by this crate
pub const OUTPUT_BITS_PER_SAMPLE: u16 = 16;

/// Reads and parses a WAV file into per-channel integer samples.
///
/// This function supports the following WAV formats:
/// - 8, 16, 24 and 32-bit integer
/// - 32-bit float (scaled to the 16-bit integer range)
///
/// A data chunk that ends before its declared size is read up to the last
/// complete frame; the shortfall is logged rather than treated as an error.
/// This includes headers carrying a placeholder size far beyond the file.
///
/// # Arguments
/// * `path` - Path to the WAV file to read
///
/// # Returns
/// * `Result<WavData, AudioError>` - Parsed WAV data or an error
///
/// # Errors
/// * If the file cannot be read
/// * If the WAV format is unsupported
pub fn read_wav_file(path: &Path) -> Result<WavData, AudioError> {
    let reader = WavReader::open(path).map_err(|e| match e {
        hound::Error::IoError(io) => AudioError::Io(io),
        other => AudioError::WavParse(other.to_string()),
    })?;
    let spec = reader.spec();

    if spec.channels == 0 {
        return Err(AudioError::WavParse("WAV file declares no channels".to_string()));
    }

    // The declared data size is untrusted, so capacity is bounded by the file
    let bytes_per_sample = u64::from(spec.bits_per_sample).div_ceil(8).max(1);
    let capacity = (fs::metadata(path)?.len() / bytes_per_sample) as usize;

    let (interleaved, bits_per_sample) = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, bits @ (8 | 16 | 24 | 32)) => {
            (collect_samples(reader.into_samples::<i32>(), capacity, |s| s)?, bits)
        }
        (SampleFormat::Float, 32) => (
            collect_samples(reader.into_samples::<f32>(), capacity, |s| {
                (s.clamp(-1.0, 1.0) * f32::from(i16::MAX)).round() as i32
            })?,
            OUTPUT_BITS_PER_SAMPLE,
        ),
        _ => {
            return Err(AudioError::WavParse(format!(
                "Unsupported WAV format: {:?} {}-bit",
                spec.sample_format, spec.bits_per_sample
            )))
        }
    };

    let num_channels = spec.channels as usize;
    let frames = interleaved.len() / num_channels;
    if interleaved.len() % num_channels != 0 {
        warn!(
            dropped = interleaved.len() % num_channels,
            "Discarding samples of an incomplete trailing frame"
        );
    }

    let channels = (0..num_channels)
        .map(|ch| (0..frames).map(|frame| interleaved[frame * num_channels + ch]).collect())
        .collect();

    Ok(WavData {
        channels,
        sample_rate: spec.sample_rate,
        bits_per_sample,
    })
}

/// Collects decoded samples, stopping at the first read failure.
///
/// The header has already been parsed at this point, so a failing read means
/// the data chunk ends early.
fn collect_samples<S, I>(
    samples: I,
    max_capacity: usize,
    convert: impl Fn(S) -> i32,
) -> Result<Vec<i32>, AudioError>
where
    I: Iterator<Item = hound::Result<S>>,
{
    let mut out = Vec::with_capacity(samples.size_hint().0.min(max_capacity));
    for sample in samples {
        match sample {
            Ok(s) => out.push(convert(s)),
            Err(hound::Error::IoError(e)) => {
                warn!(
                    read = out.len(),
                    error = %e,
                    "Data chunk is shorter than its declared size, using the samples present"
                );
                break;
            }
            Err(e) => return Err(AudioError::WavParse(e.to_string())),
        }
    }
    Ok(out)
}

/// Writes channels of 16-bit samples to a WAV file.
///
/// Channels are interleaved frame by frame; shorter channels are padded with
/// silence up to the length of the longest one.
///
/// # Arguments
/// * `path` - Destination file
/// * `channels` - Samples of each channel
/// * `sample_rate` - Sample rate in Hz
///
/// # Errors
/// * If there are no channels or too many for the WAV header
/// * If the file cannot be created or written
pub fn write_wav_file(
    path: &Path,
    channels: &[Vec<i16>],
    sample_rate: u32,
) -> Result<(), AudioError> {
    let num_channels = u16::try_from(channels.len())
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| {
            AudioError::InvalidParams(format!(
                "Cannot write {} channels to a WAV file",
                channels.len()
            ))
        })?;

    let spec = WavSpec {
        channels: num_channels,
        sample_rate,
        bits_per_sample: OUTPUT_BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let wav_err = |e: hound::Error| AudioError::WavParse(e.to_string());
    let mut writer = WavWriter::create(path, spec).map_err(wav_err)?;

    let frames = channels.iter().map(Vec::len).max().unwrap_or(0);
    for frame in 0..frames {
        for channel in channels {
            let sample = channel.get(frame).copied().unwrap_or(0);
            writer.write_sample(sample).map_err(wav_err)?;
        }
    }

    writer.finalize().map_err(wav_err)
}
