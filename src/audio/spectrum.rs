use super::types::PaddingMode;
use rustfft::num_complex::Complex;
use std::f64::consts::PI;

/// Minimum transform length, in seconds of audio, before rounding to a power of two
const MIN_TRANSFORM_SECONDS: usize = 4;

/// Applies a Hann window function to the input samples.
///
/// The Hann window is used to reduce spectral leakage in the FFT analysis.
/// The window function is: w(n) = 0.5 * (1 - cos(2π*n/(N-1)))
///
/// Buffers of fewer than two samples are left untouched.
pub fn apply_hann_window(samples: &mut [f64]) {
    let len = samples.len();
    if len < 2 {
        return;
    }
    let denominator = (len - 1) as f64;
    for (i, sample) in samples.iter_mut().enumerate() {
        *sample *= 0.5 * (1.0 - (2.0 * PI * i as f64 / denominator).cos());
    }
}

/// Length of the transform buffer for a segment of `num_samples` samples.
///
/// At least four seconds of audio, so bins are at most a quarter hertz apart,
/// rounded up to the next power of two.
pub fn extended_length(num_samples: usize, sample_rate: u32) -> usize {
    let min_len = MIN_TRANSFORM_SECONDS * sample_rate as usize;
    num_samples.max(min_len).next_power_of_two()
}

/// Builds the complex transform input from a windowed segment.
///
/// The windowed values occupy the start of the buffer; the remainder is
/// filled according to `padding`.
///
/// # Arguments
/// * `windowed` - Hann-windowed samples of one segment
/// * `sample_rate` - Sample rate in Hz
/// * `padding` - How to fill the buffer past the segment
///
/// # Returns
/// * `Vec<Complex<f64>>` - Buffer whose length is a power of two
pub fn extend_buffer(
    windowed: &[f64],
    sample_rate: u32,
    padding: PaddingMode,
) -> Vec<Complex<f64>> {
    let n = windowed.len();
    if n == 0 {
        return Vec::new();
    }

    let len = extended_length(n, sample_rate);
    let mut buffer: Vec<Complex<f64>> = windowed.iter().map(|&x| Complex::new(x, 0.0)).collect();
    buffer.reserve(len - n);

    match padding {
        PaddingMode::Zero => buffer.resize(len, Complex::new(0.0, 0.0)),
        PaddingMode::Cyclic => buffer.extend((n..len).map(|i| Complex::new(windowed[i % n], 0.0))),
    }

    buffer
}

/// Magnitude of every bin of a complex spectrum
pub fn magnitudes(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum.iter().map(|c| c.norm()).collect()
}

/// Computes the one-sided power spectral density of a transformed buffer.
///
/// Bins run from 0 Hz up to and including the Nyquist bin. Every bin is
/// scaled by 2 / (N * sample_rate) to fold in the negative frequencies; the DC
/// bin, and the Nyquist bin for even N, have no mirror and are halved again.
///
/// # Arguments
/// * `spectrum` - Output of the forward transform
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
/// * `Vec<f64>` - ceil((N + 1) / 2) density values
pub fn power_spectral_density(spectrum: &[Complex<f64>], sample_rate: u32) -> Vec<f64> {
    let n = spectrum.len();
    if n == 0 {
        return Vec::new();
    }

    let upper_bound = (n + 2) / 2;
    let scale = n as f64 * f64::from(sample_rate);

    let mut psd: Vec<f64> = magnitudes(&spectrum[..upper_bound])
        .into_iter()
        .map(|m| 2.0 * m * m / scale)
        .collect();

    psd[0] /= 2.0;
    if n % 2 == 0 {
        psd[upper_bound - 1] /= 2.0;
    }

    psd
}
