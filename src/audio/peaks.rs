/// Score given to the strongest bin of a spectrum
const SCORE_SCALE: f64 = 1000.0;

/// A local maximum of a power spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakCandidate {
    /// Power relative to the strongest bin, scaled to 0..=1000
    pub score: f64,
    /// Frequency of the peak bin in Hz
    pub frequency: f64,
}

/// Finds the local maxima of a power spectral density and ranks them.
///
/// A bin is a peak when it is strictly greater than both neighbours; the
/// first and last bins are never peaks. Each peak is scored relative to the
/// spectrum maximum.
///
/// # Arguments
/// * `psd` - One-sided power spectral density
/// * `sample_rate` - Sample rate in Hz
/// * `fft_len` - Length of the transform the density was computed from
///
/// # Returns
/// * `Vec<PeakCandidate>` - Peaks ordered by descending score; equal scores keep bin order
pub fn find_peaks(psd: &[f64], sample_rate: u32, fft_len: usize) -> Vec<PeakCandidate> {
    let max_psd = psd.iter().copied().fold(0.0, f64::max);
    if max_psd <= 0.0 || psd.len() < 3 {
        return Vec::new();
    }

    let bin_width = f64::from(sample_rate) / fft_len as f64;

    let mut peaks: Vec<PeakCandidate> = psd
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[0] < w[1] && w[1] > w[2])
        .map(|(i, w)| PeakCandidate {
            score: w[1] / max_psd * SCORE_SCALE,
            frequency: (i + 1) as f64 * bin_width,
        })
        .collect();

    peaks.sort_by(|a, b| b.score.total_cmp(&a.score));
    peaks
}
