// Transform and spectrum tests
//
// These tests verify the numeric building blocks of the analysis pipeline:
// the radix-2 FFT, the Hann window, buffer extension, the power spectral
// density and the peak detector.

use audio_transcriber::audio::fft;
use audio_transcriber::audio::peaks::find_peaks;
use audio_transcriber::audio::spectrum::{
    apply_hann_window, extend_buffer, extended_length, power_spectral_density,
};
use audio_transcriber::audio::{AudioError, PaddingMode};
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use std::f64::consts::PI;

fn test_signal(n: usize) -> Vec<Complex<f64>> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            Complex::new((0.3 * t).sin() + 0.25 * (1.7 * t).cos(), (0.05 * t * t).sin())
        })
        .collect()
}

/// Test that the inverse transform undoes the forward transform.
#[test]
fn test_fft_round_trip() {
    for &n in &[1usize, 2, 8, 64, 1024] {
        let signal = test_signal(n);
        let spectrum = fft::forward(&signal).expect("Forward transform failed");
        let restored = fft::inverse(&spectrum).expect("Inverse transform failed");

        assert_eq!(restored.len(), n);
        for (a, b) in signal.iter().zip(&restored) {
            assert!((a - b).norm() < 1e-9, "Round trip mismatch for length {}", n);
        }
    }
}

/// Test the forward transform against rustfft.
#[test]
fn test_fft_matches_rustfft() {
    let n = 4096;
    let signal = test_signal(n);
    let ours = fft::forward(&signal).expect("Forward transform failed");

    let mut reference = signal.clone();
    FftPlanner::<f64>::new()
        .plan_fft_forward(n)
        .process(&mut reference);

    for (k, (a, b)) in ours.iter().zip(&reference).enumerate() {
        assert!(
            (a - b).norm() < 1e-8 * (1.0 + b.norm()),
            "Bin {} differs: {} vs {}",
            k,
            a,
            b
        );
    }
}

/// Test that lengths other than powers of two are rejected.
#[test]
fn test_fft_rejects_non_power_of_two() {
    let signal = test_signal(12);
    match fft::forward(&signal) {
        Err(AudioError::FftLength(12)) => {}
        other => panic!("Expected FftLength error, got {:?}", other),
    }
    assert!(fft::inverse(&signal).is_err());

    let mut buffer = test_signal(3);
    assert!(fft::fft_in_place(&mut buffer).is_err());
}

/// Test that the transform of an impulse is flat.
#[test]
fn test_fft_impulse() {
    let mut signal = vec![Complex::new(0.0, 0.0); 16];
    signal[0] = Complex::new(1.0, 0.0);
    let spectrum = fft::forward(&signal).unwrap();
    assert!(spectrum.iter().all(|c| (c - Complex::new(1.0, 0.0)).norm() < 1e-12));
}

/// Test that a bin-aligned sine produces its density maximum at that bin.
#[test]
fn test_known_tone_localization() {
    let n = 1024;
    let rate = 8000;
    let k = 50;
    let freq = k as f64 * f64::from(rate) / n as f64;

    let signal: Vec<Complex<f64>> = (0..n)
        .map(|i| Complex::new((2.0 * PI * freq * i as f64 / f64::from(rate)).sin(), 0.0))
        .collect();
    let spectrum = fft::forward(&signal).unwrap();
    let psd = power_spectral_density(&spectrum, rate);

    assert_eq!(psd.len(), n / 2 + 1);
    let argmax = psd
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(argmax, k);
}

/// Test the density scaling, including the halved DC and Nyquist bins.
#[test]
fn test_power_spectral_density_scaling() {
    let spectrum = vec![
        Complex::new(2.0, 0.0),
        Complex::new(1.0, 1.0),
        Complex::new(0.0, 0.0),
        Complex::new(1.0, -1.0),
    ];
    let psd = power_spectral_density(&spectrum, 1);
    assert_eq!(psd.len(), 3);
    for (a, b) in psd.iter().zip(&[1.0, 1.0, 0.0]) {
        assert!((a - b).abs() < 1e-12);
    }

    // Odd lengths have no Nyquist bin to halve
    let spectrum = vec![Complex::new(3.0, 0.0), Complex::new(0.0, 3.0), Complex::new(0.0, -3.0)];
    let psd = power_spectral_density(&spectrum, 2);
    assert_eq!(psd.len(), 2);
    assert!((psd[0] - 1.5).abs() < 1e-12);
    assert!((psd[1] - 3.0).abs() < 1e-12);

    assert!(power_spectral_density(&[], 44100).is_empty());
}

/// Test the Hann window shape.
#[test]
fn test_hann_window() {
    let mut samples = vec![1.0; 5];
    apply_hann_window(&mut samples);
    let expected = [0.0, 0.5, 1.0, 0.5, 0.0];
    for (a, b) in samples.iter().zip(&expected) {
        assert!((a - b).abs() < 1e-12);
    }

    // Single samples are left unchanged
    let mut single = vec![7.0];
    apply_hann_window(&mut single);
    assert_eq!(single, vec![7.0]);
}

/// Test buffer extension in both padding modes.
#[test]
fn test_extend_buffer() {
    assert_eq!(extended_length(3, 1), 4);
    assert_eq!(extended_length(88200, 44100), 262144);
    assert_eq!(extended_length(1 << 20, 44100), 1 << 20);

    let zero = extend_buffer(&[1.0, 2.0, 3.0], 1, PaddingMode::Zero);
    let zero_re: Vec<f64> = zero.iter().map(|c| c.re).collect();
    assert_eq!(zero_re, vec![1.0, 2.0, 3.0, 0.0]);

    let cyclic = extend_buffer(&[1.0, 2.0, 3.0], 2, PaddingMode::Cyclic);
    let cyclic_re: Vec<f64> = cyclic.iter().map(|c| c.re).collect();
    assert_eq!(cyclic_re, vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0]);
    assert!(cyclic.iter().all(|c| c.im == 0.0));

    assert!(extend_buffer(&[], 44100, PaddingMode::Zero).is_empty());
}

/// Test peak detection and ranking.
#[test]
fn test_find_peaks() {
    let psd = [0.0, 1.0, 0.0, 3.0, 0.0, 2.0, 2.0, 0.0];
    let peaks = find_peaks(&psd, 8, 16);

    // The plateau at bins 5-6 is not a strict maximum
    assert_eq!(peaks.len(), 2);
    assert!((peaks[0].score - 1000.0).abs() < 1e-9);
    assert!((peaks[0].frequency - 1.5).abs() < 1e-12);
    assert!((peaks[1].score - 1000.0 / 3.0).abs() < 1e-9);
    assert!((peaks[1].frequency - 0.5).abs() < 1e-12);

    assert!(find_peaks(&[0.0; 8], 8, 16).is_empty());
    assert!(find_peaks(&[5.0, 1.0], 8, 4).is_empty());
}
