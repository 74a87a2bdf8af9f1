use super::types::AudioError;
use rustfft::num_complex::Complex;
use std::f64::consts::PI;

/// Computes the forward Fourier transform of a sequence.
///
/// The input length must be a power of two. Sequences of length 0 or 1 are
/// returned unchanged.
///
/// # Arguments
/// * `input` - Time-domain sequence
///
/// # Returns
/// * `Result<Vec<Complex<f64>>, AudioError>` - Frequency-domain sequence of the same length
///
/// # Errors
/// * If the input length is not a power of two
pub fn forward(input: &[Complex<f64>]) -> Result<Vec<Complex<f64>>, AudioError> {
    let mut buffer = input.to_vec();
    fft_in_place(&mut buffer)?;
    Ok(buffer)
}

/// Computes the inverse Fourier transform of a sequence.
///
/// Uses the conjugation identity: conjugate the input, run the forward
/// transform, conjugate the result and divide by its length.
///
/// # Errors
/// * If the input length is not a power of two
pub fn inverse(input: &[Complex<f64>]) -> Result<Vec<Complex<f64>>, AudioError> {
    let mut buffer: Vec<Complex<f64>> = input.iter().map(Complex::conj).collect();
    fft_in_place(&mut buffer)?;

    let scale = buffer.len() as f64;
    buffer.iter_mut().for_each(|x| *x = x.conj() / scale);
    Ok(buffer)
}

/// Forward radix-2 decimation-in-time transform, in place.
///
/// The buffer is reordered by bit reversal and then combined stage by stage
/// with twiddle factors exp(-2πi·k/N), so no recursion is involved.
///
/// # Errors
/// * If the buffer length is not a power of two
pub fn fft_in_place(buffer: &mut [Complex<f64>]) -> Result<(), AudioError> {
    let n = buffer.len();
    if n <= 1 {
        return Ok(());
    }
    if !n.is_power_of_two() {
        return Err(AudioError::FftLength(n));
    }

    bit_reverse_permute(buffer);

    let twiddles: Vec<Complex<f64>> = (0..n / 2)
        .map(|k| Complex::from_polar(1.0, -2.0 * PI * k as f64 / n as f64))
        .collect();

    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let stride = n / len;
        for start in (0..n).step_by(len) {
            for k in 0..half {
                let t = twiddles[k * stride] * buffer[start + k + half];
                let u = buffer[start + k];
                buffer[start + k] = u + t;
                buffer[start + k + half] = u - t;
            }
        }
        len <<= 1;
    }

    Ok(())
}

fn bit_reverse_permute(buffer: &mut [Complex<f64>]) {
    let n = buffer.len();
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if i < j {
            buffer.swap(i, j);
        }
    }
}
