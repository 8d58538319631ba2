use crate::{Error, Result};
use ndarray::Array1;

/// Return the Discrete Fourier Transform sample frequencies.
///
/// Best effort parallel of numpy's `fft.fftfreq`. The returned axis contains the frequency bin
/// centers in cycles per unit of the sample spacing, with zero at the start:
///
/// ```text
/// f = [0, 1, ...,   n/2-1,     -n/2, ..., -1] / (d*n)   if n is even
/// f = [0, 1, ..., (n-1)/2, -(n-1)/2, ..., -1] / (d*n)   if n is odd
/// ```
///
/// The order is the one produced by a forward FFT, not ascending. For even `n` the Nyquist bin
/// is reported as a negative frequency.
///
/// # Parameters
/// * `n` : Window length.
/// * `d` : Sample spacing (inverse of the sampling rate). Must be finite and > 0.
///
/// # Examples
/// ```
/// use compound_rs_core::num_rs::fftfreq;
///
/// let f = fftfreq(4, 0.25).unwrap();
/// assert_eq!(f.to_vec(), vec![0., 1., -2., -1.]);
/// ```
pub fn fftfreq(n: usize, d: f64) -> Result<Array1<f64>> {
    if n == 0 {
        return Err(Error::invalid_arg("n", "window length must be > 0"));
    }
    if !d.is_finite() || d <= 0.0 {
        return Err(Error::invalid_arg("d", "sample spacing must be finite and > 0"));
    }

    let val = 1.0 / (n as f64 * d);
    let positive = (n - 1) / 2 + 1;
    let negative = (n / 2) as isize;
    let bins = (0..positive as isize).chain(-negative..0);
    Ok(bins.map(|k| k as f64 * val).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn even_length_wraps_nyquist_to_negative() {
        let f = fftfreq(8, 0.1).unwrap();
        let expected = [0., 1.25, 2.5, 3.75, -5., -3.75, -2.5, -1.25];
        assert_eq!(f.len(), expected.len());
        for (got, want) in f.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn odd_length_is_symmetric() {
        let f = fftfreq(5, 1.0).unwrap();
        let expected = [0., 0.2, 0.4, -0.4, -0.2];
        for (got, want) in f.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn single_sample_is_dc_only() {
        assert_eq!(fftfreq(1, 0.5).unwrap().to_vec(), vec![0.]);
    }

    #[test]
    fn rejects_invalid_arguments() {
        assert!(matches!(fftfreq(0, 1.0), Err(Error::InvalidArg { .. })));
        assert!(matches!(fftfreq(4, 0.0), Err(Error::InvalidArg { .. })));
        assert!(matches!(fftfreq(4, -1.0), Err(Error::InvalidArg { .. })));
        assert!(matches!(fftfreq(4, f64::NAN), Err(Error::InvalidArg { .. })));
    }
}
