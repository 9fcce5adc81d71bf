use std::f64::consts::PI;

/// Periodic Hann window coefficients of length `n`.
///
/// Formula: w(i) = 0.5 * (1 - cos(2π * i / N))
///
/// This is the "DFT-even" variant used for spectral estimation: it is one
/// sample of a length-(N+1) symmetric window with the last point removed,
/// so consecutive 50%-overlapped windows sum to a constant.
pub fn hann_periodic(n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![1.0; n];
    }

    let scale = 2.0 * PI / n as f64;
    (0..n).map(|i| 0.5 * (1.0 - (scale * i as f64).cos())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_coefficient_is_zero() {
        let w = hann_periodic(1024);
        assert!(w[0].abs() < 1e-12);
        // Unlike the symmetric window, the last sample is not zero
        assert!(w[1023] > 0.0);
    }

    #[test]
    fn peak_at_half_length() {
        let w = hann_periodic(1024);
        assert!((w[512] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn periodic_symmetry() {
        // w(i) == w(N - i) for the periodic variant
        let w = hann_periodic(64);
        for i in 1..32 {
            assert!((w[i] - w[64 - i]).abs() < 1e-12, "Asymmetry at index {i}");
        }
    }

    #[test]
    fn half_overlap_sums_to_one() {
        let n = 256;
        let w = hann_periodic(n);
        for i in 0..n / 2 {
            assert!((w[i] + w[i + n / 2] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn degenerate_lengths() {
        assert!(hann_periodic(0).is_empty());
        assert_eq!(hann_periodic(1), vec![1.0]);
    }
}
