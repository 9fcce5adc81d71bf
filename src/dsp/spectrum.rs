use rustfft::{num_complex::Complex, FftPlanner};

use super::windowing;

/// Default Welch segment length in samples.
pub const WELCH_SEGMENT: usize = 1024;

/// One-sided power spectral density estimate.
pub struct PowerSpectrum {
    /// Bin centre frequencies in Hz, `k * sample_rate / segment_len`.
    pub frequencies: Vec<f64>,
    /// Power density per bin (units²/Hz).
    pub power: Vec<f64>,
}

/// Estimate the power spectral density with Welch's method.
///
/// Algorithm:
/// 1. Split the signal into segments of `segment_len` samples (clamped to the
///    signal length) with 50% overlap
/// 2. Remove each segment's mean, apply a periodic Hann window
/// 3. FFT -> |X|² scaled to a density by 1 / (fs * Σw²)
/// 4. Average across segments and fold into a one-sided spectrum (every bin
///    except DC and, for even lengths, Nyquist is doubled)
pub fn welch_psd(samples: &[f32], sample_rate: u32, segment_len: usize) -> PowerSpectrum {
    let n = segment_len.min(samples.len());
    if n == 0 || sample_rate == 0 {
        return PowerSpectrum {
            frequencies: Vec::new(),
            power: Vec::new(),
        };
    }

    let fs = sample_rate as f64;
    let step = n - n / 2;
    let n_bins = n / 2 + 1;

    let window = windowing::hann_periodic(n);
    let window_energy: f64 = window.iter().map(|w| w * w).sum();
    let scale = 1.0 / (fs * window_energy);

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);

    let mut power = vec![0.0_f64; n_bins];
    let mut segments = 0usize;
    let mut buf: Vec<Complex<f64>> = Vec::with_capacity(n);
    let mut pos = 0;

    while pos + n <= samples.len() {
        let segment = &samples[pos..pos + n];
        let seg_mean = segment.iter().map(|&s| s as f64).sum::<f64>() / n as f64;

        buf.clear();
        buf.extend(
            segment
                .iter()
                .zip(&window)
                .map(|(&s, &w)| Complex::new((s as f64 - seg_mean) * w, 0.0)),
        );

        fft.process(&mut buf);

        for (acc, c) in power.iter_mut().zip(&buf) {
            *acc += c.norm_sqr() * scale;
        }

        segments += 1;
        pos += step;
    }

    let segments = segments.max(1) as f64;
    let last_doubled = if n % 2 == 0 { n_bins - 1 } else { n_bins };
    for (k, p) in power.iter_mut().enumerate() {
        *p /= segments;
        if k > 0 && k < last_doubled {
            *p *= 2.0;
        }
    }

    let frequencies = (0..n_bins).map(|k| k as f64 * fs / n as f64).collect();

    PowerSpectrum { frequencies, power }
}

/// Power-weighted mean frequency: Σ(f·P) / Σ(P).
///
/// Returns 0.0 when the spectrum carries no power (silence, DC only).
pub fn spectral_centroid(spectrum: &PowerSpectrum) -> f64 {
    let total: f64 = spectrum.power.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return 0.0;
    }

    let weighted: f64 = spectrum
        .frequencies
        .iter()
        .zip(&spectrum.power)
        .map(|(f, p)| f * p)
        .sum();

    weighted / total
}
