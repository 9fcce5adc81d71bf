/// RMS floor applied before taking the logarithm, so silence maps to
/// -200 dB instead of -infinity.
pub const DB_EPSILON: f64 = 1e-10;

/// Root-mean-square amplitude of a frame: sqrt(mean(x²)).
pub fn frame_rms(frame: &[f32]) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = frame.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / frame.len() as f64).sqrt()
}

/// Zero-crossing rate of a frame.
///
/// Counts adjacent pairs whose sign differs, where an exact zero has its own
/// sign, then divides by twice the frame length. A step from +x to 0 and on
/// to -x therefore counts twice.
pub fn zero_crossing_rate(frame: &[f32]) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }
    let changes = frame
        .windows(2)
        .filter(|pair| sign(pair[0]) != sign(pair[1]))
        .count();
    changes as f64 / (2 * frame.len()) as f64
}

/// Convert an RMS amplitude to dBFS, flooring at `DB_EPSILON`.
pub fn amplitude_to_db(rms: f64) -> f64 {
    20.0 * rms.max(DB_EPSILON).log10()
}

fn sign(s: f32) -> i8 {
    if s > 0.0 {
        1
    } else if s < 0.0 {
        -1
    } else {
        0
    }
}
