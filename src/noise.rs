//! Scalar noise used by the waveform grid.

/// Samples the waveform noise at grid cell `(col, row)` and time `t`.
///
/// Three phase-shifted sinusoids averaged together, so the result stays in
/// `[-1, 1]`. Pure: identical inputs give identical outputs.
#[inline]
pub fn sample(col: f64, row: f64, t: f64) -> f64 {
    // `- t` on the column wave moves the crests toward higher columns.
    let v1 = (col * 0.05 - t * 0.2).sin();
    let v2 = (row * 0.05 + t * 0.1).cos();
    let v3 = ((col + row) * 0.02 + t).sin();
    (v1 + v2 + v3) / 3.0
}
