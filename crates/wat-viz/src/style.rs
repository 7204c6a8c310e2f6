//! Shared figure style and error plumbing.

use wat_core::WatError;

/// Pixel size of a two-panel figure.
pub(crate) const TWO_PANEL: (u32, u32) = (1400, 600);

/// Pixel size of the four-panel simulation dashboard.
pub(crate) const FOUR_PANEL: (u32, u32) = (1400, 1000);

pub(crate) const CAPTION_FONT: (&str, u32) = ("sans-serif", 22);

/// Map any backend/drawing error into the crate error type.
pub(crate) fn render_err<E: std::fmt::Display>(e: E) -> WatError {
    WatError::Other(format!("render: {e}"))
}

/// Histogram of `values` over `bins` equal-width bins spanning
/// [0, max(values)], normalized to a probability density.
///
/// Returns (bin width, per-bin density); empty when the input has no
/// positive finite maximum.
pub(crate) fn density_histogram(values: &[f64], bins: usize) -> (f64, Vec<f64>) {
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() || max <= 0.0 || values.is_empty() || bins == 0 {
        return (0.0, Vec::new());
    }
    let width = max / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = ((v / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    let norm = values.len() as f64 * width;
    (width, counts.iter().map(|&c| c as f64 / norm).collect())
}
