//! Deterministic numeric and statistical helpers.

#![forbid(unsafe_code)]

/// Most decimal places an `f64` can meaningfully carry.
pub const MAX_DECIMALS: u32 = 15;

/// Round a floating point value to `decimals` decimal places.
///
/// `decimals` is capped at [`MAX_DECIMALS`] so the scale factor stays finite.
#[must_use]
pub fn round_f64(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
    (value * factor).round() / factor
}

/// Return `numer / denom`, or `0.0` when the denominator is zero.
///
/// Non-finite results collapse to `0.0` as well, so a ratio never leaks
/// NaN or infinity into display values.
#[must_use]
pub fn safe_ratio(numer: f64, denom: f64) -> f64 {
    if denom == 0.0 {
        return 0.0;
    }
    let ratio = numer / denom;
    if ratio.is_finite() { ratio } else { 0.0 }
}

/// Scale a 0..1 ratio to a 0..100 percentage.
#[must_use]
pub fn percent(ratio: f64) -> f64 {
    ratio * 100.0
}

/// Arithmetic mean; `0.0` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pearson product-moment correlation of two paired series.
///
/// * `n == 0` yields NaN: there is nothing to correlate.
/// * Zero variance in either series yields `0.0`, a defined coefficient.
///
/// Series of unequal length are paired up to the shorter one.
#[must_use]
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len(), "pearson expects paired series");
    let n = xs.len().min(ys.len());
    if n == 0 {
        return f64::NAN;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let denominator = sum_sq_x.sqrt() * sum_sq_y.sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

/// Pull a coefficient that drifted past ±1 back into range. NaN is kept.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        value
    } else {
        value.clamp(-1.0, 1.0)
    }
}
