//! Percentage and ratio helpers shared by the metrics

use num_traits::ToPrimitive;

/// `part / whole × 100`, zero when `whole` is zero
pub fn percent<P: ToPrimitive, W: ToPrimitive>(part: P, whole: W) -> f64 {
    let part = part.to_f64().unwrap_or(0.0);
    let whole = whole.to_f64().unwrap_or(0.0);
    if whole <= 0.0 {
        return 0.0;
    }
    part / whole * 100.0
}

/// Arithmetic mean, zero for an empty sequence
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator,
    I::Item: ToPrimitive,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), value| {
            (sum + value.to_f64().unwrap_or(0.0), count + 1)
        });
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Smallest value over the largest, as a percentage
///
/// Zero when the sequence is empty or the largest value is not positive.
pub fn min_max_ratio<I>(values: I) -> f64
where
    I: IntoIterator,
    I::Item: ToPrimitive,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        let value = value.to_f64().unwrap_or(0.0);
        min = min.min(value);
        max = max.max(value);
    }
    if max <= 0.0 {
        return 0.0;
    }
    min / max * 100.0
}

