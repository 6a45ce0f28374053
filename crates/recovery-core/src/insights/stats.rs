//! Numeric helpers shared by the pattern calculator and synthesizer

/// Confidence score (0-100) for a comparison over `samples` entries.
///
/// Step function with boundaries at 5, 10, 20 and 50 samples.
pub fn confidence_for_samples(samples: usize) -> u8 {
    match samples {
        0..=4 => 30,
        5..=9 => 50,
        10..=19 => 70,
        20..=49 => 85,
        _ => 95,
    }
}

/// Share of `true` values, or `None` for an empty sample
pub fn rate<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = bool>,
{
    let (hits, total) = values
        .into_iter()
        .fold((0usize, 0usize), |(hits, total), v| (hits + v as usize, total + 1));
    if total == 0 {
        None
    } else {
        Some(hits as f64 / total as f64)
    }
}

/// Arithmetic mean, or `None` for an empty sample
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Difference between two rates in whole percentage points
pub fn percentage_points(delta: f64) -> i32 {
    (delta * 100.0).round() as i32
}

/// Relative change of `value` over `baseline` as a whole percentage.
///
/// `None` when the baseline is zero.
pub fn relative_percent(value: f64, baseline: f64) -> Option<i32> {
    if baseline == 0.0 {
        return None;
    }
    Some((((value - baseline) / baseline) * 100.0).round() as i32)
}
