use crate::core::DataPoint;

/// Index of the last point whose `x` is `<= target_x`.
///
/// `points` must be sorted ascending by `x`. Targets left of the first point
/// clamp to index `0`. Runs in `O(log n)`.
///
/// Passing an empty slice is a caller bug: highlight code filters empty
/// series before calling this. Debug builds assert, release builds return `0`.
#[must_use]
pub fn locate(points: &[DataPoint], target_x: f64) -> usize {
    debug_assert!(!points.is_empty(), "locate requires a non-empty series");
    points
        .partition_point(|point| point.x <= target_x)
        .saturating_sub(1)
        .min(points.len().saturating_sub(1))
}
