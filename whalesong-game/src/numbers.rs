//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Floor a f64 and clamp it to the i64 range, returning 0 for non-finite values.
#[must_use]
pub fn floor_f64_to_i64(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    // i64::MAX is not representable as f64; the nearest float rounds up past it.
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    if value >= max {
        return i64::MAX;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let clamped = value.floor().max(min);
    cast::<f64, i64>(clamped).unwrap_or(0)
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Convert a count to f64 for probability math.
#[must_use]
pub fn count_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Map a unit draw in `[0, 1)` onto an index below `len`.
///
/// Out-of-range or non-finite draws are clamped so the result is always a
/// valid index for non-empty collections. Returns 0 when `len` is 0.
#[must_use]
pub fn unit_to_index(draw: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let scaled = floor_f64_to_i64(draw * count_to_f64(len)).max(0);
    let index = usize::try_from(scaled).unwrap_or(usize::MAX);
    index.min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_handles_non_finite_and_negatives() {
        assert_eq!(floor_f64_to_i64(f64::NAN), 0);
        assert_eq!(floor_f64_to_i64(f64::INFINITY), 0);
        assert_eq!(floor_f64_to_i64(2.9), 2);
        assert_eq!(floor_f64_to_i64(-0.5), -1);
        assert_eq!(floor_f64_to_i64(f64::MAX), i64::MAX);
    }

    #[test]
    fn unit_to_index_stays_in_range() {
        assert_eq!(unit_to_index(0.0, 4), 0);
        assert_eq!(unit_to_index(0.99, 4), 3);
        assert_eq!(unit_to_index(1.0, 4), 3);
        assert_eq!(unit_to_index(-0.2, 4), 0);
        assert_eq!(unit_to_index(f64::NAN, 4), 0);
        assert_eq!(unit_to_index(0.5, 0), 0);
    }

    #[test]
    fn conversions_are_exact_for_small_values() {
        assert!((i64_to_f64(42) - 42.0).abs() < f64::EPSILON);
        assert!((count_to_f64(7) - 7.0).abs() < f64::EPSILON);
    }
}
