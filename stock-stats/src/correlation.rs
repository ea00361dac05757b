//! Pearson correlation between two index-aligned price series
//!
//! Sample `i` of one series is assumed to line up in time with sample `i` of the
//! other. Only lengths are checked, never timestamps.

use crate::statistic::mean;
use crate::types::PricePoint;

/// Pearson correlation coefficient on raw prices
/// Returns value from -1.0 to +1.0
///
/// Undefined cases report `0.0`:
/// - series lengths differ, or either series is empty
/// - either series has zero variance
pub fn correlation(prices_a: &[PricePoint], prices_b: &[PricePoint]) -> f64 {
    if prices_a.len() != prices_b.len() || prices_a.is_empty() {
        return 0.0;
    }

    let mean_a = mean(prices_a);
    let mean_b = mean(prices_b);

    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    let mut sum_y2 = 0.0;

    for (a, b) in prices_a.iter().zip(prices_b) {
        let diff_a = a.price - mean_a;
        let diff_b = b.price - mean_b;
        sum_xy += diff_a * diff_b;
        sum_x2 += diff_a * diff_a;
        sum_y2 += diff_b * diff_b;
    }

    if sum_x2 == 0.0 || sum_y2 == 0.0 {
        return 0.0;
    }

    // Root each sum separately: their product overflows or underflows at extreme price scales.
    // The sqrt/div chain can still land a hair outside [-1, 1].
    (sum_xy / (sum_x2.sqrt() * sum_y2.sqrt())).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistic::test_util::series;

    #[test]
    fn test_correlation_perfect_positive() {
        let a = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let b = series(&[2.0, 4.0, 6.0, 8.0, 10.0]);
        assert!((correlation(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_perfect_negative() {
        let a = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let b = series(&[5.0, 4.0, 3.0, 2.0, 1.0]);
        assert!((correlation(&a, &b) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_self() {
        let a = series(&[258.1, 259.75, 257.9, 260.2, 261.0]);
        assert!((correlation(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_zero_variance() {
        let a = series(&[5.0]);
        assert_eq!(correlation(&a, &a), 0.0);

        let flat = series(&[100.0, 100.0, 100.0]);
        let moving = series(&[1.0, 2.0, 3.0]);
        assert_eq!(correlation(&flat, &moving), 0.0);
        assert_eq!(correlation(&moving, &flat), 0.0);
    }

    #[test]
    fn test_correlation_mismatched_lengths() {
        let a = series(&[1.0, 2.0, 3.0]);
        let b = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(correlation(&a, &b), 0.0);
    }

    #[test]
    fn test_correlation_empty() {
        assert_eq!(correlation(&[], &[]), 0.0);
    }

    #[test]
    fn test_correlation_symmetric_and_bounded() {
        let a = series(&[150.2, 151.0, 149.8, 152.3, 153.1, 150.0, 148.7]);
        let b = series(&[98.0, 97.5, 99.1, 96.8, 97.0, 99.9, 101.2]);

        let ab = correlation(&a, &b);
        let ba = correlation(&b, &a);

        assert_eq!(ab, ba);
        assert!((-1.0..=1.0).contains(&ab));
        assert!(ab < 0.0);
    }

    #[test]
    fn test_correlation_extreme_price_scales() {
        // [1, 2, 3] against [1, 3, 2] has r = 0.5 at any scale
        for scale in [1e100, 1e-100] {
            let a = series(&[1.0 * scale, 2.0 * scale, 3.0 * scale]);
            let b = series(&[1.0 * scale, 3.0 * scale, 2.0 * scale]);
            let r = correlation(&a, &b);
            assert!((r - 0.5).abs() < 1e-9, "scale {scale}: r = {r}");
        }
    }

    #[test]
    fn test_correlation_ignores_timestamps() {
        let a = series(&[1.0, 2.0, 3.0]);
        let mut b = series(&[10.0, 20.0, 30.0]);
        b.reverse();
        // Values now descend; pairing is by index only
        assert!((correlation(&a, &b) + 1.0).abs() < 1e-12);
    }
}
