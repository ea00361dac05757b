//! Price reducers: mean and population standard deviation
//!
//! Both are total: an empty series yields `0.0` rather than `NaN`, so callers
//! can chain them without checking lengths first.

use crate::types::PricePoint;

/// Arithmetic mean of the `price` field. Empty series → `0.0`.
pub fn mean(prices: &[PricePoint]) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }

    let sum: f64 = prices.iter().map(|p| p.price).sum();
    sum / prices.len() as f64
}

/// Population standard deviation (divides by N, not N-1). Empty series → `0.0`.
pub fn standard_deviation(prices: &[PricePoint]) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }

    let avg = mean(prices);
    let variance: f64 = prices
        .iter()
        .map(|p| (p.price - avg).powi(2))
        .sum::<f64>()
        / prices.len() as f64;

    variance.sqrt()
}


#[cfg(test)]
mod tests {
    use super::test_util::series;
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean() {
        let prices = series(&[100.0, 102.0, 98.0, 104.0]);
        assert!((mean(&prices) - 101.0).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_empty() {
        assert_eq!(standard_deviation(&[]), 0.0);
    }

    #[test]
    fn test_std_dev_is_population() {
        // Population std dev of 2,4,4,4,5,5,7,9 is exactly 2 (sample would be ~2.14)
        let prices = series(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((standard_deviation(&prices) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_constant_series() {
        let prices = series(&[150.0; 10]);
        assert_eq!(standard_deviation(&prices), 0.0);
    }

    #[test]
    fn test_std_dev_single_sample() {
        assert_eq!(standard_deviation(&series(&[42.0])), 0.0);
    }

    #[test]
    fn test_std_dev_non_negative() {
        let inputs: [&[f64]; 4] = [
            &[1.0],
            &[-5.0, 5.0],
            &[0.001, 1e6, 3.3, -2.2],
            &[258.1, 259.75, 257.9, 260.2, 261.0],
        ];
        for input in inputs {
            assert!(standard_deviation(&series(input)) >= 0.0);
        }
    }
}
