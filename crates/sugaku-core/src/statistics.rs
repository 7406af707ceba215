//! Descriptive statistics over integer samples.
//!
//! These back the mode, median and standard deviation problems. Every
//! function returns `None` for samples too small to define the statistic.

use std::collections::HashMap;

/// Arithmetic mean.
pub fn mean(data: &[i64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let sum: i64 = data.iter().sum();
    Some(sum as f64 / data.len() as f64)
}

/// All most-frequent values, in order of first occurrence.
pub fn multimode(data: &[i64]) -> Vec<i64> {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    let mut order = Vec::new();
    for &value in data {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }
    let Some(&max) = counts.values().max() else {
        return Vec::new();
    };
    order.into_iter().filter(|v| counts[v] == max).collect()
}

/// The mode, with ties broken by averaging the tied values.
pub fn mode(data: &[i64]) -> Option<f64> {
    match multimode(data).as_slice() {
        [] => None,
        [single] => Some(*single as f64),
        tied => mean(tied),
    }
}

/// Middle value, or the mean of the two middle values for even lengths.
pub fn median(data: &[i64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid] as f64)
    } else {
        Some((sorted[mid - 1] + sorted[mid]) as f64 / 2.0)
    }
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std_dev(data: &[i64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let mean = mean(data)?;
    let sum_sq: f64 = data
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum();
    Some((sum_sq / (data.len() - 1) as f64).sqrt())
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multimode_keeps_first_occurrence_order() {
        assert_eq!(multimode(&[3, 1, 1, 3, 2]), vec![3, 1]);
        assert_eq!(multimode(&[4, 4, 1]), vec![4]);
        assert!(multimode(&[]).is_empty());
    }

    #[test]
    fn mode_single_winner() {
        assert_eq!(mode(&[1, 2, 2, 3, 4, 5, 6, 7, 8, 9]), Some(2.0));
    }

    #[test]
    fn mode_ties_average_the_modes() {
        assert_eq!(mode(&[2, 2, 4, 4, 9]), Some(3.0));
        assert_eq!(mode(&[2, 2, 3, 3]), Some(2.5));
        // Every value distinct: every value is a mode.
        assert_eq!(mode(&[1, 2, 3, 4]), Some(2.5));
        assert_eq!(mode(&[]), None);
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[9, 1, 5]), Some(5.0));
        assert_eq!(median(&[4, 1, 3, 2]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn sample_std_dev_matches_known_value() {
        let sd = sample_std_dev(&[2, 4, 4, 4, 5, 5, 7, 9]).unwrap();
        assert!((sd - 2.138_089_935).abs() < 1e-9, "got {sd}");
        assert_eq!(sample_std_dev(&[5]), None);
        assert_eq!(sample_std_dev(&[3, 3, 3]), Some(0.0));
    }

    #[test]
    fn rounding_to_two_places() {
        assert_eq!(round_to(2.138_089_935, 2), 2.14);
        assert_eq!(round_to(5.0, 2), 5.0);
        assert_eq!(round_to(1.234_9, 2), 1.23);
    }
}
