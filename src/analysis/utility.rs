/// Computes the arithmetic mean over the values, `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Linear-interpolation quantile of an ascending-sorted slice, `q` in 0..=1.
/// Returns `None` for empty input.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;

    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_is_none() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_mean_values() {
        assert_eq!(mean(&[2.0, 4.0, 6.0]), Some(4.0));
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [30.0, 45.0, 50.0, 90.0];
        // pos = 0.1 * 3 = 0.3 -> 30 + 0.3 * (45 - 30)
        assert_eq!(quantile(&sorted, 0.1), Some(34.5));
        assert_eq!(quantile(&sorted, 0.0), Some(30.0));
        assert_eq!(quantile(&sorted, 1.0), Some(90.0));
        assert_eq!(quantile(&sorted, 0.5), Some(47.5));
    }

    #[test]
    fn test_quantile_single_element() {
        assert_eq!(quantile(&[42.0], 0.1), Some(42.0));
    }

    #[test]
    fn test_quantile_empty_is_none() {
        assert_eq!(quantile(&[], 0.5), None);
    }
}
