//! Percentile estimation over a finite sample
//!
//! Both estimators interpolate linearly between the two ranked samples that
//! surround the target position; they differ only in how the position is
//! derived from the percentile.

/// Position rule used to locate a percentile among ranked samples
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PercentileMethod {
    /// Position `p (n + 1) / 100`, clamped to the first and last rank
    #[default]
    Legacy,
    /// Position `1 + (n - 1) p / 100` (Hyndman–Fan type 7)
    R7,
}

/// Sort a sample into ascending order in double precision
pub(crate) fn ranked(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.into_iter().collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Percentile of an ascending slice
///
/// Returns `None` for an empty slice or a NaN percentile. Ranks that fall
/// outside the sample clamp to its minimum or maximum.
pub fn percentile_sorted(sorted: &[f64], p: f64, method: PercentileMethod) -> Option<f64> {
    if p.is_nan() {
        return None;
    }
    let n = sorted.len();
    match n {
        0 => return None,
        1 => return Some(sorted[0]),
        _ => {}
    }

    // 1-based rank position
    let pos = match method {
        PercentileMethod::Legacy => p * (n as f64 + 1.0) / 100.0,
        PercentileMethod::R7 => 1.0 + (n as f64 - 1.0) * p / 100.0,
    };

    if pos < 1.0 {
        return Some(sorted[0]);
    }
    if pos >= n as f64 {
        return Some(sorted[n - 1]);
    }

    let floor = pos.floor();
    let lower = sorted[floor as usize - 1];
    let upper = sorted[floor as usize];
    Some(lower + (pos - floor) * (upper - lower))
}

/// Percentile of an unordered sample
pub fn percentile(values: &[f64], p: f64, method: PercentileMethod) -> Option<f64> {
    percentile_sorted(&ranked(values.iter().copied()), p, method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const FOUR: [f64; 4] = [70.0, 40.0, 60.0, 50.0];

    #[test_case(50.0, PercentileMethod::Legacy, 55.0 ; "legacy median")]
    #[test_case(25.0, PercentileMethod::Legacy, 42.5 ; "legacy first quartile")]
    #[test_case(75.0, PercentileMethod::Legacy, 67.5 ; "legacy third quartile")]
    #[test_case(50.0, PercentileMethod::R7, 55.0 ; "r7 median")]
    #[test_case(25.0, PercentileMethod::R7, 47.5 ; "r7 first quartile")]
    #[test_case(75.0, PercentileMethod::R7, 62.5 ; "r7 third quartile")]
    #[test_case(100.0, PercentileMethod::Legacy, 70.0 ; "legacy max")]
    #[test_case(100.0, PercentileMethod::R7, 70.0 ; "r7 max")]
    #[test_case(1.0, PercentileMethod::Legacy, 40.0 ; "legacy clamps low")]
    #[test_case(f64::INFINITY, PercentileMethod::Legacy, 70.0 ; "infinite clamps high")]
    #[test_case(f64::NEG_INFINITY, PercentileMethod::R7, 40.0 ; "negative infinite clamps low")]
    fn test_four_values(p: f64, method: PercentileMethod, expected: f64) {
        assert_eq!(percentile(&FOUR, p, method), Some(expected));
    }

    #[test_case(&FOUR, PercentileMethod::Legacy ; "legacy")]
    #[test_case(&FOUR, PercentileMethod::R7 ; "r7")]
    #[test_case(&[3.0], PercentileMethod::Legacy ; "single sample")]
    fn test_nan_percentile_has_no_value(values: &[f64], method: PercentileMethod) {
        assert_eq!(percentile(values, f64::NAN, method), None);
    }

    #[test]
    fn test_odd_length_median() {
        let values = [60.0, 40.0, 50.0];
        assert_eq!(percentile(&values, 50.0, PercentileMethod::Legacy), Some(50.0));
        assert_eq!(percentile(&values, 50.0, PercentileMethod::R7), Some(50.0));
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(percentile(&[], 50.0, PercentileMethod::Legacy), None);
        assert_eq!(percentile(&[3.0], 25.0, PercentileMethod::R7), Some(3.0));
    }
}
