//! Statistic extractors over a finalized sample
//!
//! All functions are pure, widen samples to `f64` before computing and
//! return `None` when the sample cannot produce a value. Samples are ranked
//! before any accumulation, so results do not depend on the order in which
//! a reservoir happens to hold them.

use super::moments::RunningStats;
use super::percentile::{percentile_sorted, ranked, PercentileMethod};
use crate::traits::SampleValue;

fn widened<T: SampleValue>(samples: &[T]) -> impl Iterator<Item = f64> + '_ {
    samples.iter().map(|v| v.as_f64())
}

fn moments<T: SampleValue>(samples: &[T]) -> RunningStats {
    ranked(widened(samples)).into_iter().collect()
}

/// Median (50th percentile)
///
/// ```
/// use reservoir_stats::statistics::{median, PercentileMethod};
///
/// assert_eq!(median(&[40.0, 50.0, 60.0, 70.0], PercentileMethod::Legacy), Some(55.0));
/// assert_eq!(median::<f64>(&[], PercentileMethod::Legacy), None);
/// ```
pub fn median<T: SampleValue>(samples: &[T], method: PercentileMethod) -> Option<f64> {
    percentile_sorted(&ranked(widened(samples)), 50.0, method)
}

/// Most frequent value; ties resolve to the smallest value
pub fn mode<T: SampleValue>(samples: &[T]) -> Option<f64> {
    let sorted = ranked(widened(samples));
    let mut iter = sorted.iter().copied();
    let first = iter.next()?;

    let (mut best, mut best_run) = (first, 1usize);
    let (mut current, mut run) = (first, 1usize);
    for value in iter {
        if value == current {
            run += 1;
        } else {
            current = value;
            run = 1;
        }
        // strict: earlier (smaller) values win ties
        if run > best_run {
            best = current;
            best_run = run;
        }
    }
    Some(best)
}

/// Sample standard deviation (denominator `n - 1`)
///
/// A single sample has a standard deviation of `0.0`.
pub fn std_dev<T: SampleValue>(samples: &[T]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(moments(samples).sample_stddev())
}

/// Adjusted Fisher–Pearson skewness
///
/// Needs at least three samples; constant samples give `0.0`.
pub fn skewness<T: SampleValue>(samples: &[T]) -> Option<f64> {
    moments(samples).skewness()
}

/// 75th minus 25th percentile
pub fn inter_quartile_range<T: SampleValue>(
    samples: &[T],
    method: PercentileMethod,
) -> Option<f64> {
    let sorted = ranked(widened(samples));
    let q3 = percentile_sorted(&sorted, 75.0, method)?;
    let q1 = percentile_sorted(&sorted, 25.0, method)?;
    Some(q3 - q1)
}
