//! Statistic extractors
//!
//! Pure functions mapping a finalized sample to median, mode, standard
//! deviation, skewness and inter-quartile range. While a reservoir still
//! holds every observation the results are exact; once it has started
//! replacing samples they are estimates of the population statistic.
//!
//! # Example
//!
//! ```
//! use reservoir_stats::statistics::{inter_quartile_range, std_dev, PercentileMethod};
//!
//! let samples = [40.0, 50.0, 60.0, 70.0];
//!
//! assert_eq!(inter_quartile_range(&samples, PercentileMethod::Legacy), Some(25.0));
//! assert!(std_dev(&samples).unwrap() > 0.0);
//! ```

mod extract;
mod moments;
mod percentile;
mod statistic;

pub use extract::{inter_quartile_range, median, mode, skewness, std_dev};
pub use moments::RunningStats;
pub use percentile::{percentile, percentile_sorted, PercentileMethod};
pub use statistic::{EmptyPolicy, Statistic};
