//! Aggregation configuration

use crate::sampling::{Capacity, MergeStrategy};
use crate::statistics::{EmptyPolicy, PercentileMethod, Statistic};
use crate::traits::ConfigError;

/// Configuration of one reservoir-backed aggregation
///
/// With the `serde` feature every field except `statistic` may be omitted
/// and falls back to its default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct AggregationConfig {
    /// Statistic emitted at extraction
    pub statistic: Statistic,
    /// Reservoir size; `None` picks the statistic's default
    #[cfg_attr(feature = "serde", serde(default))]
    pub capacity: Option<usize>,
    /// Keep every observation instead of sampling
    #[cfg_attr(feature = "serde", serde(default))]
    pub unbounded: bool,
    /// How partial reservoirs are combined
    #[cfg_attr(feature = "serde", serde(default))]
    pub merge: MergeStrategy,
    /// Result reported when the statistic has no value
    #[cfg_attr(feature = "serde", serde(default))]
    pub empty: EmptyPolicy,
    /// Percentile position rule for median and IQR
    #[cfg_attr(feature = "serde", serde(default))]
    pub percentile: PercentileMethod,
}

impl AggregationConfig {
    /// Defaults for `statistic`
    pub fn new(statistic: Statistic) -> Self {
        Self {
            statistic,
            capacity: None,
            unbounded: false,
            merge: MergeStrategy::default(),
            empty: EmptyPolicy::default(),
            percentile: PercentileMethod::default(),
        }
    }

    /// Set an explicit reservoir size
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self.unbounded = false;
        self
    }

    /// Retain every observation
    pub fn unbounded(mut self) -> Self {
        self.unbounded = true;
        self.capacity = None;
        self
    }

    /// Set the merge strategy
    pub fn with_merge(mut self, merge: MergeStrategy) -> Self {
        self.merge = merge;
        self
    }

    /// Set the empty-result policy
    pub fn with_empty_policy(mut self, empty: EmptyPolicy) -> Self {
        self.empty = empty;
        self
    }

    /// Set the percentile method
    pub fn with_percentile_method(mut self, percentile: PercentileMethod) -> Self {
        self.percentile = percentile;
        self
    }

    /// Resolve the capacity policy, rejecting a zero capacity
    pub fn capacity_policy(&self) -> Result<Capacity, ConfigError> {
        if self.unbounded {
            return Ok(Capacity::Unbounded);
        }
        Capacity::bounded(
            self.capacity
                .unwrap_or_else(|| self.statistic.default_capacity()),
        )
    }

    /// Check the configuration without building anything
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capacity_policy().map(|_| ())
    }
}

impl From<Statistic> for AggregationConfig {
    fn from(statistic: Statistic) -> Self {
        Self::new(statistic)
    }
}
