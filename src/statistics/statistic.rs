//! Named statistics and empty-result handling

use core::fmt;
use core::str::FromStr;

use super::extract;
use super::percentile::PercentileMethod;
use crate::traits::{ConfigError, SampleValue};

/// Distributional statistic computed from a reservoir sample
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Statistic {
    Median,
    Mode,
    StdDev,
    #[cfg_attr(feature = "serde", serde(rename = "skew", alias = "skewness"))]
    Skewness,
    #[cfg_attr(feature = "serde", serde(rename = "iqr", alias = "inter_quartile_range"))]
    InterQuartileRange,
}

impl Statistic {
    /// All supported statistics
    pub const ALL: [Statistic; 5] = [
        Statistic::Median,
        Statistic::Mode,
        Statistic::StdDev,
        Statistic::Skewness,
        Statistic::InterQuartileRange,
    ];

    /// Query-facing function name
    pub fn name(&self) -> &'static str {
        match self {
            Statistic::Median => "median",
            Statistic::Mode => "mode",
            Statistic::StdDev => "std_dev",
            Statistic::Skewness => "skew",
            Statistic::InterQuartileRange => "iqr",
        }
    }

    /// Default reservoir capacity
    ///
    /// Dispersion and tail-shape estimators get larger reservoirs.
    pub fn default_capacity(&self) -> usize {
        match self {
            Statistic::Median | Statistic::Mode | Statistic::InterQuartileRange => 1000,
            Statistic::StdDev => 5000,
            Statistic::Skewness => 9999,
        }
    }

    /// Compute this statistic over a sample
    pub fn evaluate<T: SampleValue>(&self, samples: &[T], method: PercentileMethod) -> Option<f64> {
        match self {
            Statistic::Median => extract::median(samples, method),
            Statistic::Mode => extract::mode(samples),
            Statistic::StdDev => extract::std_dev(samples),
            Statistic::Skewness => extract::skewness(samples),
            Statistic::InterQuartileRange => extract::inter_quartile_range(samples, method),
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Statistic {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "median" => Ok(Statistic::Median),
            "mode" => Ok(Statistic::Mode),
            "std_dev" | "stddev" => Ok(Statistic::StdDev),
            "skew" | "skewness" => Ok(Statistic::Skewness),
            "iqr" | "inter_quartile_range" => Ok(Statistic::InterQuartileRange),
            _ => Err(ConfigError::UnknownStatistic(s.to_string())),
        }
    }
}

/// What an extraction yields when the statistic has no value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EmptyPolicy {
    /// Report the absence as `None`
    #[default]
    NoValue,
    /// Report `0.0` instead of `None`
    Zero,
}

impl EmptyPolicy {
    /// Apply the policy to an extractor result
    pub fn apply(&self, value: Option<f64>) -> Option<f64> {
        match self {
            EmptyPolicy::NoValue => value,
            EmptyPolicy::Zero => Some(value.unwrap_or(0.0)),
        }
    }
}
