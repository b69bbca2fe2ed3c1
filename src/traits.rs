//! Core traits and error types
//!
//! The reservoir implements the base [`Sketch`] trait and the
//! [`SamplingSketch`] refinement. Every randomized operation takes its
//! random source as an argument so callers decide between a per-thread
//! generator and a seeded one.

use core::fmt::Debug;

use num_traits::Float;
use rand::Rng;
use thiserror::Error;

/// Error raised while building an accumulator or aggregation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A bounded reservoir needs room for at least one sample
    #[error("reservoir capacity must be positive")]
    ZeroCapacity,
    /// Statistic name not recognised
    #[error("unknown statistic: {0}")]
    UnknownStatistic(String),
}

/// Error during reservoir merge
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// Reservoirs were built with different capacity policies
    #[error("incompatible capacity: expected {expected}, found {found}")]
    IncompatibleCapacity { expected: String, found: String },
}

/// Error while restoring a reservoir from a serialized snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// `count` must cover every retained sample
    #[error("count {count} is smaller than the {samples} retained samples")]
    CountBelowSampleSize { count: u64, samples: usize },
    /// More samples than the target capacity can hold
    #[error("{samples} samples exceed reservoir capacity {capacity}")]
    ExceedsCapacity { samples: usize, capacity: usize },
    /// Sample size must be `min(count, capacity)`
    #[error("{samples} samples retained, expected {expected}")]
    SampleSizeMismatch { samples: usize, expected: usize },
}

/// Numeric value that can be stored in a reservoir
///
/// Samples are kept at their native width; every statistic is computed in
/// double precision through [`SampleValue::as_f64`].
pub trait SampleValue: Float + Debug + Send + Sync + 'static {
    /// Widen to `f64` for computation
    fn as_f64(self) -> f64;
}

impl SampleValue for f32 {
    #[inline]
    fn as_f64(self) -> f64 {
        f64::from(self)
    }
}

impl SampleValue for f64 {
    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

/// Core trait for mergeable streaming sketches
pub trait Sketch: Clone + Debug {
    /// The type of item this sketch processes
    type Item;

    /// Add an item to the sketch
    fn update<R: Rng + ?Sized>(&mut self, item: Self::Item, rng: &mut R);

    /// Merge another sketch into this one
    ///
    /// Returns an error if sketches are incompatible
    fn merge<R: Rng + ?Sized>(&mut self, other: &Self, rng: &mut R) -> Result<(), MergeError>;

    /// Reset sketch to empty state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of items processed
    fn count(&self) -> u64;

    /// Check if sketch is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Sampling sketches
pub trait SamplingSketch: Sketch {
    /// The stored sample type
    type Value: Clone;

    /// Get current sample
    fn sample(&self) -> &[Self::Value];

    /// Sample size limit, `None` when unbounded
    fn capacity(&self) -> Option<usize>;

    /// Current sample size
    fn sample_size(&self) -> usize {
        self.sample().len()
    }
}
