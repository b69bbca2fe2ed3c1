//! Reservoir sampling for uniform random sampling from streams
//!
//! A reservoir maintains a uniform random sample from a stream of unknown
//! length, together with the number of items it has observed. Bounded
//! reservoirs hold at most `capacity` samples; unbounded reservoirs keep
//! every observation and give exact statistics.

use core::fmt;
use core::num::NonZeroUsize;

use rand::Rng;

use super::merge::{self, MergeStrategy};
use crate::traits::{ConfigError, MergeError, SampleValue, SamplingSketch, Sketch};

/// Capacity policy of a reservoir
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capacity {
    /// At most this many samples are retained
    Bounded(NonZeroUsize),
    /// Every observation is retained
    Unbounded,
}

impl Capacity {
    /// Bounded capacity, rejecting zero
    pub fn bounded(size: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(size)
            .map(Capacity::Bounded)
            .ok_or(ConfigError::ZeroCapacity)
    }

    /// Maximum number of samples, `None` when unbounded
    pub fn limit(&self) -> Option<usize> {
        match self {
            Capacity::Bounded(n) => Some(n.get()),
            Capacity::Unbounded => None,
        }
    }

    /// Whether `len` samples fit without replacement
    pub fn has_room(&self, len: usize) -> bool {
        self.limit().map_or(true, |limit| len < limit)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Bounded(n) => write!(f, "{}", n),
            Capacity::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Lifecycle phase of an accumulator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing observed yet
    Empty,
    /// At least one observation folded or merged in
    Accumulating,
}

/// Mergeable sample accumulator using Algorithm R
///
/// Holds the retained samples and the total number of observations folded
/// into this reservoir or any reservoir merged into it.
///
/// # Algorithm
///
/// Algorithm R (Vitter, 1985):
/// 1. Fill the reservoir with the first k items
/// 2. For the n-th item (1-indexed), draw j uniformly in [0, n);
///    if j < k replace reservoir[j] with the item
///
/// After n ≥ k insertions every observed item is retained with probability
/// exactly k/n.
///
/// # Example
///
/// ```
/// use rand::{rngs::SmallRng, SeedableRng};
/// use reservoir_stats::sampling::Reservoir;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let mut reservoir = Reservoir::<f64>::bounded(5).unwrap();
///
/// for i in 0..100 {
///     reservoir.insert(Some(i as f64), &mut rng);
/// }
///
/// assert_eq!(reservoir.len(), 5);
/// assert_eq!(reservoir.items_seen(), 100);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Reservoir<T> {
    /// Capacity policy
    capacity: Capacity,
    /// Current sample
    samples: Vec<T>,
    /// Number of items seen
    count: u64,
}

impl<T: SampleValue> Reservoir<T> {
    /// Create an empty reservoir with the given capacity policy
    ///
    /// Storage grows with the sample, so a large bound costs nothing until
    /// the stream fills it.
    pub fn new(capacity: Capacity) -> Self {
        Self {
            capacity,
            samples: Vec::new(),
            count: 0,
        }
    }

    /// Create an empty bounded reservoir
    ///
    /// Fails with [`ConfigError::ZeroCapacity`] when `capacity` is zero.
    pub fn bounded(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self::new(Capacity::bounded(capacity)?))
    }

    /// Create an empty reservoir that retains every observation
    pub fn unbounded() -> Self {
        Self::new(Capacity::Unbounded)
    }

    /// Assemble a reservoir from parts that already satisfy its invariants
    pub(crate) fn from_parts(capacity: Capacity, samples: Vec<T>, count: u64) -> Self {
        debug_assert!(count >= samples.len() as u64);
        debug_assert!(capacity.limit().map_or(true, |l| samples.len() <= l));
        Self {
            capacity,
            samples,
            count,
        }
    }

    /// Fold one observation into the reservoir
    ///
    /// Missing values (`None`) and NaN are not observations: the reservoir
    /// is left untouched and `count` does not move.
    pub fn insert<R: Rng + ?Sized>(&mut self, item: Option<T>, rng: &mut R) {
        let item = match item {
            Some(v) if !v.is_nan() => v,
            _ => return,
        };

        self.count += 1;

        if self.capacity.has_room(self.samples.len()) {
            self.samples.push(item);
        } else {
            // n-th observation survives with probability k/n
            let j = rng.gen_range(0..self.count);
            if j < self.samples.len() as u64 {
                self.samples[j as usize] = item;
            }
        }
    }

    /// By-value form of [`insert`](Self::insert)
    pub fn with_item<R: Rng + ?Sized>(mut self, item: Option<T>, rng: &mut R) -> Self {
        self.insert(item, rng);
        self
    }

    /// Combine with another reservoir using the given strategy
    ///
    /// Both reservoirs must share the same capacity policy.
    pub fn merge_with<R: Rng + ?Sized>(
        self,
        other: Self,
        strategy: MergeStrategy,
        rng: &mut R,
    ) -> Result<Self, MergeError> {
        if self.capacity != other.capacity {
            return Err(MergeError::IncompatibleCapacity {
                expected: self.capacity.to_string(),
                found: other.capacity.to_string(),
            });
        }
        let capacity = self.capacity;
        Ok(strategy.apply(self, other, capacity, rng))
    }

    /// Get the current sample
    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    /// Consume the reservoir and return the sample
    pub fn into_samples(self) -> Vec<T> {
        self.samples
    }

    pub(crate) fn into_parts(self) -> (Capacity, Vec<T>, u64) {
        (self.capacity, self.samples, self.count)
    }

    /// Get the capacity policy
    pub fn capacity_policy(&self) -> Capacity {
        self.capacity
    }

    /// Get the current sample size
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if no sample is retained
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Check if reservoir is full
    ///
    /// Unbounded reservoirs are never full.
    pub fn is_full(&self) -> bool {
        !self.capacity.has_room(self.samples.len())
    }

    /// Get the number of items seen
    pub fn items_seen(&self) -> u64 {
        self.count
    }

    /// Whether the sample still holds every observation
    ///
    /// Statistics computed on an exact reservoir carry no sampling error.
    pub fn is_exact(&self) -> bool {
        self.samples.len() as u64 == self.count
    }

    /// Lifecycle phase derived from the observation count
    pub fn phase(&self) -> Phase {
        if self.count == 0 {
            Phase::Empty
        } else {
            Phase::Accumulating
        }
    }

    /// Get the sampling probability for the current state
    ///
    /// This is the probability that any given item from the stream
    /// is in the current sample.
    pub fn sampling_probability(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.samples.len() as f64 / self.count as f64).min(1.0)
        }
    }
}

impl<T: SampleValue> Sketch for Reservoir<T> {
    type Item = T;

    fn update<R: Rng + ?Sized>(&mut self, item: T, rng: &mut R) {
        self.insert(Some(item), rng);
    }

    fn merge<R: Rng + ?Sized>(&mut self, other: &Self, rng: &mut R) -> Result<(), MergeError> {
        if self.capacity != other.capacity {
            return Err(MergeError::IncompatibleCapacity {
                expected: self.capacity.to_string(),
                found: other.capacity.to_string(),
            });
        }

        let capacity = self.capacity;
        let left = core::mem::replace(self, Self::new(capacity));
        *self = merge::weighted_random(left, other.clone(), capacity, rng);
        Ok(())
    }

    fn clear(&mut self) {
        self.samples.clear();
        self.count = 0;
    }

    fn size_bytes(&self) -> usize {
        self.samples.capacity() * core::mem::size_of::<T>() + core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl<T: SampleValue> SamplingSketch for Reservoir<T> {
    type Value = T;

    fn sample(&self) -> &[T] {
        &self.samples
    }

    fn capacity(&self) -> Option<usize> {
        self.capacity.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    #[test]
    fn test_basic() {
        let mut rng = rng(1);
        let mut reservoir = Reservoir::<f64>::bounded(5).unwrap();

        for i in 0..10 {
            reservoir.insert(Some(i as f64), &mut rng);
        }

        assert_eq!(reservoir.len(), 5);
        assert_eq!(reservoir.items_seen(), 10);
        assert!(reservoir.is_full());
        assert!(!reservoir.is_exact());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            Reservoir::<f64>::bounded(0).unwrap_err(),
            ConfigError::ZeroCapacity
        );
    }

    #[test]
    fn test_underfilled() {
        let mut rng = rng(2);
        let mut reservoir = Reservoir::<f64>::bounded(10).unwrap();

        for i in 0..5 {
            reservoir.insert(Some(i as f64), &mut rng);
        }

        assert_eq!(reservoir.len(), 5);
        assert!(!reservoir.is_full());
        assert!(reservoir.is_exact());

        // Below capacity nothing is replaced and order is arrival order
        assert_eq!(reservoir.samples(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_missing_values_are_not_observations() {
        let mut rng = rng(3);
        let mut reservoir = Reservoir::<f32>::bounded(3).unwrap();

        reservoir.insert(Some(1.0), &mut rng);
        reservoir.insert(None, &mut rng);
        reservoir.insert(Some(f32::NAN), &mut rng);
        reservoir.insert(Some(2.0), &mut rng);

        assert_eq!(reservoir.items_seen(), 2);
        assert_eq!(reservoir.samples(), &[1.0, 2.0]);
    }

    #[test]
    fn test_unbounded_keeps_everything() {
        let mut rng = rng(4);
        let mut reservoir = Reservoir::<f64>::unbounded();

        for i in 0..10_000 {
            reservoir.insert(Some(i as f64), &mut rng);
        }

        assert_eq!(reservoir.len(), 10_000);
        assert_eq!(reservoir.items_seen(), 10_000);
        assert!(reservoir.is_exact());
        assert!(!reservoir.is_full());
        assert_eq!(reservoir.capacity(), None);
    }

    #[test]
    fn test_reproducibility() {
        let mut rng1 = rng(42);
        let mut rng2 = rng(42);
        let mut r1 = Reservoir::<f64>::bounded(5).unwrap();
        let mut r2 = Reservoir::<f64>::bounded(5).unwrap();

        for i in 0..100 {
            r1.insert(Some(i as f64), &mut rng1);
            r2.insert(Some(i as f64), &mut rng2);
        }

        assert_eq!(r1.samples(), r2.samples());
    }

    #[test]
    fn test_uniformity() {
        // Statistical test: each item should appear with roughly equal frequency
        let mut counts = [0usize; 10];
        let iterations = 10_000;
        let mut rng = rng(0x853c49e6748fea9b);

        for _ in 0..iterations {
            let mut reservoir = Reservoir::<f64>::bounded(1).unwrap();
            for i in 0..10 {
                reservoir.insert(Some(i as f64), &mut rng);
            }
            counts[reservoir.samples()[0] as usize] += 1;
        }

        // Each item should appear roughly iterations/10 times
        let expected = iterations / 10;
        for (i, &count) in counts.iter().enumerate() {
            let deviation = (count as i64 - expected as i64).abs() as f64 / expected as f64;
            assert!(
                deviation < 0.1,
                "Item {} appeared {} times (expected ~{})",
                i,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_with_item_consumes_state() {
        let mut rng = rng(5);
        let reservoir = Reservoir::<f64>::bounded(2)
            .unwrap()
            .with_item(Some(1.0), &mut rng)
            .with_item(None, &mut rng)
            .with_item(Some(2.0), &mut rng);

        assert_eq!(reservoir.items_seen(), 2);
        assert_eq!(reservoir.phase(), Phase::Accumulating);
    }

    #[test]
    fn test_merge_incompatible_capacity() {
        let mut rng = rng(6);
        let mut r1 = Reservoir::<f64>::bounded(5).unwrap();
        let r2 = Reservoir::<f64>::bounded(6).unwrap();

        assert!(Sketch::merge(&mut r1, &r2, &mut rng).is_err());
        assert!(r1
            .clone()
            .merge_with(Reservoir::unbounded(), MergeStrategy::PassThrough, &mut rng)
            .is_err());
    }

    #[test]
    fn test_clear() {
        let mut rng = rng(7);
        let mut reservoir = Reservoir::<f64>::bounded(5).unwrap();

        for i in 0..10 {
            reservoir.update(i as f64, &mut rng);
        }

        reservoir.clear();

        assert!(reservoir.is_empty());
        assert_eq!(Sketch::count(&reservoir), 0);
        assert_eq!(reservoir.phase(), Phase::Empty);
    }

    #[test]
    fn test_sampling_probability() {
        let mut rng = rng(8);
        let mut reservoir = Reservoir::<f64>::bounded(10).unwrap();
        assert_eq!(reservoir.sampling_probability(), 0.0);

        for i in 0..5 {
            reservoir.insert(Some(i as f64), &mut rng);
        }
        assert_eq!(reservoir.sampling_probability(), 1.0);

        for i in 5..100 {
            reservoir.insert(Some(i as f64), &mut rng);
        }
        assert!((reservoir.sampling_probability() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_capacity_display() {
        assert_eq!(Capacity::bounded(1000).unwrap().to_string(), "1000");
        assert_eq!(Capacity::Unbounded.to_string(), "unbounded");
    }
}
