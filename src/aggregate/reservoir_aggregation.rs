//! Reservoir-backed implementation of the aggregation contract

use core::marker::PhantomData;

use rand::Rng;
use tracing::debug;

use super::config::AggregationConfig;
use super::Aggregation;
use crate::sampling::{Capacity, Reservoir, ReservoirSnapshot};
use crate::statistics::Statistic;
use crate::traits::{ConfigError, SampleValue, SnapshotError};

/// One configured statistic over a reservoir of `T`
///
/// `T` fixes the stored numeric width (`f32` or `f64`); results are always
/// computed and reported in `f64`.
///
/// # Example
///
/// ```
/// use rand::{rngs::SmallRng, SeedableRng};
/// use reservoir_stats::aggregate::{Aggregation, ReservoirAggregation};
/// use reservoir_stats::statistics::Statistic;
///
/// let mut rng = SmallRng::seed_from_u64(3);
/// let median = ReservoirAggregation::<f64>::for_statistic(Statistic::Median).unwrap();
///
/// let mut state = median.initialize();
/// for v in [40.0, 50.0, 60.0, 70.0] {
///     state = median.aggregate(Some(v), state, &mut rng);
/// }
///
/// assert_eq!(median.extract(&state), Some(55.0));
/// ```
#[derive(Clone, Debug)]
pub struct ReservoirAggregation<T> {
    config: AggregationConfig,
    capacity: Capacity,
    _value: PhantomData<fn() -> T>,
}

impl<T: SampleValue> ReservoirAggregation<T> {
    /// Build an aggregation, validating the configuration
    pub fn new(config: AggregationConfig) -> Result<Self, ConfigError> {
        let capacity = config.capacity_policy()?;
        debug!(
            statistic = %config.statistic,
            %capacity,
            merge = ?config.merge,
            width = core::mem::size_of::<T>() * 8,
            "reservoir aggregation configured"
        );
        Ok(Self {
            config,
            capacity,
            _value: PhantomData,
        })
    }

    /// Build an aggregation with the statistic's defaults
    pub fn for_statistic(statistic: Statistic) -> Result<Self, ConfigError> {
        Self::new(AggregationConfig::new(statistic))
    }

    /// Active configuration
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Resolved capacity policy
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Restore a state shipped by the host
    pub fn restore(&self, snapshot: ReservoirSnapshot<T>) -> Result<Reservoir<T>, SnapshotError> {
        Reservoir::from_snapshot(snapshot, self.capacity)
    }
}

impl<T: SampleValue> Aggregation for ReservoirAggregation<T> {
    type Input = T;
    type State = Reservoir<T>;

    fn initialize(&self) -> Reservoir<T> {
        Reservoir::new(self.capacity)
    }

    fn aggregate<R: Rng + ?Sized>(
        &self,
        item: Option<T>,
        state: Reservoir<T>,
        rng: &mut R,
    ) -> Reservoir<T> {
        state.with_item(item, rng)
    }

    fn merge<R: Rng + ?Sized>(
        &self,
        left: Reservoir<T>,
        right: Reservoir<T>,
        rng: &mut R,
    ) -> Reservoir<T> {
        self.config.merge.apply(left, right, self.capacity, rng)
    }

    fn extract(&self, state: &Reservoir<T>) -> Option<f64> {
        let value = self
            .config
            .statistic
            .evaluate(state.samples(), self.config.percentile);
        self.config.empty.apply(value)
    }
}
