//! Aggregation contract
//!
//! A host stream engine drives every aggregation through the same lifecycle:
//! create an empty state per partition, fold items into it one at a time,
//! merge partial states at partition boundaries and finally extract the
//! statistic. Each step consumes the previous state and returns the next,
//! so no caller is left holding a stale reference.
//!
//! ```text
//! Empty ──aggregate──▶ Accumulating ◀──merge──┐
//!                        │      └─────────────┘
//!                        └──extract (read-only)──▶ value
//! ```

mod config;
mod reservoir_aggregation;

use rand::Rng;

pub use config::AggregationConfig;
pub use reservoir_aggregation::ReservoirAggregation;

/// The initialize / aggregate / merge / extract lifecycle
///
/// Randomized steps take the random source explicitly; the `*_thread_local`
/// helpers use the calling thread's generator so independent partitions on
/// separate threads never share or contend for one.
pub trait Aggregation {
    /// Stream item type
    type Input;
    /// Partial aggregate
    type State;

    /// Fresh, empty state
    fn initialize(&self) -> Self::State;

    /// Fold one item into `state`; `None` leaves the state unchanged
    fn aggregate<R: Rng + ?Sized>(
        &self,
        item: Option<Self::Input>,
        state: Self::State,
        rng: &mut R,
    ) -> Self::State;

    /// Combine two quiescent partial states
    fn merge<R: Rng + ?Sized>(
        &self,
        left: Self::State,
        right: Self::State,
        rng: &mut R,
    ) -> Self::State;

    /// Read the statistic without changing the state
    fn extract(&self, state: &Self::State) -> Option<f64>;

    /// [`aggregate`](Self::aggregate) with the thread-local generator
    fn aggregate_thread_local(&self, item: Option<Self::Input>, state: Self::State) -> Self::State {
        self.aggregate(item, state, &mut rand::thread_rng())
    }

    /// [`merge`](Self::merge) with the thread-local generator
    fn merge_thread_local(&self, left: Self::State, right: Self::State) -> Self::State {
        self.merge(left, right, &mut rand::thread_rng())
    }
}
