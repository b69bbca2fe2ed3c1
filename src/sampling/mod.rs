//! Stream sampling
//!
//! Bounded and unbounded sample accumulators, Algorithm R insertion and the
//! strategies for merging partial reservoirs built on separate partitions.
//!
//! # Example
//!
//! ```
//! use rand::{rngs::SmallRng, SeedableRng};
//! use reservoir_stats::sampling::{MergeStrategy, Reservoir};
//!
//! let mut rng = SmallRng::seed_from_u64(1);
//! let mut left = Reservoir::<f64>::bounded(100).unwrap();
//! let mut right = Reservoir::<f64>::bounded(100).unwrap();
//!
//! // Each partition keeps a uniform sample of its own items
//! for i in 0..10_000 {
//!     left.insert(Some(i as f64), &mut rng);
//!     right.insert(Some((i + 10_000) as f64), &mut rng);
//! }
//!
//! let merged = left
//!     .merge_with(right, MergeStrategy::WeightedRandom, &mut rng)
//!     .unwrap();
//! assert_eq!(merged.len(), 100);
//! assert_eq!(merged.items_seen(), 20_000);
//! ```

mod merge;
mod reservoir;
mod snapshot;

pub use merge::{pass_through, weighted_random, MergeStrategy};
pub use reservoir::{Capacity, Phase, Reservoir};
pub use snapshot::ReservoirSnapshot;
