//! # reservoir-stats
//!
//! Mergeable reservoir-sampling aggregations for streaming statistics.
//!
//! A stream is split into partitions; each partition folds its values into a
//! bounded, uniformly sampled reservoir. Partial reservoirs are merged at
//! partition boundaries and a statistic is read from the final sample.
//!
//! ## Features
//!
//! - **Algorithm R**: every observed value is retained with probability k/n
//! - **Mergeable**: weighted random or pass-through merge of partial reservoirs
//! - **Exact below capacity**: results carry no sampling error until the
//!   reservoir fills up (or ever, with an unbounded reservoir)
//! - **Statistics**: median, mode, standard deviation, skewness and
//!   inter-quartile range, computed in double precision for `f32` or `f64`
//!   samples
//! - **Injected randomness**: any [`rand::Rng`], seedable for reproducible runs
//!
//! ## Quick Start
//!
//! ```rust
//! use rand::{rngs::SmallRng, SeedableRng};
//! use reservoir_stats::prelude::*;
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let std_dev = ReservoirAggregation::<f64>::for_statistic(Statistic::StdDev).unwrap();
//!
//! let mut state = std_dev.initialize();
//! for v in [Some(40.0), None, Some(50.0), Some(60.0)] {
//!     state = std_dev.aggregate(v, state, &mut rng);
//! }
//!
//! assert_eq!(state.items_seen(), 3);
//! assert_eq!(std_dev.extract(&state), Some(10.0));
//! ```
//!
//! ## Distributed Computing
//!
//! Partial states from separate partitions are merged by the aggregation's
//! configured [`MergeStrategy`](sampling::MergeStrategy):
//!
//! ```rust
//! use rand::{rngs::SmallRng, SeedableRng};
//! use reservoir_stats::prelude::*;
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let median = ReservoirAggregation::<f32>::for_statistic(Statistic::Median).unwrap();
//!
//! let worker1 = median.aggregate(Some(40.0), median.initialize(), &mut rng);
//! let worker2 = median.aggregate(Some(60.0), median.initialize(), &mut rng);
//!
//! let merged = median.merge(worker1, worker2, &mut rng);
//! assert_eq!(merged.items_seen(), 2);
//! assert_eq!(median.extract(&merged), Some(50.0));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: serialize reservoir snapshots and aggregation configs

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod traits;

pub mod aggregate;
pub mod sampling;
pub mod statistics;

pub mod prelude {
    pub use crate::aggregate::{Aggregation, AggregationConfig, ReservoirAggregation};
    pub use crate::sampling::{Capacity, MergeStrategy, Reservoir, ReservoirSnapshot};
    pub use crate::statistics::{EmptyPolicy, PercentileMethod, Statistic};
    pub use crate::traits::*;
}

pub use aggregate::{Aggregation, ReservoirAggregation};
pub use sampling::Reservoir;
