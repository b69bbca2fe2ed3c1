//! Serializable reservoir state
//!
//! A snapshot carries exactly what a host engine needs to ship a partial
//! aggregate between workers: the retained samples and the observation
//! count. The capacity policy is configuration and is supplied again on
//! restore.

use tracing::warn;

use super::reservoir::{Capacity, Reservoir};
use crate::traits::{SampleValue, SnapshotError};

/// Wire form of a [`Reservoir`]
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReservoirSnapshot<T> {
    /// Retained samples
    pub samples: Vec<T>,
    /// Total observations folded into the reservoir's lineage
    pub count: u64,
}

impl<T: SampleValue> Reservoir<T> {
    /// Copy the state out for transport
    pub fn snapshot(&self) -> ReservoirSnapshot<T> {
        ReservoirSnapshot {
            samples: self.samples().to_vec(),
            count: self.items_seen(),
        }
    }

    /// Rebuild a reservoir from a snapshot
    ///
    /// Rejects snapshots whose count does not cover their samples, whose
    /// samples overflow `capacity`, or that hold fewer samples than the
    /// stream could have filled.
    pub fn from_snapshot(
        snapshot: ReservoirSnapshot<T>,
        capacity: Capacity,
    ) -> Result<Self, SnapshotError> {
        let ReservoirSnapshot { samples, count } = snapshot;

        if count < samples.len() as u64 {
            warn!(count, samples = samples.len(), "rejecting reservoir snapshot");
            return Err(SnapshotError::CountBelowSampleSize {
                count,
                samples: samples.len(),
            });
        }
        if let Some(limit) = capacity.limit() {
            if samples.len() > limit {
                warn!(
                    samples = samples.len(),
                    capacity = limit,
                    "rejecting reservoir snapshot"
                );
                return Err(SnapshotError::ExceedsCapacity {
                    samples: samples.len(),
                    capacity: limit,
                });
            }
        }

        // a reservoir fills before it starts replacing
        let expected = match capacity.limit() {
            Some(limit) => usize::try_from(count).map_or(limit, |count| count.min(limit)),
            None => usize::try_from(count).unwrap_or(usize::MAX),
        };
        if samples.len() != expected {
            warn!(
                samples = samples.len(),
                expected, count, "rejecting reservoir snapshot"
            );
            return Err(SnapshotError::SampleSizeMismatch {
                samples: samples.len(),
                expected,
            });
        }

        Ok(Reservoir::from_parts(capacity, samples, count))
    }
}

impl<T: SampleValue> From<Reservoir<T>> for ReservoirSnapshot<T> {
    fn from(reservoir: Reservoir<T>) -> Self {
        let (_, samples, count) = reservoir.into_parts();
        Self { samples, count }
    }
}
