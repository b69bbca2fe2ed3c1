//! Reservoir merge strategies
//!
//! Two partial reservoirs built over disjoint partitions of a stream are
//! combined into one reservoir of the same capacity. The weighted strategy
//! draws from each side in proportion to the number of items that side has
//! observed; the pass-through strategy keeps the second operand as it is.
//!
//! Weighted merging approximates a single Algorithm R pass over the union.
//! It is not associative: `(a ⊕ b) ⊕ c` and `a ⊕ (b ⊕ c)` can give
//! different sample distributions because each merge only weighs the two
//! operand counts.

use rand::Rng;
use tracing::{debug, trace};

use super::reservoir::{Capacity, Reservoir};
use crate::traits::SampleValue;

/// How two partial reservoirs are combined
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MergeStrategy {
    /// Draw samples from each side with probability proportional to its count
    #[default]
    WeightedRandom,
    /// Keep the second operand unchanged, trading accuracy for throughput
    PassThrough,
}

impl MergeStrategy {
    /// Merge `left` and `right` into a reservoir with the given capacity
    ///
    /// An empty side is the identity element under both strategies.
    pub fn apply<T: SampleValue, R: Rng + ?Sized>(
        self,
        left: Reservoir<T>,
        right: Reservoir<T>,
        capacity: Capacity,
        rng: &mut R,
    ) -> Reservoir<T> {
        match self {
            MergeStrategy::WeightedRandom => weighted_random(left, right, capacity, rng),
            MergeStrategy::PassThrough => pass_through(left, right),
        }
    }
}

/// Keep `right` unless it holds no samples
pub fn pass_through<T: SampleValue>(left: Reservoir<T>, right: Reservoir<T>) -> Reservoir<T> {
    if right.is_empty() {
        return left;
    }
    debug!(
        dropped = left.items_seen(),
        kept = right.items_seen(),
        "pass-through reservoir merge"
    );
    right
}

/// Weighted random merge of two reservoirs
///
/// Until the merged sample reaches `capacity` or both sides run dry, pick
/// `left` with probability `count_left / (count_left + count_right)` (falling
/// back to whichever side still has samples), then move one uniformly chosen
/// remaining element of that side into the result. The merged count is the
/// sum of both counts.
pub fn weighted_random<T: SampleValue, R: Rng + ?Sized>(
    left: Reservoir<T>,
    right: Reservoir<T>,
    capacity: Capacity,
    rng: &mut R,
) -> Reservoir<T> {
    if left.is_empty() {
        return right;
    }
    if right.is_empty() {
        return left;
    }

    let (_, mut left_samples, left_count) = left.into_parts();
    let (_, mut right_samples, right_count) = right.into_parts();

    let count = left_count.saturating_add(right_count);
    let prob_left = left_count as f64 / count as f64;

    let available = left_samples.len() + right_samples.len();
    let target = capacity.limit().map_or(available, |limit| limit.min(available));

    let mut merged = Vec::with_capacity(target);
    let mut from_left = 0usize;

    while merged.len() < target {
        let take_left = right_samples.is_empty()
            || (!left_samples.is_empty() && rng.gen::<f64>() < prob_left);
        let source = if take_left {
            from_left += 1;
            &mut left_samples
        } else {
            &mut right_samples
        };
        // Remaining order is irrelevant, only the chosen index is random
        let idx = rng.gen_range(0..source.len());
        merged.push(source.swap_remove(idx));
    }

    debug!(
        left_count,
        right_count,
        retained = merged.len(),
        "weighted reservoir merge"
    );
    trace!(
        from_left,
        from_right = merged.len() - from_left,
        prob_left,
        "merge draw breakdown"
    );

    Reservoir::from_parts(capacity, merged, count)
}
