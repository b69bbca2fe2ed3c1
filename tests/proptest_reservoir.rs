use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use reservoir_stats::sampling::{MergeStrategy, Reservoir};
use reservoir_stats::statistics::{self, PercentileMethod};

fn build(capacity: usize, values: &[f64], rng: &mut SmallRng) -> Reservoir<f64> {
    let mut reservoir = Reservoir::bounded(capacity).unwrap();
    for &v in values {
        reservoir.insert(Some(v), rng);
    }
    reservoir
}

// Property 1: sample size is min(count, capacity)
proptest! {
    #[test]
    fn prop_size_bound(
        capacity in 1usize..64,
        values in prop::collection::vec(-1e6f64..1e6, 0..500),
        seed in any::<u64>()
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let reservoir = build(capacity, &values, &mut rng);

        prop_assert_eq!(reservoir.items_seen(), values.len() as u64);
        prop_assert_eq!(reservoir.len(), values.len().min(capacity));
    }
}

// Property 2: every retained sample was observed
proptest! {
    #[test]
    fn prop_samples_come_from_stream(
        capacity in 1usize..32,
        values in prop::collection::vec(-1e3f64..1e3, 1..300),
        seed in any::<u64>()
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let reservoir = build(capacity, &values, &mut rng);

        for sample in reservoir.samples() {
            prop_assert!(values.contains(sample), "{} never observed", sample);
        }
    }
}

// Property 3: merge adds counts and respects capacity
proptest! {
    #[test]
    fn prop_merge_count_additivity(
        capacity in 1usize..64,
        left in prop::collection::vec(-1e3f64..1e3, 0..300),
        right in prop::collection::vec(-1e3f64..1e3, 0..300),
        pass_through in any::<bool>(),
        seed in any::<u64>()
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let a = build(capacity, &left, &mut rng);
        let b = build(capacity, &right, &mut rng);

        let merged = a
            .merge_with(b, MergeStrategy::WeightedRandom, &mut rng)
            .unwrap();
        prop_assert_eq!(merged.items_seen(), (left.len() + right.len()) as u64);
        prop_assert_eq!(merged.len(), (left.len() + right.len()).min(capacity));

        // Identity holds for either strategy
        let strategy = if pass_through {
            MergeStrategy::PassThrough
        } else {
            MergeStrategy::WeightedRandom
        };
        let empty = Reservoir::<f64>::bounded(capacity).unwrap();
        let same = merged.clone().merge_with(empty.clone(), strategy, &mut rng).unwrap();
        prop_assert_eq!(&same, &merged);
        let same = empty.merge_with(merged.clone(), strategy, &mut rng).unwrap();
        prop_assert_eq!(&same, &merged);
    }
}

// Property 4: below capacity the sample is the stream
proptest! {
    #[test]
    fn prop_exact_below_capacity(
        values in prop::collection::vec(-1e3f64..1e3, 1..200),
        seed in any::<u64>()
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let reservoir = build(200, &values, &mut rng);
        let method = PercentileMethod::Legacy;

        prop_assert!(reservoir.is_exact());
        prop_assert_eq!(
            statistics::median(reservoir.samples(), method),
            statistics::median(&values, method)
        );
        prop_assert_eq!(statistics::std_dev(reservoir.samples()), statistics::std_dev(&values));
        prop_assert_eq!(statistics::mode(reservoir.samples()), statistics::mode(&values));
    }
}

// Property 5: location statistics stay inside the observed range
proptest! {
    #[test]
    fn prop_median_within_range(
        values in prop::collection::vec(-1e3f64..1e3, 1..200),
        r7 in any::<bool>()
    ) {
        let method = if r7 { PercentileMethod::R7 } else { PercentileMethod::Legacy };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // interpolation may round a hair past a neighbouring rank
        let eps = 1e-9;

        let median = statistics::median(&values, method).unwrap();
        prop_assert!(median >= min - eps && median <= max + eps);

        let iqr = statistics::inter_quartile_range(&values, method).unwrap();
        prop_assert!(iqr >= -eps && iqr <= max - min + eps);

        let mode = statistics::mode(&values).unwrap();
        prop_assert!(values.contains(&mode));
    }
}
