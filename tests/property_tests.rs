use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use randpick::{RangeSelector, SelectionError, WeightedSelector, DEFAULT_WEIGHT};
use std::collections::HashSet;

fn build(weights: &[f64], seed: u64) -> WeightedSelector<usize, ChaCha8Rng> {
    let mut s = WeightedSelector::with_rng(ChaCha8Rng::seed_from_u64(seed));
    for (i, &w) in weights.iter().enumerate() {
        s.add_or_update_weight(i, w).expect("weight ok");
    }
    s
}

proptest! {
    #[test]
    fn prop_select_multiple_distinct_and_exact(
        weights in prop::collection::vec(1e-3f64..100.0, 1..60),
        count_seed in 0usize..1000,
        seed in any::<u64>(),
    ) {
        let n = weights.len();
        let count = 1 + count_seed % n;
        let mut s = build(&weights, seed);

        let picks: Vec<usize> = s.select_multiple(count).expect("valid count").collect();
        prop_assert_eq!(picks.len(), count);

        let unique: HashSet<_> = picks.iter().copied().collect();
        prop_assert_eq!(unique.len(), count);
        prop_assert!(picks.iter().all(|&i| i < n));
    }

    #[test]
    fn prop_full_draw_is_permutation(
        weights in prop::collection::vec(1e-3f64..100.0, 1..60),
        seed in any::<u64>(),
    ) {
        let n = weights.len();
        let mut s = build(&weights, seed);

        let mut picks: Vec<usize> = s.select_multiple(n).expect("valid count").collect();
        picks.sort_unstable();
        prop_assert_eq!(picks, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn prop_invalid_counts_fail(
        weights in prop::collection::vec(1e-3f64..100.0, 1..30),
        extra in 1usize..10,
    ) {
        let n = weights.len();
        let mut s = build(&weights, 0);

        prop_assert!(matches!(s.select_multiple(0), Err(SelectionError::ZeroCount)));
        let over_range = matches!(
            s.select_multiple(n + extra),
            Err(SelectionError::CountExceedsPopulation { requested, available })
                if requested == n + extra && available == n
        );
        prop_assert!(over_range);
    }

    #[test]
    fn prop_update_preserves_order_and_others(
        weights in prop::collection::vec(1e-3f64..100.0, 1..40),
        target_seed in 0usize..1000,
        new_weight in 1e-3f64..100.0,
    ) {
        let target = target_seed % weights.len();
        let mut s = build(&weights, 0);
        s.add_or_update_weight(target, new_weight).expect("weight ok");

        prop_assert_eq!(s.len(), weights.len());
        for (pos, (&item, w)) in s.iter().enumerate() {
            prop_assert_eq!(item, pos);
            let expected = if item == target { new_weight } else { weights[item] };
            prop_assert_eq!(w, expected);
        }
    }

    #[test]
    fn prop_non_positive_weight_rejected(
        weights in prop::collection::vec(1e-3f64..100.0, 1..20),
        bad in -100.0f64..=0.0,
    ) {
        let mut s = build(&weights, 0);
        let before: Vec<(usize, f64)> = s.iter().map(|(&i, w)| (i, w)).collect();

        prop_assert!(s.add_or_update_weight(0, bad).is_err());
        prop_assert!(s.add_or_update_weight(weights.len(), bad).is_err());

        let after: Vec<(usize, f64)> = s.iter().map(|(&i, w)| (i, w)).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn prop_removed_items_never_drawn(
        weights in prop::collection::vec(1e-3f64..100.0, 2..40),
        removed in prop::collection::vec(0usize..40, 1..10),
        seed in any::<u64>(),
    ) {
        let mut s = build(&weights, seed);
        let removed: HashSet<usize> = removed.into_iter().filter(|&i| i < weights.len()).collect();
        for i in &removed {
            s.remove(i);
        }
        prop_assert_eq!(s.len(), weights.len() - removed.len());

        if s.is_empty() {
            prop_assert_eq!(s.select_one(), Err(SelectionError::EmptyPopulation));
        } else {
            for _ in 0..50 {
                let pick = s.select_one().expect("non-empty");
                prop_assert!(!removed.contains(&pick));
            }
            let n = s.len();
            let all: Vec<usize> = s.select_multiple(n).expect("valid count").collect();
            prop_assert!(all.iter().all(|i| !removed.contains(i)));
        }
    }

    #[test]
    fn prop_range_selector_covers_bounds(
        min in 0u32..1000,
        span in 0u32..200,
        seed in any::<u64>(),
    ) {
        let max = min + span;
        let rng = ChaCha8Rng::seed_from_u64(seed);
        let mut s = RangeSelector::with_rng(min, max, DEFAULT_WEIGHT, rng).expect("valid range");
        prop_assert_eq!(s.len(), (span + 1) as usize);

        let one = s.select_one().expect("non-empty");
        prop_assert!((min..=max).contains(&one));

        let n = s.len();
        let mut all: Vec<u32> = s.select_multiple(n).expect("valid count").collect();
        all.sort_unstable();
        prop_assert_eq!(all, (min..=max).collect::<Vec<_>>());
    }

    #[test]
    fn prop_inverted_range_rejected(
        max in 0u32..1000,
        gap in 1u32..100,
    ) {
        let min = max + gap;
        let err = RangeSelector::with_rng(min, max, DEFAULT_WEIGHT, ChaCha8Rng::seed_from_u64(0))
            .expect_err("min > max");
        prop_assert_eq!(err, SelectionError::InvalidRange { min, max });
    }
}
