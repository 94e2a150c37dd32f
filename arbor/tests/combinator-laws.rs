//! End-to-end laws of the arbitrary combinator algebra.

use arbor::*;

/// Integers in `[0, max]` shrinking toward zero by successive halving.
fn int_up_to(max: u64) -> Arbitrary<u64> {
    fn int_node(value: u64) -> Shrinkable<u64> {
        Shrinkable::new(value, move || {
            let mut candidates = Vec::new();
            let mut current = value;
            while current != 0 {
                current /= 2;
                candidates.push(int_node(current));
            }
            Box::new(candidates.into_iter()) as ShrinkIter<u64>
        })
    }
    Arbitrary::new(move |rng| int_node(rng.next_bounded(max + 1)))
}

#[test]
fn deep_composition_is_reproducible() {
    let arb = one_of(vec![int_up_to(100), int_up_to(10_000)])
        .filter(|v| v % 2 == 0)
        .map(|v| v + 1)
        .chain(|v| int_up_to(*v))
        .no_shrink();

    for seed in 0..20 {
        let mut first = Random::from_seed(seed);
        let mut second = first.clone();
        assert_eq!(
            arb.generate(&mut first).value(),
            arb.generate(&mut second).value()
        );
        // The two sources consumed identical draws, so they stay in lockstep.
        assert_eq!(first, second);
    }
}

#[test]
fn even_integers_scenario() {
    let evens = int_up_to(10).filter(|v| v % 2 == 0);

    for seed in 0..50 {
        let mut rng = Random::from_seed(seed);
        let node = evens.generate(&mut rng);
        assert!([0, 2, 4, 6, 8, 10].contains(node.value()));

        let tree = build_shrink_tree(&node.candidate(), &mut NodeBudget::unbounded());
        tree.walk(&mut |tree_node| {
            if let Node::Value(value) = tree_node {
                assert_eq!(value % 2, 0, "odd value {value} escaped the filter");
                assert_ne!(*value, 7);
                assert_ne!(*value, 9);
            }
        });
    }
}

#[test]
fn shrinking_from_eight_walks_toward_zero() {
    let evens = int_up_to(10).filter(|v| v % 2 == 0);

    // Find a seed that generates 8 and check its whole explored tree.
    let node = (0..1000)
        .map(|seed| {
            let mut rng = Random::from_seed(seed);
            evens.generate(&mut rng)
        })
        .find(|node| *node.value() == 8)
        .expect("some seed below 1000 generates an 8");

    let shrunk: Vec<u64> = node.shrinks().map(|s| *s.value()).collect();
    assert!(!shrunk.is_empty());
    assert!(shrunk.iter().all(|v| v % 2 == 0 && *v < 8));
    assert!(shrunk.contains(&0));
}

#[test]
fn mapped_tree_equals_base_tree_mapped() {
    let base = int_up_to(1000);
    let mapped = base.map(|v| v * 3);

    for seed in 0..20 {
        let mut rng = Random::from_seed(seed);
        let base_tree = build_shrink_tree(
            &base.generate(&mut rng.clone()).candidate(),
            &mut NodeBudget::unbounded(),
        );
        let mapped_tree = build_shrink_tree(
            &mapped.generate(&mut rng).candidate(),
            &mut NodeBudget::unbounded(),
        );
        assert_eq!(base_tree.map(|v| v * 3), mapped_tree);
    }
}

#[test]
fn chain_limits_follow_base_value() {
    let arb = int_up_to(20).chain(|limit| {
        let limit = *limit;
        int_up_to(limit).map(move |v| (limit, *v))
    });

    for seed in 0..100 {
        let mut rng = Random::from_seed(seed);
        let (limit, value) = *arb.generate(&mut rng).value();
        assert!(value <= limit, "value {value} above its limit {limit}");
    }
}

#[test]
fn no_shrink_produces_leaves_for_every_seed() {
    let arb = one_of(vec![int_up_to(100), int_up_to(10_000)]).no_shrink();
    for seed in 0..50 {
        let mut rng = Random::from_seed(seed);
        assert!(arb.generate(&mut rng).shrinks().next().is_none());
    }
}

#[test]
fn one_of_branches_are_equiprobable() {
    let arb = one_of(vec![
        Arbitrary::constant('a'),
        Arbitrary::constant('b'),
        Arbitrary::constant('c'),
        Arbitrary::constant('d'),
    ]);
    let mut rng = Random::from_seed(12);
    let mut counts = std::collections::HashMap::new();
    for _ in 0..4000 {
        *counts.entry(*arb.generate(&mut rng).value()).or_insert(0usize) += 1;
    }
    assert_eq!(counts.len(), 4);
    for (branch, count) in counts {
        assert!(
            (800..=1200).contains(&count),
            "branch {branch} selected {count} times"
        );
    }
}
