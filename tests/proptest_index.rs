//! Property-based tests for the packed STR and SIR trees.
//!
//! A query must return exactly the items whose bounds intersect the search
//! bounds, whatever the node capacity or insertion order.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use topolis::geometry::{Envelope, Interval};
use topolis::index::{SirTreeBuilder, StrTreeBuilder};

fn coordinate() -> impl Strategy<Value = f64> {
    (-100.0..100.0f64).prop_filter("must be finite", |x: &f64| x.is_finite())
}

fn envelope() -> impl Strategy<Value = Envelope> {
    (coordinate(), coordinate(), coordinate(), coordinate())
        .prop_map(|(x1, x2, y1, y2)| Envelope::new(x1, x2, y1, y2))
}

fn interval() -> impl Strategy<Value = Interval> {
    (coordinate(), coordinate()).prop_map(|(a, b)| Interval::new(a, b))
}

fn brute_force(items: &[Envelope], search: &Envelope) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, env)| env.intersects(search))
        .map(|(i, _)| i)
        .collect()
}

proptest! {
    #[test]
    fn prop_str_query_matches_brute_force(
        items in prop::collection::vec(envelope(), 0..200),
        search in envelope(),
        capacity in 2usize..16,
    ) {
        let mut builder = StrTreeBuilder::with_node_capacity(capacity).unwrap();
        for (i, env) in items.iter().enumerate() {
            builder.insert(*env, i);
        }
        let tree = builder.build();

        let mut found: Vec<usize> = tree.query(&search).into_iter().copied().collect();
        found.sort_unstable();
        prop_assert_eq!(found, brute_force(&items, &search));
        prop_assert_eq!(tree.count(), items.len());
    }

    #[test]
    fn prop_str_query_independent_of_insertion_order(
        items in prop::collection::vec(envelope(), 1..100),
        search in envelope(),
    ) {
        let mut forward = StrTreeBuilder::new();
        let mut backward = StrTreeBuilder::new();
        for (i, env) in items.iter().enumerate() {
            forward.insert(*env, i);
        }
        for (i, env) in items.iter().enumerate().rev() {
            backward.insert(*env, i);
        }

        let mut a: Vec<usize> = forward.build().query(&search).into_iter().copied().collect();
        let mut b: Vec<usize> = backward.build().query(&search).into_iter().copied().collect();
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_str_remove_drops_only_that_item(
        items in prop::collection::vec(envelope(), 1..100),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut builder = StrTreeBuilder::new();
        for (i, env) in items.iter().enumerate() {
            builder.insert(*env, i);
        }
        let mut tree = builder.build();
        let victim = pick.index(items.len());

        prop_assert!(tree.remove(&items[victim], &victim));
        prop_assert!(!tree.remove(&items[victim], &victim));
        prop_assert_eq!(tree.count(), items.len() - 1);
        prop_assert!(!tree.query(&items[victim]).contains(&&victim));
    }

    #[test]
    fn prop_sir_query_matches_brute_force(
        items in prop::collection::vec(interval(), 0..200),
        search in interval(),
    ) {
        let mut builder = SirTreeBuilder::new();
        for (i, iv) in items.iter().enumerate() {
            builder.insert(*iv, i);
        }
        let tree = builder.build();

        let mut found: Vec<usize> = tree.query(&search).into_iter().copied().collect();
        found.sort_unstable();
        let expected: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, iv)| iv.intersects(&search))
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(found, expected);
    }
}
