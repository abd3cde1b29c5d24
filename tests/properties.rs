//! Search results agree with a brute-force scan.
extern crate metric_vptree;

use metric_vptree::{SearchConfig, VPTree};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn euclid(a: &(i32, i32), b: &(i32, i32)) -> f64 {
    let dx = (a.0 - b.0) as f64;
    let dy = (a.1 - b.1) as f64;
    (dx * dx + dy * dy).sqrt()
}

fn manhattan(a: &(i32, i32), b: &(i32, i32)) -> f64 {
    ((a.0 - b.0).abs() + (a.1 - b.1).abs()) as f64
}

fn brute_force<M>(metric: M, items: &[(i32, i32)], target: &(i32, i32), k: usize, max_distance: f64) -> Vec<f64>
where
    M: Fn(&(i32, i32), &(i32, i32)) -> f64,
{
    let mut ds: Vec<f64> = items
        .iter()
        .map(|p| metric(p, target))
        .filter(|&d| d < max_distance)
        .collect();
    ds.sort_by(|a, b| a.partial_cmp(b).unwrap());
    ds.truncate(k);
    ds
}

fn arb_points() -> impl Strategy<Value = Vec<(i32, i32)>> {
    proptest::collection::vec((-50i32..50, -50i32..50), 0..120)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..ProptestConfig::default()
    })]

    /// Unbounded k-NN returns the same distances as a full scan.
    #[test]
    fn knn_matches_brute_force(items in arb_points(), target in (-60i32..60, -60i32..60),
                               k in 1usize..20, seed in any::<u64>()) {
        let tree = VPTree::with_rng(euclid, items.clone(), &mut StdRng::seed_from_u64(seed));
        let found = tree.search(&target, &SearchConfig::with_num_results(k));

        let got: Vec<f64> = found.iter().map(|n| n.distance).collect();
        prop_assert_eq!(got, brute_force(euclid, &items, &target, k, f64::MAX));
        prop_assert_eq!(found.len(), k.min(items.len()));
        for n in &found {
            prop_assert_eq!(n.distance, euclid(n.item, &target));
        }
    }

    /// Bounded searches never report anything at or past the radius.
    #[test]
    fn radius_filters(items in arb_points(), target in (-60i32..60, -60i32..60),
                      k in 1usize..20, radius in 0.0f64..40.0) {
        let tree = VPTree::new(manhattan, items.clone());
        let found = tree.search(&target, &SearchConfig::with_num_results(k).max_distance(radius));

        prop_assert!(found.len() <= k.min(items.len()));
        prop_assert!(found.iter().all(|n| n.distance < radius));
        let got: Vec<f64> = found.iter().map(|n| n.distance).collect();
        prop_assert_eq!(got, brute_force(manhattan, &items, &target, k, radius));
    }

    /// Range queries return every item inside the radius, sorted.
    #[test]
    fn range_query_is_complete(items in arb_points(), target in (-60i32..60, -60i32..60),
                               radius in 0.0f64..30.0) {
        let tree = VPTree::new(euclid, items.clone());
        let found = tree.search(&target, &SearchConfig::within(radius));

        let got: Vec<f64> = found.iter().map(|n| n.distance).collect();
        prop_assert_eq!(got, brute_force(euclid, &items, &target, usize::MAX, radius));
    }

    /// Every stored item finds itself at distance zero.
    #[test]
    fn self_query(items in arb_points()) {
        let tree = VPTree::new(euclid, items.clone());
        for p in &items {
            let nn = tree.nearest_neighbor(p).unwrap();
            prop_assert_eq!(nn.distance, 0.0);
            prop_assert_eq!(nn.item, p);
        }
    }

    /// The node count always matches the input.
    #[test]
    fn build_keeps_every_item(items in arb_points()) {
        let tree = VPTree::new(manhattan, items.clone());
        prop_assert_eq!(tree.len(), items.len());

        let mut seen: Vec<(i32, i32)> = tree.iter().cloned().collect();
        let mut expected = items;
        seen.sort();
        expected.sort();
        prop_assert_eq!(seen, expected);
    }
}
