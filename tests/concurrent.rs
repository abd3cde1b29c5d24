extern crate metric_vptree;

use std::thread;

use metric_vptree::{SearchConfig, VPTree};

fn abs_diff(a: &u32, b: &u32) -> f64 {
    (*a as f64 - *b as f64).abs()
}

#[test]
fn parallel_readers_share_one_tree() {
    let tree = VPTree::new(abs_diff, (0..5000u32).map(|x| x * 3).collect());

    thread::scope(|s| {
        for t in 0..8u32 {
            let tree = &tree;
            s.spawn(move || {
                for q in (t..3000).step_by(97) {
                    let found = tree.search(&q, &SearchConfig::with_num_results(2));
                    assert_eq!(found.len(), 2);
                    let nearest = (q + 1) / 3 * 3;
                    assert_eq!(found[0].distance, abs_diff(&nearest, &q));
                    assert!(found[0].distance <= found[1].distance);
                }
            });
        }
    });
}
