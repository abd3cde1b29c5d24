//! Median split used when building a node.
use std::cmp::Ordering;

use crate::metric::Scalar;

/// An item tagged with its distance to the vantage point of the node
/// being built. The distance is computed once per level.
pub struct TaggedItem<F, T> {
    pub dist: F,
    pub item: T,
}

/// Items split around a node's threshold.
pub struct Split<F, T> {
    pub threshold: F,
    /// Distance strictly less than `threshold`.
    pub less: Vec<T>,
    /// Distance greater than or equal to `threshold`.
    pub greater_eq: Vec<T>,
}

fn cmp_dist<F: Scalar, T>(a: &TaggedItem<F, T>, b: &TaggedItem<F, T>) -> Ordering {
    a.dist.partial_cmp(&b.dist).unwrap_or(Ordering::Equal)
}

/// Split `items` around the distance of rank `items.len() / 2`, i.e. the
/// value that would sit at index `len / 2` after an ascending sort.
///
/// Returns `None` for an empty input.
pub fn split_at_median<F: Scalar, T>(mut items: Vec<TaggedItem<F, T>>) -> Option<Split<F, T>> {
    if items.is_empty() {
        return None;
    }

    let mid = items.len() / 2;
    let threshold = order_stat::kth_by(&mut items, mid, cmp_dist).dist;

    let mut less = Vec::with_capacity(mid);
    let mut greater_eq = Vec::with_capacity(items.len() - mid);
    for ti in items {
        if ti.dist < threshold {
            less.push(ti.item);
        } else {
            greater_eq.push(ti.item);
        }
    }

    Some(Split { threshold, less, greater_eq })
}
