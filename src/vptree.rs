//! Vantage-Point Trees are a data structure for fast
//! k-nearest-neighbor searches.
//!
//! Each node holds one vantage point and a threshold distance. Items
//! strictly closer to the vantage point than the threshold live in the
//! left subtree, everything else in the right. A search keeps the `k`
//! best candidates in a bounded max-heap and uses the triangle
//! inequality to skip subtrees that cannot hold anything closer than the
//! current worst candidate.
use std::fmt::{self, Debug};

use log::{debug, log_enabled, trace, Level};
use rand::Rng;

use crate::config::SearchConfig;
use crate::heap::{BoundedHeap, Candidate};
use crate::median::{split_at_median, TaggedItem};
use crate::metric::{ItemMetric, Metric, MetricItem, Scalar};

type Link<T, F> = Option<Box<VPNode<T, F>>>;

struct VPNode<T, F> {
    item: T,
    // `None` exactly when the node has no children.
    threshold: Option<F>,
    left: Link<T, F>,
    right: Link<T, F>,
}

/// One search result.
#[derive(Debug, PartialEq)]
pub struct Neighbor<'a, T, F> {
    pub item: &'a T,
    pub distance: F,
}

impl<'a, T, F: Copy> Clone for Neighbor<'a, T, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, F: Copy> Copy for Neighbor<'a, T, F> {}

/// Work done by a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose vantage point was measured against the target.
    pub nodes_visited: usize,
    /// Non-empty subtrees skipped by the triangle inequality.
    pub subtrees_pruned: usize,
}

/// Which child of a node a pending step refers to.
#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl Side {
    /// Triangle-inequality test: can this child hold an item strictly
    /// within `tau` of the target?
    fn reachable<F: Scalar>(self, dist: F, tau: F, threshold: F) -> bool {
        match self {
            Side::Left => dist - tau <= threshold,
            Side::Right => dist + tau >= threshold,
        }
    }
}

/// A node under construction; children are indices into the build list.
struct PendingNode<T, F> {
    item: T,
    threshold: Option<F>,
    left: Option<usize>,
    right: Option<usize>,
}

enum Step<'a, T, F> {
    Visit(&'a VPNode<T, F>),
    // Reachability is decided when the step is popped, against the tau
    // current at that moment.
    Child { link: &'a Link<T, F>, side: Side, dist: F, threshold: F },
}

impl<T, F: Scalar> VPNode<T, F> {
    /// Build the tree for `items` with an explicit work list. Duplicates
    /// all go right, so the tree can be a chain as deep as the input.
    fn build<M, R>(metric: &M, items: Vec<T>, rng: &mut R) -> Link<T, F>
    where
        M: Metric<T, Distance = F>,
        R: Rng + ?Sized,
    {
        // Parents are always pushed before their children.
        let mut pending: Vec<PendingNode<T, F>> = Vec::with_capacity(items.len());
        let mut work: Vec<(Vec<T>, Option<(usize, Side)>)> = vec![(items, None)];

        while let Some((mut items, parent)) = work.pop() {
            if items.is_empty() {
                continue;
            }

            let idx = pending.len();
            match parent {
                Some((p, Side::Left)) => pending[p].left = Some(idx),
                Some((p, Side::Right)) => pending[p].right = Some(idx),
                None => {}
            }

            let vp = items.swap_remove(rng.gen_range(0..items.len()));

            let tagged: Vec<TaggedItem<F, T>> = items
                .into_iter()
                .map(|item| TaggedItem { dist: metric.distance(&item, &vp), item })
                .collect();

            match split_at_median(tagged) {
                None => pending.push(PendingNode { item: vp, threshold: None, left: None, right: None }),
                Some(split) => {
                    pending.push(PendingNode {
                        item: vp,
                        threshold: Some(split.threshold),
                        left: None,
                        right: None,
                    });
                    work.push((split.greater_eq, Some((idx, Side::Right))));
                    work.push((split.less, Some((idx, Side::Left))));
                }
            }
        }

        // Assemble bottom-up: every child index is larger than its
        // parent's, so children are boxed before they are claimed.
        let mut boxed: Vec<Link<T, F>> = Vec::with_capacity(pending.len());
        boxed.resize_with(pending.len(), || None);
        while let Some(node) = pending.pop() {
            let idx = pending.len();
            let left = node.left.and_then(|i| boxed[i].take());
            let right = node.right.and_then(|i| boxed[i].take());
            boxed[idx] = Some(Box::new(VPNode { item: node.item, threshold: node.threshold, left, right }));
        }
        boxed.into_iter().next().flatten()
    }

    fn child(&self, side: Side) -> &Link<T, F> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, d)) = stack.pop() {
            deepest = deepest.max(d);
            for child in [&node.left, &node.right] {
                if let Some(ref c) = *child {
                    stack.push((&**c, d + 1));
                }
            }
        }
        deepest
    }

    /// Push the nearest neighbors in this subtree onto the heap,
    /// shrinking `tau` once the heap is full.
    fn search<'a, M>(&'a self, metric: &M, target: &T, tau: &mut F,
                     heap: &mut BoundedHeap<'a, T, F>, stats: &mut SearchStats)
    where
        M: Metric<T, Distance = F>,
    {
        let mut stack = vec![Step::Visit(self)];

        while let Some(step) = stack.pop() {
            let node = match step {
                Step::Visit(node) => node,
                Step::Child { link, side, dist, threshold } => match *link {
                    Some(ref node) if side.reachable(dist, *tau, threshold) => &**node,
                    Some(_) => {
                        stats.subtrees_pruned += 1;
                        continue;
                    }
                    None => continue,
                },
            };

            stats.nodes_visited += 1;
            let dist = metric.distance(&node.item, target);

            if dist < *tau {
                heap.push(Candidate::new(dist, &node.item));
                if heap.is_full() {
                    if let Some(worst) = heap.worst() {
                        *tau = worst;
                    }
                }
            }

            let threshold = match node.threshold {
                Some(t) => t,
                None => continue,
            };

            let (near, far) = if dist < threshold {
                (Side::Left, Side::Right)
            } else {
                (Side::Right, Side::Left)
            };

            // The far child is popped only after the whole near subtree
            // has been searched and had a chance to shrink tau.
            stack.push(Step::Child { link: node.child(far), side: far, dist, threshold });
            stack.push(Step::Child { link: node.child(near), side: near, dist, threshold });
        }
    }
}

impl<T: Debug, F: Scalar> VPNode<T, F> {
    fn dump(&self, out: &mut String) {
        let mut stack = vec![(self, 0, "")];
        while let Some((node, indent, label)) = stack.pop() {
            out.push_str(&"  ".repeat(indent));
            out.push_str(label);
            match node.threshold {
                Some(t) => out.push_str(&format!("{:?} (threshold {})\n", node.item, t)),
                None => out.push_str(&format!("{:?}\n", node.item)),
            }
            if let Some(ref r) = node.right {
                stack.push((&**r, indent + 1, ">= "));
            }
            if let Some(ref l) = node.left {
                stack.push((&**l, indent + 1, "< "));
            }
        }
    }
}

/// A vantage point tree over items of type `T` under metric `M`.
///
/// The tree is immutable once built. Searches only read it, so a tree
/// can be shared between threads whenever `T` and `M` are `Sync`.
pub struct VPTree<T, M: Metric<T>> {
    root: Link<T, M::Distance>,
    metric: M,
    len: usize,
}

impl<T, M: Metric<T>> VPTree<T, M> {
    /// Construct a new vantage point tree from a set of items, picking
    /// vantage points with the thread-local RNG.
    pub fn new(metric: M, items: Vec<T>) -> Self {
        VPTree::with_rng(metric, items, &mut rand::thread_rng())
    }

    /// Construct a tree drawing vantage points from `rng`. A seeded RNG
    /// gives a reproducible tree shape.
    pub fn with_rng<R: Rng + ?Sized>(metric: M, items: Vec<T>, rng: &mut R) -> Self {
        let len = items.len();
        let root = VPNode::build(&metric, items, rng);
        let tree = VPTree { root, metric, len };

        if log_enabled!(Level::Debug) {
            debug!("built vantage point tree: {} items, depth {}", tree.len, tree.depth());
        }
        tree
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.depth())
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// All items in the tree, vantage points before their subtrees.
    pub fn iter(&self) -> Iter<'_, T, M::Distance> {
        Iter { stack: self.root.as_deref().into_iter().collect() }
    }

    /// Find the items closest to `target`, in ascending order of
    /// distance.
    ///
    /// At most `config.num_results` items are returned, all strictly
    /// closer than `config.max_distance`. Ties at equal distance come
    /// back in no particular order.
    pub fn search(&self, target: &T, config: &SearchConfig<M::Distance>) -> Vec<Neighbor<'_, T, M::Distance>> {
        self.search_with_stats(target, config).0
    }

    /// Like [`search`](VPTree::search), also reporting how much of the
    /// tree was visited.
    pub fn search_with_stats(&self, target: &T, config: &SearchConfig<M::Distance>)
                             -> (Vec<Neighbor<'_, T, M::Distance>>, SearchStats) {
        let mut stats = SearchStats::default();
        let root = match self.root {
            Some(ref root) if config.num_results > 0 => root,
            _ => return (Vec::new(), stats),
        };

        let mut heap = BoundedHeap::new(config.num_results, self.len);
        let mut tau = config.max_distance;
        root.search(&self.metric, target, &mut tau, &mut heap, &mut stats);

        let found: Vec<_> = heap
            .into_sorted_vec()
            .into_iter()
            .map(|c| Neighbor { item: c.item, distance: c.dist })
            .collect();

        trace!("search k={} found {} (visited {}, pruned {}, tau {})",
               config.num_results, found.len(), stats.nodes_visited, stats.subtrees_pruned, tau);
        (found, stats)
    }

    /// Find the nearest neighbor, or `None` if the tree is empty.
    pub fn nearest_neighbor(&self, target: &T) -> Option<Neighbor<'_, T, M::Distance>> {
        self.search(target, &SearchConfig::new()).into_iter().next()
    }

    /// Find the `n` nearest neighbors.
    pub fn nearest_neighbors(&self, target: &T, n: usize) -> Vec<Neighbor<'_, T, M::Distance>> {
        self.search(target, &SearchConfig::with_num_results(n))
    }
}

impl<T: MetricItem> VPTree<T, ItemMetric<T>> {
    /// Construct a tree over items that measure their own distances.
    pub fn from_items(items: Vec<T>) -> Self {
        VPTree::new(ItemMetric::new(), items)
    }
}

impl<T: Debug, M: Metric<T>> VPTree<T, M> {
    /// Render the tree structure, one node per line, for debugging.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        match self.root {
            Some(ref root) => root.dump(&mut out),
            None => out.push_str("(empty)\n"),
        }
        out
    }
}

// Torn down iteratively: the tree can be a chain as deep as the input.
impl<T, M: Metric<T>> Drop for VPTree<T, M> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<VPNode<T, M::Distance>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T, M: Metric<T>> Debug for VPTree<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VPTree").field("len", &self.len).field("depth", &self.depth()).finish()
    }
}

/// Iterator over the items of a [`VPTree`].
pub struct Iter<'a, T, F> {
    stack: Vec<&'a VPNode<T, F>>,
}

impl<'a, T, F> Iterator for Iter<'a, T, F> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        if let Some(ref r) = node.right {
            self.stack.push(r);
        }
        if let Some(ref l) = node.left {
            self.stack.push(l);
        }
        Some(&node.item)
    }
}

impl<'a, T, M: Metric<T>> IntoIterator for &'a VPTree<T, M> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, M::Distance>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
