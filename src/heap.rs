//! Bounded max-heap holding the best candidates seen during a search.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::metric::Scalar;

/// An item found during search, paired with its distance to the target.
#[derive(Debug)]
pub struct Candidate<'a, T: 'a, F> {
    pub dist: F,
    pub item: &'a T,
}

impl<'a, T: 'a, F: Scalar> Candidate<'a, T, F> {
    pub fn new(dist: F, item: &'a T) -> Self {
        Candidate { dist, item }
    }
}

impl<'a, T: 'a, F: Scalar> PartialEq for Candidate<'a, T, F> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<'a, T: 'a, F: Scalar> Eq for Candidate<'a, T, F> {}

impl<'a, T: 'a, F: Scalar> PartialOrd for Candidate<'a, T, F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// NaN distances compare equal to everything rather than panicking.
impl<'a, T: 'a, F: Scalar> Ord for Candidate<'a, T, F> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist.partial_cmp(&other.dist).unwrap_or(Ordering::Equal)
    }
}

/// A max-heap of at most `capacity` candidates. The top is the worst of
/// the best candidates kept so far.
pub struct BoundedHeap<'a, T: 'a, F> {
    heap: BinaryHeap<Candidate<'a, T, F>>,
    capacity: usize,
}

impl<'a, T: 'a, F: Scalar> BoundedHeap<'a, T, F> {
    /// `size_hint` bounds the initial allocation; searches with a huge
    /// `k` over a small tree should not reserve `k` slots.
    pub fn new(capacity: usize, size_hint: usize) -> Self {
        BoundedHeap {
            heap: BinaryHeap::with_capacity(capacity.min(size_hint)),
            capacity,
        }
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// Distance of the current worst candidate.
    pub fn worst(&self) -> Option<F> {
        self.heap.peek().map(|c| c.dist)
    }

    /// Insert a candidate, evicting the current worst first if the heap
    /// is at capacity. A zero-capacity heap stays empty.
    pub fn push(&mut self, candidate: Candidate<'a, T, F>) {
        if self.capacity == 0 {
            return;
        }
        if self.is_full() {
            self.heap.pop();
        }
        self.heap.push(candidate);
    }

    /// Candidates in ascending distance order.
    pub fn into_sorted_vec(self) -> Vec<Candidate<'a, T, F>> {
        self.heap.into_sorted_vec()
    }
}
