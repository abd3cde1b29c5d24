//! Distance functions the tree can be built over.
//!
//! A metric `d` must satisfy, for all items `x`, `y`, `z`:
//!
//! * `d(x, y) >= 0`
//! * `d(x, y) == 0` if and only if `x == y`
//! * `d(x, y) == d(y, x)`
//! * `d(x, z) <= d(x, y) + d(y, z)`
//!
//! None of this is checked. A function that breaks the axioms still
//! builds and searches without panicking, but searches may prune away
//! true neighbors.
use std::fmt::{Debug, Display};
use std::marker::PhantomData;

pub use num::Float;

/// Floating-point distance type.
pub trait Scalar: Float + Debug + Display {}
impl<T: Float + Debug + Display> Scalar for T {}

/// A distance function over pairs of `T`.
///
/// Every `Fn(&T, &T) -> F` with a [`Scalar`] output is a `Metric<T>`, so
/// closures and plain functions can be passed directly to
/// [`VPTree::new`](crate::VPTree::new).
pub trait Metric<T> {
    type Distance: Scalar;

    fn distance(&self, a: &T, b: &T) -> Self::Distance;
}

impl<T, F, M> Metric<T> for M
where
    M: Fn(&T, &T) -> F,
    F: Scalar,
{
    type Distance = F;

    #[inline]
    fn distance(&self, a: &T, b: &T) -> F {
        self(a, b)
    }
}

/// An item type that knows its own distance to other items.
pub trait MetricItem {
    type Distance: Scalar;

    fn distance(&self, other: &Self) -> Self::Distance;
}

/// Adapts a [`MetricItem`] type into a [`Metric`].
pub struct ItemMetric<T>(PhantomData<fn(&T, &T)>);

impl<T> ItemMetric<T> {
    pub fn new() -> Self {
        ItemMetric(PhantomData)
    }
}

impl<T> Default for ItemMetric<T> {
    fn default() -> Self {
        ItemMetric::new()
    }
}

impl<T> Clone for ItemMetric<T> {
    fn clone(&self) -> Self {
        ItemMetric::new()
    }
}

impl<T> Copy for ItemMetric<T> {}

impl<T> Debug for ItemMetric<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ItemMetric")
    }
}

impl<T: MetricItem> Metric<T> for ItemMetric<T> {
    type Distance = T::Distance;

    #[inline]
    fn distance(&self, a: &T, b: &T) -> T::Distance {
        a.distance(b)
    }
}
