use crate::metric::Scalar;

/// Parameters for a single k-nearest-neighbor search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig<F> {
    /// Maximum number of neighbors returned. Zero yields no results.
    pub num_results: usize,
    /// Initial search radius. Only items strictly closer than this are
    /// returned.
    pub max_distance: F,
}

impl<F: Scalar> SearchConfig<F> {
    /// One result, unbounded radius.
    pub fn new() -> Self {
        SearchConfig::with_num_results(1)
    }

    /// `k` results, unbounded radius.
    pub fn with_num_results(k: usize) -> Self {
        SearchConfig {
            num_results: k,
            max_distance: F::max_value(),
        }
    }

    /// Every item strictly within `radius` of the target.
    pub fn within(radius: F) -> Self {
        SearchConfig {
            num_results: usize::MAX,
            max_distance: radius,
        }
    }

    pub fn num_results(mut self, k: usize) -> Self {
        self.num_results = k;
        self
    }

    pub fn max_distance(mut self, radius: F) -> Self {
        self.max_distance = radius;
        self
    }
}

impl<F: Scalar> Default for SearchConfig<F> {
    fn default() -> Self {
        SearchConfig::new()
    }
}
