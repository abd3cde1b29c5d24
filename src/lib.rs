//! Vantage-point trees for exact k-nearest-neighbor search in any
//! metric space.
//!
//! Items never need coordinates: the tree only ever hands pairs of
//! items to a caller-supplied distance function. Strings under edit
//! distance, perceptual hashes under Hamming distance, or points under
//! Euclidean distance all work the same way.
//!
//! ```
//! use metric_vptree::{SearchConfig, VPTree};
//!
//! fn hamming(a: &&str, b: &&str) -> f64 {
//!     a.chars().zip(b.chars()).filter(|(x, y)| x != y).count() as f64
//! }
//!
//! let tree = VPTree::new(hamming, vec!["aa", "ab", "ba", "bb"]);
//! let found = tree.search(&"aa", &SearchConfig::with_num_results(2));
//!
//! assert_eq!(found.len(), 2);
//! assert_eq!(*found[0].item, "aa");
//! assert_eq!(found[1].distance, 1.0);
//! ```
pub mod config;
mod heap;
mod median;
pub mod metric;
pub mod vptree;

pub use config::SearchConfig;
pub use metric::{ItemMetric, Metric, MetricItem, Scalar};
pub use vptree::{Iter, Neighbor, SearchStats, VPTree};
