pub mod algorithms;
pub mod kernel;
pub mod node;
#[allow(clippy::module_inception)]
pub mod tree;

// 重新导出主要类型
pub use algorithms::search::{Hits, Query};
pub use algorithms::stats::TreeStats;
pub use kernel::{Oct, Orthant, Partition, Quad, MAX_DIMENSIONS};
pub use node::{Entry, ItemId, Node, NodeId};
pub use tree::{
    NTree, Octree, OrthTree, Quadtree, TreeError, DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH,
    DEFAULT_WIDE_ENTRY_WARN,
};
