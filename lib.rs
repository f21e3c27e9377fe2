//! 轴对齐边界框的内存空间索引
//!
//! - [`Region`]：以中心点和半边长描述的轴对齐区域
//! - [`Quadtree`] / [`Octree`] / [`NTree`]：二维、三维和任意维度的划分树
//! - [`SpatialIndex`]：按根边界框维度自动选择实现
//!
//! 边界框统一使用 `[min_0, .., min_{D-1}, max_0, .., max_{D-1}]` 布局。
//!
//! ```
//! use orthtree::new_tree;
//!
//! let mut tree = new_tree(&[0.0, 0.0, 100.0, 100.0]).unwrap();
//! tree.insert("park", &[40.0, 40.0, 60.0, 60.0]);
//! tree.insert("lake", &[70.0, 10.0, 80.0, 20.0]);
//!
//! let found: Vec<_> = tree.intersect(&[45.0, 45.0, 55.0, 55.0]).collect();
//! assert_eq!(found, vec![&"park"]);
//! ```

pub mod config;
pub mod index;
pub mod region;
pub mod tree;

use std::error::Error;

// 重新导出主要的公共接口
pub use config::{IndexConfig, TreeSettings};
pub use index::{new_tree, IndexQuery, SpatialIndex, SpatialTree};
pub use region::{Region, RegionError};
pub use tree::{
    Hits, NTree, NodeId, Octree, OrthTree, Quadtree, Query, TreeError, TreeStats,
};

pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;
