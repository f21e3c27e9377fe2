use super::kernel::{Oct, Orthant, Partition, Quad, MAX_DIMENSIONS};
use super::node::{ItemId, Node, NodeId};
use crate::config::IndexConfig;
use tracing::debug;

/// 默认节点容量
pub const DEFAULT_CAPACITY: usize = 10;
/// 默认最大深度
pub const DEFAULT_MAX_DEPTH: usize = 20;
/// 默认跨界条目警告阈值
pub const DEFAULT_WIDE_ENTRY_WARN: usize = 256;

/// 树构造错误
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    #[error("Invalid bounding box {0:?}: expected 2×D finite coordinates with min <= max")]
    InvalidBounds(Vec<f64>),
    #[error("Capacity must be at least 1")]
    InvalidCapacity,
    #[error("{0} dimensions exceed the supported maximum of {}", MAX_DIMENSIONS)]
    TooManyDimensions(usize),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// 空间划分树
///
/// 根节点边界框在构造时固定。节点和数据都存放在 arena 中，
/// 节点之间通过 [`NodeId`] 互相引用，数据通过 [`ItemId`] 引用。
///
/// 具体的几何计算由内核 `K` 提供，见 [`Quadtree`]、[`Octree`] 和 [`NTree`]。
#[derive(Debug, Clone)]
pub struct OrthTree<T, K: Partition> {
    /// 节点 arena，下标 0 为根节点
    pub(crate) nodes: Vec<Node<K>>,
    /// 数据存储，下标即 ItemId
    pub(crate) items: Vec<T>,
    dimensions: usize,
    /// 叶子节点分裂前可容纳的最大条目数
    capacity: usize,
    max_depth: usize,
    /// 内部节点持有的跨界条目达到该数量时发出警告，0 表示不警告
    wide_entry_warn: usize,
}

/// 二维树
pub type Quadtree<T> = OrthTree<T, Quad>;
/// 三维树
pub type Octree<T> = OrthTree<T, Oct>;
/// 任意维度树
pub type NTree<T> = OrthTree<T, Orthant>;

impl<T, K: Partition> OrthTree<T, K> {
    pub(crate) const ROOT: NodeId = NodeId(0);

    /// 创建新的树
    ///
    /// `bounds` 为根节点边界框 `[min.., max..]`，维度为 `bounds.len() / 2`。
    ///
    /// ```
    /// use orthtree::Quadtree;
    ///
    /// let mut tree = Quadtree::new(&[0.0, 0.0, 100.0, 100.0], 4, 10).unwrap();
    /// assert!(tree.insert("a", &[40.0, 40.0, 60.0, 60.0]));
    /// assert_eq!(tree.intersect(&[45.0, 45.0, 55.0, 55.0]).count(), 1);
    /// ```
    pub fn new(bounds: &[f64], capacity: usize, max_depth: usize) -> Result<Self, TreeError> {
        if capacity == 0 {
            return Err(TreeError::InvalidCapacity);
        }
        let dimensions = bounds.len() / 2;
        // 维度上限只约束动态维度内核，定长内核按普通的非法边界框处理
        if bounds.len() % 2 == 0 && dimensions > MAX_DIMENSIONS && K::supports(MAX_DIMENSIONS) {
            return Err(TreeError::TooManyDimensions(dimensions));
        }
        let root = bounds
            .iter()
            .all(|c| c.is_finite())
            .then(|| K::parse(bounds, dimensions))
            .flatten()
            .ok_or_else(|| TreeError::InvalidBounds(bounds.to_vec()))?;

        debug!(
            "Created {}-dimensional tree over {:?} (capacity={}, max_depth={})",
            dimensions, bounds, capacity, max_depth
        );

        Ok(OrthTree {
            nodes: vec![Node::new(root, 0, None)],
            items: Vec::new(),
            dimensions,
            capacity,
            max_depth,
            wide_entry_warn: DEFAULT_WIDE_ENTRY_WARN,
        })
    }

    /// 使用默认参数创建树（容量 10，最大深度 20）
    pub fn with_bounds(bounds: &[f64]) -> Result<Self, TreeError> {
        Self::new(bounds, DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH)
    }

    /// 按配置创建树
    pub fn with_config(bounds: &[f64], config: &IndexConfig) -> Result<Self, TreeError> {
        config.validate()?;
        let mut tree = Self::new(bounds, config.tree.capacity, config.tree.max_depth)?;
        tree.wide_entry_warn = config.tree.wide_entry_warn;
        Ok(tree)
    }

    /// 树的维度
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// 根节点边界框
    pub fn bounds(&self) -> &[f64] {
        self.nodes[Self::ROOT.0].bounds()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// 已存储的数据数量
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 节点总数（包括根节点）
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    /// 获取节点；标识不属于本树时返回 `None`
    pub fn node(&self, id: NodeId) -> Option<&Node<K>> {
        self.nodes.get(id.0)
    }

    /// 根据标识获取数据
    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.items.get(id.0)
    }

    pub(crate) fn wide_entry_warn(&self) -> usize {
        self.wide_entry_warn
    }
}
