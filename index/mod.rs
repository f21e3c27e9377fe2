use crate::config::IndexConfig;
use crate::region::Region;
use crate::tree::{NTree, Octree, OrthTree, Partition, Query, TreeError, TreeStats};
use crate::tree::{DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH};
use tracing::debug;

/// 所有树变体共用的接口
pub trait SpatialTree<T> {
    /// 惰性查询迭代器
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// 插入数据；边界框非法或与根节点不重叠时返回 `false`
    fn insert(&mut self, item: T, bounds: &[f64]) -> bool;

    /// 查询与边界框重叠的数据，每个数据只返回一次
    fn intersect<'a>(&'a self, bounds: &[f64]) -> Self::Iter<'a>;

    /// 遍历所有数据
    fn iter<'a>(&'a self) -> Self::Iter<'a>;

    fn dimensions(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, K: Partition> SpatialTree<T> for OrthTree<T, K> {
    type Iter<'a> = Query<'a, T, K>
    where
        Self: 'a,
        T: 'a;

    fn insert(&mut self, item: T, bounds: &[f64]) -> bool {
        OrthTree::insert(self, item, bounds)
    }

    fn intersect<'a>(&'a self, bounds: &[f64]) -> Self::Iter<'a> {
        OrthTree::intersect(self, bounds)
    }

    fn iter<'a>(&'a self) -> Self::Iter<'a> {
        OrthTree::iter(self)
    }

    fn dimensions(&self) -> usize {
        OrthTree::dimensions(self)
    }

    fn len(&self) -> usize {
        OrthTree::len(self)
    }
}

/// 按根边界框维度选择的树
///
/// 二维使用四叉树，三维使用八叉树，其余维度使用通用树。变体在构造时确定，之后不再改变。
#[derive(Debug, Clone)]
pub enum SpatialIndex<T> {
    Quad(crate::tree::Quadtree<T>),
    Oct(Octree<T>),
    N(NTree<T>),
}

/// 使用默认参数（容量 10，最大深度 20）创建树
///
/// ```
/// use orthtree::new_tree;
///
/// let mut tree = new_tree(&[0.0, 0.0, 0.0, 10.0, 10.0, 10.0]).unwrap();
/// assert!(tree.insert(7, &[1.0, 1.0, 1.0, 2.0, 2.0, 2.0]));
/// assert!(!tree.insert(8, &[20.0, 20.0, 20.0, 30.0, 30.0, 30.0]));
/// assert_eq!(tree.intersect(&[0.0, 0.0, 0.0, 5.0, 5.0, 5.0]).copied().collect::<Vec<_>>(), vec![7]);
/// ```
pub fn new_tree<T>(bounds: &[f64]) -> Result<SpatialIndex<T>, TreeError> {
    SpatialIndex::new(bounds, DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH)
}

impl<T> SpatialIndex<T> {
    /// 根据 `bounds.len() / 2` 选择树的实现
    pub fn new(bounds: &[f64], capacity: usize, max_depth: usize) -> Result<Self, TreeError> {
        if bounds.is_empty() || bounds.len() % 2 != 0 {
            return Err(TreeError::InvalidBounds(bounds.to_vec()));
        }
        let index = match bounds.len() / 2 {
            2 => SpatialIndex::Quad(OrthTree::new(bounds, capacity, max_depth)?),
            3 => SpatialIndex::Oct(OrthTree::new(bounds, capacity, max_depth)?),
            _ => SpatialIndex::N(OrthTree::new(bounds, capacity, max_depth)?),
        };
        debug!("Selected {} for {} dimensions", index.kind(), bounds.len() / 2);
        Ok(index)
    }

    /// 按配置创建
    pub fn with_config(bounds: &[f64], config: &IndexConfig) -> Result<Self, TreeError> {
        config.validate()?;
        if bounds.is_empty() || bounds.len() % 2 != 0 {
            return Err(TreeError::InvalidBounds(bounds.to_vec()));
        }
        let index = match bounds.len() / 2 {
            2 => SpatialIndex::Quad(OrthTree::with_config(bounds, config)?),
            3 => SpatialIndex::Oct(OrthTree::with_config(bounds, config)?),
            _ => SpatialIndex::N(OrthTree::with_config(bounds, config)?),
        };
        debug!("Selected {} for {} dimensions", index.kind(), bounds.len() / 2);
        Ok(index)
    }

    /// 变体名称
    pub fn kind(&self) -> &'static str {
        match self {
            SpatialIndex::Quad(_) => "quadtree",
            SpatialIndex::Oct(_) => "octree",
            SpatialIndex::N(_) => "ntree",
        }
    }

    pub fn insert(&mut self, item: T, bounds: &[f64]) -> bool {
        match self {
            SpatialIndex::Quad(tree) => tree.insert(item, bounds),
            SpatialIndex::Oct(tree) => tree.insert(item, bounds),
            SpatialIndex::N(tree) => tree.insert(item, bounds),
        }
    }

    pub fn intersect(&self, bounds: &[f64]) -> IndexQuery<'_, T> {
        match self {
            SpatialIndex::Quad(tree) => IndexQuery::Quad(tree.intersect(bounds)),
            SpatialIndex::Oct(tree) => IndexQuery::Oct(tree.intersect(bounds)),
            SpatialIndex::N(tree) => IndexQuery::N(tree.intersect(bounds)),
        }
    }

    pub fn intersect_region(&self, region: &Region) -> IndexQuery<'_, T> {
        match self {
            SpatialIndex::Quad(tree) => IndexQuery::Quad(tree.intersect_region(region)),
            SpatialIndex::Oct(tree) => IndexQuery::Oct(tree.intersect_region(region)),
            SpatialIndex::N(tree) => IndexQuery::N(tree.intersect_region(region)),
        }
    }

    pub fn iter(&self) -> IndexQuery<'_, T> {
        match self {
            SpatialIndex::Quad(tree) => IndexQuery::Quad(tree.iter()),
            SpatialIndex::Oct(tree) => IndexQuery::Oct(tree.iter()),
            SpatialIndex::N(tree) => IndexQuery::N(tree.iter()),
        }
    }

    /// 查询边界框与 `point` 距离不超过 `radius` 的数据
    pub fn within_distance<'a>(&'a self, point: &[f64], radius: f64) -> Box<dyn Iterator<Item = &'a T> + 'a> {
        match self {
            SpatialIndex::Quad(tree) => Box::new(tree.within_distance(point, radius)),
            SpatialIndex::Oct(tree) => Box::new(tree.within_distance(point, radius)),
            SpatialIndex::N(tree) => Box::new(tree.within_distance(point, radius)),
        }
    }

    pub fn dimensions(&self) -> usize {
        match self {
            SpatialIndex::Quad(tree) => tree.dimensions(),
            SpatialIndex::Oct(tree) => tree.dimensions(),
            SpatialIndex::N(tree) => tree.dimensions(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SpatialIndex::Quad(tree) => tree.len(),
            SpatialIndex::Oct(tree) => tree.len(),
            SpatialIndex::N(tree) => tree.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bounds(&self) -> &[f64] {
        match self {
            SpatialIndex::Quad(tree) => tree.bounds(),
            SpatialIndex::Oct(tree) => tree.bounds(),
            SpatialIndex::N(tree) => tree.bounds(),
        }
    }

    pub fn stats(&self) -> TreeStats {
        match self {
            SpatialIndex::Quad(tree) => tree.stats(),
            SpatialIndex::Oct(tree) => tree.stats(),
            SpatialIndex::N(tree) => tree.stats(),
        }
    }
}

/// [`SpatialIndex`] 的查询迭代器
#[derive(Debug)]
pub enum IndexQuery<'a, T> {
    Quad(Query<'a, T, crate::tree::Quad>),
    Oct(Query<'a, T, crate::tree::Oct>),
    N(Query<'a, T, crate::tree::Orthant>),
}

impl<'a, T> Iterator for IndexQuery<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            IndexQuery::Quad(query) => query.next(),
            IndexQuery::Oct(query) => query.next(),
            IndexQuery::N(query) => query.next(),
        }
    }
}

impl<T> SpatialTree<T> for SpatialIndex<T> {
    type Iter<'a> = IndexQuery<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn insert(&mut self, item: T, bounds: &[f64]) -> bool {
        SpatialIndex::insert(self, item, bounds)
    }

    fn intersect<'a>(&'a self, bounds: &[f64]) -> Self::Iter<'a> {
        SpatialIndex::intersect(self, bounds)
    }

    fn iter<'a>(&'a self) -> Self::Iter<'a> {
        SpatialIndex::iter(self)
    }

    fn dimensions(&self) -> usize {
        SpatialIndex::dimensions(self)
    }

    fn len(&self) -> usize {
        SpatialIndex::len(self)
    }
}

impl<'a, T> IntoIterator for &'a SpatialIndex<T> {
    type Item = &'a T;
    type IntoIter = IndexQuery<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
