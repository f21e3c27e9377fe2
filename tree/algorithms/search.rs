use super::super::kernel::Partition;
use super::super::node::{ItemId, NodeId};
use super::super::tree::OrthTree;
use crate::region::Region;
use std::collections::HashSet;

/// 查询过滤条件
#[derive(Debug, Clone)]
enum Filter<B> {
    /// 遍历全部条目
    Everything,
    /// 只返回与边界框重叠的条目
    Overlapping(B),
}

/// 当前正在扫描的节点
#[derive(Debug, Clone, Copy)]
struct Cursor {
    node: NodeId,
    /// 查询完全包含该节点，条目无需再做重叠测试
    dump: bool,
    next: usize,
}

/// 惰性查询迭代器，返回 `(数据, 数据边界框)`
///
/// 每次调用都有自己的遍历栈和去重集合；同一次查询中每个数据只返回一次。
/// 遍历顺序：先返回节点自身的条目，再按槽位升序进入子节点。
#[derive(Debug)]
pub struct Hits<'a, T, K: Partition> {
    tree: &'a OrthTree<T, K>,
    filter: Filter<K::Bounds>,
    stack: Vec<(NodeId, bool)>,
    cursor: Option<Cursor>,
    seen: HashSet<ItemId>,
}

impl<'a, T, K: Partition> Hits<'a, T, K> {
    fn new(tree: &'a OrthTree<T, K>, filter: Filter<K::Bounds>) -> Self {
        Hits {
            tree,
            filter,
            stack: vec![(OrthTree::<T, K>::ROOT, false)],
            cursor: None,
            seen: HashSet::new(),
        }
    }

    /// 不返回任何结果的查询（非法查询框）
    fn empty(tree: &'a OrthTree<T, K>) -> Self {
        Hits {
            tree,
            filter: Filter::Everything,
            stack: Vec::new(),
            cursor: None,
            seen: HashSet::new(),
        }
    }

    /// 打开节点：判断是否完全包含，并把需要访问的子节点压栈
    fn open(&mut self, id: NodeId, dump: bool) {
        let tree = self.tree;
        let node = &tree.nodes[id.0];
        let query = match &self.filter {
            Filter::Overlapping(query) if !dump => Some(query),
            _ => None,
        };
        let dump = query.map_or(true, |q| K::contains(q, &node.bounds));

        if let Some(first) = node.children {
            let start = self.stack.len();
            match query {
                Some(q) if !dump => {
                    // 根节点条目可以超出根边界，查询与根节点本身不重叠时不必下降
                    if id != OrthTree::<T, K>::ROOT || K::overlaps(&node.bounds, q) {
                        let stack = &mut self.stack;
                        K::overlapping_children(&node.center, q, |slot| {
                            stack.push((NodeId(first.0 + slot), false));
                        });
                    }
                }
                _ => {
                    let fanout = 1usize << tree.dimensions();
                    self.stack.extend((0..fanout).map(|slot| (NodeId(first.0 + slot), true)));
                }
            }
            self.stack[start..].reverse();
        }

        self.cursor = Some(Cursor { node: id, dump, next: 0 });
    }
}

impl<'a, T, K: Partition> Iterator for Hits<'a, T, K> {
    type Item = (&'a T, &'a [f64]);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        loop {
            if let Some(cursor) = self.cursor.as_mut() {
                let entries = &tree.nodes[cursor.node.0].entries;
                while let Some(entry) = entries.get(cursor.next) {
                    cursor.next += 1;
                    if let Filter::Overlapping(query) = &self.filter {
                        if !cursor.dump && !K::overlaps(query, &entry.bounds) {
                            continue;
                        }
                    }
                    if self.seen.insert(entry.item) {
                        return Some((&tree.items[entry.item.0], entry.bounds.as_ref()));
                    }
                }
                self.cursor = None;
            }

            let (id, dump) = self.stack.pop()?;
            self.open(id, dump);
        }
    }
}

/// 惰性查询迭代器，只返回数据
#[derive(Debug)]
pub struct Query<'a, T, K: Partition> {
    hits: Hits<'a, T, K>,
}

impl<'a, T, K: Partition> Iterator for Query<'a, T, K> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.hits.next().map(|(item, _)| item)
    }
}

/// 搜索操作相关算法
impl<T, K: Partition> OrthTree<T, K> {
    /// 查询与边界框重叠的所有数据
    ///
    /// 结果是惰性的，每个数据只出现一次。查询框非法（长度不符、NaN、min > max）时不返回任何结果。
    ///
    /// ```
    /// use orthtree::Quadtree;
    ///
    /// let mut tree = Quadtree::new(&[0.0, 0.0, 100.0, 100.0], 4, 10).unwrap();
    /// tree.insert("box", &[40.0, 40.0, 60.0, 60.0]);
    ///
    /// assert_eq!(tree.intersect(&[45.0, 45.0, 55.0, 55.0]).collect::<Vec<_>>(), vec![&"box"]);
    /// assert_eq!(tree.intersect(&[0.0, 0.0, 10.0, 10.0]).count(), 0);
    /// ```
    pub fn intersect(&self, bounds: &[f64]) -> Query<'_, T, K> {
        Query { hits: self.hits(bounds) }
    }

    /// 与 [`intersect`](Self::intersect) 相同，但同时返回数据插入时的边界框
    pub fn hits(&self, bounds: &[f64]) -> Hits<'_, T, K> {
        match K::parse(bounds, self.dimensions()) {
            Some(query) => Hits::new(self, Filter::Overlapping(query)),
            None => Hits::empty(self),
        }
    }

    /// 遍历树中的所有数据
    pub fn iter(&self) -> Query<'_, T, K> {
        Query {
            hits: Hits::new(self, Filter::Everything),
        }
    }

    /// 查询与区域重叠的所有数据；维度不匹配时不返回任何结果
    pub fn intersect_region(&self, region: &Region) -> Query<'_, T, K> {
        if region.dimensions() != self.dimensions() {
            return Query { hits: Hits::empty(self) };
        }
        self.intersect(&region.to_bounds())
    }

    /// 查询边界框与 `point` 的欧氏距离不超过 `radius` 的所有数据
    ///
    /// 距离按边界框上离 `point` 最近的点计算，`point` 落在边界框内时距离为 0。
    pub fn within_distance<'a>(&'a self, point: &[f64], radius: f64) -> impl Iterator<Item = &'a T> + 'a {
        let valid = point.len() == self.dimensions() && radius >= 0.0;
        let hits = if valid {
            let min = point.iter().map(|p| p - radius);
            let max = point.iter().map(|p| p + radius);
            self.hits(&min.chain(max).collect::<Vec<_>>())
        } else {
            Hits::empty(self)
        };

        let point = point.to_vec();
        let limit = radius * radius;
        hits.filter(move |(_, bounds)| distance_sq(bounds, &point) <= limit)
            .map(|(item, _)| item)
    }
}

impl<'a, T, K: Partition> IntoIterator for &'a OrthTree<T, K> {
    type Item = &'a T;
    type IntoIter = Query<'a, T, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 点到边界框的欧氏距离平方
fn distance_sq(bounds: &[f64], point: &[f64]) -> f64 {
    let (min, max) = bounds.split_at(bounds.len() / 2);
    point
        .iter()
        .zip(min.iter().zip(max))
        .map(|(p, (lo, hi))| {
            let d = if p < lo {
                lo - p
            } else if p > hi {
                p - hi
            } else {
                0.0
            };
            d * d
        })
        .sum()
}
