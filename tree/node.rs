use super::kernel::Partition;

/// 节点在树内部存储（arena）中的索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// 条目在树的数据存储中的索引，也是查询去重所用的稳定标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) usize);

impl ItemId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// 节点条目：数据标识 + 数据的边界框
#[derive(Debug, Clone)]
pub struct Entry<B> {
    pub(crate) item: ItemId,
    pub(crate) bounds: B,
}

impl<B: AsRef<[f64]>> Entry<B> {
    pub fn item(&self) -> ItemId {
        self.item
    }

    /// 条目的边界框 `[min.., max..]`
    pub fn bounds(&self) -> &[f64] {
        self.bounds.as_ref()
    }
}

/// 树节点
///
/// 叶子节点没有子节点；内部节点的 `2^D` 个子节点在 arena 中连续存放，
/// `children` 指向第一个。内部节点仍可持有条目（无法放入单个子节点的条目）。
#[derive(Debug, Clone)]
pub struct Node<K: Partition> {
    /// 节点边界框，构造后不变
    pub(crate) bounds: K::Bounds,
    /// 分裂点
    pub(crate) center: K::Point,
    /// 节点深度（根节点为 0）
    pub(crate) depth: usize,
    pub(crate) entries: Vec<Entry<K::Bounds>>,
    /// 第一个子节点，仅在分裂后存在
    pub(crate) children: Option<NodeId>,
    /// 父节点，仅作记录，插入和查询都不会沿它回溯
    pub(crate) parent: Option<NodeId>,
    /// 是否已对过多的跨界条目发出警告
    pub(crate) wide_warned: bool,
}

impl<K: Partition> Node<K> {
    pub(crate) fn new(bounds: K::Bounds, depth: usize, parent: Option<NodeId>) -> Self {
        Node {
            center: K::center(&bounds),
            bounds,
            depth,
            entries: Vec::new(),
            children: None,
            parent,
            wide_warned: false,
        }
    }

    pub fn bounds(&self) -> &[f64] {
        self.bounds.as_ref()
    }

    pub fn center(&self) -> &[f64] {
        self.center.as_ref()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn entries(&self) -> &[Entry<K::Bounds>] {
        &self.entries
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// 子节点标识（叶子节点为空）
    pub fn children(&self) -> impl Iterator<Item = NodeId> {
        let fanout = 1usize << self.center.as_ref().len();
        self.children
            .into_iter()
            .flat_map(move |first| (0..fanout).map(move |slot| NodeId(first.0 + slot)))
    }

    /// 检查叶子节点是否已满
    pub(crate) fn is_full(&self, capacity: usize) -> bool {
        self.entries.len() >= capacity
    }
}
