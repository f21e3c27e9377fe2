use super::super::kernel::Partition;
use super::super::node::{Entry, ItemId, Node, NodeId};
use super::super::tree::OrthTree;
use tracing::{debug, trace, warn};

/// 插入操作相关算法
impl<T, K: Partition> OrthTree<T, K> {
    /// 插入数据及其边界框
    ///
    /// # 返回值
    /// - `true` - 插入成功
    /// - `false` - 边界框非法或与根节点不重叠，树不做任何修改
    pub fn insert(&mut self, item: T, bounds: &[f64]) -> bool {
        let Some(bounds) = K::parse(bounds, self.dimensions()) else {
            trace!("Rejected malformed bounding box {:?}", bounds);
            return false;
        };
        if !K::overlaps(&self.nodes[Self::ROOT.0].bounds, &bounds) {
            trace!("Rejected bounding box {:?} outside of the root", bounds);
            return false;
        }

        let id = ItemId(self.items.len());
        self.items.push(item);
        self.place(Self::ROOT, Entry { item: id, bounds });
        true
    }

    /// 从给定节点开始放置条目
    ///
    /// 1. 内部节点：按子节点放置规则下降，无法放入单个子节点则留在当前节点
    /// 2. 叶子未满或已达到最大深度：追加到当前节点
    /// 3. 否则分裂叶子节点，然后按内部节点处理
    fn place(&mut self, start: NodeId, entry: Entry<K::Bounds>) {
        let mut current = start;
        loop {
            let node = &self.nodes[current.0];

            if let Some(first) = node.children {
                match K::placement(&node.bounds, &node.center, &entry.bounds) {
                    Some(slot) => {
                        current = NodeId(first.0 + slot);
                        continue;
                    }
                    None => {
                        self.keep_wide(current, entry);
                        return;
                    }
                }
            }

            if !node.is_full(self.capacity()) || node.depth >= self.max_depth() {
                self.nodes[current.0].entries.push(entry);
                return;
            }

            self.split(current);
        }
    }

    /// 分裂叶子节点 - 创建 2^D 个子节点并重新分配已有条目
    fn split(&mut self, id: NodeId) {
        let first = NodeId(self.nodes.len());
        let fanout = 1usize << self.dimensions();
        let (bounds, center, depth) = {
            let node = &self.nodes[id.0];
            (node.bounds.clone(), node.center.clone(), node.depth)
        };

        self.nodes.extend(
            (0..fanout).map(|slot| Node::new(K::child_bounds(&bounds, &center, slot), depth + 1, Some(id))),
        );
        self.nodes[id.0].children = Some(first);

        let entries = std::mem::take(&mut self.nodes[id.0].entries);
        debug!(
            "Split node {} at depth {} into {} children, redistributing {} entries",
            id.0,
            depth,
            fanout,
            entries.len()
        );
        for entry in entries {
            self.place(id, entry);
        }
    }

    /// 内部节点保留无法放入单个子节点的条目
    fn keep_wide(&mut self, id: NodeId, entry: Entry<K::Bounds>) {
        let threshold = self.wide_entry_warn();
        let node = &mut self.nodes[id.0];
        node.entries.push(entry);

        if threshold > 0 && !node.wide_warned && node.entries.len() >= threshold {
            node.wide_warned = true;
            warn!(
                "Node {} at depth {} holds {} entries spanning its split point; queries touching it scan them linearly",
                id.0,
                node.depth,
                node.entries.len()
            );
        }
    }
}
