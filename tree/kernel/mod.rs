//! 空间划分内核
//!
//! 内核提供 [`OrthTree`](super::OrthTree) 所需的几何计算：解析 `[min.., max..]`
//! 边界框、重叠和包含测试、子节点放置以及子节点枚举。树算法只有一份实现，
//! 位于 `algorithms::insert` 和 `algorithms::search`。
//!
//! - [`Orthant`]：任意维度，边界框存储为 `Box<[f64]>`
//! - [`Quad`]：二维，定长数组并展开每个轴的判断
//! - [`Oct`]：三维，定长数组并展开每个轴的判断
//!
//! 子节点槽位约定：第 `d` 位为 1 表示该子节点位于轴 `d` 的上半区。
//! 所有内核共用 [`midpoint`] 和 [`side`]，相同输入序列得到相同的树结构和遍历顺序。

use std::fmt;

mod oct;
mod orthant;
mod quad;

pub use oct::Oct;
pub use orthant::{Orthant, MAX_DIMENSIONS};
pub use quad::Quad;

/// 空间划分内核：树算法所需的全部几何操作
pub trait Partition: fmt::Debug + Clone + Copy + Default + Send + Sync + 'static {
    /// 边界框，布局为 `[min_0 .. min_{D-1}, max_0 .. max_{D-1}]`
    type Bounds: AsRef<[f64]> + Clone + fmt::Debug + Send + Sync;
    /// 节点中心点
    type Point: AsRef<[f64]> + Clone + fmt::Debug + Send + Sync;

    /// 内核是否能处理给定维度
    fn supports(dimensions: usize) -> bool;

    /// 解析 `2×D` 个坐标；长度不符、包含 NaN 或 min > max 时返回 `None`
    fn parse(coords: &[f64], dimensions: usize) -> Option<Self::Bounds>;

    fn center(bounds: &Self::Bounds) -> Self::Point;

    /// 闭区间重叠测试（共享边界也算重叠）
    fn overlaps(a: &Self::Bounds, b: &Self::Bounds) -> bool;

    /// `outer` 是否完全包含 `inner`
    fn contains(outer: &Self::Bounds, inner: &Self::Bounds) -> bool;

    /// 子节点放置规则
    ///
    /// 返回唯一完全包含 `entry` 的子节点槽位；条目在每个轴上都跨越中心点，
    /// 或没有单个子节点能完全容纳它时返回 `None`（条目留在当前节点）。
    fn placement(node: &Self::Bounds, center: &Self::Point, entry: &Self::Bounds)
        -> Option<usize>;

    /// 第 `slot` 个子节点的边界框
    fn child_bounds(node: &Self::Bounds, center: &Self::Point, slot: usize) -> Self::Bounds;

    /// 按槽位升序访问所有与 `query` 重叠的子节点
    ///
    /// 仅在节点本身与 `query` 重叠时调用。
    fn overlapping_children(center: &Self::Point, query: &Self::Bounds, visit: impl FnMut(usize));
}

/// 所有内核共用的中点公式
#[inline]
pub(crate) fn midpoint(lo: f64, hi: f64) -> f64 {
    let mid = lo + (hi - lo) / 2.0;
    if mid.is_finite() {
        mid
    } else {
        // 跨度超过 f64::MAX 时先减半再相加
        lo / 2.0 + hi / 2.0
    }
}

/// 单个轴上的放置判定：0 = 下半区，1 = 上半区，`None` = 无法放入单个子节点
///
/// 恰好落在中心线上的退化坐标归入下半区。
#[inline]
pub(crate) fn side(lo: f64, hi: f64, center: f64, min: f64, max: f64) -> Option<usize> {
    if max <= center && min >= lo {
        Some(0)
    } else if min >= center && max <= hi {
        Some(1)
    } else {
        None
    }
}

/// 检查扁平坐标是否为合法的 `[min.., max..]` 边界框
pub(crate) fn well_formed(coords: &[f64]) -> bool {
    if coords.is_empty() || coords.len() % 2 != 0 {
        return false;
    }
    let (min, max) = coords.split_at(coords.len() / 2);
    min.iter().zip(max).all(|(lo, hi)| lo <= hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed() {
        assert!(well_formed(&[0.0, 0.0, 1.0, 1.0]));
        assert!(well_formed(&[1.0, 1.0]));
        assert!(!well_formed(&[]));
        assert!(!well_formed(&[0.0, 1.0, 2.0]));
        assert!(!well_formed(&[2.0, 0.0, 1.0, 1.0]));
        assert!(!well_formed(&[f64::NAN, 0.0, 1.0, 1.0]));
    }

    #[test]
    fn test_midpoint_huge_span() {
        assert_eq!(midpoint(0.0, 10.0), 5.0);
        assert_eq!(midpoint(-1e308, 1e308), 0.0);
        assert_eq!(midpoint(-f64::MAX, f64::MAX), 0.0);
        assert_eq!(midpoint(f64::MAX, f64::MAX), f64::MAX);
        let mid = midpoint(-1e308, 1.5e308);
        assert!(mid.is_finite() && -1e308 < mid && mid < 1.5e308);
    }

    #[test]
    fn test_side_tie_break() {
        // 落在中心线上的点归入下半区
        assert_eq!(side(0.0, 10.0, 5.0, 5.0, 5.0), Some(0));
        assert_eq!(side(0.0, 10.0, 5.0, 5.0, 7.0), Some(1));
        assert_eq!(side(0.0, 10.0, 5.0, 4.0, 6.0), None);
        // 超出节点边界的条目无法放入子节点
        assert_eq!(side(0.0, 10.0, 5.0, -1.0, 2.0), None);
        assert_eq!(side(0.0, 10.0, 5.0, 8.0, 11.0), None);
    }
}
