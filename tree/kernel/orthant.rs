use super::{midpoint, side, well_formed, Partition};

/// 动态维度内核支持的最大维度（每次分裂产生 2^D 个子节点）
pub const MAX_DIMENSIONS: usize = 16;

/// 任意维度内核
#[derive(Debug, Clone, Copy, Default)]
pub struct Orthant;

impl Partition for Orthant {
    type Bounds = Box<[f64]>;
    type Point = Box<[f64]>;

    fn supports(dimensions: usize) -> bool {
        (1..=MAX_DIMENSIONS).contains(&dimensions)
    }

    fn parse(coords: &[f64], dimensions: usize) -> Option<Self::Bounds> {
        if !Self::supports(dimensions) || coords.len() != 2 * dimensions || !well_formed(coords) {
            return None;
        }
        Some(coords.into())
    }

    fn center(bounds: &Self::Bounds) -> Self::Point {
        let (min, max) = split(bounds);
        min.iter().zip(max).map(|(lo, hi)| midpoint(*lo, *hi)).collect()
    }

    fn overlaps(a: &Self::Bounds, b: &Self::Bounds) -> bool {
        let (a_min, a_max) = split(a);
        let (b_min, b_max) = split(b);
        a_min.iter().zip(b_max).all(|(lo, hi)| lo <= hi)
            && a_max.iter().zip(b_min).all(|(hi, lo)| hi >= lo)
    }

    fn contains(outer: &Self::Bounds, inner: &Self::Bounds) -> bool {
        let (o_min, o_max) = split(outer);
        let (i_min, i_max) = split(inner);
        o_min.iter().zip(i_min).all(|(o, i)| o <= i) && o_max.iter().zip(i_max).all(|(o, i)| o >= i)
    }

    fn placement(node: &Self::Bounds, center: &Self::Point, entry: &Self::Bounds) -> Option<usize> {
        let (n_min, n_max) = split(node);
        let (e_min, e_max) = split(entry);

        let spans_center = center
            .iter()
            .zip(e_min.iter().zip(e_max))
            .all(|(c, (lo, hi))| lo <= c && c <= hi);
        if spans_center {
            return None;
        }

        let mut slot = 0;
        for d in 0..center.len() {
            slot |= side(n_min[d], n_max[d], center[d], e_min[d], e_max[d])? << d;
        }
        Some(slot)
    }

    fn child_bounds(node: &Self::Bounds, center: &Self::Point, slot: usize) -> Self::Bounds {
        let (min, max) = split(node);
        let dims = center.len();
        let mut bounds = vec![0.0; 2 * dims];
        for d in 0..dims {
            if slot >> d & 1 == 1 {
                bounds[d] = center[d];
                bounds[dims + d] = max[d];
            } else {
                bounds[d] = min[d];
                bounds[dims + d] = center[d];
            }
        }
        bounds.into_boxed_slice()
    }

    fn overlapping_children(center: &Self::Point, query: &Self::Bounds, mut visit: impl FnMut(usize)) {
        let (q_min, q_max) = split(query);

        // 只覆盖一侧的轴固定对应位，覆盖两侧的轴进入自由掩码
        let mut fixed = 0usize;
        let mut free = 0usize;
        for (d, c) in center.iter().enumerate() {
            match (q_min[d] <= *c, q_max[d] >= *c) {
                (true, true) => free |= 1 << d,
                (false, true) => fixed |= 1 << d,
                _ => {}
            }
        }

        // 按升序枚举自由掩码的所有子集
        let mut sub = 0usize;
        loop {
            visit(fixed | sub);
            if sub == free {
                break;
            }
            sub = (sub | !free).wrapping_add(1) & free;
        }
    }
}

fn split(bounds: &[f64]) -> (&[f64], &[f64]) {
    bounds.split_at(bounds.len() / 2)
}
