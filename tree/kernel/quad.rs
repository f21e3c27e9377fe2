use super::{midpoint, side, Partition};

/// 二维内核（四叉树）
///
/// 边界框为 `[x_min, y_min, x_max, y_max]`，子节点槽位：
/// 0 = 左下，1 = 右下，2 = 左上，3 = 右上。
#[derive(Debug, Clone, Copy, Default)]
pub struct Quad;

impl Partition for Quad {
    type Bounds = [f64; 4];
    type Point = [f64; 2];

    fn supports(dimensions: usize) -> bool {
        dimensions == 2
    }

    fn parse(coords: &[f64], dimensions: usize) -> Option<Self::Bounds> {
        if dimensions != 2 {
            return None;
        }
        let b: [f64; 4] = coords.try_into().ok()?;
        (b[0] <= b[2] && b[1] <= b[3]).then_some(b)
    }

    #[inline]
    fn center(b: &Self::Bounds) -> Self::Point {
        [midpoint(b[0], b[2]), midpoint(b[1], b[3])]
    }

    #[inline]
    fn overlaps(a: &Self::Bounds, b: &Self::Bounds) -> bool {
        a[0] <= b[2] && a[2] >= b[0] && a[1] <= b[3] && a[3] >= b[1]
    }

    #[inline]
    fn contains(o: &Self::Bounds, i: &Self::Bounds) -> bool {
        o[0] <= i[0] && o[1] <= i[1] && o[2] >= i[2] && o[3] >= i[3]
    }

    fn placement(n: &Self::Bounds, c: &Self::Point, e: &Self::Bounds) -> Option<usize> {
        if e[0] <= c[0] && c[0] <= e[2] && e[1] <= c[1] && c[1] <= e[3] {
            return None;
        }
        let x = side(n[0], n[2], c[0], e[0], e[2])?;
        let y = side(n[1], n[3], c[1], e[1], e[3])?;
        Some(x | y << 1)
    }

    fn child_bounds(n: &Self::Bounds, c: &Self::Point, slot: usize) -> Self::Bounds {
        match slot {
            0 => [n[0], n[1], c[0], c[1]],
            1 => [c[0], n[1], n[2], c[1]],
            2 => [n[0], c[1], c[0], n[3]],
            _ => [c[0], c[1], n[2], n[3]],
        }
    }

    #[inline]
    fn overlapping_children(c: &Self::Point, q: &Self::Bounds, mut visit: impl FnMut(usize)) {
        let left = q[0] <= c[0];
        let right = q[2] >= c[0];
        if q[1] <= c[1] {
            if left {
                visit(0);
            }
            if right {
                visit(1);
            }
        }
        if q[3] >= c[1] {
            if left {
                visit(2);
            }
            if right {
                visit(3);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::kernel::Orthant;

    #[test]
    fn test_parse() {
        assert_eq!(Quad::parse(&[0.0, 0.0, 1.0, 2.0], 2), Some([0.0, 0.0, 1.0, 2.0]));
        assert_eq!(Quad::parse(&[0.0, 0.0, 1.0], 2), None);
        assert_eq!(Quad::parse(&[0.0, 3.0, 1.0, 2.0], 2), None);
        assert_eq!(Quad::parse(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0], 3), None);
    }

    #[test]
    fn test_child_bounds() {
        let node = [0.0, 0.0, 100.0, 100.0];
        let c = Quad::center(&node);
        assert_eq!(c, [50.0, 50.0]);
        assert_eq!(Quad::child_bounds(&node, &c, 0), [0.0, 0.0, 50.0, 50.0]);
        assert_eq!(Quad::child_bounds(&node, &c, 1), [50.0, 0.0, 100.0, 50.0]);
        assert_eq!(Quad::child_bounds(&node, &c, 2), [0.0, 50.0, 50.0, 100.0]);
        assert_eq!(Quad::child_bounds(&node, &c, 3), [50.0, 50.0, 100.0, 100.0]);
    }

    #[test]
    fn test_matches_orthant_kernel() {
        let node = [0.0, 0.0, 100.0, 100.0];
        let c = Quad::center(&node);
        let dyn_node: Box<[f64]> = node.into();
        let dyn_c = Orthant::center(&dyn_node);

        let probes = [
            [10.0, 10.0, 20.0, 20.0],
            [60.0, 10.0, 70.0, 20.0],
            [10.0, 60.0, 20.0, 70.0],
            [60.0, 60.0, 70.0, 70.0],
            [40.0, 40.0, 60.0, 60.0],
            [40.0, 10.0, 60.0, 20.0],
            [50.0, 50.0, 50.0, 50.0],
            [50.0, 20.0, 50.0, 20.0],
            [-5.0, 10.0, 20.0, 20.0],
            [0.0, 0.0, 100.0, 100.0],
        ];
        for probe in probes {
            let dyn_probe: Box<[f64]> = probe.into();
            assert_eq!(
                Quad::placement(&node, &c, &probe),
                Orthant::placement(&dyn_node, &dyn_c, &dyn_probe),
                "placement of {:?}",
                probe
            );

            let mut quad_slots = Vec::new();
            let mut dyn_slots = Vec::new();
            Quad::overlapping_children(&c, &probe, |s| quad_slots.push(s));
            Orthant::overlapping_children(&dyn_c, &dyn_probe, |s| dyn_slots.push(s));
            assert_eq!(quad_slots, dyn_slots, "children of {:?}", probe);

            assert_eq!(Quad::overlaps(&node, &probe), Orthant::overlaps(&dyn_node, &dyn_probe));
            assert_eq!(Quad::contains(&probe, &node), Orthant::contains(&dyn_probe, &dyn_node));
        }
    }
}
