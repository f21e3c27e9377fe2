use super::{midpoint, side, Partition};

/// 三维内核（八叉树）
///
/// 边界框为 `[x_min, y_min, z_min, x_max, y_max, z_max]`，
/// 槽位第 0/1/2 位分别表示 x/y/z 轴的上半区。
#[derive(Debug, Clone, Copy, Default)]
pub struct Oct;

impl Partition for Oct {
    type Bounds = [f64; 6];
    type Point = [f64; 3];

    fn supports(dimensions: usize) -> bool {
        dimensions == 3
    }

    fn parse(coords: &[f64], dimensions: usize) -> Option<Self::Bounds> {
        if dimensions != 3 {
            return None;
        }
        let b: [f64; 6] = coords.try_into().ok()?;
        (b[0] <= b[3] && b[1] <= b[4] && b[2] <= b[5]).then_some(b)
    }

    #[inline]
    fn center(b: &Self::Bounds) -> Self::Point {
        [midpoint(b[0], b[3]), midpoint(b[1], b[4]), midpoint(b[2], b[5])]
    }

    #[inline]
    fn overlaps(a: &Self::Bounds, b: &Self::Bounds) -> bool {
        a[0] <= b[3]
            && a[3] >= b[0]
            && a[1] <= b[4]
            && a[4] >= b[1]
            && a[2] <= b[5]
            && a[5] >= b[2]
    }

    #[inline]
    fn contains(o: &Self::Bounds, i: &Self::Bounds) -> bool {
        o[0] <= i[0] && o[1] <= i[1] && o[2] <= i[2] && o[3] >= i[3] && o[4] >= i[4] && o[5] >= i[5]
    }

    fn placement(n: &Self::Bounds, c: &Self::Point, e: &Self::Bounds) -> Option<usize> {
        if e[0] <= c[0]
            && c[0] <= e[3]
            && e[1] <= c[1]
            && c[1] <= e[4]
            && e[2] <= c[2]
            && c[2] <= e[5]
        {
            return None;
        }
        let x = side(n[0], n[3], c[0], e[0], e[3])?;
        let y = side(n[1], n[4], c[1], e[1], e[4])?;
        let z = side(n[2], n[5], c[2], e[2], e[5])?;
        Some(x | y << 1 | z << 2)
    }

    fn child_bounds(n: &Self::Bounds, c: &Self::Point, slot: usize) -> Self::Bounds {
        let (x0, x1) = if slot & 1 == 0 { (n[0], c[0]) } else { (c[0], n[3]) };
        let (y0, y1) = if slot & 2 == 0 { (n[1], c[1]) } else { (c[1], n[4]) };
        let (z0, z1) = if slot & 4 == 0 { (n[2], c[2]) } else { (c[2], n[5]) };
        [x0, y0, z0, x1, y1, z1]
    }

    #[inline]
    fn overlapping_children(c: &Self::Point, q: &Self::Bounds, mut visit: impl FnMut(usize)) {
        let left = q[0] <= c[0];
        let right = q[3] >= c[0];
        let front = q[1] <= c[1];
        let back = q[4] >= c[1];
        if q[2] <= c[2] {
            if front {
                if left {
                    visit(0);
                }
                if right {
                    visit(1);
                }
            }
            if back {
                if left {
                    visit(2);
                }
                if right {
                    visit(3);
                }
            }
        }
        if q[5] >= c[2] {
            if front {
                if left {
                    visit(4);
                }
                if right {
                    visit(5);
                }
            }
            if back {
                if left {
                    visit(6);
                }
                if right {
                    visit(7);
                }
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
        assert!(Oct::parse(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0], 3).is_some());
        assert!(Oct::parse(&[0.0, 0.0, 2.0, 1.0, 1.0, 1.0], 3).is_none());
        assert!(Oct::parse(&[0.0, 0.0, 1.0, 1.0], 2).is_none());
    }

    #[test]
    fn test_matches_orthant_kernel() {
        let node = [0.0, 0.0, 0.0, 8.0, 8.0, 8.0];
        let c = Oct::center(&node);
        let dyn_node: Box<[f64]> = node.into();
        let dyn_c = Orthant::center(&dyn_node);

        let probes = [
            [1.0, 1.0, 1.0, 2.0, 2.0, 2.0],
            [5.0, 1.0, 1.0, 6.0, 2.0, 2.0],
            [1.0, 5.0, 5.0, 2.0, 6.0, 6.0],
            [5.0, 5.0, 5.0, 6.0, 6.0, 6.0],
            [3.0, 3.0, 3.0, 5.0, 5.0, 5.0],
            [3.0, 1.0, 1.0, 5.0, 2.0, 2.0],
            [4.0, 4.0, 4.0, 4.0, 4.0, 4.0],
            [4.0, 1.0, 6.0, 4.0, 1.0, 6.0],
            [1.0, 1.0, 1.0, 7.0, 2.0, 7.0],
            [-1.0, 1.0, 1.0, 2.0, 2.0, 2.0],
        ];
        for (slot, probe) in probes.iter().enumerate() {
            let dyn_probe: Box<[f64]> = (*probe).into();
            assert_eq!(
                Oct::placement(&node, &c, probe),
                Orthant::placement(&dyn_node, &dyn_c, &dyn_probe),
                "placement of probe {}",
                slot
            );

            let mut oct_slots = Vec::new();
            let mut dyn_slots = Vec::new();
            Oct::overlapping_children(&c, probe, |s| oct_slots.push(s));
            Orthant::overlapping_children(&dyn_c, &dyn_probe, |s| dyn_slots.push(s));
            assert_eq!(oct_slots, dyn_slots, "children of probe {}", slot);
        }

        for slot in 0..8 {
            assert_eq!(
                Oct::child_bounds(&node, &c, slot).as_slice(),
                Orthant::child_bounds(&dyn_node, &dyn_c, slot).as_ref()
            );
        }
    }
}
