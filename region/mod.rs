use derive_more::Display;
use std::cmp::Ordering;

/// Region 构造错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    #[error("Center point is empty or contains one or more invalid values")]
    CenterInvalid,
    #[error("Region shape must be larger than zero and match the center dimensions")]
    ShapeInvalid,
}

/// 轴对齐区域：中心点 + 每个维度上的半边长
///
/// 构造后不可变。所有重叠判断都是全函数：维度不匹配或输入非法时返回 `false`，
/// 永远不会报错。
#[derive(Debug, Display, Clone)]
#[display(fmt = "center: {:?}, shape: {:?}", center, shape)]
pub struct Region {
    center: Vec<f64>,
    shape: Vec<f64>,
}

impl Region {
    /// 创建新的区域
    ///
    /// `shape` 为半边长，长度为 1 时广播到所有维度。
    ///
    /// ```
    /// use orthtree::{Region, RegionError};
    ///
    /// let region = Region::new(&[3.0, 9.0], &[5.0]).unwrap();
    /// assert_eq!(region.dimensions(), 2);
    /// assert_eq!(region.shape(), &[5.0, 5.0]);
    ///
    /// assert_eq!(Region::new(&[], &[5.0]).unwrap_err(), RegionError::CenterInvalid);
    /// assert_eq!(Region::new(&[1.0], &[0.0]).unwrap_err(), RegionError::ShapeInvalid);
    /// ```
    pub fn new(center: &[f64], shape: &[f64]) -> Result<Self, RegionError> {
        if center.is_empty() || center.iter().any(|c| !c.is_finite()) {
            return Err(RegionError::CenterInvalid);
        }
        let shape = broadcast_shape(shape, center.len()).ok_or(RegionError::ShapeInvalid)?;

        Ok(Region {
            center: center.iter().map(|c| c + 0.0).collect(),
            shape,
        })
    }

    /// 使用统一的半边长创建区域
    pub fn with_extent(center: &[f64], half_extent: f64) -> Result<Self, RegionError> {
        Self::new(center, &[half_extent])
    }

    /// 从 `[min.., max..]` 格式的边界框创建区域
    ///
    /// 退化（宽度为 0）或反向的轴无法表示为区域，返回 `ShapeInvalid`。
    pub fn from_bounds(bounds: &[f64]) -> Result<Self, RegionError> {
        if bounds.is_empty() || bounds.len() % 2 != 0 {
            return Err(RegionError::CenterInvalid);
        }
        let (min, max) = bounds.split_at(bounds.len() / 2);
        let center: Vec<f64> = min.iter().zip(max).map(|(lo, hi)| (lo + hi) / 2.0).collect();
        let shape: Vec<f64> = min.iter().zip(max).map(|(lo, hi)| (hi - lo) / 2.0).collect();
        Self::new(&center, &shape)
    }

    /// 区域维度
    pub fn dimensions(&self) -> usize {
        self.center.len()
    }

    pub fn center(&self) -> &[f64] {
        &self.center
    }

    /// 每个维度上的半边长
    pub fn shape(&self) -> &[f64] {
        &self.shape
    }

    /// 转换为 `[min.., max..]` 格式的边界框
    pub fn to_bounds(&self) -> Vec<f64> {
        let min = self.center.iter().zip(&self.shape).map(|(c, s)| c - s);
        let max = self.center.iter().zip(&self.shape).map(|(c, s)| c + s);
        min.chain(max).collect()
    }

    /// 判断点是否落在区域内（边界包含在内）
    pub fn overlap_point(&self, point: &[f64]) -> bool {
        point.len() == self.dimensions()
            && point
                .iter()
                .zip(&self.center)
                .zip(&self.shape)
                .all(|((p, c), s)| (p - c).abs() <= *s)
    }

    /// 判断另一个区域（中心 + 半边长）是否与本区域重叠
    ///
    /// 分离轴测试：每个轴上中心距离不超过两个半边长之和。
    pub fn overlap_region(&self, center: &[f64], shape: &[f64]) -> bool {
        if center.len() != self.dimensions() {
            return false;
        }
        let Some(shape) = broadcast_shape(shape, self.dimensions()) else {
            return false;
        };
        self.center
            .iter()
            .zip(&self.shape)
            .zip(center.iter().zip(&shape))
            .all(|((c, s), (oc, os))| (c - oc).abs() <= s + os)
    }

    /// 判断另一个区域是否完全包含在本区域内
    pub fn contains_region(&self, center: &[f64], shape: &[f64]) -> bool {
        if center.len() != self.dimensions() {
            return false;
        }
        let Some(shape) = broadcast_shape(shape, self.dimensions()) else {
            return false;
        };
        self.center
            .iter()
            .zip(&self.shape)
            .zip(center.iter().zip(&shape))
            .all(|((c, s), (oc, os))| (c - oc).abs() + os <= *s)
    }

    pub fn overlaps(&self, other: &Region) -> bool {
        self.overlap_region(&other.center, &other.shape)
    }

    pub fn contains(&self, other: &Region) -> bool {
        self.contains_region(&other.center, &other.shape)
    }
}

/// 校验并广播半边长
///
/// 长度为 1 时复制到所有维度；其余情况长度必须等于维度数，且每个分量为正的有限值。
fn broadcast_shape(shape: &[f64], dimensions: usize) -> Option<Vec<f64>> {
    if shape.is_empty() || shape.iter().any(|s| !s.is_finite() || *s <= 0.0) {
        return None;
    }
    match shape.len() {
        1 => Some(vec![shape[0]; dimensions]),
        n if n == dimensions => Some(shape.to_vec()),
        _ => None,
    }
}

fn cmp_components(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.total_cmp(y))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

// 排序只用于确定性枚举：维度少的在前，其次按中心点字典序，最后按半边长
impl Ord for Region {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dimensions()
            .cmp(&other.dimensions())
            .then_with(|| cmp_components(&self.center, &other.center))
            .then_with(|| cmp_components(&self.shape, &other.shape))
    }
}

impl PartialOrd for Region {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Region {}
