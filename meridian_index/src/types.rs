// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::{Axis, IndexError};

/// Axis-aligned bounding box in 2D.
///
/// For geographic boxes `x` is longitude and `y` is latitude, both in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aabb2D<T> {
    /// Minimum x (west)
    pub min_x: T,
    /// Minimum y (south)
    pub min_y: T,
    /// Maximum x (east)
    pub max_x: T,
    /// Maximum y (north)
    pub max_y: T,
}

/// Geographic bounding box in degrees (`x` = longitude, `y` = latitude).
pub type BoundingBox = Aabb2D<f64>;

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Build a well-ordered AABB from two opposite corners given in any order.
    ///
    /// Each axis is normalized independently, so corners swapped on one axis
    /// only (as produced by a rotated or flipped projection) are handled too.
    pub fn from_corners(a: (T, T), b: (T, T)) -> Self {
        Self {
            min_x: min_t(a.0, b.0),
            min_y: min_t(a.1, b.1),
            max_x: max_t(a.0, b.0),
            max_y: max_t(a.1, b.1),
        }
    }

    /// Whether this AABB contains the point.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        le(self.min_x, x) && le(self.min_y, y) && le(x, self.max_x) && le(y, self.max_y)
    }

    /// Whether `other` lies entirely inside this AABB (boundaries included).
    pub fn contains_aabb(&self, other: &Self) -> bool {
        le(self.min_x, other.min_x)
            && le(self.min_y, other.min_y)
            && le(other.max_x, self.max_x)
            && le(other.max_y, self.max_y)
    }

    /// The intersection of two AABBs.
    pub fn intersect(&self, other: &Self) -> Self {
        let min_x = max_t(self.min_x, other.min_x);
        let min_y = max_t(self.min_y, other.min_y);
        let max_x = min_t(self.max_x, other.max_x);
        let max_y = min_t(self.max_y, other.max_y);
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Whether two AABBs overlap. Touching edges count as overlap.
    pub fn intersects(&self, other: &Self) -> bool {
        !self.intersect(other).is_empty()
    }

    /// The smallest AABB enclosing both.
    pub fn union(&self, other: &Self) -> Self {
        union_aabb(*self, *other)
    }

    /// Return true if the AABB is empty or inverted (no area). Assumes no NaN.
    ///
    /// Degenerate boxes (zero width or height) are not empty.
    pub fn is_empty(&self) -> bool {
        lt(self.max_x, self.min_x) || lt(self.max_y, self.min_y)
    }

    /// Check that `min <= max` holds on both axes.
    ///
    /// NaN coordinates fail the check as well, since they order with nothing.
    pub fn validate(&self) -> Result<(), IndexError> {
        if !le(self.min_x, self.max_x) {
            return Err(IndexError::InvalidBoundingBox { axis: Axis::X });
        }
        if !le(self.min_y, self.max_y) {
            return Err(IndexError::InvalidBoundingBox { axis: Axis::Y });
        }
        Ok(())
    }
}

impl Aabb2D<f64> {
    /// Create an AABB from origin and size in f64.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }

    /// Whether every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }

    /// Width of the box (`max_x - min_x`).
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box (`max_y - min_y`).
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Identifier of a geometry fragment: an index into an external, immutable
/// geometry table.
///
/// The spatial index stores fragment ids next to their boxes and nothing else;
/// geometry lookups happen on the caller's side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentId(pub u32);

impl FragmentId {
    /// Position of the fragment in its geometry table.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl core::fmt::Display for FragmentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Numeric scalar abstraction for 2D AABBs used by backends.
///
/// Bulk builders only need a zero and a midpoint (for centroid ordering).
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Midpoint between a and b (used for centroid ordering).
    fn mid(a: Self, b: Self) -> Self;
}

impl Scalar for f32 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }
}

impl Scalar for f64 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}

pub(crate) fn union_aabb<T: PartialOrd + Copy>(a: Aabb2D<T>, b: Aabb2D<T>) -> Aabb2D<T> {
    Aabb2D {
        min_x: min_t(a.min_x, b.min_x),
        min_y: min_t(a.min_y, b.min_y),
        max_x: max_t(a.max_x, b.max_x),
        max_y: max_t(a.max_y, b.max_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_corners_normalizes_each_axis() {
        let b = Aabb2D::from_corners((10.0, -5.0), (-10.0, 5.0));
        assert_eq!(b, Aabb2D::new(-10.0, -5.0, 10.0, 5.0));
        let b = Aabb2D::from_corners((1.0, 8.0), (3.0, 2.0));
        assert_eq!(b, Aabb2D::new(1.0, 2.0, 3.0, 8.0));
    }

    #[test]
    fn touching_and_degenerate_boxes_intersect() {
        let a = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Aabb2D::new(10.0, 0.0, 20.0, 10.0)));
        assert!(a.intersects(&Aabb2D::new(5.0, 5.0, 5.0, 5.0)));
        assert!(!a.intersects(&Aabb2D::new(10.5, 0.0, 20.0, 10.0)));
    }

    #[test]
    fn validate_rejects_inverted_and_nan() {
        assert!(Aabb2D::new(0.0, 0.0, 0.0, 0.0).validate().is_ok());
        assert_eq!(
            Aabb2D::new(1.0, 0.0, 0.0, 1.0).validate(),
            Err(IndexError::InvalidBoundingBox { axis: Axis::X })
        );
        assert_eq!(
            Aabb2D::new(0.0, 2.0, 1.0, 1.0).validate(),
            Err(IndexError::InvalidBoundingBox { axis: Axis::Y })
        );
        assert!(Aabb2D::new(f64::NAN, 0.0, 1.0, 1.0).validate().is_err());
    }

    #[test]
    fn union_and_containment() {
        let a = Aabb2D::new(0.0, 0.0, 1.0, 1.0);
        let b = Aabb2D::new(-2.0, 0.5, 0.5, 3.0);
        let u = a.union(&b);
        assert_eq!(u, Aabb2D::new(-2.0, 0.0, 1.0, 3.0));
        assert!(u.contains_aabb(&a));
        assert!(u.contains_aabb(&b));
        assert!(!a.contains_aabb(&u));
    }
}
