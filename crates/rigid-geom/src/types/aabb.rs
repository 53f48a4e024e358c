// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::error::GeomError;
use crate::ray::{RayCastInput, RayCastOutput, SlabInterval};
use crate::types::geometry::Geometry;
use crate::types::transform::Transform;
use crate::volume::BoundingVolume;
use rigid_core::math::{Mat4, Vec3};

/// Axis-aligned bounding box in world coordinates.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Flat boxes (`min == max` on an axis) are valid; the ray cast treats them
///   without dividing by a zero extent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Constructs an AABB from its minimum and maximum corners.
    ///
    /// # Panics
    /// Panics if any component of `min` is greater than its counterpart in
    /// `max`. Use [`Aabb::try_new`] for untrusted input.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        let a = min.to_array();
        let b = max.to_array();
        assert!(
            a[0] <= b[0] && a[1] <= b[1] && a[2] <= b[2],
            "invalid AABB: min > max"
        );
        Self { min, max }
    }

    /// Fallible constructor: rejects non-finite corners and `min > max`.
    pub fn try_new(min: Vec3, max: Vec3) -> Result<Self, GeomError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(GeomError::InvalidExtents);
        }
        let ordered = (0..3).all(|axis| min.component(axis) <= max.component(axis));
        if !ordered {
            return Err(GeomError::InvalidExtents);
        }
        Ok(Self { min, max })
    }

    /// Returns the minimum corner.
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Vec3 {
        self.min.add(&self.max).scale(0.5)
    }

    /// Half the edge length along each axis.
    pub fn half_extents(&self) -> Vec3 {
        self.max.sub(&self.min).scale(0.5)
    }

    /// Builds an AABB centered at `center` with half-extents `hx, hy, hz`.
    ///
    /// Negative half-extents are taken by absolute value.
    pub fn from_center_half_extents(center: Vec3, hx: f32, hy: f32, hz: f32) -> Self {
        let he = Vec3::new(hx.abs(), hy.abs(), hz.abs());
        Self {
            min: center.sub(&he),
            max: center.add(&he),
        }
    }

    /// Builds the minimal AABB that contains all `points`.
    ///
    /// Returns `None` if `points` is empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        Self::from_point_iter(points.iter().copied())
    }

    /// Builds the minimal AABB that contains every point yielded by `points`.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn from_point_iter<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bb = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bb.expand_to(&p);
        }
        Some(bb)
    }

    /// Model-space bounds of `geometry`, read from its cached extents.
    pub fn from_geometry(geometry: &Geometry<'_>) -> Self {
        Self {
            min: geometry.min_extension(),
            max: geometry.max_extension(),
        }
    }

    fn expand_to(&mut self, p: &Vec3) {
        self.min = self.min.component_min(p);
        self.max = self.max.component_max(p);
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    pub fn overlaps(&self, other: &Self) -> bool {
        (0..3).all(|axis| {
            self.max.component(axis) >= other.min.component(axis)
                && self.min.component(axis) <= other.max.component(axis)
        })
    }

    /// Returns `true` if `p` lies inside or on the boundary.
    pub fn contains_point(&self, p: &Vec3) -> bool {
        (0..3).all(|axis| {
            let c = p.component(axis);
            c >= self.min.component(axis) && c <= self.max.component(axis)
        })
    }

    /// Returns `true` if `other` lies entirely inside this box.
    pub fn contains(&self, other: &Self) -> bool {
        self.contains_point(&other.min) && self.contains_point(&other.max)
    }

    /// Returns the union of two AABBs.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.component_min(&other.min),
            max: self.max.component_max(&other.max),
        }
    }

    /// Grows this box in place to also cover `other`.
    pub fn merge(&mut self, other: &Self) {
        *self = self.union(other);
    }

    /// Inflates the box by a uniform margin `m` in all directions.
    ///
    /// Negative margins shrink the box but never past its center.
    pub fn inflate(&self, m: f32) -> Self {
        let delta = Vec3::splat(m);
        let min = self.min.sub(&delta);
        let max = self.max.add(&delta);
        let center = self.center();
        Self {
            min: min.component_min(&center),
            max: max.component_max(&center),
        }
    }

    /// Computes the AABB that bounds this box after transformation by `mat`.
    ///
    /// This evaluates the eight corners under the affine transform and builds a
    /// new axis-aligned box containing them.
    pub fn transformed(&self, mat: &Mat4) -> Self {
        let [minx, miny, minz] = self.min.to_array();
        let [maxx, maxy, maxz] = self.max.to_array();
        let corners = [
            Vec3::new(minx, miny, minz),
            Vec3::new(minx, miny, maxz),
            Vec3::new(minx, maxy, minz),
            Vec3::new(minx, maxy, maxz),
            Vec3::new(maxx, miny, minz),
            Vec3::new(maxx, miny, maxz),
            Vec3::new(maxx, maxy, minz),
            Vec3::new(maxx, maxy, maxz),
        ];
        let first = mat.transform_point(&corners[0]);
        let mut bb = Self {
            min: first,
            max: first,
        };
        for c in &corners[1..] {
            bb.expand_to(&mat.transform_point(c));
        }
        bb
    }

    /// Bounds this (local) box after placing it with `transform`.
    pub fn transformed_by(&self, transform: &Transform) -> Self {
        self.transformed(&transform.to_mat4())
    }

    /// Slab test of `input` against this box.
    ///
    /// Per axis: a zero direction component means the ray runs parallel to
    /// that slab and misses outright unless the origin lies within it;
    /// otherwise the slab's entry/exit fractions clip the running
    /// `[0, max_fraction]` interval. The reported normal is the outward normal
    /// of the last axis to advance the entry fraction, or zero when the origin
    /// starts inside.
    pub fn ray_cast(&self, input: &RayCastInput) -> Option<RayCastOutput> {
        if input.max_fraction() <= 0.0 {
            return None;
        }
        let origin = input.origin();
        let direction = input.direction();
        let mut span = SlabInterval::new(input.max_fraction());

        for axis in 0..3 {
            let o = origin.component(axis);
            let d = direction.component(axis);
            let lo = self.min.component(axis);
            let hi = self.max.component(axis);
            if d == 0.0 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let mut t0 = (lo - o) / d;
            let mut t1 = (hi - o) / d;
            if t0 > t1 {
                core::mem::swap(&mut t0, &mut t1);
            }
            let normal = Vec3::ZERO.with_component(axis, -d.signum());
            span.enter(t0, normal);
            span.exit(t1);
            if span.is_empty() {
                return None;
            }
        }
        span.into_output()
    }
}

impl BoundingVolume for Aabb {
    fn ray_cast(&self, input: &RayCastInput) -> Option<RayCastOutput> {
        Self::ray_cast(self, input)
    }

    fn bounds(&self) -> Aabb {
        *self
    }
}
