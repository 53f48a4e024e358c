// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ray-cast input/output contract shared by bounding volumes and shapes.
//!
//! Fractions are parametric: a hit at fraction `t` lies at
//! `origin + t * direction`. The direction is not required to be unit length,
//! so `t` is a distance only when the direction is normalized. Use
//! [`RayCastInput::normalized`] to get distance-valued fractions without
//! changing the tested segment.

use crate::error::GeomError;
use rigid_core::math::Vec3;

/// A validated ray segment query.
///
/// Invariants (checked by [`RayCastInput::new`]):
/// - `origin` and `direction` are finite.
/// - `direction` is non-zero.
/// - `max_fraction` is not NaN. It may be `+inf` for an unbounded ray; values
///   `<= 0` are accepted and simply never hit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayCastInput {
    origin: Vec3,
    direction: Vec3,
    max_fraction: f32,
}

impl RayCastInput {
    /// Builds a ray query covering `origin + t * direction` for
    /// `t ∈ [0, max_fraction]`.
    pub fn new(origin: Vec3, direction: Vec3, max_fraction: f32) -> Result<Self, GeomError> {
        if !origin.is_finite() {
            return Err(GeomError::NonFiniteRay { field: "origin" });
        }
        if !direction.is_finite() {
            return Err(GeomError::NonFiniteRay { field: "direction" });
        }
        if direction.is_zero() {
            return Err(GeomError::ZeroDirection);
        }
        if max_fraction.is_nan() {
            return Err(GeomError::NonFiniteRay {
                field: "max_fraction",
            });
        }
        Ok(Self {
            origin,
            direction,
            max_fraction,
        })
    }

    /// Ray origin.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Ray direction (not necessarily unit length).
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Upper bound of the tested parametric segment.
    pub fn max_fraction(&self) -> f32 {
        self.max_fraction
    }

    /// Point at parametric `fraction` along the ray.
    pub fn point_at(&self, fraction: f32) -> Vec3 {
        self.origin.add(&self.direction.scale(fraction))
    }

    /// Returns the same segment with a unit-length direction.
    ///
    /// `max_fraction` is rescaled by the old direction length, so fractions
    /// reported for the returned input are world-space distances.
    /// Directions too short to normalize are returned unchanged.
    pub fn normalized(&self) -> Self {
        let len = self.direction.length();
        let unit = self.direction.normalize();
        if unit.is_zero() {
            return *self;
        }
        Self {
            origin: self.origin,
            direction: unit,
            max_fraction: self.max_fraction * len,
        }
    }
}

/// Result of a successful ray cast.
///
/// A miss is `None` at the call site, never an output value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayCastOutput {
    /// Parametric hit fraction in `[0, max_fraction]`.
    pub fraction: f32,
    /// World-space unit normal of the entered face, opposing the ray
    /// direction. Zero when the ray origin starts inside the volume.
    pub normal: Vec3,
}

impl RayCastOutput {
    /// World-space hit point for the input that produced this output.
    pub fn point(&self, input: &RayCastInput) -> Vec3 {
        input.point_at(self.fraction)
    }

    /// Returns `true` when the ray started inside the volume.
    pub fn started_inside(&self) -> bool {
        self.normal.is_zero()
    }
}

/// Running `[enter, exit]` parametric interval for slab-style clipping.
///
/// `enter` only advances on a strictly larger value, so the first plane that
/// reaches a given entry distance keeps supplying the normal.
#[derive(Debug, Copy, Clone)]
pub(crate) struct SlabInterval {
    enter: f32,
    exit: f32,
    normal: Vec3,
}

impl SlabInterval {
    pub(crate) fn new(max_fraction: f32) -> Self {
        Self {
            enter: 0.0,
            exit: max_fraction,
            normal: Vec3::ZERO,
        }
    }

    /// Narrows the entry bound; `normal` is recorded when `t` advances it.
    pub(crate) fn enter(&mut self, t: f32, normal: Vec3) {
        if t > self.enter {
            self.enter = t;
            self.normal = normal;
        }
    }

    /// Narrows the exit bound.
    pub(crate) fn exit(&mut self, t: f32) {
        if t < self.exit {
            self.exit = t;
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.enter > self.exit
    }

    pub(crate) fn into_output(self) -> Option<RayCastOutput> {
        if self.is_empty() {
            return None;
        }
        Some(RayCastOutput {
            fraction: self.enter,
            normal: self.normal,
        })
    }
}
