// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Local-space collision shapes posed per query by a [`Transform`].

#[doc = "Convex polyhedra built from mesh geometry."]
pub mod polyhedron;

use crate::ray::{RayCastInput, RayCastOutput};
use crate::types::aabb::Aabb;
use crate::types::transform::Transform;

pub use polyhedron::{Face, PolyhedronShape};

/// A shape defined in model space and placed in the world by the
/// [`Transform`] supplied to each query.
///
/// Shapes never cache world-space results: the transform may change between
/// calls and the shape cannot observe it.
pub trait Shape {
    /// World-space bounds of the shape under `transform`, recomputed on every
    /// call.
    fn compute_aabb(&self, transform: &Transform) -> Aabb;

    /// Casts a world-space ray against the shape placed by `transform`.
    ///
    /// Returns `None` on a miss. The reported normal is in world space.
    fn ray_cast(&self, input: &RayCastInput, transform: &Transform) -> Option<RayCastOutput>;
}
