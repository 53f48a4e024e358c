// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry value types (transform, borrowed mesh view, AABB).
//!
//! Determinism notes:
//! - Overlap and containment are inclusive on faces.
//! - Affine math uses `f32` without fused multiply-add to preserve identical
//!   results across platforms.

#[doc = "Axis-aligned bounding boxes and the ray/box slab test."]
pub mod aabb;
#[doc = "Borrowed mesh views with cached extents."]
pub mod geometry;
#[doc = "Rigid poses (position + unit quaternion)."]
pub mod transform;
