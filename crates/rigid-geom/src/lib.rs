// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Collision geometry for Rigid3D.

This crate provides:
- Rigid poses (`Transform`) mapping model space into world space.
- Borrowed mesh views (`Geometry`) with cached centroid and extents.
- Axis-aligned bounding boxes (`Aabb`) with a slab ray test.
- Convex polyhedra (`PolyhedronShape`) with plane-clipping ray casts.
- Arena factories (`AabbFactory`) that own the volumes they build.

Design notes:
- Construction validates; queries never fail. A ray miss is `None`.
- Shapes live in model space; every world-space query takes a `Transform`.
- Float32 throughout; ties resolve deterministically (the first plane to reach
  an entry fraction supplies the normal).
"]
#![forbid(unsafe_code)]

/// Construction-time error type.
pub mod error;
/// Ray-cast input/output contract.
pub mod ray;
/// Local-space shapes posed per query.
pub mod shape;
/// Foundational geometric types.
pub mod types;
/// Bounding volumes and their factories.
pub mod volume;

pub use error::GeomError;
pub use ray::{RayCastInput, RayCastOutput};
pub use shape::{Face, PolyhedronShape, Shape};
pub use types::aabb::Aabb;
pub use types::geometry::Geometry;
pub use types::transform::Transform;
pub use volume::{AabbFactory, BoundingVolume, BoundingVolumeFactory, VolumeId};
