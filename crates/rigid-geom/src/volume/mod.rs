// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bounding volumes and the arena factories that own them.
//!
//! A factory owns every volume it creates and hands out [`VolumeId`] handles.
//! Handles resolve only through the factory that issued them, so once the
//! factory is dropped nothing it created is reachable.

#[doc = "Arena-backed AABB factory and volume handles."]
pub mod factory;

use crate::ray::{RayCastInput, RayCastOutput};
use crate::types::aabb::Aabb;
use crate::types::geometry::Geometry;

pub use factory::{AabbFactory, VolumeId};

/// A bounding representation that can be ray cast in its own (world) frame.
pub trait BoundingVolume {
    /// Casts `input` against the volume. `None` means no hit.
    fn ray_cast(&self, input: &RayCastInput) -> Option<RayCastOutput>;

    /// Axis-aligned bounds of the volume.
    fn bounds(&self) -> Aabb;
}

/// Builds bounding volumes from geometry and owns them (arena ownership).
///
/// There is no per-volume release: all volumes live exactly as long as the
/// factory. Repeated calls with equivalent geometry create independent
/// volumes; nothing is deduplicated.
pub trait BoundingVolumeFactory {
    /// Concrete volume type stored by this factory.
    type Volume: BoundingVolume;

    /// Builds a volume for `geometry` and returns its handle.
    fn create(&mut self, geometry: &Geometry<'_>) -> VolumeId;

    /// Resolves a handle. Handles issued by another factory resolve to `None`.
    fn get(&self, id: VolumeId) -> Option<&Self::Volume>;

    /// Number of volumes owned.
    fn len(&self) -> usize;

    /// Returns `true` when the factory owns no volumes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
