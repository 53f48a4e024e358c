// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use crate::ray::{RayCastInput, RayCastOutput};
use crate::types::aabb::Aabb;
use crate::types::geometry::Geometry;
use crate::volume::BoundingVolumeFactory;

static NEXT_ARENA: AtomicU64 = AtomicU64::new(1);

/// Handle to a volume owned by a factory.
///
/// Carries the issuing arena's identity, so a handle presented to a different
/// factory (including a new factory created after the issuer was dropped)
/// never resolves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VolumeId {
    arena: u64,
    index: usize,
}

impl VolumeId {
    /// Position of the volume in its factory's creation order.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Factory producing model-space [`Aabb`]s from [`Geometry`] extents.
///
/// Volumes are stored in creation order and released together when the
/// factory is dropped.
#[derive(Debug)]
pub struct AabbFactory {
    arena: u64,
    volumes: Vec<Aabb>,
}

impl AabbFactory {
    /// Creates an empty factory with a fresh arena identity.
    pub fn new() -> Self {
        Self {
            arena: NEXT_ARENA.fetch_add(1, Ordering::Relaxed),
            volumes: Vec::new(),
        }
    }

    /// Iterates `(handle, volume)` pairs in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (VolumeId, &Aabb)> + '_ {
        let arena = self.arena;
        self.volumes
            .iter()
            .enumerate()
            .map(move |(index, bb)| (VolumeId { arena, index }, bb))
    }

    /// Casts `input` against every owned volume and returns the nearest hit.
    ///
    /// Ties on fraction keep the earliest-created volume.
    pub fn ray_cast_nearest(&self, input: &RayCastInput) -> Option<(VolumeId, RayCastOutput)> {
        self.iter()
            .filter_map(|(id, bb)| bb.ray_cast(input).map(|out| (id, out)))
            .fold(None, |best: Option<(VolumeId, RayCastOutput)>, hit| match best {
                Some(b) if b.1.fraction <= hit.1.fraction => Some(b),
                _ => Some(hit),
            })
    }
}

impl Default for AabbFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundingVolumeFactory for AabbFactory {
    type Volume = Aabb;

    fn create(&mut self, geometry: &Geometry<'_>) -> VolumeId {
        let bb = Aabb::from_geometry(geometry);
        let id = VolumeId {
            arena: self.arena,
            index: self.volumes.len(),
        };
        self.volumes.push(bb);
        trace!(arena = self.arena, index = id.index, "aabb volume created");
        id
    }

    fn get(&self, id: VolumeId) -> Option<&Aabb> {
        if id.arena != self.arena {
            return None;
        }
        self.volumes.get(id.index)
    }

    fn len(&self) -> usize {
        self.volumes.len()
    }
}
