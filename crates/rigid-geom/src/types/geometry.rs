// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::error::GeomError;
use rigid_core::math::Vec3;
use tracing::trace;

/// Immutable, borrowed view over a mesh's model-space vertex data.
///
/// The lifetime `'a` ties the view to the caller's buffers: a `Geometry`
/// cannot outlive the vertex (and index) storage it was built from.
///
/// `center`, `min`, and `max` are computed once, in a single pass at
/// construction, and never recomputed. `center` is the vertex centroid
/// (arithmetic mean of all positions), not the midpoint of the extents.
///
/// The indexed variant ([`Geometry::indexed`]) also carries per-corner normals
/// and `u16` triangle index sets; [`crate::PolyhedronShape`] reads faces from
/// them.
#[derive(Debug, Clone, Copy)]
pub struct Geometry<'a> {
    positions: &'a [Vec3],
    normals: &'a [Vec3],
    position_indices: &'a [u16],
    normal_indices: &'a [u16],
    center: Vec3,
    min: Vec3,
    max: Vec3,
}

impl<'a> Geometry<'a> {
    /// Builds a non-indexed view over `positions`.
    ///
    /// Fails with [`GeomError::EmptyGeometry`] when `positions` is empty and
    /// with [`GeomError::NonFiniteVertex`] when any position is NaN or
    /// infinite.
    pub fn new(positions: &'a [Vec3]) -> Result<Self, GeomError> {
        Self::indexed(positions, &[], &[], &[])
    }

    /// Builds a triangle-indexed view.
    ///
    /// `position_indices` lists triangle corners three at a time with
    /// counter-clockwise winding seen from outside. `normal_indices` is either
    /// empty or pairs one normal with each position index.
    pub fn indexed(
        positions: &'a [Vec3],
        normals: &'a [Vec3],
        position_indices: &'a [u16],
        normal_indices: &'a [u16],
    ) -> Result<Self, GeomError> {
        let Some((first, rest)) = positions.split_first() else {
            return Err(GeomError::EmptyGeometry);
        };
        if let Some(index) = positions.iter().position(|p| !p.is_finite()) {
            return Err(GeomError::NonFiniteVertex { index });
        }
        check_indices("position", position_indices, positions.len())?;
        if !normal_indices.is_empty() {
            if normal_indices.len() != position_indices.len() {
                return Err(GeomError::NormalIndexMismatch {
                    positions: position_indices.len(),
                    normals: normal_indices.len(),
                });
            }
            check_indices("normal", normal_indices, normals.len())?;
        }

        let mut min = *first;
        let mut max = *first;
        let mut sum = *first;
        for p in rest {
            min = min.component_min(p);
            max = max.component_max(p);
            sum = sum.add(p);
        }
        #[allow(clippy::cast_precision_loss)]
        let center = sum.scale(1.0 / positions.len() as f32);

        trace!(
            vertices = positions.len(),
            triangles = position_indices.len() / 3,
            "geometry scanned"
        );
        Ok(Self {
            positions,
            normals,
            position_indices,
            normal_indices,
            center,
            min,
            max,
        })
    }

    /// Vertex centroid in model space.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Component-wise minimum over all vertices.
    pub fn min_extension(&self) -> Vec3 {
        self.min
    }

    /// Component-wise maximum over all vertices.
    pub fn max_extension(&self) -> Vec3 {
        self.max
    }

    /// The borrowed vertex positions.
    pub fn vertex_positions(&self) -> &'a [Vec3] {
        self.positions
    }

    /// The borrowed normals (empty for non-indexed geometry).
    pub fn normals(&self) -> &'a [Vec3] {
        self.normals
    }

    /// Triangle corner indices into [`Geometry::vertex_positions`].
    pub fn position_indices(&self) -> &'a [u16] {
        self.position_indices
    }

    /// Per-corner indices into [`Geometry::normals`].
    pub fn normal_indices(&self) -> &'a [u16] {
        self.normal_indices
    }

    /// Returns `true` when triangle indices were supplied.
    pub fn is_indexed(&self) -> bool {
        !self.position_indices.is_empty()
    }

    /// Number of indexed triangles.
    pub fn triangle_count(&self) -> usize {
        self.position_indices.len() / 3
    }

    /// Iterates triangles as resolved corner positions.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + 'a {
        let positions = self.positions;
        let indices = self.position_indices;
        indices.chunks_exact(3).map(move |tri| {
            [
                positions[usize::from(tri[0])],
                positions[usize::from(tri[1])],
                positions[usize::from(tri[2])],
            ]
        })
    }
}

fn check_indices(which: &'static str, indices: &[u16], len: usize) -> Result<(), GeomError> {
    if indices.len() % 3 != 0 {
        return Err(GeomError::IndexCount {
            which,
            len: indices.len(),
        });
    }
    match indices.iter().find(|&&i| usize::from(i) >= len) {
        Some(&index) => Err(GeomError::IndexOutOfRange { which, index, len }),
        None => Ok(()),
    }
}
