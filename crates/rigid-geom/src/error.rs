// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Construction-time errors for geometry, shapes, and ray inputs.

use thiserror::Error;

/// Error type for malformed geometry and ray inputs.
///
/// Every variant is an invalid-argument condition raised at construction
/// time. Queries on validly constructed values never fail; a miss is reported
/// as `None`, not as an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    /// A `Geometry` was built from an empty vertex buffer.
    #[error("invalid argument: geometry requires at least one vertex")]
    EmptyGeometry,
    /// A vertex position is NaN or infinite.
    #[error("invalid argument: vertex {index} is not finite")]
    NonFiniteVertex {
        /// Position of the offending vertex in the buffer.
        index: usize,
    },
    /// An index set length is not a multiple of three.
    #[error("invalid argument: {which} index count {len} is not a multiple of 3")]
    IndexCount {
        /// Which index set failed (`"position"` or `"normal"`).
        which: &'static str,
        /// Length of the offending index set.
        len: usize,
    },
    /// An index addresses past the end of its buffer.
    #[error("invalid argument: {which} index {index} out of range for {len} entries")]
    IndexOutOfRange {
        /// Which index set failed (`"position"` or `"normal"`).
        which: &'static str,
        /// The offending index value.
        index: u16,
        /// Length of the addressed buffer.
        len: usize,
    },
    /// Normal indices were supplied but do not pair with the position indices.
    #[error("invalid argument: {normals} normal indices for {positions} position indices")]
    NormalIndexMismatch {
        /// Number of position indices.
        positions: usize,
        /// Number of normal indices.
        normals: usize,
    },
    /// A polyhedron needs at least four vertices to enclose a volume.
    #[error("invalid argument: polyhedron requires at least 4 vertices, got {found}")]
    TooFewVertices {
        /// Number of vertices supplied.
        found: usize,
    },
    /// The polyhedron's faces cannot enclose a volume.
    #[error("invalid argument: polyhedron requires at least 4 distinct face planes, got {found}")]
    TooFewFaces {
        /// Number of distinct face planes derived.
        found: usize,
    },
    /// A ray was given a zero direction vector.
    #[error("invalid argument: ray direction must be non-zero")]
    ZeroDirection,
    /// A ray origin, direction, or maximum fraction was NaN or infinite where
    /// a finite value is required.
    #[error("invalid argument: ray {field} must be finite")]
    NonFiniteRay {
        /// Which ray field failed.
        field: &'static str,
    },
    /// Box corners violate `min <= max` or are not finite.
    #[error("invalid argument: AABB corners must be finite with min <= max on every axis")]
    InvalidExtents,
}

impl GeomError {
    /// Returns `true` for invalid-argument conditions.
    ///
    /// Every current variant is one; the method exists so callers can branch
    /// on the category without matching each variant.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::EmptyGeometry
                | Self::NonFiniteVertex { .. }
                | Self::IndexCount { .. }
                | Self::IndexOutOfRange { .. }
                | Self::NormalIndexMismatch { .. }
                | Self::TooFewVertices { .. }
                | Self::TooFewFaces { .. }
                | Self::ZeroDirection
                | Self::NonFiniteRay { .. }
                | Self::InvalidExtents
        )
    }
}
