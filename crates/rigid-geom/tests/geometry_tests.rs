// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
//! Borrowed geometry views: extents, centroid, and index validation.

use rigid_core::math::Vec3;
use rigid_geom::{Geometry, GeomError};

fn skewed() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(4.0, -1.0, 2.0),
        Vec3::new(0.0, 3.0, -2.0),
        Vec3::new(0.0, 0.0, 0.0),
    ]
}

#[test]
fn extents_are_component_wise_min_max() {
    let verts = skewed();
    let g = Geometry::new(&verts).unwrap();
    assert_eq!(g.min_extension().to_array(), [0.0, -1.0, -2.0]);
    assert_eq!(g.max_extension().to_array(), [4.0, 3.0, 2.0]);
    assert_eq!(g.vertex_positions().len(), 4);
    assert!(!g.is_indexed());
}

#[test]
fn center_is_vertex_centroid_not_extent_midpoint() {
    let verts = skewed();
    let g = Geometry::new(&verts).unwrap();
    // Mean of the four vertices; the extent midpoint would be (2, 1, 0).
    assert_eq!(g.center().to_array(), [1.0, 0.5, 0.0]);
}

#[test]
fn single_vertex_geometry_is_valid() {
    let verts = [Vec3::new(1.0, 2.0, 3.0)];
    let g = Geometry::new(&verts).unwrap();
    assert_eq!(g.min_extension(), g.max_extension());
    assert_eq!(g.center(), verts[0]);
}

#[test]
fn empty_geometry_is_invalid_argument() {
    let err = Geometry::new(&[]).unwrap_err();
    assert_eq!(err, GeomError::EmptyGeometry);
    assert!(err.is_invalid_argument());
}

#[test]
fn non_finite_vertex_is_rejected() {
    let verts = [Vec3::ZERO, Vec3::new(0.0, f32::NAN, 0.0)];
    assert_eq!(
        Geometry::new(&verts).unwrap_err(),
        GeomError::NonFiniteVertex { index: 1 }
    );
}

#[test]
fn indexed_geometry_resolves_triangles() {
    let verts = [Vec3::ZERO, Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z];
    let normals = [Vec3::UNIT_Z];
    let indices = [0u16, 1, 2, 0, 3, 1];
    let normal_indices = [0u16; 6];
    let g = Geometry::indexed(&verts, &normals, &indices, &normal_indices).unwrap();
    assert!(g.is_indexed());
    assert_eq!(g.triangle_count(), 2);
    let tris: Vec<[Vec3; 3]> = g.triangles().collect();
    assert_eq!(tris[0], [Vec3::ZERO, Vec3::UNIT_X, Vec3::UNIT_Y]);
    assert_eq!(tris[1], [Vec3::ZERO, Vec3::UNIT_Z, Vec3::UNIT_X]);
    assert_eq!(g.normals().len(), 1);
    assert_eq!(g.normal_indices().len(), 6);
}

#[test]
fn index_validation() {
    let verts = [Vec3::ZERO, Vec3::UNIT_X, Vec3::UNIT_Y];
    assert_eq!(
        Geometry::indexed(&verts, &[], &[0, 1], &[]).unwrap_err(),
        GeomError::IndexCount {
            which: "position",
            len: 2
        }
    );
    assert_eq!(
        Geometry::indexed(&verts, &[], &[0, 1, 3], &[]).unwrap_err(),
        GeomError::IndexOutOfRange {
            which: "position",
            index: 3,
            len: 3
        }
    );
    assert_eq!(
        Geometry::indexed(&verts, &[Vec3::UNIT_Z], &[0, 1, 2], &[0, 0, 0, 0, 0, 0]).unwrap_err(),
        GeomError::NormalIndexMismatch {
            positions: 3,
            normals: 6
        }
    );
    assert_eq!(
        Geometry::indexed(&verts, &[Vec3::UNIT_Z], &[0, 1, 2], &[0, 0, 1]).unwrap_err(),
        GeomError::IndexOutOfRange {
            which: "normal",
            index: 1,
            len: 1
        }
    );
}
