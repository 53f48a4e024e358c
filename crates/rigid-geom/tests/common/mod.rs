// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use rigid_core::math::Vec3;

/// Corners of an axis-aligned box centered at the origin.
pub fn box_vertices(hx: f32, hy: f32, hz: f32) -> Vec<Vec3> {
    vec![
        Vec3::new(-hx, -hy, -hz),
        Vec3::new(hx, -hy, -hz),
        Vec3::new(hx, hy, -hz),
        Vec3::new(-hx, hy, -hz),
        Vec3::new(-hx, -hy, hz),
        Vec3::new(hx, -hy, hz),
        Vec3::new(hx, hy, hz),
        Vec3::new(-hx, hy, hz),
    ]
}

/// Counter-clockwise (outward) triangles for [`box_vertices`].
pub const BOX_INDICES: [u16; 36] = [
    0, 3, 2, 0, 2, 1, // -z
    4, 5, 6, 4, 6, 7, // +z
    0, 1, 5, 0, 5, 4, // -y
    3, 7, 6, 3, 6, 2, // +y
    0, 4, 7, 0, 7, 3, // -x
    1, 2, 6, 1, 6, 5, // +x
];

pub fn approx_eq(a: f32, b: f32) {
    let diff = (a - b).abs();
    assert!(diff <= 1e-5, "expected {b}, got {a} (diff {diff})");
}

pub fn approx_eq3(a: Vec3, b: [f32; 3]) {
    for (got, want) in a.to_array().iter().zip(b.iter()) {
        approx_eq(*got, *want);
    }
}
