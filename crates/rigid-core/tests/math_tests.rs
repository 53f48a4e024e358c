// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
use core::f32::consts::{FRAC_PI_2, PI};
use proptest::prelude::*;
use rigid_core::math::{Mat4, Quat, Vec3};

fn approx_eq(a: f32, b: f32) {
    let diff = (a - b).abs();
    assert!(diff <= 1e-5, "expected {b}, got {a} (diff {diff})");
}

fn approx_eq3(a: Vec3, b: [f32; 3]) {
    let a = a.to_array();
    for (got, want) in a.iter().zip(b.iter()) {
        approx_eq(*got, *want);
    }
}

#[test]
fn vec3_normalize_degenerate_returns_zero() {
    let v = Vec3::new(1e-12, -1e-12, 0.0);
    assert_eq!(v.normalize().to_array(), [0.0, 0.0, 0.0]);
}

#[test]
fn vec3_component_min_max() {
    let a = Vec3::new(1.0, -2.0, 3.0);
    let b = Vec3::new(0.5, 4.0, 3.0);
    assert_eq!(a.component_min(&b).to_array(), [0.5, -2.0, 3.0]);
    assert_eq!(a.component_max(&b).to_array(), [1.0, 4.0, 3.0]);
}

#[test]
fn vec3_operators_match_methods() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 0.5, 2.0);
    assert_eq!((a + b).to_array(), a.add(&b).to_array());
    assert_eq!((a - b).to_array(), a.sub(&b).to_array());
    assert_eq!((a * 2.0).to_array(), [2.0, 4.0, 6.0]);
    assert_eq!((-a).to_array(), [-1.0, -2.0, -3.0]);
}

#[test]
fn vec3_zero_and_finite_checks() {
    assert!(Vec3::ZERO.is_zero());
    assert!(!Vec3::new(0.0, -0.0, 1e-30).is_zero());
    assert!(!Vec3::new(f32::NAN, 0.0, 0.0).is_finite());
    assert!(!Vec3::new(0.0, f32::INFINITY, 0.0).is_finite());
    assert!(Vec3::UNIT_Z.is_finite());
}

#[test]
fn quat_identity_properties() {
    let id = Quat::identity();
    assert_eq!(id.multiply(&id).to_array(), id.to_array());
    assert_eq!(id.to_mat4().to_array(), Mat4::identity().to_array());
    assert_eq!(id.rotate(&Vec3::new(1.0, 2.0, 3.0)).to_array(), [1.0, 2.0, 3.0]);
}

#[test]
fn quat_rotate_matches_matrix() {
    let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.7);
    let v = Vec3::new(0.3, -2.0, 5.0);
    let by_quat = q.rotate(&v);
    let by_mat = q.to_mat4().transform_direction(&v);
    approx_eq3(by_quat, by_mat.to_array());
}

#[test]
fn quat_rotate_quarter_turn_about_z() {
    let q = Quat::from_axis_angle(Vec3::UNIT_Z, FRAC_PI_2);
    approx_eq3(q.rotate(&Vec3::UNIT_X), [0.0, 1.0, 0.0]);
    approx_eq3(q.conjugate().rotate(&Vec3::UNIT_Y), [1.0, 0.0, 0.0]);
}

#[test]
fn quat_multiply_composes_rotations() {
    let a = Quat::from_axis_angle(Vec3::UNIT_Z, FRAC_PI_2);
    let b = Quat::from_axis_angle(Vec3::UNIT_X, PI);
    let v = Vec3::new(0.0, 1.0, 0.0);
    let composed = a.multiply(&b).rotate(&v);
    let sequential = a.rotate(&b.rotate(&v));
    approx_eq3(composed, sequential.to_array());
}

#[test]
fn quat_normalize_degenerate_is_identity() {
    assert_eq!(Quat::new(0.0, 0.0, 0.0, 0.0).normalize(), Quat::identity());
    assert_eq!(Quat::new(f32::NAN, 0.0, 0.0, 1.0).normalize(), Quat::identity());
    approx_eq(Quat::new(0.0, 0.0, 3.0, 4.0).normalize().length(), 1.0);
}

#[test]
fn quat_from_axis_angle_zero_axis_is_identity() {
    assert_eq!(Quat::from_axis_angle(Vec3::ZERO, 1.0), Quat::identity());
}

#[test]
fn mat4_translation_and_direction() {
    let t = Mat4::translation(1.0, 2.0, 3.0);
    assert_eq!(t.transform_point(&Vec3::ZERO).to_array(), [1.0, 2.0, 3.0]);
    assert_eq!(t.transform_direction(&Vec3::UNIT_X).to_array(), [1.0, 0.0, 0.0]);
    let ts = t * Mat4::scale(2.0, 2.0, 2.0);
    assert_eq!(ts.transform_point(&Vec3::UNIT_Y).to_array(), [1.0, 4.0, 3.0]);
}

proptest! {
    #[test]
    fn rotation_preserves_length(
        axis in prop::array::uniform3(-1.0f32..1.0),
        angle in -6.3f32..6.3,
        v in prop::array::uniform3(-100.0f32..100.0),
    ) {
        let q = Quat::from_axis_angle(Vec3::from(axis), angle);
        let v = Vec3::from(v);
        let rotated = q.rotate(&v);
        prop_assert!((rotated.length() - v.length()).abs() <= 1e-3 * (1.0 + v.length()));
    }

    #[test]
    fn conjugate_undoes_rotation(
        axis in prop::array::uniform3(-1.0f32..1.0),
        angle in -6.3f32..6.3,
        v in prop::array::uniform3(-10.0f32..10.0),
    ) {
        let q = Quat::from_axis_angle(Vec3::from(axis), angle);
        let v = Vec3::from(v);
        let back = q.conjugate().rotate(&q.rotate(&v));
        prop_assert!(back.sub(&v).length() <= 1e-3);
    }
}
