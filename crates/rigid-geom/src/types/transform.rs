// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use rigid_core::math::{Mat4, Quat, Vec3};

/// Rigid pose (position + orientation) placing model-space geometry in the
/// world.
///
/// Conventions:
/// - `world = orientation.rotate(local) + position`.
/// - `orientation` is kept a unit quaternion: constructors and setters
///   normalize, and a degenerate quaternion becomes the identity rotation.
///
/// `Transform` is a plain `Copy` value. Queries take it by reference and never
/// retain it, so owners are free to mutate it between queries.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    position: Vec3,
    orientation: Quat,
}

impl Transform {
    /// Identity transform (origin, no rotation).
    pub const fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::identity(),
        }
    }

    /// Creates a transform from a position and an orientation.
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation: orientation.normalize(),
        }
    }

    /// Pure translation.
    pub const fn from_position(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::identity(),
        }
    }

    /// Resets to the identity pose.
    pub fn set_identity(&mut self) {
        *self = Self::identity();
    }

    /// Position component.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Orientation component (unit quaternion).
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Replaces the position.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Replaces the orientation, normalizing it.
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation.normalize();
    }

    /// Maps a local point into world space.
    pub fn apply_point(&self, local: &Vec3) -> Vec3 {
        self.orientation.rotate(local).add(&self.position)
    }

    /// Maps a local direction into world space (rotation only).
    pub fn apply_vector(&self, local: &Vec3) -> Vec3 {
        self.orientation.rotate(local)
    }

    /// Maps a world point back into local space.
    pub fn inverse_point(&self, world: &Vec3) -> Vec3 {
        self.orientation
            .conjugate()
            .rotate(&world.sub(&self.position))
    }

    /// Maps a world direction back into local space.
    pub fn inverse_vector(&self, world: &Vec3) -> Vec3 {
        self.orientation.conjugate().rotate(world)
    }

    /// Returns the column-major `Mat4` corresponding to this transform.
    ///
    /// `M = T * R`, built with plain `f32` ops.
    pub fn to_mat4(&self) -> Mat4 {
        let [tx, ty, tz] = self.position.to_array();
        Mat4::translation(tx, ty, tz).multiply(&self.orientation.to_mat4())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    #[test]
    fn set_identity_resets_pose() {
        let mut t = Transform::new(
            Vec3::new(3.0, 4.0, 5.0),
            Quat::from_axis_angle(Vec3::UNIT_Y, 1.0),
        );
        t.set_identity();
        assert_eq!(t, Transform::identity());
    }

    #[test]
    fn orientation_is_normalized_on_entry() {
        let t = Transform::new(Vec3::ZERO, Quat::new(0.0, 0.0, 0.0, 2.0));
        assert_eq!(t.orientation(), Quat::identity());
        let mut u = Transform::identity();
        u.set_orientation(Quat::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(u.orientation(), Quat::identity());
    }

    #[test]
    fn apply_and_inverse_round_trip() {
        let t = Transform::new(
            Vec3::new(1.0, -2.0, 0.5),
            Quat::from_axis_angle(Vec3::UNIT_Z, FRAC_PI_2),
        );
        let local = Vec3::new(1.0, 0.0, 0.0);
        let world = t.apply_point(&local);
        assert!((world.x() - 1.0).abs() < 1e-6);
        assert!((world.y() + 1.0).abs() < 1e-6);
        let back = t.inverse_point(&world);
        assert!(back.sub(&local).length() < 1e-6);
    }

    #[test]
    fn mat4_agrees_with_apply_point() {
        let t = Transform::new(
            Vec3::new(2.0, 0.0, -1.0),
            Quat::from_axis_angle(Vec3::new(1.0, 1.0, 1.0), 0.9),
        );
        let p = Vec3::new(0.25, -3.0, 1.5);
        let a = t.apply_point(&p);
        let b = t.to_mat4().transform_point(&p);
        assert!(a.sub(&b).length() < 1e-5);
    }
}
