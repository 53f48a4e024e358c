// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::{Mat4, Vec3, EPSILON};

/// Rotation quaternion `(x, y, z, w)`; angles in radians.
///
/// [`Quat::rotate`] assumes unit length. Orientations coming from user data
/// should pass through [`Quat::normalize`] first.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quat {
    data: [f32; 4],
}

impl Quat {
    /// Raw components; nothing is normalized.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Returns the identity quaternion.
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Returns the quaternion as an array.
    pub fn to_array(self) -> [f32; 4] {
        self.data
    }

    /// Rotation of `angle` radians about `axis` (any length).
    ///
    /// A zero-length axis has no direction and yields identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let unit = axis.normalize();
        if unit.is_zero() {
            return Self::identity();
        }
        let (sin_half, cos_half) = (angle * 0.5).sin_cos();
        let v = unit.scale(sin_half);
        Self::new(v.x(), v.y(), v.z(), cos_half)
    }

    /// Vector part `(x, y, z)`.
    pub fn vector(&self) -> Vec3 {
        Vec3::new(self.data[0], self.data[1], self.data[2])
    }

    /// Scalar part `w`.
    pub fn scalar(&self) -> f32 {
        self.data[3]
    }

    /// Hamilton product of two quaternions (`self * other`).
    ///
    /// Operand order matters: applying the result to a vector rotates by
    /// `other` first, then by `self`.
    ///
    /// # Examples
    /// ```
    /// use core::f32::consts::FRAC_PI_2;
    /// use rigid_core::math::{Quat, Vec3};
    /// let yaw = Quat::from_axis_angle(Vec3::UNIT_Y, FRAC_PI_2);
    /// let pitch = Quat::from_axis_angle(Vec3::UNIT_X, FRAC_PI_2);
    /// assert_ne!(yaw.multiply(&pitch).to_array(), pitch.multiply(&yaw).to_array());
    /// ```
    pub fn multiply(&self, other: &Self) -> Self {
        let (av, aw) = (self.vector(), self.scalar());
        let (bv, bw) = (other.vector(), other.scalar());
        let v = bv.scale(aw).add(&av.scale(bw)).add(&av.cross(&bv));
        Self::new(v.x(), v.y(), v.z(), aw * bw - av.dot(&bv))
    }

    /// Euclidean norm of the four components.
    pub fn length(&self) -> f32 {
        self.data.iter().map(|c| c * c).sum::<f32>().sqrt()
    }

    /// Returns `true` when no component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|c| c.is_finite())
    }

    /// Normalises the quaternion; returns identity when the norm is ~0 or
    /// not finite.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if !len.is_finite() || len <= EPSILON {
            return Self::identity();
        }
        Self {
            data: self.data.map(|c| c / len),
        }
    }

    /// Conjugate `(-x, -y, -z, w)`; the inverse rotation for unit quaternions.
    pub fn conjugate(&self) -> Self {
        let [x, y, z, w] = self.data;
        Self::new(-x, -y, -z, w)
    }

    /// Rotates `v` by this (unit) quaternion.
    ///
    /// Uses `v' = v + 2w(q × v) + 2q × (q × v)` with `q` the vector part,
    /// which avoids building a matrix.
    pub fn rotate(&self, v: &Vec3) -> Vec3 {
        let q = self.vector();
        let t = q.cross(v).scale(2.0);
        v.add(&t.scale(self.scalar())).add(&q.cross(&t))
    }

    /// Rotation matrix (column-major 4×4). Columns are the rotated basis
    /// axes, so `to_mat4().transform_direction(v)` agrees with `rotate(v)`.
    pub fn to_mat4(&self) -> Mat4 {
        let q = self.normalize();
        let [c0, c1, c2] = [Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z].map(|axis| q.rotate(&axis));
        Mat4::new([
            c0.x(), c0.y(), c0.z(), 0.0, // col 0
            c1.x(), c1.y(), c1.z(), 0.0, // col 1
            c2.x(), c2.y(), c2.z(), 0.0, // col 2
            0.0, 0.0, 0.0, 1.0, // col 3
        ])
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}

/// `[x, y, z, w]`, taken as-is.
impl From<[f32; 4]> for Quat {
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}
