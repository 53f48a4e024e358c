// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::Vec3;

/// Column-major 4×4 affine matrix.
///
/// Only the affine subset is exercised: points map with `w = 1`, directions
/// with `w = 0`, and the bottom row stays `[0, 0, 0, 1]` for matrices built
/// by the constructors here.
///
/// # Examples
/// ```
/// use rigid_core::math::{Mat4, Vec3};
/// let t = Mat4::translation(5.0, -3.0, 2.0);
/// let p = Vec3::new(2.0, 4.0, -1.0);
/// assert_eq!(t.transform_point(&p).to_array(), [7.0, 1.0, 1.0]);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    data: [f32; 16],
}

impl Mat4 {
    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self::scale(1.0, 1.0, 1.0)
    }

    /// Pure translation; the offset lives in column 3.
    pub const fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        let mut data = Self::identity().data;
        data[12] = tx;
        data[13] = ty;
        data[14] = tz;
        Self { data }
    }

    /// Axis-aligned scale.
    pub const fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        let mut data = [0.0; 16];
        data[0] = sx;
        data[5] = sy;
        data[10] = sz;
        data[15] = 1.0;
        Self { data }
    }

    /// Wraps column-major data.
    pub const fn new(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Column-major copy of the matrix.
    pub fn to_array(self) -> [f32; 16] {
        self.data
    }

    fn at(&self, row: usize, col: usize) -> f32 {
        self.data[col * 4 + row]
    }

    /// Matrix product `self * rhs`; `rhs` applies first.
    ///
    /// ```
    /// use rigid_core::math::Mat4;
    /// let s = Mat4::scale(2.0, 3.0, 4.0);
    /// assert_eq!(Mat4::identity().multiply(&s), s);
    /// ```
    pub fn multiply(&self, rhs: &Self) -> Self {
        Self::new(core::array::from_fn(|i| {
            let (col, row) = (i / 4, i % 4);
            (0..4).map(|k| self.at(row, k) * rhs.at(k, col)).sum()
        }))
    }

    fn apply(&self, v: &Vec3, w: f32) -> Vec3 {
        let [x, y, z] = v.to_array();
        let row = |r: usize| {
            self.at(r, 0) * x + self.at(r, 1) * y + self.at(r, 2) * z + self.at(r, 3) * w
        };
        Vec3::new(row(0), row(1), row(2))
    }

    /// Maps a point (`w = 1`); no perspective divide.
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        self.apply(point, 1.0)
    }

    /// Maps a direction (`w = 0`); translation is ignored.
    pub fn transform_direction(&self, direction: &Vec3) -> Vec3 {
        self.apply(direction, 0.0)
    }
}

impl From<[f32; 16]> for Mat4 {
    fn from(value: [f32; 16]) -> Self {
        Self::new(value)
    }
}

impl core::ops::Mul for Mat4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}
