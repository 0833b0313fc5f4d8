// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::{Quaternion, Vec3, Vec4};
use std::ops::Mul;

/// A 4x4 column-major matrix.
///
/// Poses coming from the host platform arrive as 16 floats in column-major order
/// and map onto this type with [`Mat4::from_cols_array`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[3]` holds the translation.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
    };

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Creates a matrix from 16 floats in column-major order.
    pub fn from_cols_array(m: &[f32; 16]) -> Self {
        Self::from_cols(
            Vec4::new(m[0], m[1], m[2], m[3]),
            Vec4::new(m[4], m[5], m[6], m[7]),
            Vec4::new(m[8], m[9], m[10], m[11]),
            Vec4::new(m[12], m[13], m[14], m[15]),
        )
    }

    /// Returns the 16 floats of the matrix in column-major order.
    pub fn to_cols_array(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for (i, col) in self.cols.iter().enumerate() {
            out[i * 4] = col.x;
            out[i * 4 + 1] = col.y;
            out[i * 4 + 2] = col.z;
            out[i * 4 + 3] = col.w;
        }
        out
    }

    /// Creates a translation matrix.
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = Vec4::from_vec3(v, 1.0);
        m
    }

    /// Creates a non-uniform scaling matrix.
    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        Self::from_cols(
            Vec4::new(scale.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, scale.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, scale.z, 0.0),
            Vec4::W,
        )
    }

    /// Creates a rotation matrix from a unit quaternion.
    pub fn from_quat(q: Quaternion) -> Self {
        let (x2, y2, z2) = (q.x + q.x, q.y + q.y, q.z + q.z);
        let (xx, xy, xz) = (q.x * x2, q.x * y2, q.x * z2);
        let (yy, yz, zz) = (q.y * y2, q.y * z2, q.z * z2);
        let (wx, wy, wz) = (q.w * x2, q.w * y2, q.w * z2);

        Self::from_cols(
            Vec4::new(1.0 - (yy + zz), xy + wz, xz - wy, 0.0),
            Vec4::new(xy - wz, 1.0 - (xx + zz), yz + wx, 0.0),
            Vec4::new(xz + wy, yz - wx, 1.0 - (xx + yy), 0.0),
            Vec4::W,
        )
    }

    /// Composes `translation * rotation * scale` into a single matrix.
    pub fn from_scale_rotation_translation(
        scale: Vec3,
        rotation: Quaternion,
        translation: Vec3,
    ) -> Self {
        let r = Self::from_quat(rotation);
        Self::from_cols(
            r.cols[0] * scale.x,
            r.cols[1] * scale.y,
            r.cols[2] * scale.z,
            Vec4::from_vec3(translation, 1.0),
        )
    }

    /// Returns the translation component.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.cols[3].truncate()
    }

    /// Returns the rotation component as a quaternion.
    #[inline]
    pub fn rotation(&self) -> Quaternion {
        Quaternion::from_rotation_matrix(self)
    }

    /// Transforms a point, applying translation.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(p, 1.0)).truncate()
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, v: Vec4) -> Vec4 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z + self.cols[3] * v.w
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_cols(
            self * rhs.cols[0],
            self * rhs.cols[1],
            self * rhs.cols[2],
            self * rhs.cols[3],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn test_cols_array_layout() {
        let raw = [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            2.0, 3.0, 4.0, 1.0,
        ];
        let m = Mat4::from_cols_array(&raw);
        assert_eq!(m.translation(), Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(m.to_cols_array(), raw);
    }

    #[test]
    fn test_transform_point_applies_scale_then_translation() {
        let m = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            Quaternion::IDENTITY,
            Vec3::new(1.0, 0.0, 0.0),
        );
        let p = m.transform_point(Vec3::new(1.0, 1.0, 1.0));
        assert!(approx_eq(p.x, 3.0) && approx_eq(p.y, 2.0) && approx_eq(p.z, 2.0));
    }

    #[test]
    fn test_multiply_identity() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m * Mat4::IDENTITY, m);
        assert_eq!(Mat4::IDENTITY * m, m);
    }
}
