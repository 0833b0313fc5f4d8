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

use super::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A unit quaternion representing an orientation in 3D space.
///
/// Stored as `(x, y, z, w)` where `w` is the scalar part, matching the layout the
/// host platforms use for pose orientations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Quaternion {
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
    /// The scalar (real) part.
    pub w: f32,
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a new quaternion from its raw components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion rotating `angle_radians` around `axis`.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle_radians: f32) -> Self {
        let axis = axis.normalize();
        let (s, c) = (angle_radians * 0.5).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Extracts the rotation held in the upper 3x3 block of a matrix.
    ///
    /// Scale is removed from each basis column first, so this also works on the
    /// world matrices of uniformly or non-uniformly scaled nodes.
    pub fn from_rotation_matrix(m: &Mat4) -> Self {
        let c0 = m.cols[0].truncate().normalize();
        let c1 = m.cols[1].truncate().normalize();
        let c2 = m.cols[2].truncate().normalize();
        let (m00, m10, m20) = (c0.x, c0.y, c0.z);
        let (m01, m11, m21) = (c1.x, c1.y, c1.z);
        let (m02, m12, m22) = (c2.x, c2.y, c2.z);

        let trace = m00 + m11 + m22;
        let q = if trace > 0.0 {
            let s = 2.0 * (trace + 1.0).sqrt();
            Self::new((m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s, 0.25 * s)
        } else if m00 > m11 && m00 > m22 {
            let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
            Self::new(0.25 * s, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s)
        } else if m11 > m22 {
            let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
            Self::new((m01 + m10) / s, 0.25 * s, (m12 + m21) / s, (m02 - m20) / s)
        } else {
            let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
            Self::new((m02 + m20) / s, (m12 + m21) / s, 0.25 * s, (m10 - m01) / s)
        };
        q.normalize()
    }

    /// Calculates the magnitude of the quaternion.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Returns a unit-length copy; a zero quaternion normalizes to identity.
    #[inline]
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            let inv = 1.0 / mag;
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        } else {
            Self::IDENTITY
        }
    }

    /// Rotates a vector by this quaternion.
    #[inline]
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.rotate_vec3(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FRAC_PI_2;
    use approx::assert_relative_eq;

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn test_rotate_forward_around_y() {
        let q = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        // -Z rotated a quarter turn counter-clockwise around +Y lands on -X.
        assert_vec3_eq(q * Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_rotation_matrix_matches_source() {
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, 2.0, -0.5), 1.1);
        let m = Mat4::from_scale_rotation_translation(
            Vec3::splat(3.0),
            q,
            Vec3::new(4.0, 5.0, 6.0),
        );
        let extracted = Quaternion::from_rotation_matrix(&m);
        let v = Vec3::new(0.3, -0.7, 1.2);
        assert_vec3_eq(extracted * v, q * v);
    }

    #[test]
    fn test_zero_quaternion_normalizes_to_identity() {
        assert_eq!(Quaternion::new(0.0, 0.0, 0.0, 0.0).normalize(), Quaternion::IDENTITY);
    }
}
