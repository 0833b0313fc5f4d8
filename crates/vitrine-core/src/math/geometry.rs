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

/// An Axis-Aligned Bounding Box.
///
/// Used by the asset resolver to normalize the scale of loaded models and to
/// frame the gallery environment around the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// The corner of the box with the smallest coordinates on all axes.
    pub min: Vec3,
    /// The corner of the box with the largest coordinates on all axes.
    pub max: Vec3,
}

impl Aabb {
    /// An empty box. Merging anything into it yields that thing.
    pub const INVALID: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Creates a box from two corners given in any order.
    #[inline]
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a box centered on `center` with the given (absolute) half extents.
    #[inline]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let h = Vec3::new(
            half_extents.x.abs(),
            half_extents.y.abs(),
            half_extents.z.abs(),
        );
        Self {
            min: center - h,
            max: center + h,
        }
    }

    /// Returns `true` if `min <= max` on every axis.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// The center point of the box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// The full size (width, height, depth) of the box.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// The largest of the three dimensions, or `0.0` for an invalid box.
    #[inline]
    pub fn max_dimension(&self) -> f32 {
        if self.is_valid() {
            self.size().max_element()
        } else {
            0.0
        }
    }

    /// Returns the smallest box containing both `self` and `other`.
    #[inline]
    pub fn merge(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Computes the box enclosing `self` after an affine transformation.
    pub fn transform(&self, matrix: &Mat4) -> Self {
        if !self.is_valid() {
            return *self;
        }
        let center = matrix.transform_point(self.center());
        let half = self.size() * 0.5;
        let abs_col = |i: usize| {
            let c = matrix.cols[i];
            Vec3::new(c.x.abs(), c.y.abs(), c.z.abs())
        };
        let extents = abs_col(0) * half.x + abs_col(1) * half.y + abs_col(2) * half.z;
        Self::from_center_half_extents(center, extents)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::INVALID
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quaternion;
    use approx::assert_relative_eq;

    #[test]
    fn test_merge_with_invalid_is_identity() {
        let b = Aabb::from_min_max(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        assert_eq!(Aabb::INVALID.merge(&b), b);
        assert_eq!(b.min, Vec3::ZERO);
    }

    #[test]
    fn test_max_dimension() {
        let b = Aabb::from_min_max(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.5, 4.0));
        assert_eq!(b.max_dimension(), 4.0);
        assert_eq!(Aabb::INVALID.max_dimension(), 0.0);
    }

    #[test]
    fn test_transform_rotated_quarter_turn() {
        let b = Aabb::from_min_max(Vec3::new(-2.0, -1.0, -1.0), Vec3::new(2.0, 1.0, 1.0));
        let rot = Mat4::from_quat(Quaternion::from_axis_angle(Vec3::Z, crate::math::FRAC_PI_2));
        let t = b.transform(&(Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0)) * rot));
        assert_relative_eq!(t.size().x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(t.size().y, 4.0, epsilon = 1e-5);
        assert_relative_eq!(t.center().y, 5.0, epsilon = 1e-5);
    }
}
