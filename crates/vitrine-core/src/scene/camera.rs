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

use crate::math::{Mat4, Quaternion, Vec3};
use serde::{Deserialize, Serialize};

/// A perspective camera whose pose follows the viewer during a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Viewport width / height.
    pub aspect_ratio: f32,
    /// Distance to the near clipping plane.
    pub z_near: f32,
    /// Distance to the far clipping plane.
    pub z_far: f32,
    /// World-space position of the camera.
    #[serde(skip)]
    pub position: Vec3,
    /// World-space orientation of the camera.
    #[serde(skip)]
    pub rotation: Quaternion,
}

impl Camera {
    /// Creates a camera at the origin looking down `-Z`.
    pub fn new_perspective(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y_degrees,
            aspect_ratio,
            z_near,
            z_far,
            position: Vec3::ZERO,
            rotation: Quaternion::IDENTITY,
        }
    }

    /// The unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::new(0.0, 0.0, -1.0)
    }

    /// Moves the camera to the pose described by a world matrix.
    pub fn set_pose(&mut self, matrix: &Mat4) {
        self.position = matrix.translation();
        self.rotation = matrix.rotation();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new_perspective(70.0, 16.0 / 9.0, 0.01, 200.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FRAC_PI_2;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_follows_rotation() {
        let mut camera = Camera::default();
        assert_eq!(camera.forward(), Vec3::new(0.0, 0.0, -1.0));
        camera.rotation = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let f = camera.forward();
        assert_relative_eq!(f.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(f.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_set_pose_extracts_position() {
        let mut camera = Camera::default();
        camera.set_pose(&Mat4::from_translation(Vec3::new(0.0, 1.6, 0.0)));
        assert_eq!(camera.position, Vec3::new(0.0, 1.6, 0.0));
    }
}
