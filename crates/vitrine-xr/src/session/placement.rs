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

//! Where a select input puts the artwork.

use crate::config::PlacementSettings;
use crate::reticle::Reticle;
use vitrine_core::{
    math::{Quaternion, Vec3},
    scene::{Camera, SceneNode},
};

/// A placement target captured when the user selects.
///
/// The target is fixed at select time; a model that finishes loading later
/// lands where the user was pointing when they tapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementTarget {
    /// On the surface under the reticle, aligned with it.
    Surface {
        /// Reticle position.
        position: Vec3,
        /// Reticle orientation.
        orientation: Quaternion,
    },
    /// In front of the camera, keeping the object's own orientation.
    InFront {
        /// Camera position pushed forward and dropped.
        position: Vec3,
    },
}

impl PlacementTarget {
    /// Captures the target from the current reticle and camera.
    ///
    /// The reticle is used only while hit-testing is available and it is visible.
    pub fn capture(
        reticle: Option<&Reticle>,
        hit_test_available: bool,
        camera: &Camera,
        settings: &PlacementSettings,
    ) -> Self {
        match reticle {
            Some(reticle) if hit_test_available && reticle.is_visible() => Self::Surface {
                position: reticle.position(),
                orientation: reticle.orientation(),
            },
            _ => {
                let ahead = camera.rotation * Vec3::new(0.0, 0.0, -settings.fallback_distance);
                let mut position = camera.position + ahead;
                position.y -= settings.fallback_drop;
                Self::InFront { position }
            }
        }
    }

    /// Target position.
    pub fn position(&self) -> Vec3 {
        match *self {
            Self::Surface { position, .. } | Self::InFront { position } => position,
        }
    }

    /// Orientation override, if any.
    pub fn orientation(&self) -> Option<Quaternion> {
        match *self {
            Self::Surface { orientation, .. } => Some(orientation),
            Self::InFront { .. } => None,
        }
    }

    /// Moves `node` onto the target. Scale is left untouched.
    pub fn apply(&self, node: &mut SceneNode) {
        node.transform.translation = self.position();
        if let Some(orientation) = self.orientation() {
            node.transform.rotation = orientation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReticleSettings;
    use approx::assert_relative_eq;
    use vitrine_core::math::FRAC_PI_2;
    use vitrine_core::scene::{Scene, SceneNodeKind};
    use vitrine_core::xr::Pose;

    fn visible_reticle(scene: &mut Scene, pose: &Pose) -> Reticle {
        let mut reticle = Reticle::spawn(scene, &ReticleSettings::default());
        reticle.show(pose);
        reticle
    }

    #[test]
    fn visible_reticle_wins() {
        let mut scene = Scene::new();
        let turn = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let reticle = visible_reticle(&mut scene, &Pose::new(Vec3::new(1.0, 0.0, -2.0), turn));

        let target = PlacementTarget::capture(
            Some(&reticle),
            true,
            &Camera::default(),
            &PlacementSettings::default(),
        );
        let orientation = target.orientation().expect("surface placement is oriented");
        assert_relative_eq!(target.position().x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(target.position().z, -2.0, epsilon = 1e-5);
        assert_relative_eq!(orientation.y.abs(), turn.y.abs(), epsilon = 1e-5);
        assert_relative_eq!(orientation.w.abs(), turn.w.abs(), epsilon = 1e-5);
    }

    #[test]
    fn hidden_reticle_falls_back_in_front_of_camera() {
        let mut scene = Scene::new();
        let mut reticle = visible_reticle(&mut scene, &Pose::new(Vec3::X, Quaternion::IDENTITY));
        reticle.hide();
        let mut camera = Camera::default();
        camera.position = Vec3::new(0.0, 1.6, 0.0);

        let target =
            PlacementTarget::capture(Some(&reticle), true, &camera, &PlacementSettings::default());
        assert_eq!(target.orientation(), None);
        assert_relative_eq!(target.position().x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(target.position().y, 1.3, epsilon = 1e-5);
        assert_relative_eq!(target.position().z, -1.5, epsilon = 1e-5);
    }

    #[test]
    fn fallback_follows_camera_heading() {
        let mut camera = Camera::default();
        camera.rotation = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let target = PlacementTarget::capture(None, false, &camera, &PlacementSettings::default());
        assert_relative_eq!(target.position().x, -1.5, epsilon = 1e-5);
        assert_relative_eq!(target.position().y, -0.3, epsilon = 1e-5);
        assert_relative_eq!(target.position().z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn visible_reticle_ignored_without_hit_testing() {
        let mut scene = Scene::new();
        let reticle = visible_reticle(&mut scene, &Pose::new(Vec3::X, Quaternion::IDENTITY));
        let target = PlacementTarget::capture(
            Some(&reticle),
            false,
            &Camera::default(),
            &PlacementSettings::default(),
        );
        assert!(matches!(target, PlacementTarget::InFront { .. }));
    }

    #[test]
    fn apply_keeps_scale() {
        let mut node = SceneNode::new("artwork", SceneNodeKind::Group);
        node.transform.scale = Vec3::splat(0.2);
        PlacementTarget::InFront {
            position: Vec3::new(0.0, 1.0, -1.5),
        }
        .apply(&mut node);
        assert_eq!(node.transform.translation, Vec3::new(0.0, 1.0, -1.5));
        assert_eq!(node.transform.scale, Vec3::splat(0.2));
    }
}
