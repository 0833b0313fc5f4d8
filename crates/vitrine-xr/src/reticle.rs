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

//! The surface marker shown where a placement would land.

use crate::config::ReticleSettings;
use vitrine_core::{
    math::{Mat4, Quaternion, Vec3},
    scene::{ObjectId, Scene, SceneNode, SceneNodeKind},
    xr::Pose,
};

/// A ring lying on the detected surface.
///
/// The reticle keeps its own copy of visibility and pose; [`Reticle::sync`]
/// pushes that state onto its scene node before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Reticle {
    node: ObjectId,
    visible: bool,
    pose: Mat4,
}

impl Reticle {
    /// Adds a hidden reticle node to `scene`.
    pub fn spawn(scene: &mut Scene, settings: &ReticleSettings) -> Self {
        let mut node = SceneNode::new(
            "reticle",
            SceneNodeKind::Reticle {
                inner_radius: settings.inner_radius,
                outer_radius: settings.outer_radius,
            },
        );
        node.visible = false;
        node.matrix_override = Some(Mat4::IDENTITY);
        Self {
            node: scene.add(node),
            visible: false,
            pose: Mat4::IDENTITY,
        }
    }

    /// Moves the reticle to `pose` and makes it visible.
    pub fn show(&mut self, pose: &Pose) {
        self.pose = pose.transform;
        self.visible = true;
    }

    /// Hides the reticle. The last pose is kept.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Copies visibility and pose onto the scene node.
    pub fn sync(&self, scene: &mut Scene) {
        if let Some(node) = scene.get_mut(self.node) {
            node.visible = self.visible;
            node.matrix_override = Some(self.pose);
        }
    }

    /// The scene node driven by this reticle.
    pub fn node(&self) -> ObjectId {
        self.node
    }

    /// Whether a surface is currently under the reticle.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The full 4x4 pose matrix.
    pub fn matrix(&self) -> &Mat4 {
        &self.pose
    }

    /// Position extracted from the pose.
    pub fn position(&self) -> Vec3 {
        self.pose.translation()
    }

    /// Orientation extracted from the pose.
    pub fn orientation(&self) -> Quaternion {
        self.pose.rotation()
    }
}
