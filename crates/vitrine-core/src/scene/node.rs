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

use super::light::Light;
use crate::math::{Aabb, Mat4, Quaternion, Vec3};
use serde::{Deserialize, Serialize};

/// A stable identifier for a node inside a [`super::Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ObjectId(pub u64);

/// Position, orientation and scale of a node relative to the scene origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The position of the node.
    pub translation: Vec3,
    /// The orientation of the node.
    pub rotation: Quaternion,
    /// The scale of the node.
    pub scale: Vec3,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quaternion::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Creates a transform with only a translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Composes the transform into a matrix.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A metallic-roughness material description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardMaterial {
    /// Base color as `0xRRGGBB`.
    pub color: u32,
    /// Metalness factor in `[0, 1]`.
    pub metalness: f32,
    /// Roughness factor in `[0, 1]`.
    pub roughness: f32,
}

/// What a node represents. The render engine maps each kind to its own primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNodeKind {
    /// An empty grouping node.
    Group,
    /// A model loaded from an external asset.
    Model {
        /// The URL the model was loaded from.
        source: String,
        /// The bounds of the model in its own space, before node scaling.
        bounds: Aabb,
        /// Number of meshes in the model.
        mesh_count: usize,
    },
    /// A generated cube used when no model is available.
    Placeholder {
        /// Edge length of the cube.
        size: f32,
        /// Surface material of the cube.
        material: StandardMaterial,
    },
    /// The surface marker driven by hit-testing, a flat ring facing up.
    Reticle {
        /// Inner radius of the ring.
        inner_radius: f32,
        /// Outer radius of the ring.
        outer_radius: f32,
    },
    /// A light source.
    Light(Light),
    /// The tracked pose of an input controller.
    Controller {
        /// The index of the input source.
        index: u32,
    },
    /// The gallery room loaded around the viewer.
    Environment {
        /// The URL the environment was loaded from.
        source: String,
    },
}

/// A single node in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Assigned by the scene on insertion.
    pub id: ObjectId,
    /// A human-readable name.
    pub name: String,
    /// What this node represents.
    pub kind: SceneNodeKind,
    /// The local transform of the node.
    pub transform: Transform,
    /// When set, replaces `transform` entirely. Used for nodes whose pose comes
    /// straight from the platform, such as the reticle.
    pub matrix_override: Option<Mat4>,
    /// Whether the node is drawn.
    pub visible: bool,
}

impl SceneNode {
    /// Creates a visible node with an identity transform.
    pub fn new(name: impl Into<String>, kind: SceneNodeKind) -> Self {
        Self {
            id: ObjectId::default(),
            name: name.into(),
            kind,
            transform: Transform::IDENTITY,
            matrix_override: None,
            visible: true,
        }
    }

    /// The matrix the renderer should use for this node.
    pub fn world_matrix(&self) -> Mat4 {
        self.matrix_override
            .unwrap_or_else(|| self.transform.to_matrix())
    }
}
