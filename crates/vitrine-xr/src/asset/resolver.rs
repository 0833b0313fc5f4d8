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

//! Resolves placeable artwork assets, falling back to a placeholder.

use super::normalized_scale;
use crate::config::PlaceholderSettings;
use std::sync::Arc;
use vitrine_core::{
    asset::{LoadedModel, ModelLoader},
    math::{Aabb, Vec3},
    scene::{SceneNode, SceneNodeKind},
};

/// Loads artwork models through a [`ModelLoader`].
///
/// Cheap to clone; background placement tasks carry their own copy.
#[derive(Clone)]
pub struct AssetResolver {
    pub(super) loader: Arc<dyn ModelLoader>,
    placeholder: PlaceholderSettings,
}

impl AssetResolver {
    /// Creates a resolver that falls back to the given placeholder cube.
    pub fn new(loader: Arc<dyn ModelLoader>, placeholder: PlaceholderSettings) -> Self {
        Self {
            loader,
            placeholder,
        }
    }

    /// Builds the placeholder cube node.
    pub fn placeholder(&self) -> SceneNode {
        SceneNode::new(
            "placeholder",
            SceneNodeKind::Placeholder {
                size: self.placeholder.size,
                material: self.placeholder.material,
            },
        )
    }

    /// Produces a node ready to be placed in the scene. Never fails.
    ///
    /// With no URL the placeholder is returned without touching the loader.
    /// A loaded model is rescaled so its largest dimension is `target_size`.
    pub async fn load_placeable_asset(&self, url: Option<&str>, target_size: f32) -> SceneNode {
        let Some(url) = url else {
            return self.placeholder();
        };

        match self.loader.load(url).await {
            Ok(model) => {
                log::debug!("Loaded model '{}' ({} meshes)", url, model.mesh_count);
                let mut node = model_node("artwork", model);
                if let Some(scale) = normalized_scale(&bounds_of(&node), target_size) {
                    node.transform.scale = Vec3::splat(scale);
                }
                node
            }
            Err(err) => {
                log::warn!("Falling back to placeholder: {err}");
                self.placeholder()
            }
        }
    }
}

impl std::fmt::Debug for AssetResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetResolver")
            .field("placeholder", &self.placeholder)
            .finish_non_exhaustive()
    }
}

pub(super) fn model_node(name: &str, model: LoadedModel) -> SceneNode {
    SceneNode::new(
        name,
        SceneNodeKind::Model {
            source: model.source,
            bounds: model.bounds,
            mesh_count: model.mesh_count,
        },
    )
}

pub(super) fn bounds_of(node: &SceneNode) -> Aabb {
    match &node.kind {
        SceneNodeKind::Model { bounds, .. } => *bounds,
        _ => Aabb::INVALID,
    }
}
