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

//! glTF 2.0 model loader (`.gltf` and `.glb`).
//!
//! Only the document structure is read: bounds come from the accessor
//! min/max of each primitive, combined through the node hierarchy of the
//! default scene. Buffers are never decoded.

use super::fetcher::AssetFetcher;
use async_trait::async_trait;
use std::sync::Arc;
use vitrine_core::{
    asset::{AssetError, LoadedModel, ModelLoader},
    math::{Aabb, Mat4, Vec3, Vec4},
};

/// Loads glTF models through an [`AssetFetcher`].
#[derive(Clone)]
pub struct GltfModelLoader {
    fetcher: Arc<dyn AssetFetcher>,
}

impl GltfModelLoader {
    /// Creates a loader that fetches bytes with `fetcher`.
    pub fn new(fetcher: Arc<dyn AssetFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl ModelLoader for GltfModelLoader {
    async fn load(&self, url: &str) -> Result<LoadedModel, AssetError> {
        let bytes = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|err| AssetError::Fetch {
                url: url.to_string(),
                reason: format!("{err:#}"),
            })?;
        decode_model(url, &bytes)
    }
}

/// Parses a glTF document and measures its meshes.
pub fn decode_model(url: &str, bytes: &[u8]) -> Result<LoadedModel, AssetError> {
    let decode_error = |reason: String| AssetError::Decode {
        url: url.to_string(),
        reason,
    };

    let gltf = gltf::Gltf::from_slice(bytes)
        .map_err(|e| decode_error(format!("failed to parse glTF: {e}")))?;
    let document = &gltf.document;

    let mut bounds = Aabb::INVALID;
    let mut mesh_count = 0;
    match document.default_scene().or_else(|| document.scenes().next()) {
        Some(scene) => {
            for node in scene.nodes() {
                visit(node, &Mat4::IDENTITY, &mut bounds, &mut mesh_count);
            }
        }
        None => {
            for mesh in document.meshes() {
                mesh_count += 1;
                for primitive in mesh.primitives() {
                    bounds = bounds.merge(&primitive_bounds(&primitive));
                }
            }
        }
    }

    if mesh_count == 0 {
        return Err(decode_error("no meshes found".to_string()));
    }

    Ok(LoadedModel {
        source: url.to_string(),
        bounds,
        mesh_count,
    })
}

fn visit(node: gltf::Node<'_>, parent: &Mat4, bounds: &mut Aabb, mesh_count: &mut usize) {
    let world = *parent * local_matrix(&node);
    if let Some(mesh) = node.mesh() {
        *mesh_count += 1;
        for primitive in mesh.primitives() {
            *bounds = bounds.merge(&primitive_bounds(&primitive).transform(&world));
        }
    }
    for child in node.children() {
        visit(child, &world, bounds, mesh_count);
    }
}

fn local_matrix(node: &gltf::Node<'_>) -> Mat4 {
    let [c0, c1, c2, c3] = node.transform().matrix();
    let col = |c: [f32; 4]| Vec4::new(c[0], c[1], c[2], c[3]);
    Mat4::from_cols(col(c0), col(c1), col(c2), col(c3))
}

fn primitive_bounds(primitive: &gltf::Primitive<'_>) -> Aabb {
    let bb = primitive.bounding_box();
    Aabb::from_min_max(
        Vec3::new(bb.min[0], bb.min[1], bb.min[2]),
        Vec3::new(bb.max[0], bb.max[1], bb.max[2]),
    )
}
