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

//! An in-memory model loader.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use vitrine_core::{
    asset::{AssetError, LoadedModel, ModelLoader},
    math::Aabb,
};

/// Serves models registered up front, keyed by URL.
///
/// Unknown URLs fail with [`AssetError::Fetch`], like a missing file would.
#[derive(Debug, Default)]
pub struct StaticModelLoader {
    entries: HashMap<String, Result<LoadedModel, AssetError>>,
    loads: AtomicUsize,
}

impl StaticModelLoader {
    /// Creates an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a single-mesh model with the given bounds.
    pub fn with_model(mut self, url: &str, bounds: Aabb) -> Self {
        self.entries.insert(
            url.to_string(),
            Ok(LoadedModel {
                source: url.to_string(),
                bounds,
                mesh_count: 1,
            }),
        );
        self
    }

    /// Registers a URL whose content cannot be decoded.
    pub fn with_corrupt(mut self, url: &str, reason: &str) -> Self {
        self.entries.insert(
            url.to_string(),
            Err(AssetError::Decode {
                url: url.to_string(),
                reason: reason.to_string(),
            }),
        );
        self
    }

    /// Number of `load` calls so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelLoader for StaticModelLoader {
    async fn load(&self, url: &str) -> Result<LoadedModel, AssetError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.entries.get(url).cloned().unwrap_or_else(|| {
            Err(AssetError::Fetch {
                url: url.to_string(),
                reason: "not found".to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::math::Vec3;

    #[tokio::test]
    async fn serves_registered_models_only() {
        let loader = StaticModelLoader::new()
            .with_model("car.glb", Aabb::from_min_max(Vec3::ZERO, Vec3::ONE))
            .with_corrupt("broken.glb", "truncated");

        assert_eq!(loader.load("car.glb").await.map(|m| m.mesh_count), Ok(1));
        assert!(matches!(
            loader.load("broken.glb").await,
            Err(AssetError::Decode { .. })
        ));
        assert!(matches!(
            loader.load("ghost.glb").await,
            Err(AssetError::Fetch { .. })
        ));
        assert_eq!(loader.load_count(), 3);
    }
}
