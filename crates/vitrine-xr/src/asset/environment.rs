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

//! Fits the gallery room model around the user.

use super::normalized_scale;
use super::resolver::{bounds_of, model_node};
use super::AssetResolver;
use crate::config::EnvironmentSettings;
use vitrine_core::{
    asset::AssetError,
    math::Vec3,
    scene::{SceneNode, SceneNodeKind},
};

impl AssetResolver {
    /// Loads the gallery environment and fits it around the origin.
    ///
    /// The model is scaled so its largest dimension is `settings.target_size`,
    /// re-centered on the origin and raised by `settings.lift`. Unlike placeable
    /// assets there is no fallback: a failed load simply means no room.
    pub async fn load_environment(
        &self,
        url: &str,
        settings: &EnvironmentSettings,
    ) -> Result<SceneNode, AssetError> {
        let model = self.loader.load(url).await?;
        let mut node = model_node("environment", model);
        let bounds = bounds_of(&node);

        let scale = normalized_scale(&bounds, settings.target_size).unwrap_or(1.0);
        let center = if bounds.is_valid() {
            bounds.center()
        } else {
            Vec3::ZERO
        };

        node.transform.scale = Vec3::splat(scale);
        node.transform.translation = -center * scale + Vec3::new(0.0, settings.lift, 0.0);
        node.kind = SceneNodeKind::Environment {
            source: url.to_string(),
        };
        Ok(node)
    }
}
