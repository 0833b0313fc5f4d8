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

//! Contracts for loading 3D assets.
//!
//! The loader turns a URL into an engine-native model description. Decoding,
//! fetching and caching are the loader's business; the session side only needs
//! the model's bounds to normalize its size.

use crate::math::Aabb;
use async_trait::async_trait;
use thiserror::Error;

/// A model decoded by a [`ModelLoader`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    /// The URL the model was loaded from.
    pub source: String,
    /// The bounds of the whole model in its own space.
    pub bounds: Aabb,
    /// Number of meshes in the model.
    pub mesh_count: usize,
}

/// An error raised while loading an asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// The asset could not be fetched.
    #[error("failed to fetch '{url}': {reason}")]
    Fetch {
        /// The requested URL.
        url: String,
        /// Why the fetch failed.
        reason: String,
    },
    /// The bytes could not be decoded.
    #[error("failed to decode '{url}': {reason}")]
    Decode {
        /// The requested URL.
        url: String,
        /// Why decoding failed.
        reason: String,
    },
}

/// Loads 3D models asynchronously by URL.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// Fetches and decodes the model at `url`.
    async fn load(&self, url: &str) -> Result<LoadedModel, AssetError>;
}
