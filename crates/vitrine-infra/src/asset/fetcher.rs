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

//! Defines how raw asset bytes are obtained.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Fetches the raw bytes behind an asset URL.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Returns the full content of `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Resolves asset URLs as paths relative to a base directory.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    base_path: PathBuf,
}

impl FileFetcher {
    /// Creates a fetcher rooted at `base_path`.
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn resolve(&self, url: &str) -> PathBuf {
        self.base_path.join(url.trim_start_matches("./"))
    }
}

#[async_trait]
impl AssetFetcher for FileFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let path = self.resolve(url);
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("failed to read '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_relative_to_base() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("model.glb"), b"glTF").expect("write asset");
        let fetcher = FileFetcher::new(dir.path());
        assert_eq!(fetcher.fetch("./model.glb").await.expect("fetch"), b"glTF");
    }

    #[tokio::test]
    async fn missing_file_names_the_path() {
        let fetcher = FileFetcher::new("/nonexistent");
        let err = fetcher.fetch("nope.glb").await.unwrap_err();
        assert!(format!("{err:#}").contains("nope.glb"));
    }
}
