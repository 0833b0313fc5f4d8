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

//! Shared fixtures for the session manager integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Semaphore;
use vitrine_core::{
    asset::{AssetError, LoadedModel, ModelLoader},
    catalog::Artwork,
    math::{Aabb, Quaternion, Vec3},
    scene::{SceneNode, SceneNodeKind},
    xr::{Pose, SessionMode, UserActivation, XrSystem},
};
use vitrine_infra::{HeadlessRenderEngine, LogOverlayHost, SimulatedXrSystem, StaticModelLoader};
use vitrine_xr::{SessionManager, SessionServices, XrConfig};

pub const CAR: &str = "assets/car.glb";
pub const BROKEN: &str = "assets/broken.glb";
pub const ROOM: &str = "assets/room.glb";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A loader that holds every load until the test releases it.
pub struct GatedLoader {
    inner: StaticModelLoader,
    gate: Semaphore,
}

impl GatedLoader {
    pub fn open() -> Self {
        Self {
            inner: catalog_models(),
            gate: Semaphore::new(Semaphore::MAX_PERMITS),
        }
    }

    pub fn closed() -> Self {
        Self {
            inner: catalog_models(),
            gate: Semaphore::new(0),
        }
    }

    pub fn release(&self, loads: usize) {
        self.gate.add_permits(loads);
    }

    pub fn load_count(&self) -> usize {
        self.inner.load_count()
    }
}

#[async_trait]
impl ModelLoader for GatedLoader {
    async fn load(&self, url: &str) -> Result<LoadedModel, AssetError> {
        match self.gate.acquire().await {
            Ok(permit) => permit.forget(),
            Err(_) => {
                return Err(AssetError::Fetch {
                    url: url.to_string(),
                    reason: "gate closed".to_string(),
                })
            }
        }
        self.inner.load(url).await
    }
}

fn catalog_models() -> StaticModelLoader {
    StaticModelLoader::new()
        .with_model(CAR, Aabb::from_min_max(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0)))
        .with_model(
            ROOM,
            Aabb::from_min_max(Vec3::new(-300.0, 0.0, -600.0), Vec3::new(300.0, 400.0, 600.0)),
        )
        .with_corrupt(BROKEN, "unexpected end of file")
}

pub struct Harness {
    pub system: Arc<SimulatedXrSystem>,
    pub engine: HeadlessRenderEngine,
    pub overlays: Arc<LogOverlayHost>,
    pub loader: Arc<GatedLoader>,
    pub manager: SessionManager,
}

impl Harness {
    pub fn new(system: SimulatedXrSystem) -> Self {
        Self::with_loader(system, GatedLoader::open())
    }

    pub fn with_loader(system: SimulatedXrSystem, loader: GatedLoader) -> Self {
        init_logger();
        let system = Arc::new(system);
        let engine = HeadlessRenderEngine::new();
        let overlays = Arc::new(LogOverlayHost::new());
        let loader = Arc::new(loader);
        let services = SessionServices {
            system: Some(system.clone() as Arc<dyn XrSystem>),
            engine: Arc::new(engine.clone()),
            overlay_host: overlays.clone(),
            loader: loader.clone(),
        };
        Self {
            system,
            engine,
            overlays,
            loader,
            manager: SessionManager::new(services, XrConfig::default()),
        }
    }

    /// Services sharing this harness' engine, overlays and loader.
    pub fn services(&self, system: Arc<dyn XrSystem>) -> SessionServices {
        SessionServices {
            system: Some(system),
            engine: Arc::new(self.engine.clone()),
            overlay_host: self.overlays.clone(),
            loader: self.loader.clone(),
        }
    }

    pub async fn start(&mut self, mode: SessionMode, asset: Option<&str>) {
        self.manager
            .start(mode, asset, Some("Toy Car"), UserActivation::from_input_event())
            .await
            .expect("session should start");
    }

    /// Asserts that nothing of a session is left behind.
    pub fn assert_torn_down(&self) {
        assert!(self.manager.scene().is_none());
        assert!(self.manager.camera().is_none());
        assert!(self.manager.reticle().is_none());
        assert!(self.manager.overlay().is_none());
        assert!(self.manager.session().is_none());
        assert!(!self.manager.has_hit_test_source());
        assert!(!self.manager.hit_test_requested());
        assert!(self.manager.placed_objects().is_empty());
        assert!(self.overlays.mounted().is_empty());
        assert_eq!(self.engine.counters().live(), 0);
    }

    pub fn placed_nodes(&self) -> Vec<SceneNode> {
        let Some(scene) = self.manager.scene() else {
            return Vec::new();
        };
        self.manager
            .placed_objects()
            .iter()
            .filter_map(|id| scene.get(*id).cloned())
            .collect()
    }
}

pub fn artwork(glb: Option<&str>) -> Artwork {
    Artwork {
        id: "piece-02".to_string(),
        title: "Toy Car".to_string(),
        artist: "Studio".to_string(),
        glb: glb.map(str::to_string),
        usdz: None,
        color: None,
    }
}

pub fn surface(x: f32, y: f32, z: f32) -> Pose {
    Pose::new(Vec3::new(x, y, z), Quaternion::IDENTITY)
}

pub fn is_placeholder(node: &SceneNode) -> bool {
    matches!(node.kind, SceneNodeKind::Placeholder { .. })
}
