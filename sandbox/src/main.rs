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

// Vitrine Sandbox
// Plays a scripted immersive gallery visit on the simulated platform.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use vitrine_core::catalog::Catalog;
use vitrine_core::math::{Quaternion, Vec3};
use vitrine_core::xr::{Pose, UserActivation, XrSystem};
use vitrine_infra::{
    FileFetcher, GltfModelLoader, HeadlessRenderEngine, LogOverlayHost, SimulatedFrame,
    SimulatedXrSystem,
};
use vitrine_xr::{
    CapabilityNegotiator, FrameOutcome, LaunchControl, SessionManager, SessionServices, XrConfig,
};

const FRAME_MS: f64 = 1000.0 / 72.0;
const FRAMES: u32 = 120;

fn assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

fn load_config(dir: &Path) -> Result<XrConfig> {
    let path = dir.join("vitrine.ron");
    if !path.exists() {
        log::info!("No configuration at {}, using defaults", path.display());
        return Ok(XrConfig::default());
    }
    XrConfig::load(&path).with_context(|| format!("loading {}", path.display()))
}

/// The frame the simulated device produces at `index`: the user looks
/// around, finds a surface for a while, then loses it.
fn scripted_frame(index: u32) -> SimulatedFrame {
    let yaw = index as f32 * 0.005;
    let viewer = Pose::new(
        Vec3::new(0.0, 1.6, 0.0),
        Quaternion::from_axis_angle(Vec3::Y, yaw),
    );
    let frame = match index {
        20..=70 => SimulatedFrame::with_surface(Pose::new(
            Vec3::new(0.2 + index as f32 * 0.002, 0.0, -1.2),
            Quaternion::IDENTITY,
        )),
        _ => SimulatedFrame::empty(),
    };
    frame.viewer(viewer)
}

async fn run(artwork_id: Option<String>) -> Result<()> {
    let dir = assets_dir();
    let config = load_config(&dir)?;
    let catalog_path = dir.join("catalog.json");
    let catalog_json = std::fs::read_to_string(&catalog_path)
        .with_context(|| format!("reading {}", catalog_path.display()))?;
    let catalog = Catalog::from_json_str(&catalog_json).context("parsing the catalog")?;

    let artwork = match artwork_id.as_deref() {
        Some(id) => catalog
            .find(id)
            .with_context(|| format!("no artwork with id '{id}'"))?,
        None => catalog.artworks.first().context("the catalog is empty")?,
    };
    log::info!(
        "Gallery '{}': visiting '{}' by {}",
        catalog.gallery.title,
        artwork.title,
        artwork.artist
    );

    let system = Arc::new(SimulatedXrSystem::new());
    let engine = HeadlessRenderEngine::new();
    let services = SessionServices {
        system: Some(system.clone() as Arc<dyn XrSystem>),
        engine: Arc::new(engine.clone()),
        overlay_host: Arc::new(LogOverlayHost::new()),
        loader: Arc::new(GltfModelLoader::new(Arc::new(FileFetcher::new(&dir)))),
    };

    let negotiator = CapabilityNegotiator::new(system.clone());
    let Some(mut control) = LaunchControl::create(&negotiator, &config.labels).await else {
        log::warn!("No immersive mode available, nothing to show");
        return Ok(());
    };
    log::info!("[{}] ({})", control.label(), control.mode());

    let mut manager = SessionManager::new(services, config);
    manager.set_environment(catalog.gallery.environment_glb.clone());
    control
        .activate(&mut manager, artwork, UserActivation::from_input_event())
        .await?;
    let session = system
        .last_session()
        .context("the platform granted no session")?;

    let mut rendered = 0;
    for index in 0..FRAMES {
        match index {
            50 | 95 => {
                session.select();
            }
            109 => {
                if let Some(scene) = manager.scene() {
                    log::info!(
                        "Scene holds {} nodes, {} placed",
                        scene.len(),
                        manager.placed_objects().len()
                    );
                }
            }
            110 => manager.end(),
            _ => {}
        }
        manager.pump_events();
        let time = index as f64 * FRAME_MS;
        if manager.on_frame(time, &scripted_frame(index)) == FrameOutcome::Rendered {
            rendered += 1;
        }
        // Lets background loads make progress between frames.
        tokio::task::yield_now().await;
    }

    manager.settle().await;
    manager.pump_events();

    let stats = manager.stats();
    log::info!(
        "Rendered {rendered} frames ({} failures), discarded {} stale results, renderer counters {:?}",
        stats.render_failures,
        stats.stale_results_discarded,
        engine.counters()
    );
    Ok(())
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("building the async runtime")?;
    runtime.block_on(run(std::env::args().nth(1)))
}
