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

//! The owner of the immersive session and everything built for it.

use super::overlay::overlay_spec;
use super::placement::PlacementTarget;
use super::SessionState;
use crate::asset::AssetResolver;
use crate::config::XrConfig;
use crate::error::SessionError;
use crate::hit_test::HitTestTracker;
use crate::reticle::Reticle;
use std::mem;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use vitrine_core::{
    asset::ModelLoader,
    engine::{RenderEngine, Renderer},
    scene::{Camera, LightKind, ObjectId, Scene, SceneNode, SceneNodeKind},
    ui::{OverlayHandle, OverlayHost},
    xr::{
        ReferenceSpace, ReferenceSpaceKind, SessionFeature, SessionInit, SessionMode,
        UserActivation, XrError, XrEvent, XrSession, XrSystem,
    },
};

/// The host collaborators a [`SessionManager`] drives.
#[derive(Clone)]
pub struct SessionServices {
    /// The platform XR system, `None` when the host has none.
    pub system: Option<Arc<dyn XrSystem>>,
    /// Creates the renderer of each session.
    pub engine: Arc<dyn RenderEngine>,
    /// Hosts the session overlay.
    pub overlay_host: Arc<dyn OverlayHost>,
    /// Loads artwork and environment models.
    pub loader: Arc<dyn ModelLoader>,
}

/// Counters accumulated across sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Sessions that reached [`SessionState::Active`].
    pub sessions_started: u64,
    /// Frames handed to the renderer successfully.
    pub frames_rendered: u64,
    /// Frames whose render call failed.
    pub render_failures: u64,
    /// Background results dropped because their session was gone.
    pub stale_results_discarded: u64,
}

/// A background result, stamped with the generation that asked for it.
#[derive(Debug)]
enum Completion {
    Artwork { generation: u64, node: SceneNode },
    Environment { generation: u64, node: SceneNode },
}

pub(super) struct SceneResources {
    pub(super) renderer: Box<dyn Renderer>,
    pub(super) scene: Scene,
    pub(super) camera: Camera,
    pub(super) reticle: Reticle,
}

pub(super) struct LiveSession {
    pub(super) session: Arc<dyn XrSession>,
    pub(super) reference_space: ReferenceSpace,
    events: flume::Receiver<XrEvent>,
    pub(super) hit_test: HitTestTracker,
    // Set once the platform has been asked to end, or has ended on its own.
    ended: bool,
}

/// Unwinds a half-started session if `start` does not run to completion,
/// including when its future is dropped at an await point.
struct StartGuard<'a> {
    manager: &'a mut SessionManager,
    armed: bool,
}

impl Drop for StartGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            log::debug!(
                "Unwinding partially started session {}",
                self.manager.generation
            );
            self.manager.cleanup();
        }
    }
}

/// Drives one immersive session at a time.
///
/// All mutation goes through `&mut self`: [`start`](Self::start),
/// [`end`](Self::end) and [`cleanup`](Self::cleanup), plus the host entry
/// points [`pump_events`](Self::pump_events) and
/// [`on_frame`](Self::on_frame) that delegate to them. Background work
/// (hit-test grants, model loads) never touches the manager directly; its
/// results are applied on the next pump or frame if their generation is
/// still the live one.
pub struct SessionManager {
    services: SessionServices,
    config: XrConfig,
    resolver: AssetResolver,
    pub(super) state: SessionState,
    generation: u64,
    mode: Option<SessionMode>,
    asset_ref: Option<String>,
    environment_url: Option<String>,
    overlay: Option<OverlayHandle>,
    granted: Option<Arc<dyn XrSession>>,
    pub(super) resources: Option<SceneResources>,
    pub(super) live: Option<LiveSession>,
    placed: Vec<ObjectId>,
    completions_tx: flume::Sender<Completion>,
    completions_rx: flume::Receiver<Completion>,
    in_flight: Vec<JoinHandle<()>>,
    pub(super) stats: SessionStats,
}

impl SessionManager {
    /// Creates an idle manager.
    pub fn new(services: SessionServices, config: XrConfig) -> Self {
        let resolver = AssetResolver::new(services.loader.clone(), config.placeholder);
        let (completions_tx, completions_rx) = flume::unbounded();
        Self {
            services,
            config,
            resolver,
            state: SessionState::Idle,
            generation: 0,
            mode: None,
            asset_ref: None,
            environment_url: None,
            overlay: None,
            granted: None,
            resources: None,
            live: None,
            placed: Vec::new(),
            completions_tx,
            completions_rx,
            in_flight: Vec::new(),
            stats: SessionStats::default(),
        }
    }

    /// Sets the gallery room loaded behind every future session.
    pub fn set_environment(&mut self, url: Option<String>) {
        self.environment_url = url;
    }

    /// Starts an immersive session.
    ///
    /// `asset_ref` is the model placed on select and `label` the artwork
    /// title shown in the overlay. `activation` must come from the user input
    /// that triggered the call; the platform refuses the session otherwise.
    ///
    /// On error, or when the returned future is dropped before it completes,
    /// the manager is back in [`SessionState::Idle`] with nothing left
    /// allocated.
    pub async fn start(
        &mut self,
        mode: SessionMode,
        asset_ref: Option<&str>,
        label: Option<&str>,
        activation: UserActivation,
    ) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            log::warn!("Ignoring start request: a session is already {}", self.state);
            return Err(SessionError::AlreadyActive(self.state));
        }

        self.cleanup();
        self.generation += 1;
        self.state = SessionState::Starting;
        self.mode = Some(mode);
        self.asset_ref = asset_ref.map(str::to_owned);
        log::info!("Starting '{mode}' session (generation {})", self.generation);

        let mut guard = StartGuard {
            manager: self,
            armed: true,
        };
        let result = guard.manager.acquire(mode, label, activation).await;
        if let Err(err) = result {
            log::error!("Failed to start '{mode}' session: {err}");
            return Err(err);
        }

        guard.armed = false;
        let manager = &mut *guard.manager;
        manager.state = SessionState::Active;
        manager.stats.sessions_started += 1;
        manager.spawn_environment_load();
        log::info!("Session {} is active", manager.generation);
        Ok(())
    }

    async fn acquire(
        &mut self,
        mode: SessionMode,
        label: Option<&str>,
        activation: UserActivation,
    ) -> Result<(), SessionError> {
        let overlay = self
            .services
            .overlay_host
            .mount(&overlay_spec(mode, label, &self.config.labels))?;
        self.overlay = Some(overlay);
        self.resources = Some(self.build_scene()?);

        let system = self
            .services
            .system
            .clone()
            .ok_or(SessionError::Grant(XrError::Unavailable))?;
        let init = SessionInit {
            required_features: Vec::new(),
            optional_features: vec![
                SessionFeature::DomOverlay,
                SessionFeature::HitTest,
                SessionFeature::LocalFloor,
            ],
            dom_overlay_root: Some(overlay),
        };
        let session = system
            .request_session(mode, &init, activation)
            .await
            .map_err(SessionError::Grant)?;
        log::debug!("Granted features: {:?}", session.enabled_features());
        self.granted = Some(Arc::clone(&session));

        let live = self.bind(&session).await?;
        self.granted = None;
        self.live = Some(live);
        Ok(())
    }

    fn build_scene(&self) -> Result<SceneResources, SessionError> {
        let settings = &self.config.renderer;
        let renderer = self.services.engine.create_renderer(settings)?;

        let mut scene = Scene::new();
        for light in &self.config.lights {
            let name = match light.kind {
                LightKind::Ambient => "ambient_light",
                LightKind::Directional { .. } => "directional_light",
            };
            scene.add(SceneNode::new(name, SceneNodeKind::Light(*light)));
        }
        let reticle = Reticle::spawn(&mut scene, &self.config.reticle);
        scene.add(SceneNode::new(
            "controller",
            SceneNodeKind::Controller { index: 0 },
        ));

        let mut camera = self.config.camera;
        if settings.height > 0 {
            camera.aspect_ratio = settings.width as f32 / settings.height as f32;
        }

        Ok(SceneResources {
            renderer,
            scene,
            camera,
            reticle,
        })
    }

    async fn bind(&mut self, session: &Arc<dyn XrSession>) -> Result<LiveSession, SessionError> {
        let reference_space = match session
            .request_reference_space(ReferenceSpaceKind::LocalFloor)
            .await
        {
            Ok(space) => space,
            Err(err) => {
                log::debug!("Floor-relative space unavailable ({err}), using local");
                session
                    .request_reference_space(ReferenceSpaceKind::Local)
                    .await
                    .map_err(SessionError::ReferenceSpace)?
            }
        };

        let resources = self
            .resources
            .as_mut()
            .ok_or_else(|| {
                SessionError::Grant(XrError::InvalidState("scene resources missing".to_string()))
            })?;
        resources
            .renderer
            .bind_session(Arc::clone(session), reference_space)?;

        let (events_tx, events_rx) = flume::unbounded();
        session.set_event_sink(events_tx);
        resources.renderer.set_animation_loop(true);

        Ok(LiveSession {
            session: Arc::clone(session),
            reference_space,
            events: events_rx,
            hit_test: HitTestTracker::new(self.generation),
            ended: false,
        })
    }

    fn spawn_environment_load(&mut self) {
        let Some(url) = self.environment_url.clone() else {
            return;
        };
        let Ok(runtime) = Handle::try_current() else {
            log::debug!("No async runtime, skipping gallery environment '{url}'");
            return;
        };

        let resolver = self.resolver.clone();
        let settings = self.config.environment;
        let completions = self.completions_tx.clone();
        let generation = self.generation;
        self.in_flight.push(runtime.spawn(async move {
            match resolver.load_environment(&url, &settings).await {
                Ok(node) => {
                    if completions
                        .send(Completion::Environment { generation, node })
                        .is_err()
                    {
                        log::debug!("Session manager gone, dropping environment '{url}'");
                    }
                }
                Err(err) => log::warn!("Gallery environment load failed: {err}"),
            }
        }));
    }

    /// Asks the platform to end the session.
    ///
    /// Teardown happens when the platform's end event is pumped. If the
    /// platform reports the session as already gone, no event will follow and
    /// the manager cleans up immediately.
    pub fn end(&mut self) {
        if self.state != SessionState::Active {
            log::debug!("Ignoring end request while {}", self.state);
            return;
        }
        let Some(live) = self.live.as_mut() else {
            return;
        };

        match live.session.end() {
            Ok(()) => {
                live.ended = true;
                log::info!("Ending session {}", self.generation);
                self.state = SessionState::Ending;
            }
            Err(XrError::InvalidState(reason)) => {
                live.ended = true;
                log::debug!("Session already ended ({reason}), cleaning up");
                self.cleanup();
            }
            Err(err) => log::warn!("Failed to end session {}: {err}", self.generation),
        }
    }

    /// Releases everything the current session holds and returns to
    /// [`SessionState::Idle`].
    ///
    /// A platform session that has not been asked to end yet is ended first.
    /// Safe to call at any time, any number of times.
    pub fn cleanup(&mut self) {
        if let Some(session) = self.granted.take() {
            end_platform_session(&session);
        }
        if let Some(mut live) = self.live.take() {
            if !live.ended {
                end_platform_session(&live.session);
            }
            if let Some(task) = live.hit_test.reset() {
                self.in_flight.push(task);
            }
        }
        if let Some(handle) = self.overlay.take() {
            self.services.overlay_host.unmount(handle);
        }
        self.placed.clear();
        if let Some(mut resources) = self.resources.take() {
            resources.renderer.set_animation_loop(false);
            resources.renderer.dispose();
        }
        self.mode = None;
        self.asset_ref = None;

        if self.state != SessionState::Idle {
            log::info!("Session {} cleaned up", self.generation);
            self.state = SessionState::Idle;
        }
    }

    /// Handles the platform events delivered since the last call, then
    /// applies finished background work.
    pub fn pump_events(&mut self) {
        while let Some(event) = self
            .live
            .as_ref()
            .and_then(|live| live.events.try_recv().ok())
        {
            match event {
                XrEvent::Select { input_source } => {
                    log::debug!("Select from input source {input_source}");
                    self.on_select();
                }
                XrEvent::End => {
                    if let Some(live) = self.live.as_mut() {
                        live.ended = true;
                    }
                    log::info!("Platform ended session {}", self.generation);
                    self.cleanup();
                }
            }
        }
        self.apply_completions();
    }

    /// Places the session's artwork where the user is pointing.
    ///
    /// The target is captured now. Without an asset URL, or without an async
    /// runtime to load it on, the placeholder is placed immediately;
    /// otherwise the model is loaded in the background and appended once ready.
    pub fn on_select(&mut self) {
        if self.state != SessionState::Active {
            return;
        }
        let Some(resources) = &self.resources else {
            return;
        };
        let hit_test_available = self
            .live
            .as_ref()
            .is_some_and(|live| live.hit_test.is_available());
        let target = PlacementTarget::capture(
            Some(&resources.reticle),
            hit_test_available,
            &resources.camera,
            &self.config.placement,
        );

        let runtime = match &self.asset_ref {
            Some(url) => match Handle::try_current() {
                Ok(runtime) => Some((runtime, url.clone())),
                Err(_) => {
                    log::debug!("No async runtime, placing placeholder for '{url}'");
                    None
                }
            },
            None => None,
        };

        let Some((runtime, url)) = runtime else {
            let mut node = self.resolver.placeholder();
            target.apply(&mut node);
            self.place(node);
            return;
        };

        let resolver = self.resolver.clone();
        let completions = self.completions_tx.clone();
        let target_size = self.config.placement.target_size;
        let generation = self.generation;
        self.in_flight.push(runtime.spawn(async move {
            let mut node = resolver.load_placeable_asset(Some(&url), target_size).await;
            target.apply(&mut node);
            if completions
                .send(Completion::Artwork { generation, node })
                .is_err()
            {
                log::debug!("Session manager gone, dropping artwork '{url}'");
            }
        }));
    }

    fn place(&mut self, node: SceneNode) {
        if let Some(resources) = self.resources.as_mut() {
            let id = resources.scene.add(node);
            self.placed.push(id);
            log::debug!("Placed object {id:?} ({} total)", self.placed.len());
        }
    }

    /// Applies background results that belong to the live session and
    /// discards the rest.
    pub fn apply_completions(&mut self) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            let generation = match &completion {
                Completion::Artwork { generation, .. }
                | Completion::Environment { generation, .. } => *generation,
            };
            if generation != self.generation || self.resources.is_none() {
                log::debug!("Discarding result of ended session {generation}");
                self.stats.stale_results_discarded += 1;
                continue;
            }

            match completion {
                Completion::Artwork { node, .. } => self.place(node),
                Completion::Environment { node, .. } => {
                    if let Some(resources) = self.resources.as_mut() {
                        resources.scene.add(node);
                        log::info!("Gallery environment loaded");
                    }
                }
            }
        }
        self.in_flight.retain(|task| !task.is_finished());
    }

    /// Waits for all background work, then applies its results.
    pub async fn settle(&mut self) {
        if let Some(live) = self.live.as_mut() {
            live.hit_test.settle().await;
        }
        while !self.in_flight.is_empty() {
            for task in mem::take(&mut self.in_flight) {
                if let Err(err) = task.await {
                    log::warn!("Background task failed: {err}");
                }
            }
        }
        self.apply_completions();
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Mode of the live session.
    pub fn mode(&self) -> Option<SessionMode> {
        self.mode
    }

    /// Generation of the most recent session.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Configuration in use.
    pub fn config(&self) -> &XrConfig {
        &self.config
    }

    /// Scene of the live session.
    pub fn scene(&self) -> Option<&Scene> {
        self.resources.as_ref().map(|r| &r.scene)
    }

    /// Camera of the live session.
    pub fn camera(&self) -> Option<&Camera> {
        self.resources.as_ref().map(|r| &r.camera)
    }

    /// Reticle of the live session.
    pub fn reticle(&self) -> Option<&Reticle> {
        self.resources.as_ref().map(|r| &r.reticle)
    }

    /// Overlay of the live session.
    pub fn overlay(&self) -> Option<OverlayHandle> {
        self.overlay
    }

    /// Platform session, if one is bound.
    pub fn session(&self) -> Option<&Arc<dyn XrSession>> {
        self.live.as_ref().map(|live| &live.session)
    }

    /// Reference space renders and hit-tests are expressed in.
    pub fn reference_space(&self) -> Option<ReferenceSpace> {
        self.live.as_ref().map(|live| live.reference_space)
    }

    /// Objects placed during the live session.
    pub fn placed_objects(&self) -> &[ObjectId] {
        &self.placed
    }

    /// Whether the live session holds a hit-test source.
    pub fn has_hit_test_source(&self) -> bool {
        self.live
            .as_ref()
            .is_some_and(|live| live.hit_test.is_available())
    }

    /// Whether the live session has asked for a hit-test source.
    pub fn hit_test_requested(&self) -> bool {
        self.live
            .as_ref()
            .is_some_and(|live| live.hit_test.requested())
    }

    /// Background tasks not yet collected.
    pub fn pending_tasks(&self) -> usize {
        self.in_flight.len()
    }

    /// Accumulated counters.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}

fn end_platform_session(session: &Arc<dyn XrSession>) {
    match session.end() {
        Ok(()) => log::debug!("Ended the platform session during cleanup"),
        Err(XrError::InvalidState(_)) => {}
        Err(err) => log::warn!("Failed to end the platform session during cleanup: {err}"),
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.cleanup();
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("mode", &self.mode)
            .field("placed", &self.placed.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
