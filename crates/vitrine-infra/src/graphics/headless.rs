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

//! A render engine that draws nothing and counts everything.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use vitrine_core::{
    engine::{EngineError, RenderEngine, Renderer, RendererSettings},
    scene::{Camera, Scene},
    xr::{ReferenceSpace, XrSession},
};

#[derive(Debug, Default)]
struct Counters {
    created: AtomicUsize,
    bound: AtomicUsize,
    frames: AtomicUsize,
    disposed: AtomicUsize,
    last_visible_nodes: AtomicUsize,
}

/// A snapshot of what a [`HeadlessRenderEngine`] has done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderCounters {
    /// Renderers created.
    pub created: usize,
    /// Sessions bound to a renderer.
    pub bound: usize,
    /// Frames rendered.
    pub frames: usize,
    /// Renderers disposed.
    pub disposed: usize,
    /// Visible nodes in the last rendered scene.
    pub last_visible_nodes: usize,
}

impl RenderCounters {
    /// Renderers created and not yet disposed.
    pub fn live(&self) -> usize {
        self.created - self.disposed
    }
}

/// A [`RenderEngine`] without a GPU.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderEngine {
    counters: Arc<Counters>,
    fail_creation: Arc<AtomicBool>,
    fail_frames: Arc<AtomicBool>,
}

impl HeadlessRenderEngine {
    /// Creates an engine that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `create_renderer` fail while set.
    pub fn set_fail_creation(&self, fail: bool) {
        self.fail_creation.store(fail, Ordering::SeqCst);
    }

    /// Makes every render call fail while set.
    pub fn set_fail_frames(&self, fail: bool) {
        self.fail_frames.store(fail, Ordering::SeqCst);
    }

    /// Current counters.
    pub fn counters(&self) -> RenderCounters {
        let c = &self.counters;
        RenderCounters {
            created: c.created.load(Ordering::SeqCst),
            bound: c.bound.load(Ordering::SeqCst),
            frames: c.frames.load(Ordering::SeqCst),
            disposed: c.disposed.load(Ordering::SeqCst),
            last_visible_nodes: c.last_visible_nodes.load(Ordering::SeqCst),
        }
    }
}

impl RenderEngine for HeadlessRenderEngine {
    fn create_renderer(
        &self,
        settings: &RendererSettings,
    ) -> Result<Box<dyn Renderer>, EngineError> {
        if self.fail_creation.load(Ordering::SeqCst) {
            return Err(EngineError::InitializationFailed(
                "headless context unavailable".to_string(),
            ));
        }
        if settings.width == 0 || settings.height == 0 {
            return Err(EngineError::InitializationFailed(format!(
                "invalid surface size {}x{}",
                settings.width, settings.height
            )));
        }
        self.counters.created.fetch_add(1, Ordering::SeqCst);
        log::debug!(
            "Created headless renderer {}x{} @{}",
            settings.width,
            settings.height,
            settings.pixel_ratio
        );
        Ok(Box::new(HeadlessRenderer {
            counters: Arc::clone(&self.counters),
            fail_frames: Arc::clone(&self.fail_frames),
            session: None,
            animation_loop: false,
            disposed: false,
        }))
    }
}

/// A renderer created by [`HeadlessRenderEngine`].
#[derive(Debug)]
pub struct HeadlessRenderer {
    counters: Arc<Counters>,
    fail_frames: Arc<AtomicBool>,
    session: Option<(Arc<dyn XrSession>, ReferenceSpace)>,
    animation_loop: bool,
    disposed: bool,
}

impl Renderer for HeadlessRenderer {
    fn bind_session(
        &mut self,
        session: Arc<dyn XrSession>,
        space: ReferenceSpace,
    ) -> Result<(), EngineError> {
        if self.disposed {
            return Err(EngineError::ContextLost);
        }
        if self.session.is_some() {
            return Err(EngineError::SessionBinding(
                "renderer already has a session".to_string(),
            ));
        }
        self.session = Some((session, space));
        self.counters.bound.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn set_animation_loop(&mut self, enabled: bool) {
        self.animation_loop = enabled && !self.disposed;
    }

    fn animation_loop_enabled(&self) -> bool {
        self.animation_loop
    }

    fn render(&mut self, scene: &Scene, _camera: &Camera) -> Result<(), EngineError> {
        if self.disposed {
            return Err(EngineError::ContextLost);
        }
        if self.session.is_none() {
            return Err(EngineError::RenderingFailed("no session bound".to_string()));
        }
        if self.fail_frames.load(Ordering::SeqCst) {
            return Err(EngineError::RenderingFailed("simulated frame failure".to_string()));
        }
        let visible = scene.iter().filter(|node| node.visible).count();
        self.counters
            .last_visible_nodes
            .store(visible, Ordering::SeqCst);
        self.counters.frames.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.animation_loop = false;
            self.session = None;
            self.counters.disposed.fetch_add(1, Ordering::SeqCst);
        }
    }
}
