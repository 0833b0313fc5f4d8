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

//! Contracts for the external 3D render engine.
//!
//! The engine owns rasterization. The session manager only creates a renderer,
//! binds it to the immersive session, asks it to draw the [`Scene`] once per
//! frame, and disposes of it at teardown.

mod error;

pub use error::EngineError;

use crate::scene::{Camera, Scene};
use crate::xr::{ReferenceSpace, XrSession};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How HDR scene colors are mapped to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToneMapping {
    /// No tone mapping.
    None,
    /// The ACES filmic curve.
    #[default]
    AcesFilmic,
}

/// Construction settings for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererSettings {
    /// Whether the framebuffer keeps an alpha channel, needed for AR passthrough.
    pub alpha: bool,
    /// Whether multisample anti-aliasing is enabled.
    pub antialias: bool,
    /// Device pixel ratio.
    pub pixel_ratio: f32,
    /// Initial drawing-buffer width in CSS pixels.
    pub width: u32,
    /// Initial drawing-buffer height in CSS pixels.
    pub height: u32,
    /// Whether output is encoded as sRGB.
    pub srgb_output: bool,
    /// Tone-mapping operator.
    pub tone_mapping: ToneMapping,
    /// Exposure applied before tone mapping.
    pub tone_mapping_exposure: f32,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            alpha: true,
            antialias: true,
            pixel_ratio: 1.0,
            width: 1280,
            height: 720,
            srgb_output: true,
            tone_mapping: ToneMapping::AcesFilmic,
            tone_mapping_exposure: 1.0,
        }
    }
}

/// Factory for renderers.
pub trait RenderEngine: Send + Sync {
    /// Creates a renderer with XR output enabled.
    fn create_renderer(&self, settings: &RendererSettings) -> Result<Box<dyn Renderer>, EngineError>;
}

/// A renderer able to present into an immersive session.
pub trait Renderer: Send {
    /// Routes the renderer's output to `session`, drawing relative to `space`.
    fn bind_session(
        &mut self,
        session: Arc<dyn XrSession>,
        space: ReferenceSpace,
    ) -> Result<(), EngineError>;

    /// Starts or stops the platform animation loop that drives the frame callback.
    fn set_animation_loop(&mut self, enabled: bool);

    /// Whether the animation loop is currently registered.
    fn animation_loop_enabled(&self) -> bool;

    /// Draws `scene` from `camera` once.
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), EngineError>;

    /// Releases every GPU and platform resource held by the renderer.
    fn dispose(&mut self);
}
