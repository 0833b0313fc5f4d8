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

//! Per-frame driver of the live session.

use super::manager::SessionManager;
use super::SessionState;
use vitrine_core::xr::XrFrame;

/// What a call to [`SessionManager::on_frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No live session or the animation loop is stopped; nothing was done.
    Skipped,
    /// The scene was rendered.
    Rendered,
    /// The render call failed. The session keeps running.
    RenderFailed,
}

impl SessionManager {
    /// Runs one frame of the live session.
    ///
    /// Applies finished background work, requests or polls the hit-test
    /// source, moves the reticle, follows the viewer with the camera and
    /// renders once. Nothing in here returns an error to the caller.
    pub fn on_frame(&mut self, time: f64, frame: &dyn XrFrame) -> FrameOutcome {
        if !matches!(self.state, SessionState::Active | SessionState::Ending) {
            return FrameOutcome::Skipped;
        }
        self.apply_completions();

        let (Some(live), Some(resources)) = (self.live.as_mut(), self.resources.as_mut()) else {
            return FrameOutcome::Skipped;
        };
        if !resources.renderer.animation_loop_enabled() {
            return FrameOutcome::Skipped;
        }
        log::trace!("Frame at {time:.3} ms");

        live.hit_test.ensure_requested(&live.session);
        live.hit_test
            .update(frame, &live.reference_space, &mut resources.reticle);
        resources.reticle.sync(&mut resources.scene);

        if let Some(viewer) = frame.viewer_pose(&live.reference_space) {
            resources.camera.set_pose(&viewer.transform);
        }

        match resources.renderer.render(&resources.scene, &resources.camera) {
            Ok(()) => {
                self.stats.frames_rendered += 1;
                FrameOutcome::Rendered
            }
            Err(err) => {
                log::warn!("Frame render failed: {err}");
                self.stats.render_failures += 1;
                FrameOutcome::RenderFailed
            }
        }
    }
}
