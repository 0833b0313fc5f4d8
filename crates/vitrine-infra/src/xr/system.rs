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

use super::session::SimulatedSession;
use super::{HitTestBehavior, ProbeBehavior};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use vitrine_core::xr::{
    SessionFeature, SessionInit, SessionMode, UserActivation, XrError, XrSession, XrSystem,
};

/// A scripted [`XrSystem`].
///
/// Defaults to a device that supports both modes and grants every feature.
#[derive(Debug)]
pub struct SimulatedXrSystem {
    ar: ProbeBehavior,
    vr: ProbeBehavior,
    hit_test: HitTestBehavior,
    local_floor: bool,
    end_error: Option<XrError>,
    probes: Mutex<Vec<SessionMode>>,
    session_requests: AtomicUsize,
    next_session_id: AtomicU64,
    sessions: Mutex<Vec<Arc<SimulatedSession>>>,
}

impl Default for SimulatedXrSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedXrSystem {
    /// Creates a system supporting AR and VR.
    pub fn new() -> Self {
        Self {
            ar: ProbeBehavior::Supported,
            vr: ProbeBehavior::Supported,
            hit_test: HitTestBehavior::Grant,
            local_floor: true,
            end_error: None,
            probes: Mutex::new(Vec::new()),
            session_requests: AtomicUsize::new(0),
            next_session_id: AtomicU64::new(1),
            sessions: Mutex::new(Vec::new()),
        }
    }

    /// Scripts the AR support probe.
    pub fn with_ar(mut self, behavior: ProbeBehavior) -> Self {
        self.ar = behavior;
        self
    }

    /// Scripts the VR support probe.
    pub fn with_vr(mut self, behavior: ProbeBehavior) -> Self {
        self.vr = behavior;
        self
    }

    /// Scripts hit-test grants.
    pub fn with_hit_test(mut self, behavior: HitTestBehavior) -> Self {
        self.hit_test = behavior;
        self
    }

    /// Makes the `local-floor` reference space unavailable.
    pub fn without_local_floor(mut self) -> Self {
        self.local_floor = false;
        self
    }

    /// Makes `end()` on every granted session fail with `err`.
    pub fn with_end_error(mut self, err: XrError) -> Self {
        self.end_error = Some(err);
        self
    }

    /// Modes probed so far, in order.
    pub fn probed_modes(&self) -> Vec<SessionMode> {
        self.probes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `request_session` calls so far, granted or not.
    pub fn session_request_count(&self) -> usize {
        self.session_requests.load(Ordering::SeqCst)
    }

    /// Every session granted so far.
    pub fn sessions(&self) -> Vec<Arc<SimulatedSession>> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recently granted session.
    pub fn last_session(&self) -> Option<Arc<SimulatedSession>> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn probe(&self, mode: SessionMode) -> &ProbeBehavior {
        match mode {
            SessionMode::ImmersiveAr => &self.ar,
            SessionMode::ImmersiveVr => &self.vr,
        }
    }

    fn grantable(&self, mode: SessionMode, feature: SessionFeature, init: &SessionInit) -> bool {
        match feature {
            SessionFeature::DomOverlay => init.dom_overlay_root.is_some(),
            SessionFeature::HitTest => {
                mode == SessionMode::ImmersiveAr && self.hit_test != HitTestBehavior::Absent
            }
            SessionFeature::LocalFloor => self.local_floor,
        }
    }
}

#[async_trait]
impl XrSystem for SimulatedXrSystem {
    async fn is_session_supported(&self, mode: SessionMode) -> Result<bool, XrError> {
        self.probes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(mode);
        self.probe(mode).answer()
    }

    async fn request_session(
        &self,
        mode: SessionMode,
        init: &SessionInit,
        activation: UserActivation,
    ) -> Result<Arc<dyn XrSession>, XrError> {
        self.session_requests.fetch_add(1, Ordering::SeqCst);

        if !activation.is_active() {
            return Err(XrError::NotAllowed(
                "requestSession must be called from a user gesture".to_string(),
            ));
        }
        if self.probe(mode).answer() != Ok(true) {
            return Err(XrError::NotSupported(format!("'{mode}' is not available")));
        }
        if let Some(missing) = init
            .required_features
            .iter()
            .find(|f| !self.grantable(mode, **f, init))
        {
            return Err(XrError::NotSupported(format!(
                "required feature {missing:?} is unavailable"
            )));
        }

        let features: Vec<SessionFeature> = init
            .required_features
            .iter()
            .chain(&init.optional_features)
            .copied()
            .filter(|f| self.grantable(mode, *f, init))
            .collect();

        let id = self.next_session_id.fetch_add(1, Ordering::SeqCst);
        let session = Arc::new(SimulatedSession::new(
            id,
            mode,
            features,
            self.hit_test,
            self.local_floor,
            self.end_error.clone(),
        ));
        log::info!("Simulated '{mode}' session {id} granted");
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&session));
        Ok(session as Arc<dyn XrSession>)
    }
}
