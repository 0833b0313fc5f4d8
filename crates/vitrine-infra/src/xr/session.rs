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

use super::HitTestBehavior;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use vitrine_core::xr::{
    HitTestSource, ReferenceSpace, ReferenceSpaceKind, SessionFeature, SessionMode, XrError,
    XrEvent, XrSession,
};

/// A hit-test source handed out by a [`SimulatedSession`].
#[derive(Debug)]
pub struct SimulatedHitTestSource {
    cancelled: Arc<AtomicBool>,
}

impl HitTestSource for SimulatedHitTestSource {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

/// A granted simulated session.
///
/// Besides the [`XrSession`] contract it lets the caller play the user and
/// the device: [`select`](Self::select) taps, and
/// [`platform_end`](Self::platform_end) exits through the system UI.
#[derive(Debug)]
pub struct SimulatedSession {
    id: u64,
    mode: SessionMode,
    features: Vec<SessionFeature>,
    hit_test: HitTestBehavior,
    local_floor: bool,
    end_error: Option<XrError>,
    ended: AtomicBool,
    sink: Mutex<Option<flume::Sender<XrEvent>>>,
    next_space_id: AtomicU64,
    hit_test_requests: AtomicUsize,
    sources: Mutex<Vec<Arc<AtomicBool>>>,
}

impl SimulatedSession {
    pub(crate) fn new(
        id: u64,
        mode: SessionMode,
        features: Vec<SessionFeature>,
        hit_test: HitTestBehavior,
        local_floor: bool,
        end_error: Option<XrError>,
    ) -> Self {
        Self {
            id,
            mode,
            features,
            hit_test,
            local_floor,
            end_error,
            ended: AtomicBool::new(false),
            sink: Mutex::new(None),
            next_space_id: AtomicU64::new(1),
            hit_test_requests: AtomicUsize::new(0),
            sources: Mutex::new(Vec::new()),
        }
    }

    /// Platform identifier of this session.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Simulates a tap of the primary input. Returns `false` if nobody listens.
    pub fn select(&self) -> bool {
        self.emit(XrEvent::Select { input_source: 0 })
    }

    /// Simulates the user leaving through the system UI.
    pub fn platform_end(&self) {
        if !self.ended.swap(true, Ordering::SeqCst) {
            log::info!("Simulated session {} ended by the platform", self.id);
            self.emit(XrEvent::End);
        }
    }

    /// Whether the session has ended.
    pub fn is_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }

    /// Whether an event sink is installed.
    pub fn has_event_sink(&self) -> bool {
        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Number of hit-test source requests received.
    pub fn hit_test_request_count(&self) -> usize {
        self.hit_test_requests.load(Ordering::SeqCst)
    }

    /// Number of hit-test sources handed out.
    pub fn hit_test_sources_granted(&self) -> usize {
        self.sources
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of handed-out hit-test sources that were cancelled.
    pub fn hit_test_sources_cancelled(&self) -> usize {
        self.sources
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|c| c.load(Ordering::SeqCst))
            .count()
    }

    fn emit(&self, event: XrEvent) -> bool {
        let sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        match sink.as_ref() {
            Some(sink) => sink.send(event).is_ok(),
            None => false,
        }
    }

    fn space(&self, kind: ReferenceSpaceKind) -> ReferenceSpace {
        ReferenceSpace {
            kind,
            id: self.next_space_id.fetch_add(1, Ordering::SeqCst),
        }
    }
}

#[async_trait]
impl XrSession for SimulatedSession {
    fn mode(&self) -> SessionMode {
        self.mode
    }

    fn enabled_features(&self) -> Vec<SessionFeature> {
        self.features.clone()
    }

    async fn request_reference_space(
        &self,
        kind: ReferenceSpaceKind,
    ) -> Result<ReferenceSpace, XrError> {
        if self.is_ended() {
            return Err(XrError::InvalidState("session has ended".to_string()));
        }
        if kind == ReferenceSpaceKind::LocalFloor
            && !(self.local_floor && self.features.contains(&SessionFeature::LocalFloor))
        {
            return Err(XrError::NotSupported("local-floor".to_string()));
        }
        Ok(self.space(kind))
    }

    async fn request_hit_test_source(
        &self,
        space: ReferenceSpace,
    ) -> Result<Box<dyn HitTestSource>, XrError> {
        self.hit_test_requests.fetch_add(1, Ordering::SeqCst);
        if !self.features.contains(&SessionFeature::HitTest) {
            return Err(XrError::NotSupported("hit-test was not granted".to_string()));
        }
        if self.hit_test == HitTestBehavior::Reject {
            return Err(XrError::NotSupported(format!(
                "no hit-test source for space {}",
                space.id
            )));
        }

        let cancelled = Arc::new(AtomicBool::new(false));
        self.sources
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&cancelled));
        Ok(Box::new(SimulatedHitTestSource { cancelled }))
    }

    fn set_event_sink(&self, sink: flume::Sender<XrEvent>) {
        *self.sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(sink);
    }

    fn end(&self) -> Result<(), XrError> {
        if self.is_ended() {
            return Err(XrError::InvalidState("session already ended".to_string()));
        }
        if let Some(err) = &self.end_error {
            return Err(err.clone());
        }
        self.ended.store(true, Ordering::SeqCst);
        self.emit(XrEvent::End);
        Ok(())
    }
}
