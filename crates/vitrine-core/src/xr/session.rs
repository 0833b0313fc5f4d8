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

use super::{ReferenceSpace, ReferenceSpaceKind, SessionFeature, SessionInit, SessionMode};
use super::{UserActivation, XrError, XrEvent};
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// The entry point of the host platform: capability queries and session grants.
///
/// Both methods are asynchronous because the platform answers them out of band
/// (permission prompts, device enumeration).
#[async_trait]
pub trait XrSystem: Send + Sync {
    /// Asks whether `mode` can be started. Each query can fail independently.
    async fn is_session_supported(&self, mode: SessionMode) -> Result<bool, XrError>;

    /// Requests a new session.
    ///
    /// The platform rejects the request with [`XrError::NotAllowed`] when
    /// `activation` is not active, or when the user declines.
    async fn request_session(
        &self,
        mode: SessionMode,
        init: &SessionInit,
        activation: UserActivation,
    ) -> Result<Arc<dyn XrSession>, XrError>;
}

/// A live immersive session.
#[async_trait]
pub trait XrSession: Send + Sync + Debug {
    /// The mode the session was started in.
    fn mode(&self) -> SessionMode;

    /// The optional features the platform actually granted.
    fn enabled_features(&self) -> Vec<SessionFeature>;

    /// Requests a reference space of the given kind.
    async fn request_reference_space(
        &self,
        kind: ReferenceSpaceKind,
    ) -> Result<ReferenceSpace, XrError>;

    /// Requests a hit-test source casting rays from the origin of `space`.
    async fn request_hit_test_source(
        &self,
        space: ReferenceSpace,
    ) -> Result<Box<dyn HitTestSource>, XrError>;

    /// Installs the sink that receives `Select` and `End` notifications.
    ///
    /// A later call replaces the previous sink. Sends to a disconnected sink are
    /// silently dropped by the platform.
    fn set_event_sink(&self, sink: flume::Sender<XrEvent>);

    /// Asks the platform to end the session. Completion is signalled by an
    /// [`XrEvent::End`] on the event sink.
    fn end(&self) -> Result<(), XrError>;
}

/// A platform handle producing hit-test results each frame.
pub trait HitTestSource: Send + Sync + Debug {
    /// Releases the platform-side resources of the source.
    fn cancel(&self);
}
