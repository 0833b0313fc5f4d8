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

//! Contracts for the host immersive platform.
//!
//! A host (browser WebXR, OpenXR runtime, or a simulator) implements
//! [`XrSystem`], [`XrSession`], [`XrFrame`] and [`HitTestSource`]. The session
//! manager never talks to the device any other way.

mod error;
mod frame;
mod session;

pub use error::XrError;
pub use frame::{HitTestResult, XrFrame};
pub use session::{HitTestSource, XrSession, XrSystem};

use crate::math::{Mat4, Quaternion, Vec3};
use crate::ui::OverlayHandle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The immersive modes a session can run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionMode {
    /// Passthrough augmented reality.
    ImmersiveAr,
    /// Fully immersive virtual reality.
    ImmersiveVr,
}

impl SessionMode {
    /// The platform identifier of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionMode::ImmersiveAr => "immersive-ar",
            SessionMode::ImmersiveVr => "immersive-vr",
        }
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Features a session may be asked to enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionFeature {
    /// A 2D overlay surface composited over the immersive view.
    DomOverlay,
    /// Real-world surface hit-testing.
    HitTest,
    /// A reference space whose origin sits on the floor.
    LocalFloor,
}

/// The kinds of reference space a session can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceSpaceKind {
    /// Tracks the viewer's head.
    Viewer,
    /// Origin near the viewer's starting position.
    Local,
    /// Like `Local`, but with the origin on the floor.
    LocalFloor,
}

/// A reference space granted by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceSpace {
    /// What the space tracks.
    pub kind: ReferenceSpaceKind,
    /// Platform identifier of the space.
    pub id: u64,
}

/// Options passed when requesting a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionInit {
    /// Features the session cannot start without.
    pub required_features: Vec<SessionFeature>,
    /// Features the platform may decline without failing the request.
    pub optional_features: Vec<SessionFeature>,
    /// The overlay to composite when `DomOverlay` is granted.
    pub dom_overlay_root: Option<OverlayHandle>,
}

/// Proof that a request originates from a user input event.
///
/// Platforms gate session grants on transient user activation. The host creates
/// this token inside its input handler and the platform rejects inactive tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserActivation {
    active: bool,
}

impl UserActivation {
    /// A token minted inside a user input handler.
    pub fn from_input_event() -> Self {
        Self { active: true }
    }

    /// A token for code running outside any input handler.
    pub fn none() -> Self {
        Self { active: false }
    }

    /// Whether the originating gesture is still active.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// A rigid transform reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// The pose as a column-major matrix.
    pub transform: Mat4,
}

impl Pose {
    /// Creates a pose from a position and an orientation.
    pub fn new(position: Vec3, orientation: Quaternion) -> Self {
        Self {
            transform: Mat4::from_scale_rotation_translation(Vec3::ONE, orientation, position),
        }
    }

    /// The position of the pose.
    pub fn position(&self) -> Vec3 {
        self.transform.translation()
    }

    /// The orientation of the pose.
    pub fn orientation(&self) -> Quaternion {
        self.transform.rotation()
    }
}

/// Notifications a live session delivers to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XrEvent {
    /// The primary action of an input source was completed.
    Select {
        /// Index of the input source.
        input_source: u32,
    },
    /// The session has ended, whichever side initiated it.
    End,
}
