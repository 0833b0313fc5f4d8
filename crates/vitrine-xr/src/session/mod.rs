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

//! Immersive session lifecycle.
//!
//! [`SessionManager`] is the single owner of everything a session needs. Its
//! state machine is `Idle -> Starting -> Active -> Ending -> Idle`, and
//! `cleanup` returns it to `Idle` from anywhere.

mod frame;
mod manager;
mod overlay;
mod placement;

pub use frame::FrameOutcome;
pub use manager::{SessionManager, SessionServices, SessionStats};
pub use overlay::{overlay_hint, overlay_spec};
pub use placement::PlacementTarget;

use std::fmt;

/// Lifecycle state of the [`SessionManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// No session and no session resources.
    #[default]
    Idle,
    /// Resources are built and the platform grant is pending.
    Starting,
    /// The session is running and frames are rendered.
    Active,
    /// The platform was asked to end the session and its end event is pending.
    Ending,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionState::Idle => "idle",
            SessionState::Starting => "starting",
            SessionState::Active => "active",
            SessionState::Ending => "ending",
        })
    }
}
