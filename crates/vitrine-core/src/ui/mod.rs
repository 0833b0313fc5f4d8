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

//! Contracts for the 2D document that hosts the session overlay.

use thiserror::Error;

/// A handle to an overlay mounted on the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

/// The contents of the session overlay: a hint and an exit affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySpec {
    /// Style class of the overlay root.
    pub class_name: String,
    /// Instruction text shown to the user.
    pub hint: String,
    /// Label of the button that exits the session.
    pub exit_label: String,
}

/// An error raised by the overlay host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    /// The overlay could not be attached to the document.
    #[error("failed to mount overlay: {0}")]
    MountFailed(String),
}

/// The DOM-equivalent document root.
///
/// Clicking the exit affordance is routed by the host to the session manager's
/// `end()`; the host does not tear anything down itself.
pub trait OverlayHost: Send + Sync {
    /// Attaches an overlay to the document.
    fn mount(&self, overlay: &OverlaySpec) -> Result<OverlayHandle, UiError>;

    /// Removes an overlay. Unknown handles are ignored.
    fn unmount(&self, handle: OverlayHandle);
}
