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

//! Defines the errors surfaced by the session manager.

use crate::session::SessionState;
use thiserror::Error;
use vitrine_core::{engine::EngineError, ui::UiError, xr::XrError};

/// An error returned by [`crate::SessionManager::start`].
///
/// Every variant is recoverable: by the time it is returned the manager is back
/// in [`SessionState::Idle`] with all resources released.
#[derive(Debug, Error)]
pub enum SessionError {
    /// `start` was called while another session was starting, running or ending.
    #[error("a session is already {0}")]
    AlreadyActive(SessionState),
    /// The overlay could not be mounted on the host document.
    #[error("failed to create the session overlay: {0}")]
    Overlay(#[from] UiError),
    /// The render engine could not create or bind a renderer.
    #[error("render engine failure: {0}")]
    Engine(#[from] EngineError),
    /// The platform refused the session (gesture, permission or hardware).
    #[error("session request was rejected: {0}")]
    Grant(#[source] XrError),
    /// Neither a floor-relative nor a local reference space was available.
    #[error("no usable reference space: {0}")]
    ReferenceSpace(#[source] XrError),
}

/// An error raised while loading [`crate::XrConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid RON for [`crate::XrConfig`].
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn grant_error_keeps_platform_source() {
        let err = SessionError::Grant(XrError::NotAllowed("user declined".to_string()));
        assert_eq!(
            format!("{err}"),
            "session request was rejected: request not allowed: user declined"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn already_active_names_the_state() {
        let err = SessionError::AlreadyActive(SessionState::Starting);
        assert_eq!(format!("{err}"), "a session is already starting");
    }
}
