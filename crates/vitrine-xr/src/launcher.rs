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

//! The control that lets the user enter the gallery.

use crate::capability::CapabilityNegotiator;
use crate::config::LabelSettings;
use crate::error::SessionError;
use crate::session::SessionManager;
use tokio::sync::watch;
use vitrine_core::{
    catalog::Artwork,
    xr::{SessionMode, UserActivation},
};

/// An "Enter Gallery" control bound to the mode the platform supports.
///
/// The control only exists when some immersive mode is supported. Its label
/// can be observed through [`LaunchControl::subscribe`].
#[derive(Debug)]
pub struct LaunchControl {
    mode: SessionMode,
    labels: LabelSettings,
    label: watch::Sender<String>,
}

impl LaunchControl {
    /// Probes the platform and creates the control.
    ///
    /// Returns `None` when no immersive mode is supported, in which case the
    /// host shows nothing.
    pub async fn create(negotiator: &CapabilityNegotiator, labels: &LabelSettings) -> Option<Self> {
        let mode = negotiator.detect_support().await.mode?;
        let (label, _) = watch::channel(labels.enter.clone());
        Some(Self {
            mode,
            labels: labels.clone(),
            label,
        })
    }

    /// The mode a session will be started in.
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// The current label.
    pub fn label(&self) -> String {
        self.label.borrow().clone()
    }

    /// Watches label changes.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.label.subscribe()
    }

    /// Starts a session for `artwork`.
    ///
    /// The label reads "loading" while the session starts and reverts
    /// whatever the outcome. The start result is returned unchanged.
    pub async fn activate(
        &mut self,
        manager: &mut SessionManager,
        artwork: &Artwork,
        activation: UserActivation,
    ) -> Result<(), SessionError> {
        self.label.send_replace(self.labels.loading.clone());
        let result = manager
            .start(
                self.mode,
                artwork.glb.as_deref(),
                Some(artwork.title.as_str()),
                activation,
            )
            .await;
        self.label.send_replace(self.labels.enter.clone());

        if let Err(err) = &result {
            log::warn!("Could not enter the gallery for '{}': {err}", artwork.id);
        }
        result
    }
}
