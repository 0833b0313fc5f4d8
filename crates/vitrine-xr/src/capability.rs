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

//! Detects which immersive mode the platform can run.

use std::sync::Arc;
use vitrine_core::xr::{SessionMode, XrSystem};

/// Modes probed by [`CapabilityNegotiator::detect_support`], in order of preference.
pub const PREFERRED_MODES: [SessionMode; 2] = [SessionMode::ImmersiveAr, SessionMode::ImmersiveVr];

/// The outcome of a capability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SupportReport {
    /// The preferred supported mode, or `None` when nothing is supported.
    pub mode: Option<SessionMode>,
}

impl SupportReport {
    /// Returns `true` if some immersive mode can be started.
    pub fn supported(&self) -> bool {
        self.mode.is_some()
    }
}

/// Probes the host XR system for immersive support.
///
/// The negotiator holds no state besides the system handle: every call to
/// [`detect_support`](Self::detect_support) probes again.
#[derive(Clone)]
pub struct CapabilityNegotiator {
    system: Option<Arc<dyn XrSystem>>,
}

impl CapabilityNegotiator {
    /// Creates a negotiator backed by the given XR system.
    pub fn new(system: Arc<dyn XrSystem>) -> Self {
        Self {
            system: Some(system),
        }
    }

    /// Creates a negotiator for a host without any XR system.
    pub fn unavailable() -> Self {
        Self { system: None }
    }

    /// Returns the XR system this negotiator probes, if any.
    pub fn system(&self) -> Option<&Arc<dyn XrSystem>> {
        self.system.as_ref()
    }

    /// Probes AR first, then VR, and reports the first supported mode.
    ///
    /// A failed probe counts as "unsupported" for that mode only.
    pub async fn detect_support(&self) -> SupportReport {
        let Some(system) = &self.system else {
            log::debug!("No XR system present, immersive modes unsupported");
            return SupportReport::default();
        };

        for mode in PREFERRED_MODES {
            match system.is_session_supported(mode).await {
                Ok(true) => {
                    log::info!("Immersive mode '{mode}' is supported");
                    return SupportReport { mode: Some(mode) };
                }
                Ok(false) => log::debug!("Immersive mode '{mode}' is not supported"),
                Err(err) => log::debug!("Support probe for '{mode}' failed: {err}"),
            }
        }

        SupportReport::default()
    }
}

impl std::fmt::Debug for CapabilityNegotiator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityNegotiator")
            .field("system", &self.system.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vitrine_core::xr::{SessionInit, UserActivation, XrError, XrSession};

    struct ScriptedSystem {
        ar: Result<bool, XrError>,
        vr: Result<bool, XrError>,
        probes: AtomicUsize,
    }

    #[async_trait]
    impl XrSystem for ScriptedSystem {
        async fn is_session_supported(&self, mode: SessionMode) -> Result<bool, XrError> {
            self.probes.fetch_add(1, Ordering::SeqCst);
            match mode {
                SessionMode::ImmersiveAr => self.ar.clone(),
                SessionMode::ImmersiveVr => self.vr.clone(),
            }
        }

        async fn request_session(
            &self,
            _mode: SessionMode,
            _init: &SessionInit,
            _activation: UserActivation,
        ) -> Result<Arc<dyn XrSession>, XrError> {
            Err(XrError::Unavailable)
        }
    }

    fn negotiator(
        ar: Result<bool, XrError>,
        vr: Result<bool, XrError>,
    ) -> (CapabilityNegotiator, Arc<ScriptedSystem>) {
        let system = Arc::new(ScriptedSystem {
            ar,
            vr,
            probes: AtomicUsize::new(0),
        });
        (CapabilityNegotiator::new(system.clone()), system)
    }

    #[tokio::test]
    async fn ar_wins_when_both_are_supported() {
        let (negotiator, system) = negotiator(Ok(true), Ok(true));
        let report = negotiator.detect_support().await;
        assert_eq!(report.mode, Some(SessionMode::ImmersiveAr));
        assert_eq!(system.probes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejected_ar_probe_falls_through_to_vr() {
        let (negotiator, _) = negotiator(Err(XrError::Platform("probe crashed".into())), Ok(true));
        assert_eq!(
            negotiator.detect_support().await.mode,
            Some(SessionMode::ImmersiveVr)
        );
    }

    #[tokio::test]
    async fn nothing_supported_reports_none() {
        let (negotiator, system) = negotiator(Ok(false), Err(XrError::Unavailable));
        let report = negotiator.detect_support().await;
        assert!(!report.supported());
        assert_eq!(system.probes.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn missing_system_is_unsupported() {
        let report = CapabilityNegotiator::unavailable().detect_support().await;
        assert_eq!(report, SupportReport { mode: None });
    }
}
