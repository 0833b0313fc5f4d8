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

//! Overlay host implementations.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use vitrine_core::ui::{OverlayHandle, OverlayHost, OverlaySpec, UiError};

/// An [`OverlayHost`] that keeps overlays in memory and logs them.
#[derive(Debug)]
pub struct LogOverlayHost {
    next_handle: AtomicU64,
    mounted: Mutex<Vec<(OverlayHandle, OverlaySpec)>>,
    fail_mount: AtomicBool,
}

impl Default for LogOverlayHost {
    fn default() -> Self {
        Self {
            next_handle: AtomicU64::new(1),
            mounted: Mutex::new(Vec::new()),
            fail_mount: AtomicBool::new(false),
        }
    }
}

impl LogOverlayHost {
    /// Creates an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `mount` fail while set.
    pub fn set_fail_mount(&self, fail: bool) {
        self.fail_mount.store(fail, Ordering::SeqCst);
    }

    /// Overlays currently mounted, oldest first.
    pub fn mounted(&self) -> Vec<OverlaySpec> {
        self.mounted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, spec)| spec.clone())
            .collect()
    }
}

impl OverlayHost for LogOverlayHost {
    fn mount(&self, overlay: &OverlaySpec) -> Result<OverlayHandle, UiError> {
        if self.fail_mount.load(Ordering::SeqCst) {
            return Err(UiError::MountFailed("document root unavailable".to_string()));
        }
        let handle = OverlayHandle(self.next_handle.fetch_add(1, Ordering::SeqCst));
        log::info!(
            "[overlay .{}] {} | [{}]",
            overlay.class_name,
            overlay.hint,
            overlay.exit_label
        );
        self.mounted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((handle, overlay.clone()));
        Ok(handle)
    }

    fn unmount(&self, handle: OverlayHandle) {
        let mut mounted = self.mounted.lock().unwrap_or_else(PoisonError::into_inner);
        let before = mounted.len();
        mounted.retain(|(h, _)| *h != handle);
        if mounted.len() == before {
            log::warn!("Overlay {handle:?} was not mounted");
        } else {
            log::debug!("Overlay {handle:?} removed");
        }
    }
}
