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

use vitrine_core::xr::{HitTestResult, HitTestSource, Pose, ReferenceSpace, XrError, XrFrame};

/// A single scripted frame.
#[derive(Debug, Clone)]
pub struct SimulatedFrame {
    hits: Result<Vec<HitTestResult>, XrError>,
    viewer: Option<Pose>,
}

impl SimulatedFrame {
    /// A frame with no surface in view and no tracked viewer.
    pub fn empty() -> Self {
        Self {
            hits: Ok(Vec::new()),
            viewer: None,
        }
    }

    /// A frame whose nearest hit is at `pose`.
    pub fn with_surface(pose: Pose) -> Self {
        Self::with_hits(vec![HitTestResult { pose: Some(pose) }])
    }

    /// A frame with the given ordered hit results.
    pub fn with_hits(hits: Vec<HitTestResult>) -> Self {
        Self {
            hits: Ok(hits),
            viewer: None,
        }
    }

    /// A frame whose hit-test query fails.
    pub fn failing(err: XrError) -> Self {
        Self {
            hits: Err(err),
            viewer: None,
        }
    }

    /// Sets the viewer pose reported by this frame.
    pub fn viewer(mut self, pose: Pose) -> Self {
        self.viewer = Some(pose);
        self
    }
}

impl XrFrame for SimulatedFrame {
    fn hit_test_results(
        &self,
        _source: &dyn HitTestSource,
        _space: &ReferenceSpace,
    ) -> Result<Vec<HitTestResult>, XrError> {
        self.hits.clone()
    }

    fn viewer_pose(&self, _space: &ReferenceSpace) -> Option<Pose> {
        self.viewer
    }
}
