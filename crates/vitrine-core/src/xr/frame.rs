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

use super::{Pose, ReferenceSpace, XrError};
use super::session::HitTestSource;

/// One hit-test result, already resolved against the requested reference space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTestResult {
    /// The surface pose, or `None` when the platform could not express it in that space.
    pub pose: Option<Pose>,
}

/// The per-frame snapshot the platform passes to the frame callback.
///
/// A frame is only valid for the duration of the callback it was passed to.
pub trait XrFrame {
    /// Returns the hit results for `source` expressed in `space`, nearest first.
    fn hit_test_results(
        &self,
        source: &dyn HitTestSource,
        space: &ReferenceSpace,
    ) -> Result<Vec<HitTestResult>, XrError>;

    /// Returns the viewer's pose in `space`, if tracking is available this frame.
    fn viewer_pose(&self, space: &ReferenceSpace) -> Option<Pose>;
}
