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

//! Builds the overlay shown on top of the immersive view.

use crate::config::LabelSettings;
use vitrine_core::{ui::OverlaySpec, xr::SessionMode};

/// The instruction shown to the user for the given mode and artwork title.
pub fn overlay_hint(mode: SessionMode, title: Option<&str>) -> String {
    match (title, mode) {
        (Some(title), SessionMode::ImmersiveAr) => {
            format!("Look at a surface, then tap to place \"{title}\"")
        }
        (Some(title), SessionMode::ImmersiveVr) => {
            format!("Tap to place \"{title}\" in the gallery")
        }
        (None, _) => "Entering gallery environment".to_string(),
    }
}

/// Describes the overlay for a new session.
pub fn overlay_spec(mode: SessionMode, title: Option<&str>, labels: &LabelSettings) -> OverlaySpec {
    OverlaySpec {
        class_name: labels.overlay_class.clone(),
        hint: overlay_hint(mode, title.filter(|t| !t.is_empty())),
        exit_label: labels.exit.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_depends_on_mode() {
        assert_eq!(
            overlay_hint(SessionMode::ImmersiveAr, Some("Toy Car")),
            "Look at a surface, then tap to place \"Toy Car\""
        );
        assert_eq!(
            overlay_hint(SessionMode::ImmersiveVr, Some("Toy Car")),
            "Tap to place \"Toy Car\" in the gallery"
        );
    }

    #[test]
    fn untitled_session_enters_the_gallery() {
        let spec = overlay_spec(SessionMode::ImmersiveAr, Some(""), &LabelSettings::default());
        assert_eq!(spec.hint, "Entering gallery environment");
        assert_eq!(spec.class_name, "webxr-overlay");
        assert_eq!(spec.exit_label, "Exit Gallery");
    }
}
