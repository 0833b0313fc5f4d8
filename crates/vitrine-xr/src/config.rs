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

//! Tunable parameters of the immersive session, loaded from RON.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vitrine_core::{
    engine::RendererSettings,
    math::Vec3,
    scene::{Camera, Light, StandardMaterial},
};

/// Where a select input places an artwork.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    /// Largest dimension, in meters, a placed model is rescaled to.
    pub target_size: f32,
    /// Distance in front of the camera used when no surface is known.
    pub fallback_distance: f32,
    /// How far below the camera height the fallback position is dropped.
    pub fallback_drop: f32,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            target_size: 0.3,
            fallback_distance: 1.5,
            fallback_drop: 0.3,
        }
    }
}

/// The cube placed when no model is available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderSettings {
    /// Edge length in meters.
    pub size: f32,
    /// Surface material.
    pub material: StandardMaterial,
}

impl Default for PlaceholderSettings {
    fn default() -> Self {
        Self {
            size: 0.15,
            material: StandardMaterial {
                color: 0x4A90D9,
                metalness: 0.3,
                roughness: 0.7,
            },
        }
    }
}

/// Ring dimensions of the surface marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReticleSettings {
    /// Inner ring radius in meters.
    pub inner_radius: f32,
    /// Outer ring radius in meters.
    pub outer_radius: f32,
}

impl Default for ReticleSettings {
    fn default() -> Self {
        Self {
            inner_radius: 0.08,
            outer_radius: 0.1,
        }
    }
}

/// How the gallery room model is fitted around the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentSettings {
    /// Largest dimension of the room after scaling, in meters.
    pub target_size: f32,
    /// Vertical offset applied after centering.
    pub lift: f32,
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        Self {
            target_size: 12.0,
            lift: 0.5,
        }
    }
}

/// User-facing strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    /// Launch control label while idle.
    pub enter: String,
    /// Launch control label while a session is starting.
    pub loading: String,
    /// Overlay exit button label.
    pub exit: String,
    /// Class name given to the overlay root.
    pub overlay_class: String,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            enter: "Enter Gallery".to_string(),
            loading: "Loading…".to_string(),
            exit: "Exit Gallery".to_string(),
            overlay_class: "webxr-overlay".to_string(),
        }
    }
}

/// Full configuration of the session manager.
///
/// Every field has a default, so a partial (or empty) RON document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct XrConfig {
    pub renderer: RendererSettings,
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub placement: PlacementSettings,
    pub placeholder: PlaceholderSettings,
    pub reticle: ReticleSettings,
    pub environment: EnvironmentSettings,
    pub labels: LabelSettings,
}

impl Default for XrConfig {
    fn default() -> Self {
        Self {
            renderer: RendererSettings::default(),
            camera: Camera::default(),
            lights: vec![
                Light::ambient(0.6),
                Light::directional(Vec3::new(2.0, 4.0, 2.0), 1.0),
                Light::directional(Vec3::new(-2.0, 3.0, -1.0), 0.4),
            ],
            placement: PlacementSettings::default(),
            placeholder: PlaceholderSettings::default(),
            reticle: ReticleSettings::default(),
            environment: EnvironmentSettings::default(),
            labels: LabelSettings::default(),
        }
    }
}

impl XrConfig {
    /// Parses a configuration from a RON string.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    /// Reads and parses a RON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_ron_str(&source)?;
        log::debug!("Loaded XR configuration from {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_yields_defaults() {
        let config = XrConfig::from_ron_str("()").expect("empty config should parse");
        assert_eq!(config, XrConfig::default());
        assert_eq!(config.lights.len(), 3);
        assert_eq!(config.placeholder.material.color, 0x4A90D9);
    }

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let config = XrConfig::from_ron_str(
            "(placement: (fallback_distance: 2.0), labels: (enter: \"Step inside\"))",
        )
        .expect("partial config should parse");
        assert_eq!(config.placement.fallback_distance, 2.0);
        assert_eq!(config.placement.target_size, 0.3);
        assert_eq!(config.labels.enter, "Step inside");
        assert_eq!(config.labels.exit, "Exit Gallery");
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "(environment: (target_size: 8.0))").expect("write config");
        let config = XrConfig::load(file.path()).expect("config should load");
        assert_eq!(config.environment.target_size, 8.0);
        assert_eq!(config.environment.lift, 0.5);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = XrConfig::from_ron_str("(placement: oops)").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = XrConfig::load("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
