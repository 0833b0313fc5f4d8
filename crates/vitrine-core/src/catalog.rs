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

//! Catalog records consumed by the session manager.
//!
//! The catalog itself is maintained elsewhere; only the fields the immersive
//! viewer reads are modelled here.

use serde::{Deserialize, Serialize};

/// One artwork in the gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    /// Stable identifier used in routes.
    pub id: String,
    /// Display title, also used in the session hint.
    pub title: String,
    /// Artist credit.
    #[serde(default)]
    pub artist: String,
    /// URL of the placeable glTF binary, if the artwork has one.
    #[serde(default)]
    pub glb: Option<String>,
    /// URL of the platform quick-look asset.
    #[serde(default)]
    pub usdz: Option<String>,
    /// Accent color used by placeholders in the 2D views.
    #[serde(default)]
    pub color: Option<String>,
}

/// Gallery-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    /// Gallery title.
    pub title: String,
    /// Secondary title line.
    #[serde(default)]
    pub subtitle: String,
    /// URL of the room model loaded around the viewer in immersive mode.
    #[serde(default)]
    pub environment_glb: Option<String>,
}

/// The catalog document: the gallery and its artworks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Gallery-wide settings.
    pub gallery: Gallery,
    /// The artworks, in display order.
    pub artworks: Vec<Artwork>,
}

impl Catalog {
    /// Parses a catalog from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Looks up an artwork by id.
    pub fn find(&self, id: &str) -> Option<&Artwork> {
        self.artworks.iter().find(|a| a.id == id)
    }
}
