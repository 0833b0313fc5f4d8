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

//! An engine-agnostic description of what the session renders.
//!
//! The session manager owns a [`Scene`] and hands it to the external render
//! engine once per frame. The engine decides how each [`SceneNodeKind`] is drawn;
//! the manager only appends, moves, hides and removes nodes.

mod camera;
mod light;
mod node;

pub use camera::Camera;
pub use light::{Light, LightKind};
pub use node::{ObjectId, SceneNode, SceneNodeKind, StandardMaterial, Transform};

/// A flat scene graph holding every node the session has added.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    next_id: u64,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node, assigning it a fresh [`ObjectId`].
    pub fn add(&mut self, mut node: SceneNode) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        node.id = id;
        self.nodes.push(node);
        id
    }

    /// Removes a node, returning it if it was present.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneNode> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        Some(self.nodes.remove(index))
    }

    /// Returns a reference to a node.
    pub fn get(&self, id: ObjectId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Returns a mutable reference to a node.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Iterates over all nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter()
    }

    /// The number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the scene holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Counts nodes matching a predicate on their kind.
    pub fn count_where(&self, pred: impl Fn(&SceneNodeKind) -> bool) -> usize {
        self.nodes.iter().filter(|n| pred(&n.kind)).count()
    }
}
