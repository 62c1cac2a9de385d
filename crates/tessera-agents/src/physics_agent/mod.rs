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

//! Acts as the agent for the physics subsystem on the scene side.
//!
//! The physics collaborator reports events in terms of its own
//! [`RigidBodyHandle`]s. [`PhysicsBodyIndex`] maps those back to the
//! entities of the active scene, and is rebuilt on every scene switch.

use std::{any::Any, collections::HashMap};

use tessera_core::{ecs::EntityId, physics::RigidBodyHandle};
use tessera_data::{ecs::RigidBody, scene::Scene};

use crate::scene_manager::SceneDependent;

/// Maps physics bodies to the in-memory keys of the entities owning them.
#[derive(Debug, Default, Clone)]
pub struct PhysicsBodyIndex {
    bodies: HashMap<RigidBodyHandle, EntityId>,
}

impl PhysicsBodyIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns `true` if no body is indexed.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// The entity owning `body` in the active scene.
    pub fn entity_of(&self, body: RigidBodyHandle) -> Option<EntityId> {
        self.bodies.get(&body).copied()
    }

    /// Returns `true` if `body` is indexed.
    pub fn contains(&self, body: RigidBodyHandle) -> bool {
        self.bodies.contains_key(&body)
    }

    /// All indexed bodies, in no particular order.
    pub fn bodies(&self) -> impl Iterator<Item = RigidBodyHandle> + '_ {
        self.bodies.keys().copied()
    }
}

impl SceneDependent for PhysicsBodyIndex {
    fn name(&self) -> &'static str {
        "PhysicsBodyIndex"
    }

    fn clear(&mut self) {
        self.bodies.clear();
    }

    fn rebuild(&mut self, scene: &Scene) {
        for entity in scene.iter() {
            let Some(handle) = entity.try_get::<RigidBody>().and_then(|body| body.handle) else {
                continue;
            };
            if let Some(previous) = self.bodies.insert(handle, entity.id()) {
                log::warn!("Body {handle:?} is claimed by {previous} and {}", entity.id());
            }
        }
        log::debug!("Indexed {} physics bodies", self.bodies.len());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
