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

//! The explicit context threaded through scene operations.
//!
//! Scenes, entities and loaders never reach for process-wide state. Whatever
//! they need from the outside (fresh GUIDs, the physics collaborator) is
//! carried by a [`SceneContext`] passed in by the caller.

use std::fmt;

use crate::ecs::{EntityHandle, IdGenerator, SeededIdGenerator, UuidGenerator};
use crate::physics::PhysicsProvider;

/// Capabilities available to scene operations and component hooks.
pub struct SceneContext {
    ids: Box<dyn IdGenerator>,
    physics: Option<Box<dyn PhysicsProvider>>,
}

impl SceneContext {
    /// Creates a context with random GUIDs and no physics collaborator.
    pub fn new() -> Self {
        Self {
            ids: Box::new(UuidGenerator),
            physics: None,
        }
    }

    /// Creates a context whose GUIDs are a deterministic function of `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new().with_id_generator(SeededIdGenerator::new(seed))
    }

    /// Replaces the GUID generator.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Installs a physics collaborator.
    pub fn with_physics(mut self, physics: impl PhysicsProvider + 'static) -> Self {
        self.physics = Some(Box::new(physics));
        self
    }

    /// Mints a fresh entity GUID.
    pub fn next_guid(&mut self) -> EntityHandle {
        self.ids.generate()
    }

    /// The physics collaborator, if one is installed.
    pub fn physics(&self) -> Option<&(dyn PhysicsProvider + 'static)> {
        self.physics.as_deref()
    }

    /// Mutable access to the physics collaborator, if one is installed.
    pub fn physics_mut(&mut self) -> Option<&mut (dyn PhysicsProvider + 'static)> {
        self.physics.as_deref_mut()
    }
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SceneContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneContext")
            .field("physics", &self.physics.is_some())
            .finish_non_exhaustive()
    }
}
