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

//! Owns the loaded scenes and the active-scene switch.
//!
//! Scenes live in an [`Assets<Scene>`] store and are referred to by
//! [`AssetHandle<Scene>`], the same handle a `SubScene` component carries.
//! Switching the active scene runs the dependent handshake: every
//! [`SceneDependent`] is cleared and rebuilt from the new scene.

mod dependent;

pub use dependent::SceneDependent;

use std::{path::Path, sync::Arc};

use tessera_core::{asset::AssetHandle, scene::SceneFormat, SceneContext};
use tessera_data::{assets::Assets, ecs::ComponentRegistry, scene::Scene};
use thiserror::Error;

use crate::serialization_agent::{AgentError, SerializationAgent};

/// An error raised by the [`SceneManager`].
#[derive(Debug, Error)]
pub enum SceneManagerError {
    /// The handle does not refer to a scene held by this manager.
    #[error("no loaded scene behind handle {0}")]
    UnknownScene(u32),
    /// Loading or saving failed.
    #[error(transparent)]
    Agent(#[from] AgentError),
}

/// Holds every loaded scene, the active one, and the subsystems that must
/// follow it.
pub struct SceneManager {
    scenes: Assets<Scene>,
    active: Option<AssetHandle<Scene>>,
    context: SceneContext,
    registry: Arc<ComponentRegistry>,
    serializer: SerializationAgent,
    dependents: Vec<Box<dyn SceneDependent>>,
}

impl SceneManager {
    /// Creates a manager over the global component catalogue.
    pub fn new(context: SceneContext) -> Self {
        Self::with_registry(context, ComponentRegistry::global())
    }

    /// Creates a manager over a custom catalogue.
    pub fn with_registry(context: SceneContext, registry: Arc<ComponentRegistry>) -> Self {
        Self {
            scenes: Assets::new(),
            active: None,
            context,
            registry,
            serializer: SerializationAgent::new(),
            dependents: Vec::new(),
        }
    }

    /// Replaces the serialization agent, e.g. to apply loaded settings.
    pub fn with_serializer(mut self, serializer: SerializationAgent) -> Self {
        self.serializer = serializer;
        self
    }

    /// The catalogue used for every load, save and teardown.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// The context handed to component hooks.
    pub fn context(&self) -> &SceneContext {
        &self.context
    }

    /// The context handed to component hooks, mutably.
    pub fn context_mut(&mut self) -> &mut SceneContext {
        &mut self.context
    }

    /// The serialization agent.
    pub fn serializer(&self) -> &SerializationAgent {
        &self.serializer
    }

    /// Creates a fresh, empty scene. It is not held by the manager until
    /// passed to [`add_scene`](Self::add_scene).
    pub fn create_scene(&self, name: impl Into<String>) -> Scene {
        Scene::new(name)
    }

    /// Takes ownership of `scene` and returns its handle.
    pub fn add_scene(&mut self, scene: Scene) -> AssetHandle<Scene> {
        let handle = self.scenes.insert(scene);
        log::debug!("Added scene {}", handle.id());
        handle
    }

    /// Number of scenes held.
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Returns the scene behind `handle`.
    pub fn scene(&self, handle: AssetHandle<Scene>) -> Option<&Scene> {
        self.scenes.get(handle)
    }

    /// Returns the scene behind `handle`, mutably.
    ///
    /// Dependents are not notified of edits; call
    /// [`refresh_dependents`](Self::refresh_dependents) after changing the
    /// active scene's entities.
    pub fn scene_mut(&mut self, handle: AssetHandle<Scene>) -> Option<&mut Scene> {
        self.scenes.get_mut(handle)
    }

    /// The handle of the active scene.
    pub fn active_handle(&self) -> Option<AssetHandle<Scene>> {
        self.active
    }

    /// The active scene.
    pub fn active_scene(&self) -> Option<&Scene> {
        self.active.and_then(|handle| self.scenes.get(handle))
    }

    /// The active scene together with the context its hooks need.
    pub fn active_scene_mut(&mut self) -> Option<(&mut Scene, &mut SceneContext)> {
        let handle = self.active?;
        let scene = self.scenes.get_mut(handle)?;
        Some((scene, &mut self.context))
    }

    /// Makes the scene behind `handle` the active one and runs the
    /// dependent handshake.
    ///
    /// The handshake completes before this returns, so no dependent ever
    /// holds an index into the previous scene once the new one is visible.
    pub fn set_active_scene(
        &mut self,
        handle: AssetHandle<Scene>,
    ) -> Result<(), SceneManagerError> {
        let scene = self
            .scenes
            .get(handle)
            .ok_or(SceneManagerError::UnknownScene(handle.id()))?;

        for dependent in &mut self.dependents {
            dependent.clear();
            dependent.rebuild(scene);
            log::trace!("Rebuilt {} for scene `{}`", dependent.name(), scene.name());
        }
        self.active = Some(handle);
        log::info!(
            "Active scene is now `{}` ({} entities)",
            scene.name(),
            scene.len()
        );
        Ok(())
    }

    /// Re-runs the handshake against the current active scene.
    pub fn refresh_dependents(&mut self) {
        let active = self.active.and_then(|handle| self.scenes.get(handle));
        for dependent in &mut self.dependents {
            dependent.clear();
            if let Some(scene) = active {
                dependent.rebuild(scene);
            }
        }
    }

    /// Registers a dependent subsystem and builds it from the active scene,
    /// if there is one.
    pub fn register_dependent(&mut self, mut dependent: impl SceneDependent) {
        if let Some(scene) = self.active_scene() {
            dependent.rebuild(scene);
        }
        log::debug!("Registered scene dependent {}", dependent.name());
        self.dependents.push(Box::new(dependent));
    }

    /// Returns the registered dependent of type `T`.
    pub fn dependent<T: SceneDependent>(&self) -> Option<&T> {
        self.dependents
            .iter()
            .find_map(|dependent| dependent.as_any().downcast_ref::<T>())
    }

    /// Returns the registered dependent of type `T`, mutably.
    pub fn dependent_mut<T: SceneDependent>(&mut self) -> Option<&mut T> {
        self.dependents
            .iter_mut()
            .find_map(|dependent| dependent.as_any_mut().downcast_mut::<T>())
    }

    /// Loads the scene file at `path` and returns its handle. The scene is
    /// not activated.
    pub fn load_scene(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<AssetHandle<Scene>, SceneManagerError> {
        let scene = self
            .serializer
            .load_from_path(path, &mut self.context, &self.registry)?;
        Ok(self.add_scene(scene))
    }

    /// Saves the scene behind `handle` to `path`. Returns the format used.
    pub fn save_scene(
        &self,
        handle: AssetHandle<Scene>,
        path: impl AsRef<Path>,
    ) -> Result<SceneFormat, SceneManagerError> {
        let scene = self
            .scenes
            .get(handle)
            .ok_or(SceneManagerError::UnknownScene(handle.id()))?;
        Ok(self.serializer.save_to_path(scene, &self.registry, path)?)
    }

    /// Drops the scene behind `handle`.
    ///
    /// Every component is detached first, so its `on_removed` hook releases
    /// whatever it holds. Unloading the active scene leaves no active scene
    /// and clears every dependent.
    pub fn unload_scene(&mut self, handle: AssetHandle<Scene>) -> Result<(), SceneManagerError> {
        let mut scene = self
            .scenes
            .remove(handle)
            .ok_or(SceneManagerError::UnknownScene(handle.id()))?;

        if self.active == Some(handle) {
            self.active = None;
            for dependent in &mut self.dependents {
                dependent.clear();
            }
        }
        scene.clear(&mut self.context, &self.registry);
        log::info!("Unloaded scene `{}`", scene.name());
        Ok(())
    }
}

impl std::fmt::Debug for SceneManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneManager")
            .field("scenes", &self.scenes.len())
            .field("active", &self.active)
            .field(
                "dependents",
                &self.dependents.iter().map(|d| d.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
