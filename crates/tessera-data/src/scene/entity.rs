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

//! Non-owning entity views.
//!
//! An entity is an in-memory key plus a borrow of its scene. The borrow
//! checker enforces that a view never outlives the scene, and that nothing
//! else touches the scene while a mutable view is alive.

use std::fmt;

use tessera_core::ecs::{EntityHandle, EntityId};
use tessera_core::SceneContext;

use super::{EntityMetadata, Scene};
use crate::ecs::Component;

fn absent<C: Component>(id: EntityId) -> ! {
    panic!("access of absent component `{}` on entity {id}", C::NAME)
}

fn metadata_of(scene: &Scene, id: EntityId) -> &EntityMetadata {
    scene
        .world
        .get::<EntityMetadata>(id)
        .unwrap_or_else(|| panic!("entity {id} is not alive in scene `{}`", scene.name()))
}

/// A read-only view of one entity.
///
/// Two views are equal iff their in-memory keys are equal. Keys are not
/// stable across save/load; compare GUIDs for that.
#[derive(Clone, Copy)]
pub struct Entity<'s> {
    id: EntityId,
    scene: &'s Scene,
}

impl<'s> Entity<'s> {
    pub(crate) fn new(id: EntityId, scene: &'s Scene) -> Self {
        Self { id, scene }
    }

    /// The in-memory key.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The owning scene.
    pub fn scene(&self) -> &'s Scene {
        self.scene
    }

    /// The entity's metadata record.
    pub fn metadata(&self) -> &'s EntityMetadata {
        metadata_of(self.scene, self.id)
    }

    /// The durable identity.
    pub fn guid(&self) -> &'s EntityHandle {
        self.metadata().guid()
    }

    /// The display name.
    pub fn name(&self) -> &'s str {
        &self.metadata().name
    }

    /// Resolves the parent GUID through the scene.
    pub fn parent(&self) -> Option<Entity<'s>> {
        self.scene.get(&self.metadata().parent_entity)
    }

    /// Returns `true` if the entity carries a `C`.
    pub fn has<C: Component>(&self) -> bool {
        self.scene.world.contains::<C>(self.id)
    }

    /// Returns the entity's `C`, if any.
    pub fn try_get<C: Component>(&self) -> Option<&'s C> {
        self.scene.world.get::<C>(self.id)
    }

    /// Returns the entity's `C`.
    ///
    /// # Panics
    ///
    /// If the entity has no `C`.
    pub fn get<C: Component>(&self) -> &'s C {
        self.try_get::<C>().unwrap_or_else(|| absent::<C>(self.id))
    }
}

impl PartialEq for Entity<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity<'_> {}

impl fmt::Debug for Entity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("guid", self.guid())
            .finish()
    }
}

/// A mutable view of one entity, carrying the context its hooks need.
pub struct EntityMut<'s> {
    id: EntityId,
    scene: &'s mut Scene,
    ctx: &'s mut SceneContext,
}

impl<'s> EntityMut<'s> {
    pub(crate) fn new(id: EntityId, scene: &'s mut Scene, ctx: &'s mut SceneContext) -> Self {
        Self { id, scene, ctx }
    }

    /// The in-memory key.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Reborrows as a read-only view.
    pub fn as_entity(&self) -> Entity<'_> {
        Entity::new(self.id, &*self.scene)
    }

    /// The owning scene.
    pub fn scene(&self) -> &Scene {
        &*self.scene
    }

    /// The scene context (GUID generator, collaborators).
    pub fn context(&mut self) -> &mut SceneContext {
        &mut *self.ctx
    }

    /// The entity's metadata record.
    pub fn metadata(&self) -> &EntityMetadata {
        metadata_of(&*self.scene, self.id)
    }

    /// The entity's metadata record, mutably. The GUID stays read-only.
    pub fn metadata_mut(&mut self) -> &mut EntityMetadata {
        let id = self.id;
        match self.scene.world.get_mut::<EntityMetadata>(id) {
            Some(meta) => meta,
            None => panic!("entity {id} is not alive"),
        }
    }

    /// The durable identity.
    pub fn guid(&self) -> &EntityHandle {
        self.metadata().guid()
    }

    /// Sets or clears the parent.
    pub fn set_parent(&mut self, parent: Option<&EntityHandle>) {
        self.metadata_mut().parent_entity = parent.cloned().unwrap_or_default();
    }

    /// Returns `true` if the entity carries a `C`.
    pub fn has<C: Component>(&self) -> bool {
        self.scene.world.contains::<C>(self.id)
    }

    /// Returns the entity's `C`, if any.
    pub fn try_get<C: Component>(&self) -> Option<&C> {
        self.scene.world.get::<C>(self.id)
    }

    /// Returns the entity's `C`, mutably, if any.
    pub fn try_get_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.scene.world.get_mut::<C>(self.id)
    }

    /// Returns the entity's `C`.
    ///
    /// # Panics
    ///
    /// If the entity has no `C`.
    pub fn get<C: Component>(&self) -> &C {
        self.try_get::<C>().unwrap_or_else(|| absent::<C>(self.id))
    }

    /// Returns the entity's `C`, mutably.
    ///
    /// # Panics
    ///
    /// If the entity has no `C`.
    pub fn get_mut<C: Component>(&mut self) -> &mut C {
        let id = self.id;
        self.try_get_mut::<C>().unwrap_or_else(|| absent::<C>(id))
    }

    /// Stores `component`, then runs `C::on_added` once.
    ///
    /// # Panics
    ///
    /// If the entity already has a `C`.
    pub fn add_component<C: Component>(&mut self, component: C) -> &mut C {
        if self.has::<C>() {
            panic!(
                "component `{}` is already attached to entity {}",
                C::NAME,
                self.id
            );
        }
        if self.scene.world.insert(self.id, component).is_err() {
            panic!("entity {} is not alive", self.id);
        }
        log::trace!("on_added {} -> {}", C::NAME, self.id);
        C::on_added(self);
        self.get_mut::<C>()
    }

    /// Runs `C::on_removed` once while the component is still attached,
    /// then erases it and returns the final value.
    ///
    /// # Panics
    ///
    /// If the entity has no `C`.
    pub fn remove_component<C: Component>(&mut self) -> C {
        if !self.has::<C>() {
            absent::<C>(self.id);
        }
        log::trace!("on_removed {} -> {}", C::NAME, self.id);
        C::on_removed(self);
        let id = self.id;
        self.scene
            .world
            .remove::<C>(id)
            .unwrap_or_else(|| absent::<C>(id))
    }
}

impl fmt::Debug for EntityMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityMut")
            .field("id", &self.id)
            .field("guid", self.guid())
            .finish()
    }
}
