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

use std::collections::HashMap;

use tessera_core::asset::Asset;
use tessera_core::ecs::{EntityHandle, EntityId};
use tessera_core::SceneContext;

use super::{Entity, EntityMetadata, EntityMut, SceneError};
use crate::ecs::{ComponentRegistry, ComponentValue, World};

/// A named collection of entities and the store that owns their components.
///
/// The scene exclusively owns its [`World`]. It also keeps the entity order
/// (creation order, or file order after a load) and a GUID lookup map, which
/// is the only supported way to follow a durable reference such as a parent
/// link.
pub struct Scene {
    name: String,
    pub(crate) world: World,
    entities: Vec<EntityId>,
    guid_map: HashMap<EntityHandle, EntityId>,
}

impl Asset for Scene {}

impl Scene {
    /// Creates an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            world: World::default(),
            entities: Vec::new(),
            guid_map: HashMap::new(),
        }
    }

    /// The informational name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the scene.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if the scene has no entity.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Resolves a GUID. `None` is the "no such entity" sentinel; the empty
    /// handle never resolves.
    pub fn get(&self, guid: &EntityHandle) -> Option<Entity<'_>> {
        self.guid_map
            .get(guid)
            .map(|&id| Entity::new(id, self))
    }

    /// Resolves a GUID to a mutable view.
    pub fn get_mut<'s>(
        &'s mut self,
        ctx: &'s mut SceneContext,
        guid: &EntityHandle,
    ) -> Option<EntityMut<'s>> {
        let id = *self.guid_map.get(guid)?;
        Some(EntityMut::new(id, self, ctx))
    }

    /// Returns `true` if an entity has this GUID.
    pub fn contains(&self, guid: &EntityHandle) -> bool {
        self.guid_map.contains_key(guid)
    }

    /// Looks an entity up by in-memory key.
    pub fn entity(&self, id: EntityId) -> Option<Entity<'_>> {
        self.world.is_alive(id).then(|| Entity::new(id, self))
    }

    /// Looks an entity up by in-memory key, mutably.
    pub fn entity_mut<'s>(
        &'s mut self,
        ctx: &'s mut SceneContext,
        id: EntityId,
    ) -> Option<EntityMut<'s>> {
        if !self.world.is_alive(id) {
            return None;
        }
        Some(EntityMut::new(id, self, ctx))
    }

    /// Iterates over entities in scene order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Entity<'_>> + '_ {
        self.entities.iter().map(move |&id| Entity::new(id, self))
    }

    /// First entity, in scene order, with this name.
    pub fn find_by_name(&self, name: &str) -> Option<Entity<'_>> {
        self.iter().find(|entity| entity.name() == name)
    }

    /// Direct children of `parent`, in scene order.
    pub fn children_of(&self, parent: &EntityHandle) -> Vec<Entity<'_>> {
        if parent.is_none() {
            return Vec::new();
        }
        self.iter()
            .filter(|entity| &entity.metadata().parent_entity == parent)
            .collect()
    }

    fn fresh_guid(&self, ctx: &mut SceneContext) -> EntityHandle {
        loop {
            let guid = ctx.next_guid();
            if !self.guid_map.contains_key(&guid) {
                return guid;
            }
        }
    }

    /// Creates a root entity with a freshly generated GUID.
    pub fn create_entity<'s>(
        &'s mut self,
        ctx: &'s mut SceneContext,
        name: impl Into<String>,
    ) -> EntityMut<'s> {
        let guid = self.fresh_guid(ctx);
        let id = self.insert_entity(EntityMetadata::new(guid, name));
        EntityMut::new(id, self, ctx)
    }

    /// Creates a root entity with a caller-chosen GUID.
    ///
    /// An empty `guid` gets a generated one. A GUID already used in this
    /// scene is rejected.
    pub fn create_entity_with_guid<'s>(
        &'s mut self,
        ctx: &'s mut SceneContext,
        guid: EntityHandle,
        name: impl Into<String>,
    ) -> Result<EntityMut<'s>, SceneError> {
        let guid = if guid.is_none() {
            self.fresh_guid(ctx)
        } else {
            guid
        };
        if self.guid_map.contains_key(&guid) {
            return Err(SceneError::DuplicateGuid(guid));
        }
        let id = self.insert_entity(EntityMetadata::new(guid, name));
        Ok(EntityMut::new(id, self, ctx))
    }

    /// Destroys an entity.
    ///
    /// Every catalogue component is detached first, in reverse catalogue
    /// order, so each `on_removed` hook runs. Children keep their (now
    /// dangling) parent link; [`Scene::validate`] reports it.
    pub fn destroy_entity(
        &mut self,
        ctx: &mut SceneContext,
        registry: &ComponentRegistry,
        guid: &EntityHandle,
    ) -> bool {
        let Some(id) = self.guid_map.get(guid).copied() else {
            return false;
        };
        {
            let mut entity = EntityMut::new(id, self, ctx);
            for descriptor in registry.iter().rev() {
                if descriptor.present(entity.as_entity()) {
                    descriptor.detach(&mut entity);
                }
            }
        }
        self.world.despawn(id);
        self.entities.retain(|&other| other != id);
        self.guid_map.remove(guid);
        log::debug!("Destroyed entity {guid} in scene `{}`", self.name);
        true
    }

    /// Destroys every entity, last first.
    pub fn clear(&mut self, ctx: &mut SceneContext, registry: &ComponentRegistry) {
        let guids: Vec<EntityHandle> = self.iter().rev().map(|e| e.guid().clone()).collect();
        for guid in &guids {
            self.destroy_entity(ctx, registry, guid);
        }
    }

    /// Copies an entity and all of its catalogue components under a fresh
    /// GUID. The copy keeps the original's parent; children are not copied.
    ///
    /// Returns the GUID of the copy.
    pub fn duplicate_entity(
        &mut self,
        ctx: &mut SceneContext,
        registry: &ComponentRegistry,
        guid: &EntityHandle,
    ) -> Option<EntityHandle> {
        let source = self.get(guid)?;
        let meta = source.metadata().clone();
        let copies: Vec<(usize, ComponentValue)> = registry
            .iter()
            .enumerate()
            .filter_map(|(index, descriptor)| {
                descriptor.get_copy(source).map(|value| (index, value))
            })
            .collect();

        let mut copy = self.create_entity(ctx, meta.name.clone());
        {
            let copy_meta = copy.metadata_mut();
            copy_meta.tag = meta.tag;
            copy_meta.active = meta.active;
            copy_meta.parent_entity = meta.parent_entity;
        }
        let descriptors: Vec<_> = registry.iter().collect();
        for (index, value) in copies {
            descriptors[index].attach(&mut copy, value);
        }
        Some(copy.guid().clone())
    }

    fn insert_entity(&mut self, meta: EntityMetadata) -> EntityId {
        let guid = meta.guid().clone();
        let id = self.spawn_detached(meta);
        self.entities.push(id);
        self.guid_map.insert(guid, id);
        id
    }

    /// Allocates an entity carrying `meta` without listing it or mapping its
    /// GUID. Loaders list and map all restored entities at once with
    /// [`commit`](Self::commit).
    pub(crate) fn spawn_detached(&mut self, meta: EntityMetadata) -> EntityId {
        let id = self.world.spawn();
        let inserted = self.world.insert(id, meta);
        debug_assert!(inserted.is_ok(), "a freshly spawned entity is alive");
        id
    }

    /// Replaces the entity order and the GUID map in one step.
    pub(crate) fn commit(
        &mut self,
        order: Vec<EntityId>,
        guid_map: HashMap<EntityHandle, EntityId>,
    ) {
        self.entities = order;
        self.guid_map = guid_map;
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("entities", &self.entities.len())
            .finish()
    }
}
