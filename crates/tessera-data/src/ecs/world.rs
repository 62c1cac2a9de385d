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

//! The backing store owned by a scene.

use std::any::TypeId;
use std::collections::HashMap;

use tessera_core::ecs::EntityId;

use super::entity_store::EntityStore;
use super::storage::{AnyColumn, Column};

/// The backing store: entity slots plus one column per stored value type.
///
/// The `World` is deliberately unaware of the component catalogue and of
/// hooks. It only stores values; the scene layer enforces lifecycle rules on
/// top of it.
#[derive(Default)]
pub struct World {
    entities: EntityStore,
    columns: HashMap<TypeId, Box<dyn AnyColumn>>,
}

impl World {
    /// Allocates a new, empty entity.
    pub fn spawn(&mut self) -> EntityId {
        self.entities.allocate()
    }

    /// Drops every value owned by `id` and frees its slot.
    ///
    /// Returns `false` if `id` was not alive.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if !self.entities.free(id) {
            return false;
        }
        for column in self.columns.values_mut() {
            column.erase(id);
        }
        true
    }

    /// Returns `true` if `id` is alive in this world.
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.is_alive(id)
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entity is alive.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over live entity ids in slot order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter()
    }

    fn column<T: Send + Sync + 'static>(&self) -> Option<&Column<T>> {
        self.columns
            .get(&TypeId::of::<T>())
            .and_then(|column| column.as_any().downcast_ref::<Column<T>>())
    }

    fn column_mut<T: Send + Sync + 'static>(&mut self) -> Option<&mut Column<T>> {
        self.columns
            .get_mut(&TypeId::of::<T>())
            .and_then(|column| column.as_any_mut().downcast_mut::<Column<T>>())
    }

    /// Stores `value` on `id`, returning any value of the same type it replaced.
    ///
    /// Returns `Err(value)` if `id` is not alive.
    pub fn insert<T: Send + Sync + 'static>(
        &mut self,
        id: EntityId,
        value: T,
    ) -> Result<Option<T>, T> {
        if !self.is_alive(id) {
            return Err(value);
        }
        let column = self
            .columns
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(Column::<T>::default()));
        match column.as_any_mut().downcast_mut::<Column<T>>() {
            Some(column) => Ok(column.insert(id, value)),
            None => Err(value),
        }
    }

    /// Removes and returns the value of type `T` owned by `id`.
    pub fn remove<T: Send + Sync + 'static>(&mut self, id: EntityId) -> Option<T> {
        self.column_mut::<T>()?.remove(id)
    }

    /// Returns the value of type `T` owned by `id`.
    pub fn get<T: Send + Sync + 'static>(&self, id: EntityId) -> Option<&T> {
        self.column::<T>()?.get(id)
    }

    /// Returns the value of type `T` owned by `id`, mutably.
    pub fn get_mut<T: Send + Sync + 'static>(&mut self, id: EntityId) -> Option<&mut T> {
        self.column_mut::<T>()?.get_mut(id)
    }

    /// Returns `true` if `id` owns a value of type `T`.
    pub fn contains<T: Send + Sync + 'static>(&self, id: EntityId) -> bool {
        self.get::<T>(id).is_some()
    }
}
