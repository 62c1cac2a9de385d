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

//! Internal entity slot allocation.

use tessera_core::ecs::EntityId;

/// Internal manager for entity slots.
///
/// The `EntityStore` hands out `EntityId`s and recycles the indices of
/// despawned entities through a free list. Recycling bumps the slot's
/// generation, so ids held across a despawn stop matching.
#[derive(Debug, Clone, Default)]
pub(crate) struct EntityStore {
    /// Every slot that has ever been allocated, with its current id and
    /// whether it is alive.
    slots: Vec<(EntityId, bool)>,
    /// Indices available for reuse.
    freed: Vec<u32>,
    alive: usize,
}

impl EntityStore {
    /// Allocates a new or recycled `EntityId`.
    pub fn allocate(&mut self) -> EntityId {
        self.alive += 1;
        if let Some(index) = self.freed.pop() {
            let (id, live) = &mut self.slots[index as usize];
            id.generation += 1;
            *live = true;
            *id
        } else {
            let id = EntityId {
                index: self.slots.len() as u32,
                generation: 0,
            };
            self.slots.push((id, true));
            id
        }
    }

    /// Frees the slot of `id`. Returns `false` if `id` was not alive.
    pub fn free(&mut self, id: EntityId) -> bool {
        match self.slots.get_mut(id.index as usize) {
            Some((slot_id, live)) if *live && *slot_id == id => {
                *live = false;
                self.freed.push(id.index);
                self.alive -= 1;
                true
            }
            _ => false,
        }
    }

    /// Returns `true` if `id` names a live entity of the current generation.
    pub fn is_alive(&self, id: EntityId) -> bool {
        matches!(self.slots.get(id.index as usize), Some((slot_id, true)) if *slot_id == id)
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.alive
    }

    /// Iterates over live ids in slot order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots
            .iter()
            .filter_map(|(id, live)| live.then_some(*id))
    }
}
