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

//! Type-erased component columns.

use std::any::Any;
use std::collections::HashMap;

use tessera_core::ecs::EntityId;

/// Operations the `World` needs on a column without knowing its element type.
pub(crate) trait AnyColumn: Send + Sync {
    /// Casts the trait object to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Casts the trait object to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Drops the value owned by `id`, if any.
    fn erase(&mut self, id: EntityId) -> bool;
}

/// Dense storage for every value of one type `T`.
///
/// Values are packed in `data`; `owners[i]` is the entity owning
/// `data[i]`, and `rows` maps an entity index back to its row. Removal
/// uses `swap_remove` and patches the row of the moved value.
pub(crate) struct Column<T> {
    data: Vec<T>,
    owners: Vec<EntityId>,
    rows: HashMap<u32, usize>,
}

impl<T> Default for Column<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            owners: Vec::new(),
            rows: HashMap::new(),
        }
    }
}

impl<T: Send + Sync + 'static> Column<T> {
    fn row(&self, id: EntityId) -> Option<usize> {
        self.rows
            .get(&id.index)
            .copied()
            .filter(|&row| self.owners[row] == id)
    }

    /// Stores `value` for `id`, returning the value it replaced.
    pub fn insert(&mut self, id: EntityId, value: T) -> Option<T> {
        if let Some(row) = self.row(id) {
            return Some(std::mem::replace(&mut self.data[row], value));
        }
        // A stale row from an older generation of this index is dropped first.
        if let Some(&row) = self.rows.get(&id.index) {
            let stale = self.owners[row];
            self.remove(stale);
        }
        self.rows.insert(id.index, self.data.len());
        self.owners.push(id);
        self.data.push(value);
        None
    }

    /// Removes and returns the value owned by `id`.
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let row = self.row(id)?;
        self.rows.remove(&id.index);
        self.owners.swap_remove(row);
        let value = self.data.swap_remove(row);
        if let Some(moved) = self.owners.get(row) {
            self.rows.insert(moved.index, row);
        }
        Some(value)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.row(id).map(|row| &self.data[row])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.row(id).map(move |row| &mut self.data[row])
    }
}

impl<T: Send + Sync + 'static> AnyColumn for Column<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn erase(&mut self, id: EntityId) -> bool {
        self.remove(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: u32, generation: u32) -> EntityId {
        EntityId { index, generation }
    }

    #[test]
    fn test_swap_remove_keeps_rows_consistent() {
        let mut column = Column::<&'static str>::default();
        column.insert(id(0, 0), "a");
        column.insert(id(1, 0), "b");
        column.insert(id(2, 0), "c");

        assert_eq!(column.remove(id(0, 0)), Some("a"));
        assert_eq!(column.get(id(2, 0)), Some(&"c"));
        assert_eq!(column.get(id(1, 0)), Some(&"b"));
        assert_eq!(column.data.len(), 2);
    }

    #[test]
    fn test_stale_generation_does_not_match() {
        let mut column = Column::<u8>::default();
        column.insert(id(3, 0), 7);
        assert_eq!(column.get(id(3, 1)), None);

        // Reusing the index with a new generation evicts the stale value.
        assert_eq!(column.insert(id(3, 1), 9), None);
        assert_eq!(column.get(id(3, 0)), None);
        assert_eq!(column.get(id(3, 1)), Some(&9));
        assert_eq!(column.data.len(), 1);
    }

    #[test]
    fn test_insert_replaces_existing_value() {
        let mut column = Column::<u8>::default();
        assert_eq!(column.insert(id(0, 0), 1), None);
        assert_eq!(column.insert(id(0, 0), 2), Some(1));
        assert_eq!(column.get(id(0, 0)), Some(&2));
    }
}
