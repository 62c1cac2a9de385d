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

//! A generic, type-safe in-memory store for one kind of asset.

use std::collections::HashMap;

use tessera_core::asset::{Asset, AssetHandle, AssetResolver};

/// An in-memory store for assets of type `A`, keyed by handle.
///
/// Ids are allocated from 1 and never reused, so the invalid handle never
/// resolves and a handle to a removed asset stays dangling instead of
/// silently pointing at a newer asset.
pub struct Assets<A: Asset> {
    storage: HashMap<u32, A>,
    next_id: u32,
}

impl<A: Asset> Default for Assets<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Asset> Assets<A> {
    /// Creates a new, empty asset storage.
    pub fn new() -> Self {
        Self {
            storage: HashMap::new(),
            next_id: 1,
        }
    }

    /// Stores `asset` and returns its new handle.
    ///
    /// # Panics
    ///
    /// If the id space is exhausted.
    pub fn insert(&mut self, asset: A) -> AssetHandle<A> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .unwrap_or_else(|| panic!("asset id space exhausted"));
        self.storage.insert(id, asset);
        AssetHandle::new(id)
    }

    /// Retrieves the asset behind `handle`.
    pub fn get(&self, handle: AssetHandle<A>) -> Option<&A> {
        self.storage.get(&handle.id())
    }

    /// Retrieves the asset behind `handle`, mutably.
    pub fn get_mut(&mut self, handle: AssetHandle<A>) -> Option<&mut A> {
        self.storage.get_mut(&handle.id())
    }

    /// Removes and returns the asset behind `handle`.
    pub fn remove(&mut self, handle: AssetHandle<A>) -> Option<A> {
        self.storage.remove(&handle.id())
    }

    /// Checks if `handle` currently resolves.
    pub fn contains(&self, handle: AssetHandle<A>) -> bool {
        self.storage.contains_key(&handle.id())
    }

    /// Number of stored assets.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Iterates over stored assets, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (AssetHandle<A>, &A)> + '_ {
        self.storage.iter().map(|(&id, asset)| (AssetHandle::new(id), asset))
    }
}

impl<A: Asset> AssetResolver<A> for Assets<A> {
    type Resource = A;

    fn resolve(&self, handle: AssetHandle<A>) -> Option<&A> {
        self.get(handle)
    }
}
