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

use super::Asset;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// An opaque, typed, copyable reference to a resource of kind `T`.
///
/// The handle never owns the resource. Equality and hashing only look at the
/// id. Id `0` is the sentinel for "invalid/unset" and is what
/// [`Default`] produces.
///
/// In every scene format a handle is written as `{"guid": "<id>"}`.
pub struct AssetHandle<T: Asset> {
    id: u32,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Asset> AssetHandle<T> {
    /// The invalid handle.
    pub const INVALID: Self = Self::new(0);

    /// Creates a handle from a raw id. This is typically called by the asset
    /// collaborator when the resource is registered or loaded.
    pub const fn new(id: u32) -> Self {
        Self {
            id,
            _kind: PhantomData,
        }
    }

    /// Returns the raw id.
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Returns `true` unless this is the `0` sentinel.
    pub const fn is_valid(&self) -> bool {
        self.id != 0
    }
}

impl<T: Asset> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Asset> Copy for AssetHandle<T> {}

impl<T: Asset> Default for AssetHandle<T> {
    fn default() -> Self {
        Self::INVALID
    }
}

impl<T: Asset> PartialEq for AssetHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: Asset> Eq for AssetHandle<T> {}

impl<T: Asset> Hash for AssetHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T: Asset> fmt::Debug for AssetHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = std::any::type_name::<T>();
        let kind = kind.rsplit("::").next().unwrap_or(kind);
        write!(f, "AssetHandle<{kind}>({})", self.id)
    }
}

#[derive(Serialize, Deserialize)]
struct HandleRepr {
    guid: String,
}

impl<T: Asset> Serialize for AssetHandle<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        HandleRepr {
            guid: self.id.to_string(),
        }
        .serialize(serializer)
    }
}

impl<'de, T: Asset> Deserialize<'de> for AssetHandle<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = HandleRepr::deserialize(deserializer)?;
        if repr.guid.is_empty() {
            return Ok(Self::INVALID);
        }
        repr.guid
            .parse::<u32>()
            .map(Self::new)
            .map_err(|_| de::Error::custom(format!("invalid asset guid `{}`", repr.guid)))
    }
}
