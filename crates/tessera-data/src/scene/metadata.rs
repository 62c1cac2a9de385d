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

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use tessera_core::ecs::EntityHandle;

/// The record every live entity carries exactly once.
///
/// It is created together with the entity and removed only when the entity
/// is destroyed. The GUID is fixed at creation; everything else is editable
/// through [`EntityMut::metadata_mut`](super::EntityMut::metadata_mut).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct EntityMetadata {
    #[serde(default)]
    guid: EntityHandle,
    /// Display name. Not required to be unique.
    pub name: String,
    /// Free-form grouping label.
    #[serde(default)]
    pub tag: String,
    /// Inactive entities are skipped by runtime collaborators.
    #[serde(default = "default_active")]
    pub active: bool,
    /// GUID of the parent entity, or the empty handle for a root.
    #[serde(default, rename = "parentEntity")]
    pub parent_entity: EntityHandle,
}

fn default_active() -> bool {
    true
}

impl EntityMetadata {
    /// Creates an active, untagged root record.
    pub fn new(guid: EntityHandle, name: impl Into<String>) -> Self {
        Self {
            guid,
            name: name.into(),
            tag: String::new(),
            active: true,
            parent_entity: EntityHandle::NONE,
        }
    }

    /// The durable identity of the entity.
    pub fn guid(&self) -> &EntityHandle {
        &self.guid
    }

    pub(crate) fn set_guid(&mut self, guid: EntityHandle) {
        self.guid = guid;
    }

    /// Returns `true` if the entity has a parent.
    pub fn has_parent(&self) -> bool {
        self.parent_entity.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_field_names() {
        let mut meta = EntityMetadata::new("g2".into(), "Child");
        meta.parent_entity = "g1".into();
        assert_eq!(
            serde_json::to_value(&meta).unwrap(),
            json!({
                "guid": "g2",
                "name": "Child",
                "tag": "",
                "active": true,
                "parentEntity": "g1",
            })
        );
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let meta: EntityMetadata =
            serde_json::from_value(json!({ "guid": "g1", "name": "Player" })).unwrap();
        assert!(meta.active);
        assert!(meta.tag.is_empty());
        assert!(!meta.has_parent());
    }
}
