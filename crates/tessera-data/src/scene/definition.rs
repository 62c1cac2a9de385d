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

//! The transient record a scene is flattened into for saving and rebuilt
//! from when loading.

use std::fmt;

use bincode::{Decode, Encode};
use ron::value::RawValue;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{EntityMetadata, SceneError};
use crate::ecs::{
    ArchiveError, BinaryField, Component, ComponentRegistry, ComponentValue, FieldArchive,
    RonField,
};

/// The field under which text formats store an entity's metadata.
pub const METADATA_FIELD: &str = "EntityMetadata";

/// One entity, flattened: its metadata plus one optional slot per catalogue
/// type, in catalogue order.
///
/// A record only makes sense together with the registry it was built
/// against.
#[derive(Debug)]
pub struct SerializedEntity {
    /// The metadata, verbatim.
    pub meta: EntityMetadata,
    /// `components[i]` is the value of the `i`-th catalogue type, if present.
    pub components: Vec<Option<ComponentValue>>,
}

/// The binary form of a [`SerializedEntity`].
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct BinaryRecord {
    /// The metadata, verbatim.
    pub meta: EntityMetadata,
    /// Present components only, in catalogue order.
    pub fields: Vec<BinaryField>,
}

/// The RON form of a [`SerializedEntity`]: a map from field name to the
/// value's own RON text, metadata first, then present components in
/// catalogue order.
#[derive(Debug, Default)]
pub struct RonRecord {
    /// Every entry, in file order.
    pub fields: Vec<RonField>,
}

impl Serialize for RonRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RonRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = RonRecord;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of entity fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RonRecord, A::Error> {
                let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, value)) = map.next_entry::<String, Box<RawValue>>()? {
                    fields.push(RonField { name, value });
                }
                Ok(RonRecord { fields })
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

impl SerializedEntity {
    /// A record with no component.
    pub fn new(meta: EntityMetadata, registry: &ComponentRegistry) -> Self {
        Self {
            meta,
            components: std::iter::repeat_with(|| None).take(registry.len()).collect(),
        }
    }

    /// Fills the slot of `C`.
    ///
    /// # Panics
    ///
    /// If `C` is not in `registry`.
    pub fn set<C: Component>(&mut self, registry: &ComponentRegistry, component: C) {
        let index = registry
            .index_of::<C>()
            .unwrap_or_else(|| panic!("`{}` is not in the component catalogue", C::NAME));
        self.components[index] = Some(ComponentValue::new(component));
    }

    /// Reads the slot of `C`.
    pub fn get<C: Component>(&self, registry: &ComponentRegistry) -> Option<&C> {
        let index = registry.index_of::<C>()?;
        self.components.get(index)?.as_ref()?.downcast_ref::<C>()
    }

    /// Catalogue names of the present components.
    pub fn present_names<'r>(&self, registry: &'r ComponentRegistry) -> Vec<&'r str> {
        registry
            .names()
            .zip(&self.components)
            .filter_map(|(name, slot)| slot.as_ref().map(|_| name))
            .collect()
    }

    /// Writes the record as a text-format object: metadata first, then each
    /// present component under its catalogue name.
    pub fn write_json(
        &mut self,
        registry: &ComponentRegistry,
    ) -> Result<Map<String, Value>, SceneError> {
        let mut map = Map::new();
        let meta = serde_json::to_value(&self.meta).map_err(|source| ArchiveError::Json {
            component: METADATA_FIELD,
            source,
        })?;
        map.insert(METADATA_FIELD.to_owned(), meta);

        let mut archive = FieldArchive::JsonWriter(&mut map);
        for (descriptor, slot) in registry.iter().zip(self.components.iter_mut()) {
            descriptor.serialize_field(&mut archive, slot)?;
        }
        Ok(map)
    }

    /// Reads a text-format object. Unknown fields are skipped with a warning.
    pub fn read_json(
        map: &Map<String, Value>,
        registry: &ComponentRegistry,
    ) -> Result<Self, SceneError> {
        let meta = map.get(METADATA_FIELD).ok_or(SceneError::MissingMetadata)?;
        let meta: EntityMetadata =
            serde_json::from_value(meta.clone()).map_err(|source| ArchiveError::Json {
                component: METADATA_FIELD,
                source,
            })?;

        for key in map.keys() {
            if key != METADATA_FIELD && !registry.contains_name(key) {
                log::warn!("Skipping unknown component `{key}` on entity {}", meta.guid());
            }
        }

        let mut record = Self::new(meta, registry);
        let mut archive = FieldArchive::JsonReader(map);
        for (descriptor, slot) in registry.iter().zip(record.components.iter_mut()) {
            descriptor.serialize_field(&mut archive, slot)?;
        }
        Ok(record)
    }

    /// Writes the record in binary form.
    pub fn write_binary(
        &mut self,
        registry: &ComponentRegistry,
    ) -> Result<BinaryRecord, SceneError> {
        let mut fields = Vec::new();
        let mut archive = FieldArchive::BinaryWriter(&mut fields);
        for (descriptor, slot) in registry.iter().zip(self.components.iter_mut()) {
            descriptor.serialize_field(&mut archive, slot)?;
        }
        Ok(BinaryRecord {
            meta: self.meta.clone(),
            fields,
        })
    }

    /// Reads a binary record. Unknown entries are skipped with a warning.
    pub fn read_binary(
        record: &BinaryRecord,
        registry: &ComponentRegistry,
    ) -> Result<Self, SceneError> {
        for field in &record.fields {
            if !registry.contains_name(&field.name) {
                log::warn!(
                    "Skipping unknown component `{}` on entity {}",
                    field.name,
                    record.meta.guid()
                );
            }
        }

        let mut entity = Self::new(record.meta.clone(), registry);
        let mut archive = FieldArchive::BinaryReader(&record.fields);
        for (descriptor, slot) in registry.iter().zip(entity.components.iter_mut()) {
            descriptor.serialize_field(&mut archive, slot)?;
        }
        Ok(entity)
    }

    /// Writes the record as a RON map. Floats keep their exact value,
    /// including NaN and the infinities.
    pub fn write_ron(&mut self, registry: &ComponentRegistry) -> Result<RonRecord, SceneError> {
        let meta = RawValue::from_rust(&self.meta).map_err(|err| ArchiveError::Ron {
            component: METADATA_FIELD,
            message: err.to_string(),
        })?;
        let mut fields = vec![RonField {
            name: METADATA_FIELD.to_owned(),
            value: meta,
        }];

        let mut archive = FieldArchive::RonWriter(&mut fields);
        for (descriptor, slot) in registry.iter().zip(self.components.iter_mut()) {
            descriptor.serialize_field(&mut archive, slot)?;
        }
        Ok(RonRecord { fields })
    }

    /// Reads a RON map. Unknown fields are skipped with a warning.
    pub fn read_ron(record: &RonRecord, registry: &ComponentRegistry) -> Result<Self, SceneError> {
        let meta = record
            .fields
            .iter()
            .find(|field| field.name == METADATA_FIELD)
            .ok_or(SceneError::MissingMetadata)?;
        let meta: EntityMetadata = meta.value.into_rust().map_err(|err| ArchiveError::Ron {
            component: METADATA_FIELD,
            message: err.to_string(),
        })?;

        for field in &record.fields {
            if field.name != METADATA_FIELD && !registry.contains_name(&field.name) {
                log::warn!(
                    "Skipping unknown component `{}` on entity {}",
                    field.name,
                    meta.guid()
                );
            }
        }

        let mut entity = Self::new(meta, registry);
        let mut archive = FieldArchive::RonReader(&record.fields);
        for (descriptor, slot) in registry.iter().zip(entity.components.iter_mut()) {
            descriptor.serialize_field(&mut archive, slot)?;
        }
        Ok(entity)
    }
}
