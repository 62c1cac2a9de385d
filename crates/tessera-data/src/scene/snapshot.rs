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

//! The two scene-level algorithms every loader is built on.
//!
//! [`capture`] flattens a scene into [`SerializedEntity`] records and
//! [`restore`] rebuilds a scene from them. Both only talk to components
//! through the registry, so new catalogue types need no change here.

use std::collections::{HashMap, HashSet};

use tessera_core::SceneContext;

use super::{EntityMut, Scene, SceneError, SerializedEntity};
use crate::ecs::ComponentRegistry;

/// Flattens `scene` into records, in scene order.
///
/// Parent links are stored as GUIDs already, so nothing is rewritten.
pub fn capture(scene: &Scene, registry: &ComponentRegistry) -> Vec<SerializedEntity> {
    scene
        .iter()
        .map(|entity| SerializedEntity {
            meta: entity.metadata().clone(),
            components: registry
                .iter()
                .map(|descriptor| descriptor.get_copy(entity))
                .collect(),
        })
        .collect()
}

/// Builds a new scene from `records`.
///
/// GUIDs are kept verbatim; only a record with an empty GUID gets a
/// generated one. Every restored component is attached through its
/// descriptor, so its `on_added` hook fires once. The entity order and the
/// GUID map are committed only after every entity exists, and duplicate
/// GUIDs are rejected before anything is created, so a failed restore never
/// runs a hook.
pub fn restore(
    name: impl Into<String>,
    mut records: Vec<SerializedEntity>,
    ctx: &mut SceneContext,
    registry: &ComponentRegistry,
) -> Result<Scene, SceneError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        let guid = record.meta.guid();
        if guid.is_some() && !seen.insert(guid.clone()) {
            return Err(SceneError::DuplicateGuid(guid.clone()));
        }
    }
    for (index, record) in records.iter_mut().enumerate() {
        if record.meta.guid().is_none() {
            let mut guid = ctx.next_guid();
            while !seen.insert(guid.clone()) {
                guid = ctx.next_guid();
            }
            log::warn!(
                "Entity record {index} (`{}`) has no GUID, assigned {guid}",
                record.meta.name
            );
            record.meta.set_guid(guid);
        }
    }

    let mut scene = Scene::new(name);
    let mut order = Vec::with_capacity(records.len());
    let mut guid_map = HashMap::with_capacity(records.len());
    for SerializedEntity { meta, components } in records {
        let guid = meta.guid().clone();
        let id = scene.spawn_detached(meta);
        guid_map.insert(guid, id);
        order.push(id);

        let mut entity = EntityMut::new(id, &mut scene, ctx);
        for (descriptor, value) in registry.iter().zip(components) {
            if let Some(value) = value {
                descriptor.attach(&mut entity, value);
            }
        }
    }
    scene.commit(order, guid_map);

    log::debug!("Restored scene `{}` with {} entities", scene.name(), scene.len());
    Ok(scene)
}
