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

//! A serialization strategy writing the textual `{"entities": [...]}` document.

use super::{DeserializationError, SceneDocument, SerializationError, SerializationStrategy};
use tessera_core::{scene::SceneFormat, SceneContext};
use tessera_data::{ecs::ComponentRegistry, scene::Scene};

/// Writes scenes as JSON.
///
/// Each element of `entities` carries an `EntityMetadata` object followed
/// by one field per present catalogue component, in catalogue order. Absent
/// components are omitted.
#[derive(Debug, Clone, Copy)]
pub struct JsonSceneLane {
    pretty: bool,
}

impl Default for JsonSceneLane {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonSceneLane {
    /// The identifier of this strategy.
    pub const STRATEGY_ID: &'static str = "TS_JSON_V1";

    /// Creates a lane writing indented JSON.
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Chooses between indented and compact output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl SerializationStrategy for JsonSceneLane {
    fn strategy_id(&self) -> &'static str {
        Self::STRATEGY_ID
    }

    fn format(&self) -> SceneFormat {
        SceneFormat::Json
    }

    fn serialize(
        &self,
        scene: &Scene,
        registry: &ComponentRegistry,
    ) -> Result<Vec<u8>, SerializationError> {
        let document = SceneDocument::capture(scene, registry)?;
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&document)?
        } else {
            serde_json::to_vec(&document)?
        };
        log::debug!(
            "{} wrote {} entities in {} bytes",
            Self::STRATEGY_ID,
            document.entities.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    fn deserialize(
        &self,
        data: &[u8],
        name: &str,
        ctx: &mut SceneContext,
        registry: &ComponentRegistry,
    ) -> Result<Scene, DeserializationError> {
        let document: SceneDocument = serde_json::from_slice(data)?;
        document.restore(name, ctx, registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_lane::strategies::test_support::{
        assert_same_scene, context, player_scene, runaway_scene,
    };
    use serde_json::{json, Value};
    use tessera_core::ecs::EntityHandle;
    use tessera_data::ecs::{ArchiveError, Light, LightKind, RigidBody, Transform};
    use tessera_data::scene::SceneError;

    #[test]
    fn test_document_shape() {
        let registry = ComponentRegistry::global();
        let mut ctx = context();
        let scene = player_scene(&mut ctx);

        let bytes = JsonSceneLane::new().serialize(&scene, &registry).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        let entities = value["entities"].as_array().unwrap();
        assert_eq!(entities.len(), 2);

        let player = entities[0].as_object().unwrap();
        let keys: Vec<&str> = player.keys().map(String::as_str).collect();
        assert_eq!(keys, ["EntityMetadata", "Transform", "RigidBody", "MeshRenderer"]);
        assert_eq!(
            player["EntityMetadata"],
            json!({
                "guid": "g1",
                "name": "Player",
                "tag": "",
                "active": true,
                "parentEntity": ""
            })
        );
        assert_eq!(player["MeshRenderer"]["model"], json!({ "guid": "7" }));
        assert!(player["RigidBody"].get("handle").is_none());

        let child = entities[1].as_object().unwrap();
        assert_eq!(child["EntityMetadata"]["parentEntity"], json!("g1"));
        assert!(child.get("RigidBody").is_none());
    }

    #[test]
    fn test_round_trip_keeps_guids_parents_and_values() {
        let registry = ComponentRegistry::global();
        let mut ctx = context();
        let scene = player_scene(&mut ctx);
        let lane = JsonSceneLane::new().with_pretty(false);

        let bytes = lane.serialize(&scene, &registry).unwrap();
        let loaded = lane.deserialize(&bytes, "Loaded", &mut ctx, &registry).unwrap();

        assert_eq!(loaded.name(), "Loaded");
        assert_same_scene(&scene, &loaded, &registry);

        let child = loaded.get(&EntityHandle::from("g2")).unwrap();
        let parent = child.parent().unwrap();
        assert_eq!(parent.guid(), &EntityHandle::from("g1"));
        assert!(parent.has::<RigidBody>());
        assert!(parent.has::<Transform>());
    }

    #[test]
    fn test_hand_written_document_loads() {
        let registry = ComponentRegistry::global();
        let mut ctx = context();
        let text = r#"{
            "entities": [
                {
                    "EntityMetadata": { "guid": "a", "name": "Lamp" },
                    "Light": {
                        "kind": { "Point": { "range": 5.0 } },
                        "color": { "r": 1.0, "g": 0.5, "b": 0.0, "a": 1.0 },
                        "intensity": 3.0,
                        "enabled": true
                    }
                }
            ]
        }"#;

        let scene = JsonSceneLane::new()
            .deserialize(text.as_bytes(), "Hand", &mut ctx, &registry)
            .unwrap();
        let lamp = scene.get(&EntityHandle::from("a")).unwrap();
        assert_eq!(lamp.name(), "Lamp");
        assert!(lamp.metadata().active);
        let light = lamp.get::<Light>();
        assert_eq!(light.kind, LightKind::Point { range: 5.0 });
        assert_eq!(light.intensity, 3.0);
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        let registry = ComponentRegistry::global();
        let mut ctx = context();
        let lane = JsonSceneLane::new();

        for bad in [
            &b"not json"[..],
            br#"{"entities": 3}"#,
            br#"{"entities": [{"Transform": {}}]}"#,
            br#"{"entities": [{
                "EntityMetadata": {"guid": "a", "name": "x"},
                "Transform": {"scale": "big"}
            }]}"#,
        ] {
            assert!(lane.deserialize(bad, "Bad", &mut ctx, &registry).is_err());
        }
    }

    #[test]
    fn test_duplicate_guids_fail_the_load() {
        let registry = ComponentRegistry::global();
        let mut ctx = context();
        let text = br#"{"entities": [
            {"EntityMetadata": {"guid": "same", "name": "A"}},
            {"EntityMetadata": {"guid": "same", "name": "B"}}
        ]}"#;

        let err = JsonSceneLane::new()
            .deserialize(text, "Dup", &mut ctx, &registry)
            .unwrap_err();
        assert!(matches!(err, DeserializationError::Scene(_)));
    }

    #[test]
    fn test_non_finite_floats_fail_the_save() {
        let registry = ComponentRegistry::global();
        let mut ctx = context();
        let scene = runaway_scene(&mut ctx);

        let err = JsonSceneLane::new().serialize(&scene, &registry).unwrap_err();
        match err {
            SerializationError::Scene(SceneError::Archive(ArchiveError::NonFinite {
                component,
                field,
            })) => {
                assert_eq!(component, "RigidBody");
                assert_eq!(field, "linear_velocity.x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
