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

//! A serialization strategy writing the scene document as RON.

use serde::{Deserialize, Serialize};

use super::{DeserializationError, SerializationError, SerializationStrategy};
use tessera_core::{scene::SceneFormat, SceneContext};
use tessera_data::{
    ecs::ComponentRegistry,
    scene::{snapshot, RonRecord, Scene, SerializedEntity},
};

/// The top-level RON document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RonDocument {
    entities: Vec<RonRecord>,
}

/// Writes scenes as RON.
///
/// The document has the JSON lane's shape (`entities`, one map per entity
/// keyed by field name), but each value is written by RON itself, so floats
/// that JSON cannot carry survive. RON is the format picked for
/// human-readable debugging.
#[derive(Debug, Clone, Copy)]
pub struct RonSceneLane {
    pretty: bool,
}

impl Default for RonSceneLane {
    fn default() -> Self {
        Self::new()
    }
}

impl RonSceneLane {
    /// The identifier of this strategy.
    pub const STRATEGY_ID: &'static str = "TS_RON_V1";

    /// Creates a lane writing indented RON.
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Chooses between indented and single-line output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl SerializationStrategy for RonSceneLane {
    fn strategy_id(&self) -> &'static str {
        Self::STRATEGY_ID
    }

    fn format(&self) -> SceneFormat {
        SceneFormat::Ron
    }

    fn serialize(
        &self,
        scene: &Scene,
        registry: &ComponentRegistry,
    ) -> Result<Vec<u8>, SerializationError> {
        let entities = snapshot::capture(scene, registry)
            .iter_mut()
            .map(|record| record.write_ron(registry))
            .collect::<Result<Vec<_>, _>>()?;
        let document = RonDocument { entities };
        let text = if self.pretty {
            let pretty_config = ron::ser::PrettyConfig::default().indentor("  ".to_string());
            ron::ser::to_string_pretty(&document, pretty_config)?
        } else {
            ron::ser::to_string(&document)?
        };
        log::debug!(
            "{} wrote {} entities in {} bytes",
            Self::STRATEGY_ID,
            document.entities.len(),
            text.len()
        );
        Ok(text.into_bytes())
    }

    fn deserialize(
        &self,
        data: &[u8],
        name: &str,
        ctx: &mut SceneContext,
        registry: &ComponentRegistry,
    ) -> Result<Scene, DeserializationError> {
        let document: RonDocument = ron::de::from_bytes(data)?;
        let records = document
            .entities
            .iter()
            .map(|record| SerializedEntity::read_ron(record, registry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(snapshot::restore(name, records, ctx, registry)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_lane::strategies::test_support::{
        assert_same_scene, context, player_scene, runaway_scene,
    };
    use crate::scene_lane::strategies::JsonSceneLane;
    use tessera_core::ecs::EntityHandle;
    use tessera_data::ecs::{Light, LightKind, RigidBody};

    #[test]
    fn test_output_is_ron_text() {
        let registry = ComponentRegistry::global();
        let mut ctx = context();
        let scene = player_scene(&mut ctx);

        let bytes = RonSceneLane::new().serialize(&scene, &registry).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with('('));
        assert!(text.contains("entities:"));
        assert!(text.contains("\"Player\""));
        assert!(serde_json::from_str::<serde_json::Value>(&text).is_err());
    }

    #[test]
    fn test_round_trip() {
        let registry = ComponentRegistry::global();
        let mut ctx = context();
        let scene = player_scene(&mut ctx);

        for lane in [RonSceneLane::new(), RonSceneLane::new().with_pretty(false)] {
            let bytes = lane.serialize(&scene, &registry).unwrap();
            let loaded = lane.deserialize(&bytes, "Loaded", &mut ctx, &registry).unwrap();
            assert_same_scene(&scene, &loaded, &registry);
        }
    }

    #[test]
    fn test_ron_and_json_carry_the_same_content() {
        let registry = ComponentRegistry::global();
        let mut ctx = context();
        let scene = player_scene(&mut ctx);
        let json = JsonSceneLane::new();
        let ron = RonSceneLane::new();

        let from_ron = ron
            .deserialize(&ron.serialize(&scene, &registry).unwrap(), "R", &mut ctx, &registry)
            .unwrap();
        let converted = json
            .deserialize(&json.serialize(&from_ron, &registry).unwrap(), "J", &mut ctx, &registry)
            .unwrap();

        assert_same_scene(&scene, &converted, &registry);
        let child = converted.get(&EntityHandle::from("g2")).unwrap();
        assert_eq!(child.parent().unwrap().name(), "Player");
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        let registry = ComponentRegistry::global();
        let mut ctx = context();
        let result = RonSceneLane::new().deserialize(b"(entities: [", "Bad", &mut ctx, &registry);
        assert!(matches!(result, Err(DeserializationError::Ron(_))));
    }

    #[test]
    fn test_non_finite_floats_survive() {
        let registry = ComponentRegistry::global();
        let mut ctx = context();
        let scene = runaway_scene(&mut ctx);

        for lane in [RonSceneLane::new(), RonSceneLane::new().with_pretty(false)] {
            let bytes = lane.serialize(&scene, &registry).unwrap();
            let text = std::str::from_utf8(&bytes).unwrap();
            assert!(text.contains("inf"));
            assert!(text.contains("NaN"));

            let loaded = lane.deserialize(&bytes, "Loaded", &mut ctx, &registry).unwrap();
            let rocket = loaded.get(&EntityHandle::from("r1")).unwrap();
            let velocity = rocket.get::<RigidBody>().linear_velocity;
            assert_eq!(velocity.x, f32::INFINITY);
            assert!(velocity.y.is_nan());
            assert_eq!(velocity.z, f32::NEG_INFINITY);
        }
    }

    #[test]
    fn test_hand_written_document_loads() {
        let registry = ComponentRegistry::global();
        let mut ctx = context();
        let text = r#"(entities: [
            {
                "EntityMetadata": (guid: "a", name: "Lamp"),
                "Light": (
                    kind: Point(range: 5.0),
                    color: (r: 1.0, g: 0.5, b: 0.0, a: 1.0),
                    intensity: 3.0,
                    enabled: true,
                ),
                "Gizmo": (size: 2),
            },
        ])"#;

        let scene = RonSceneLane::new()
            .deserialize(text.as_bytes(), "Hand", &mut ctx, &registry)
            .unwrap();
        let lamp = scene.get(&EntityHandle::from("a")).unwrap();
        assert_eq!(lamp.name(), "Lamp");
        let light = lamp.get::<Light>();
        assert_eq!(light.kind, LightKind::Point { range: 5.0 });
        assert_eq!(light.intensity, 3.0);
    }

    #[test]
    fn test_invalid_component_value_fails_the_load() {
        let registry = ComponentRegistry::global();
        let mut ctx = context();
        let text = br#"(entities: [{
            "EntityMetadata": (guid: "a", name: "x"),
            "Transform": (scale: "big"),
        }])"#;

        let result = RonSceneLane::new().deserialize(text, "Bad", &mut ctx, &registry);
        assert!(matches!(result, Err(DeserializationError::Scene(_))));
    }
}
