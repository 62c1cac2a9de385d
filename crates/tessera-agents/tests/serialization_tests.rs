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

mod common;

use std::collections::BTreeSet;

use common::{furnished_scene, player_and_child, FakePhysics};
use tessera_agents::serialization_agent::{AgentError, SerializationAgent};
use tessera_core::{
    ecs::EntityHandle,
    physics::BodyType,
    scene::SceneFormat,
    SceneContext, SerializationSettings,
};
use tessera_data::{
    ecs::{ComponentRegistry, RigidBody, Transform},
    scene::Scene,
};
use tessera_lanes::scene_lane::DeserializationError;

fn guids(scene: &Scene) -> BTreeSet<EntityHandle> {
    scene.iter().map(|entity| entity.guid().clone()).collect()
}

/// The JSON document is the canonical view of a scene's content.
fn content(agent: &SerializationAgent, scene: &Scene) -> Vec<u8> {
    agent
        .save_scene(scene, &ComponentRegistry::global(), SceneFormat::Json)
        .unwrap()
}

#[test]
fn test_round_trip_in_every_format() {
    // --- SETUP ---
    let registry = ComponentRegistry::global();
    let mut ctx = SceneContext::seeded(11);
    let scene = furnished_scene(&mut ctx);
    let agent = SerializationAgent::new();

    for format in SceneFormat::ALL {
        // --- ACTION ---
        let bytes = agent.save_scene(&scene, &registry, format).unwrap();
        let loaded = agent
            .load_scene(&bytes, "Loaded", Some(format), &mut ctx, &registry)
            .unwrap();

        // --- ASSERTIONS ---
        assert_eq!(loaded.len(), scene.len(), "{format}");
        assert_eq!(guids(&loaded), guids(&scene), "{format}");
        assert_eq!(content(&agent, &loaded), content(&agent, &scene), "{format}");
    }
}

#[test]
fn test_formats_convert_into_each_other() {
    let registry = ComponentRegistry::global();
    let mut ctx = SceneContext::seeded(12);
    let scene = furnished_scene(&mut ctx);
    let agent = SerializationAgent::new();

    let mut current = scene;
    let original = content(&agent, &current);
    for format in [SceneFormat::Binary, SceneFormat::Ron, SceneFormat::Json, SceneFormat::Binary] {
        let bytes = agent.save_scene(&current, &registry, format).unwrap();
        current = agent
            .load_scene(&bytes, "Hop", Some(format), &mut ctx, &registry)
            .unwrap();
    }
    assert_eq!(content(&agent, &current), original);
}

#[test]
fn test_player_and_child_scenario() {
    // --- SETUP ---
    let registry = ComponentRegistry::global();
    let physics = FakePhysics::default();
    let mut ctx = SceneContext::seeded(13).with_physics(physics.clone());
    let scene = player_and_child(&mut ctx);
    let agent = SerializationAgent::new();
    assert_eq!(physics.live_bodies().len(), 1);

    // --- ACTION ---
    let bytes = agent.save_scene(&scene, &registry, SceneFormat::Json).unwrap();
    let loaded = agent
        .load_scene(&bytes, "Reloaded", None, &mut ctx, &registry)
        .unwrap();

    // --- ASSERTIONS ---
    assert_eq!(loaded.len(), 2);

    let child = loaded.get(&EntityHandle::from("g2")).unwrap();
    assert_eq!(child.name(), "Child");
    let parent = loaded.get(&child.metadata().parent_entity).unwrap();
    assert_eq!(parent.guid(), &EntityHandle::from("g1"));
    assert_eq!(parent, child.parent().unwrap());

    let before = scene.get(&EntityHandle::from("g1")).unwrap();
    assert_eq!(parent.get::<Transform>(), before.get::<Transform>());

    let (old_body, new_body) = (before.get::<RigidBody>(), parent.get::<RigidBody>());
    assert_eq!(new_body.body_type, BodyType::Dynamic);
    assert_eq!(new_body.mass, old_body.mass);
    assert_eq!(new_body.linear_velocity, old_body.linear_velocity);
    assert_eq!(new_body.angular_velocity, old_body.angular_velocity);
    assert_eq!(new_body.ccd_enabled, old_body.ccd_enabled);

    // The restored body was registered afresh by its attach hook.
    assert_eq!(physics.live_bodies().len(), 2);
    assert_ne!(new_body.handle, old_body.handle);
    assert!(physics.live_bodies().contains(&new_body.handle.unwrap()));
}

#[test]
fn test_failed_load_runs_no_hook() {
    let registry = ComponentRegistry::global();
    let physics = FakePhysics::default();
    let mut ctx = SceneContext::seeded(14).with_physics(physics.clone());
    let agent = SerializationAgent::new();

    let malformed = br#"{"entities": [
        {"EntityMetadata": {"guid": "a", "name": "Body"}, "RigidBody": {
            "body_type": "Dynamic", "mass": 1.0, "ccd_enabled": false,
            "linear_velocity": {"x": 0.0, "y": 0.0, "z": 0.0},
            "angular_velocity": {"x": 0.0, "y": 0.0, "z": 0.0}
        }},
        {"EntityMetadata": {"guid": "b", "name": "Broken"}, "Transform": {"translation": 12}}
    ]}"#;
    let duplicated = br#"{"entities": [
        {"EntityMetadata": {"guid": "a", "name": "Body"}, "RigidBody": {
            "body_type": "Dynamic", "mass": 1.0, "ccd_enabled": false,
            "linear_velocity": {"x": 0.0, "y": 0.0, "z": 0.0},
            "angular_velocity": {"x": 0.0, "y": 0.0, "z": 0.0}
        }},
        {"EntityMetadata": {"guid": "a", "name": "Twin"}}
    ]}"#;

    for bytes in [&malformed[..], &duplicated[..]] {
        let result = agent.load_scene(bytes, "Bad", None, &mut ctx, &registry);
        assert!(matches!(
            result,
            Err(AgentError::Deserialization(DeserializationError::Scene(_)))
        ));
    }
    assert!(physics.live_bodies().is_empty());
}

#[test]
fn test_records_without_guid_get_one() {
    let registry = ComponentRegistry::global();
    let mut ctx = SceneContext::seeded(15);
    let agent = SerializationAgent::new();

    let bytes = br#"{"entities": [
        {"EntityMetadata": {"name": "Anonymous"}},
        {"EntityMetadata": {"guid": "", "name": "Blank"}}
    ]}"#;
    let scene = agent.load_scene(bytes, "Fresh", None, &mut ctx, &registry).unwrap();

    let guids = guids(&scene);
    assert_eq!(guids.len(), 2);
    assert!(guids.iter().all(EntityHandle::is_some));
}

#[test]
fn test_file_round_trip_by_extension() {
    // --- SETUP ---
    let registry = ComponentRegistry::global();
    let mut ctx = SceneContext::seeded(16);
    let scene = furnished_scene(&mut ctx);
    let agent = SerializationAgent::new();
    let dir = tempfile::tempdir().unwrap();

    for (file, format) in [
        ("level.json", SceneFormat::Json),
        ("level.ron", SceneFormat::Ron),
        ("level.tscene", SceneFormat::Binary),
    ] {
        let path = dir.path().join(file);

        // --- ACTION ---
        let written = agent.save_to_path(&scene, &registry, &path).unwrap();
        let loaded = agent.load_from_path(&path, &mut ctx, &registry).unwrap();

        // --- ASSERTIONS ---
        assert_eq!(written, format);
        assert_eq!(loaded.name(), "level");
        assert_eq!(content(&agent, &loaded), content(&agent, &scene));
    }

    // Nothing but the three scene files was left behind.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
}

#[test]
fn test_unknown_extension_uses_default_format() {
    let registry = ComponentRegistry::global();
    let mut ctx = SceneContext::seeded(17);
    let scene = player_and_child(&mut ctx);
    let agent = SerializationAgent::with_settings(SerializationSettings {
        default_format: SceneFormat::Binary,
        ..Default::default()
    });
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level.scene");

    assert_eq!(
        agent.save_to_path(&scene, &registry, &path).unwrap(),
        SceneFormat::Binary
    );
    // Sniffed from the magic bytes even though the extension says nothing.
    let loaded = agent.load_from_path(&path, &mut ctx, &registry).unwrap();
    assert_eq!(loaded.len(), 2);
}

#[test]
fn test_overwrite_replaces_previous_file() {
    let registry = ComponentRegistry::global();
    let mut ctx = SceneContext::seeded(18);
    let agent = SerializationAgent::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level.json");

    agent
        .save_to_path(&player_and_child(&mut ctx), &registry, &path)
        .unwrap();
    agent.save_to_path(&Scene::new("Empty"), &registry, &path).unwrap();

    let loaded = agent.load_from_path(&path, &mut ctx, &registry).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn test_non_finite_floats_never_replace_a_good_json_file() {
    // --- SETUP ---
    let registry = ComponentRegistry::global();
    let mut ctx = SceneContext::seeded(23);
    let agent = SerializationAgent::new();
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("level.json");
    let ron_path = dir.path().join("level.ron");

    agent
        .save_to_path(&player_and_child(&mut ctx), &registry, &json_path)
        .unwrap();
    let good = std::fs::read(&json_path).unwrap();

    let mut runaway = player_and_child(&mut ctx);
    {
        let player = runaway.find_by_name("Player").unwrap().guid().clone();
        let mut entity = runaway.get_mut(&mut ctx, &player).unwrap();
        entity.get_mut::<RigidBody>().linear_velocity.y = f32::INFINITY;
    }

    // --- ACTION ---
    let err = agent
        .save_to_path(&runaway, &registry, &json_path)
        .unwrap_err();
    agent.save_to_path(&runaway, &registry, &ron_path).unwrap();

    // --- ASSERTIONS ---
    assert!(matches!(err, AgentError::Serialization(_)));
    assert!(err.to_string().contains("linear_velocity.y"));
    assert_eq!(std::fs::read(&json_path).unwrap(), good);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);

    let reloaded = agent.load_from_path(&ron_path, &mut ctx, &registry).unwrap();
    let player = reloaded.find_by_name("Player").unwrap();
    assert_eq!(player.get::<RigidBody>().linear_velocity.y, f32::INFINITY);
}

#[test]
fn test_io_errors_are_reported() {
    let registry = ComponentRegistry::global();
    let mut ctx = SceneContext::seeded(19);
    let dir = tempfile::tempdir().unwrap();
    let missing_dir = dir.path().join("missing").join("level.json");

    for atomic_writes in [true, false] {
        let agent = SerializationAgent::with_settings(SerializationSettings {
            atomic_writes,
            ..Default::default()
        });
        let err = agent
            .save_to_path(&player_and_child(&mut ctx), &registry, &missing_dir)
            .unwrap_err();
        assert!(matches!(err, AgentError::Io { ref path, .. } if path == &missing_dir));
    }

    let err = SerializationAgent::new()
        .load_from_path(dir.path().join("nothing.json"), &mut ctx, &registry)
        .unwrap_err();
    assert!(matches!(err, AgentError::Io { .. }));
}

#[test]
fn test_corrupted_files_are_rejected() {
    let registry = ComponentRegistry::global();
    let mut ctx = SceneContext::seeded(20);
    let agent = SerializationAgent::new();
    let dir = tempfile::tempdir().unwrap();

    let good = dir.path().join("good.tscene");
    agent
        .save_to_path(&player_and_child(&mut ctx), &registry, &good)
        .unwrap();
    let bytes = std::fs::read(&good).unwrap();

    let truncated = dir.path().join("truncated.tscene");
    std::fs::write(&truncated, &bytes[..bytes.len() - 3]).unwrap();
    assert!(matches!(
        agent.load_from_path(&truncated, &mut ctx, &registry),
        Err(AgentError::Deserialization(DeserializationError::Header(_)))
    ));

    // Without the magic the bytes cannot be sniffed, so the binary lane
    // refuses them.
    let headless = dir.path().join("headless.tscene");
    std::fs::write(&headless, &bytes[8..]).unwrap();
    assert!(agent.load_from_path(&headless, &mut ctx, &registry).is_err());

    let garbage = dir.path().join("garbage.json");
    std::fs::write(&garbage, b"{\"entities\": [").unwrap();
    assert!(matches!(
        agent.load_from_path(&garbage, &mut ctx, &registry),
        Err(AgentError::Deserialization(DeserializationError::Json(_)))
    ));
}
