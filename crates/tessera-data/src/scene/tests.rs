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

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tessera_core::ecs::EntityHandle;
use tessera_core::math::Vec3;
use tessera_core::physics::{BodyType, PhysicsProvider, RigidBodyDesc, RigidBodyHandle};
use tessera_core::SceneContext;

use super::*;
use crate::ecs::{Component, ComponentRegistry, RigidBody, Transform};

// --- A COMPONENT THAT COUNTS ITS HOOKS ---

thread_local! {
    static ADDED: Cell<u32> = const { Cell::new(0) };
    static REMOVED: Cell<u32> = const { Cell::new(0) };
    static SEEN_ON_REMOVE: RefCell<Vec<i32>> = const { RefCell::new(Vec::new()) };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Gauge {
    value: i32,
}

impl Component for Gauge {
    const NAME: &'static str = "Gauge";

    fn on_added(_entity: &mut EntityMut<'_>) {
        ADDED.with(|c| c.set(c.get() + 1));
    }

    fn on_removed(entity: &mut EntityMut<'_>) {
        REMOVED.with(|c| c.set(c.get() + 1));
        let value = entity.get::<Gauge>().value;
        SEEN_ON_REMOVE.with(|seen| seen.borrow_mut().push(value));
    }
}

fn added() -> u32 {
    ADDED.with(Cell::get)
}

fn removed() -> u32 {
    REMOVED.with(Cell::get)
}

fn gauge_registry() -> ComponentRegistry {
    ComponentRegistry::builder()
        .register::<Transform>()
        .register::<Gauge>()
        .build()
}

// --- A PHYSICS COLLABORATOR THAT RECORDS ITS BODIES ---

#[derive(Clone, Default)]
struct FakePhysics {
    bodies: Arc<Mutex<BTreeMap<u64, RigidBodyDesc>>>,
    next: u64,
}

impl PhysicsProvider for FakePhysics {
    fn add_body(&mut self, desc: RigidBodyDesc) -> RigidBodyHandle {
        self.next += 1;
        self.bodies.lock().unwrap().insert(self.next, desc);
        RigidBodyHandle(self.next)
    }

    fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.lock().unwrap().remove(&handle.0);
    }
}

// --- ENTITY LIFECYCLE ---

#[test]
fn test_add_component_fires_on_added_once() {
    let mut ctx = SceneContext::seeded(0);
    let mut scene = Scene::new("hooks");
    let mut entity = scene.create_entity(&mut ctx, "E");

    let stored = entity.add_component(Gauge { value: 4 });
    stored.value += 1;

    assert_eq!(added(), 1);
    assert_eq!(removed(), 0);
    assert_eq!(entity.get::<Gauge>().value, 5);
}

#[test]
fn test_remove_component_fires_on_removed_while_attached() {
    let mut ctx = SceneContext::seeded(0);
    let mut scene = Scene::new("hooks");
    let mut entity = scene.create_entity(&mut ctx, "E");
    entity.add_component(Gauge { value: 9 });

    let removed_value = entity.remove_component::<Gauge>();

    assert_eq!(removed(), 1);
    assert_eq!(SEEN_ON_REMOVE.with(|s| s.borrow().clone()), vec![9]);
    assert_eq!(removed_value, Gauge { value: 9 });
    assert!(!entity.has::<Gauge>());
}

#[test]
#[should_panic(expected = "already attached")]
fn test_duplicate_attach_is_a_contract_violation() {
    let mut ctx = SceneContext::seeded(0);
    let mut scene = Scene::new("hooks");
    let mut entity = scene.create_entity(&mut ctx, "E");
    entity.add_component(Gauge::default());
    entity.add_component(Gauge::default());
}

#[test]
#[should_panic(expected = "access of absent component `Gauge`")]
fn test_get_absent_component_panics() {
    let mut ctx = SceneContext::seeded(0);
    let mut scene = Scene::new("hooks");
    let entity = scene.create_entity(&mut ctx, "E");
    entity.get::<Gauge>();
}

#[test]
#[should_panic(expected = "access of absent component")]
fn test_remove_absent_component_panics() {
    let mut ctx = SceneContext::seeded(0);
    let mut scene = Scene::new("hooks");
    let mut entity = scene.create_entity(&mut ctx, "E");
    entity.remove_component::<Gauge>();
}

#[test]
fn test_try_get_on_absent_component_is_none() {
    let mut ctx = SceneContext::seeded(0);
    let mut scene = Scene::new("hooks");
    let entity = scene.create_entity(&mut ctx, "E");
    assert!(entity.try_get::<Gauge>().is_none());
}

// --- SCENE ---

#[test]
fn test_every_entity_gets_a_unique_guid() {
    let mut ctx = SceneContext::seeded(11);
    let mut scene = Scene::new("guids");
    let a = scene.create_entity(&mut ctx, "A").guid().clone();
    let b = scene.create_entity(&mut ctx, "B").guid().clone();

    assert!(a.is_some());
    assert_ne!(a, b);
    assert_eq!(scene.len(), 2);
    assert_eq!(scene.get(&a).unwrap().name(), "A");
}

#[test]
fn test_unknown_guid_resolves_to_sentinel() {
    let scene = Scene::new("empty");
    assert!(scene.get(&EntityHandle::from("missing")).is_none());
    assert!(scene.get(&EntityHandle::NONE).is_none());
}

#[test]
fn test_create_with_duplicate_guid_is_rejected() {
    let mut ctx = SceneContext::seeded(0);
    let mut scene = Scene::new("guids");
    scene
        .create_entity_with_guid(&mut ctx, "g1".into(), "First")
        .unwrap();
    let err = scene
        .create_entity_with_guid(&mut ctx, "g1".into(), "Second")
        .unwrap_err();
    assert!(matches!(err, SceneError::DuplicateGuid(guid) if guid.as_str() == "g1"));
    assert_eq!(scene.len(), 1);
}

#[test]
fn test_destroy_entity_runs_hooks_and_forgets_guid() {
    let registry = gauge_registry();
    let mut ctx = SceneContext::seeded(0);
    let mut scene = Scene::new("destroy");
    let guid = {
        let mut entity = scene.create_entity(&mut ctx, "E");
        entity.add_component(Transform::default());
        entity.add_component(Gauge { value: 3 });
        entity.guid().clone()
    };

    assert!(scene.destroy_entity(&mut ctx, &registry, &guid));
    assert!(!scene.destroy_entity(&mut ctx, &registry, &guid));

    assert_eq!(removed(), 1);
    assert!(scene.get(&guid).is_none());
    assert!(scene.is_empty());
}

#[test]
fn test_duplicate_entity_copies_components_under_new_guid() {
    let registry = gauge_registry();
    let mut ctx = SceneContext::seeded(0);
    let mut scene = Scene::new("dup");
    let original = {
        let mut entity = scene.create_entity(&mut ctx, "Crate");
        entity.metadata_mut().tag = "props".into();
        entity.add_component(Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)));
        entity.add_component(Gauge { value: 2 });
        entity.guid().clone()
    };

    let copy = scene.duplicate_entity(&mut ctx, &registry, &original).unwrap();

    assert_ne!(copy, original);
    assert_eq!(added(), 2);
    let copy = scene.get(&copy).unwrap();
    assert_eq!(copy.name(), "Crate");
    assert_eq!(copy.metadata().tag, "props");
    assert_eq!(copy.get::<Gauge>(), &Gauge { value: 2 });
    assert_eq!(copy.get::<Transform>().translation, Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn test_hierarchy_queries() {
    let mut ctx = SceneContext::seeded(0);
    let mut scene = Scene::new("tree");
    let root = scene.create_entity(&mut ctx, "Root").guid().clone();
    for name in ["A", "B"] {
        scene.create_entity(&mut ctx, name).set_parent(Some(&root));
    }
    scene.create_entity(&mut ctx, "Loose");

    let children: Vec<_> = scene.children_of(&root).iter().map(|e| e.name()).collect();
    assert_eq!(children, vec!["A", "B"]);
    let a = scene.find_by_name("A").unwrap();
    assert_eq!(a.parent().unwrap().guid(), &root);
    assert!(scene.validate().is_empty());
}

#[test]
fn test_validate_reports_broken_hierarchies() {
    let mut ctx = SceneContext::seeded(0);
    let mut scene = Scene::new("broken");
    scene
        .create_entity_with_guid(&mut ctx, "orphan".into(), "Orphan")
        .unwrap()
        .set_parent(Some(&"ghost".into()));
    scene
        .create_entity_with_guid(&mut ctx, "narcissus".into(), "Self")
        .unwrap()
        .set_parent(Some(&"narcissus".into()));
    scene
        .create_entity_with_guid(&mut ctx, "a".into(), "A")
        .unwrap()
        .set_parent(Some(&"b".into()));
    scene
        .create_entity_with_guid(&mut ctx, "b".into(), "B")
        .unwrap()
        .set_parent(Some(&"a".into()));

    let issues = scene.validate();
    assert_eq!(
        issues,
        vec![
            ValidationIssue::DanglingParent {
                entity: "orphan".into(),
                parent: "ghost".into()
            },
            ValidationIssue::SelfParent {
                entity: "narcissus".into()
            },
            ValidationIssue::ParentCycle { entity: "a".into() },
            ValidationIssue::ParentCycle { entity: "b".into() },
        ]
    );
}

// --- CAPTURE / RESTORE ---

fn player_and_child(ctx: &mut SceneContext) -> Scene {
    let mut scene = Scene::new("level");
    {
        let mut player = scene
            .create_entity_with_guid(ctx, "g1".into(), "Player")
            .unwrap();
        player.add_component(Transform::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        player.add_component(RigidBody::new_dynamic(80.0));
    }
    {
        let mut child = scene
            .create_entity_with_guid(ctx, "g2".into(), "Child")
            .unwrap();
        child.set_parent(Some(&"g1".into()));
        child.add_component(Transform::default());
    }
    scene
}

#[test]
fn test_capture_lists_components_in_catalogue_order() {
    let registry = ComponentRegistry::global();
    let mut ctx = SceneContext::seeded(0);
    let scene = player_and_child(&mut ctx);

    let records = capture(&scene, &registry);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].meta.guid().as_str(), "g1");
    assert_eq!(records[0].present_names(&registry), vec!["Transform", "RigidBody"]);
    assert_eq!(records[1].present_names(&registry), vec!["Transform"]);
    assert_eq!(records[1].meta.parent_entity.as_str(), "g1");
}

#[test]
fn test_restore_preserves_guids_and_resolves_parents() {
    let registry = ComponentRegistry::global();
    let mut ctx = SceneContext::seeded(0);
    let scene = player_and_child(&mut ctx);

    let restored = restore("copy", capture(&scene, &registry), &mut ctx, &registry).unwrap();

    assert_eq!(restored.len(), 2);
    let child = restored.get(&"g2".into()).unwrap();
    let parent = restored.get(&child.metadata().parent_entity).unwrap();
    assert_eq!(parent.guid().as_str(), "g1");
    assert_eq!(parent.get::<RigidBody>().mass, 80.0);
    assert_eq!(
        parent.get::<Transform>().translation,
        Vec3::new(1.0, 2.0, 3.0)
    );
}

#[test]
fn test_restore_fires_on_added_once_per_component() {
    let registry = gauge_registry();
    let mut ctx = SceneContext::seeded(0);
    let mut records = Vec::new();
    for guid in ["a", "b", "c"] {
        let mut record = SerializedEntity::new(EntityMetadata::new(guid.into(), guid), &registry);
        record.set(&registry, Gauge { value: 1 });
        records.push(record);
    }

    let scene = restore("gauges", records, &mut ctx, &registry).unwrap();

    assert_eq!(scene.len(), 3);
    assert_eq!(added(), 3);
}

#[test]
fn test_restore_rejects_duplicate_guids_before_running_hooks() {
    let registry = gauge_registry();
    let mut ctx = SceneContext::seeded(0);
    let records = ["same", "same"]
        .into_iter()
        .map(|guid| {
            let mut record =
                SerializedEntity::new(EntityMetadata::new(guid.into(), guid), &registry);
            record.set(&registry, Gauge::default());
            record
        })
        .collect();

    let err = restore("dup", records, &mut ctx, &registry).unwrap_err();

    assert!(matches!(err, SceneError::DuplicateGuid(_)));
    assert_eq!(added(), 0);
}

#[test]
fn test_restore_generates_guid_only_when_missing() {
    let registry = gauge_registry();
    let mut ctx = SceneContext::seeded(5);
    let records = vec![
        SerializedEntity::new(EntityMetadata::new(EntityHandle::NONE, "Anon"), &registry),
        SerializedEntity::new(EntityMetadata::new("kept".into(), "Kept"), &registry),
    ];

    let scene = restore("partial", records, &mut ctx, &registry).unwrap();

    let anon = scene.find_by_name("Anon").unwrap();
    assert!(anon.guid().is_some());
    assert_eq!(scene.find_by_name("Kept").unwrap().guid().as_str(), "kept");
}

#[test]
fn test_json_record_round_trip() {
    let registry = ComponentRegistry::global();
    let mut ctx = SceneContext::seeded(0);
    let scene = player_and_child(&mut ctx);

    let mut records = capture(&scene, &registry);
    let object = records[0].write_json(&registry).unwrap();
    let keys: Vec<_> = object.keys().cloned().collect();
    assert_eq!(keys, vec!["EntityMetadata", "Transform", "RigidBody"]);

    let back = SerializedEntity::read_json(&object, &registry).unwrap();
    assert_eq!(back.meta, records[0].meta);
    assert_eq!(back.get::<RigidBody>(&registry).unwrap().mass, 80.0);
}

#[test]
fn test_json_record_without_metadata_is_rejected() {
    let registry = ComponentRegistry::global();
    let object = serde_json::Map::new();
    assert!(matches!(
        SerializedEntity::read_json(&object, &registry),
        Err(SceneError::MissingMetadata)
    ));
}

#[test]
fn test_binary_record_round_trip() {
    let registry = ComponentRegistry::global();
    let mut ctx = SceneContext::seeded(0);
    let scene = player_and_child(&mut ctx);

    let mut records = capture(&scene, &registry);
    let binary = records[1].write_binary(&registry).unwrap();
    assert_eq!(binary.fields.len(), 1);

    let back = SerializedEntity::read_binary(&binary, &registry).unwrap();
    assert_eq!(back.meta.parent_entity.as_str(), "g1");
    assert_eq!(back.get::<Transform>(&registry), Some(&Transform::default()));
}

// --- PHYSICS HANDSHAKE THROUGH HOOKS ---

#[test]
fn test_rigid_body_registers_and_releases_physics_bodies() {
    let registry = ComponentRegistry::global();
    let physics = FakePhysics::default();
    let bodies = physics.bodies.clone();
    let mut ctx = SceneContext::seeded(0).with_physics(physics);
    let mut scene = player_and_child(&mut ctx);

    {
        let live = bodies.lock().unwrap();
        assert_eq!(live.len(), 1);
        let desc = live.values().next().unwrap();
        assert_eq!(desc.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(desc.body_type, BodyType::Dynamic);
        assert_eq!(desc.mass, 80.0);
    }
    let handle = scene.get(&"g1".into()).unwrap().get::<RigidBody>().handle;
    assert!(handle.is_some());

    scene.destroy_entity(&mut ctx, &registry, &"g1".into());
    assert!(bodies.lock().unwrap().is_empty());
}

#[test]
fn test_restored_rigid_bodies_get_fresh_handles() {
    let registry = ComponentRegistry::global();
    let physics = FakePhysics::default();
    let bodies = physics.bodies.clone();
    let mut ctx = SceneContext::seeded(0).with_physics(physics);
    let scene = player_and_child(&mut ctx);
    let original = scene.get(&"g1".into()).unwrap().get::<RigidBody>().handle;

    let mut records = capture(&scene, &registry);
    let object = records[0].write_json(&registry).unwrap();
    assert!(object["RigidBody"].get("handle").is_none());

    let restored = restore("copy", records, &mut ctx, &registry).unwrap();
    let fresh = restored.get(&"g1".into()).unwrap().get::<RigidBody>().handle;
    assert!(fresh.is_some());
    assert_ne!(fresh, original);
    assert_eq!(bodies.lock().unwrap().len(), 2);
}
