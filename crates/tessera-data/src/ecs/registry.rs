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

//! The component registry: a closed, ordered catalogue of type descriptors.
//!
//! Generic code (snapshots, loaders, an editor's "Add Component" menu) never
//! names concrete component types. It walks the registry and calls the
//! descriptor of each type through the object-safe [`ComponentDescriptor`]
//! interface. Adding a type to the catalogue is one line:
//!
//! ```ignore
//! register_component!(Transform, 0);
//! ```
//!
//! The process-wide catalogue is collected once, on first use of
//! [`ComponentRegistry::global`], and never changes afterwards. Its order
//! (by registration key, then name) is the field order of every scene file.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use bincode::config;
use ron::value::RawValue;
use tessera_core::{inspector::InspectorUi, scripting::ScriptBindings};

use super::archive::{ArchiveError, BinaryField, FieldArchive, RonField};
use super::finite::non_finite_field;
use super::{Component, ComponentValue};
use crate::scene::{Entity, EntityMut};

/// Generic operations on one catalogue type.
pub trait ComponentDescriptor: Send + Sync {
    /// The catalogue name, also the field name in scene files.
    fn name(&self) -> &'static str;

    /// The `TypeId` of the described component.
    fn component_type(&self) -> TypeId;

    /// Returns `true` if `entity` carries the component.
    fn present(&self, entity: Entity<'_>) -> bool;

    /// Copies the component out of `entity`, if present.
    fn get_copy(&self, entity: Entity<'_>) -> Option<ComponentValue>;

    /// Attaches `value` to `entity`, firing `on_added`.
    ///
    /// # Panics
    ///
    /// If `value` holds another type, or if the component is already present.
    fn attach(&self, entity: &mut EntityMut<'_>, value: ComponentValue);

    /// Attaches a default-constructed component, firing `on_added`.
    fn attach_default(&self, entity: &mut EntityMut<'_>);

    /// Detaches the component, firing `on_removed` first.
    ///
    /// # Panics
    ///
    /// If the component is absent.
    fn detach(&self, entity: &mut EntityMut<'_>);

    /// Moves one optional component between `archive` and `value`.
    ///
    /// Writers read `value` and leave it untouched; readers overwrite it
    /// with what the archive holds for this type (`None` if nothing).
    fn serialize_field(
        &self,
        archive: &mut FieldArchive<'_>,
        value: &mut Option<ComponentValue>,
    ) -> Result<(), ArchiveError>;

    /// Delegates to the component's inspector hook, if it is present.
    fn render_inspector(&self, entity: &mut EntityMut<'_>, ui: &mut dyn InspectorUi);

    /// Delegates to the component's scripting hook.
    fn register_bindings(&self, bindings: &mut dyn ScriptBindings);
}

/// The descriptor of a statically known component type.
pub struct TypedDescriptor<C: Component>(PhantomData<fn() -> C>);

impl<C: Component> TypedDescriptor<C> {
    /// Creates the descriptor.
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    /// Creates the descriptor behind a trait object.
    pub fn boxed() -> Box<dyn ComponentDescriptor> {
        Box::new(Self::new())
    }

    fn expect_value<'v>(value: &'v ComponentValue) -> &'v C {
        value.downcast_ref::<C>().unwrap_or_else(|| {
            panic!(
                "descriptor of `{}` was handed a `{}` value",
                C::NAME,
                value.name()
            )
        })
    }
}

impl<C: Component> Default for TypedDescriptor<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Component> ComponentDescriptor for TypedDescriptor<C> {
    fn name(&self) -> &'static str {
        C::NAME
    }

    fn component_type(&self) -> TypeId {
        TypeId::of::<C>()
    }

    fn present(&self, entity: Entity<'_>) -> bool {
        entity.has::<C>()
    }

    fn get_copy(&self, entity: Entity<'_>) -> Option<ComponentValue> {
        entity.try_get::<C>().cloned().map(ComponentValue::new)
    }

    fn attach(&self, entity: &mut EntityMut<'_>, value: ComponentValue) {
        let component = value.downcast::<C>().unwrap_or_else(|value| {
            panic!(
                "descriptor of `{}` was handed a `{}` value",
                C::NAME,
                value.name()
            )
        });
        entity.add_component(component);
    }

    fn attach_default(&self, entity: &mut EntityMut<'_>) {
        entity.add_component(C::default());
    }

    fn detach(&self, entity: &mut EntityMut<'_>) {
        entity.remove_component::<C>();
    }

    fn serialize_field(
        &self,
        archive: &mut FieldArchive<'_>,
        value: &mut Option<ComponentValue>,
    ) -> Result<(), ArchiveError> {
        match archive {
            FieldArchive::JsonWriter(map) => {
                if let Some(value) = value {
                    let component = Self::expect_value(value);
                    if let Some(field) = non_finite_field(component) {
                        return Err(ArchiveError::NonFinite {
                            component: C::NAME,
                            field,
                        });
                    }
                    let json = serde_json::to_value(component).map_err(|source| {
                        ArchiveError::Json {
                            component: C::NAME,
                            source,
                        }
                    })?;
                    map.insert(C::NAME.to_owned(), json);
                }
            }
            FieldArchive::JsonReader(map) => {
                *value = match map.get(C::NAME) {
                    None | Some(serde_json::Value::Null) => None,
                    Some(json) => {
                        let component: C = serde_json::from_value(json.clone()).map_err(
                            |source| ArchiveError::Json {
                                component: C::NAME,
                                source,
                            },
                        )?;
                        Some(ComponentValue::new(component))
                    }
                };
            }
            FieldArchive::BinaryWriter(fields) => {
                if let Some(value) = value {
                    let component = Self::expect_value(value);
                    let data = bincode::serde::encode_to_vec(component, config::standard())
                        .map_err(|err| ArchiveError::Binary {
                            component: C::NAME,
                            message: err.to_string(),
                        })?;
                    fields.push(BinaryField {
                        name: C::NAME.to_owned(),
                        data,
                    });
                }
            }
            FieldArchive::BinaryReader(fields) => {
                *value = match fields.iter().find(|field| field.name == C::NAME) {
                    None => None,
                    Some(field) => {
                        let (component, read): (C, usize) =
                            bincode::serde::decode_from_slice(&field.data, config::standard())
                                .map_err(|err| ArchiveError::Binary {
                                    component: C::NAME,
                                    message: err.to_string(),
                                })?;
                        if read != field.data.len() {
                            return Err(ArchiveError::Binary {
                                component: C::NAME,
                                message: format!(
                                    "{} trailing bytes",
                                    field.data.len() - read
                                ),
                            });
                        }
                        Some(ComponentValue::new(component))
                    }
                };
            }
            FieldArchive::RonWriter(fields) => {
                if let Some(value) = value {
                    let raw = RawValue::from_rust(Self::expect_value(value)).map_err(|err| {
                        ArchiveError::Ron {
                            component: C::NAME,
                            message: err.to_string(),
                        }
                    })?;
                    fields.push(RonField {
                        name: C::NAME.to_owned(),
                        value: raw,
                    });
                }
            }
            FieldArchive::RonReader(fields) => {
                *value = match fields.iter().find(|field| field.name == C::NAME) {
                    None => None,
                    Some(field) => {
                        let component: C =
                            field.value.into_rust().map_err(|err| ArchiveError::Ron {
                                component: C::NAME,
                                message: err.to_string(),
                            })?;
                        Some(ComponentValue::new(component))
                    }
                };
            }
        }
        Ok(())
    }

    fn render_inspector(&self, entity: &mut EntityMut<'_>, ui: &mut dyn InspectorUi) {
        if entity.has::<C>() {
            C::render_inspector(entity, ui);
        }
    }

    fn register_bindings(&self, bindings: &mut dyn ScriptBindings) {
        C::add_bindings(bindings);
    }
}

/// One entry of the process-wide catalogue, submitted with
/// [`register_component!`](crate::register_component).
pub struct ComponentRegistration {
    order: u32,
    descriptor: fn() -> Box<dyn ComponentDescriptor>,
}

impl ComponentRegistration {
    /// Registers `C` at catalogue position `order`.
    pub const fn new<C: Component>(order: u32) -> Self {
        Self {
            order,
            descriptor: TypedDescriptor::<C>::boxed,
        }
    }
}

inventory::collect!(ComponentRegistration);

/// Adds a type to the process-wide component catalogue.
///
/// The second argument is the type's position key; the catalogue is sorted
/// by key, then by name.
#[macro_export]
macro_rules! register_component {
    ($ty:ty, $order:expr) => {
        $crate::inventory::submit! {
            $crate::ecs::ComponentRegistration::new::<$ty>($order)
        }
    };
}

/// An immutable, ordered catalogue of component descriptors.
pub struct ComponentRegistry {
    descriptors: Vec<Box<dyn ComponentDescriptor>>,
    by_name: HashMap<&'static str, usize>,
    by_type: HashMap<TypeId, usize>,
}

static GLOBAL: OnceLock<Arc<ComponentRegistry>> = OnceLock::new();

impl ComponentRegistry {
    /// The process-wide catalogue, collected from every
    /// [`register_component!`](crate::register_component) on first use.
    ///
    /// # Panics
    ///
    /// If two registrations share a type or a name.
    pub fn global() -> Arc<ComponentRegistry> {
        GLOBAL
            .get_or_init(|| {
                let mut entries: Vec<(u32, Box<dyn ComponentDescriptor>)> =
                    inventory::iter::<ComponentRegistration>
                        .into_iter()
                        .map(|entry| (entry.order, (entry.descriptor)()))
                        .collect();
                entries.sort_by(|(a_order, a), (b_order, b)| {
                    a_order.cmp(b_order).then_with(|| a.name().cmp(b.name()))
                });

                let registry = entries
                    .into_iter()
                    .fold(ComponentRegistry::builder(), |builder, (_, descriptor)| {
                        builder.with_descriptor(descriptor)
                    })
                    .build();
                log::debug!(
                    "Component catalogue collected: [{}]",
                    registry.names().collect::<Vec<_>>().join(", ")
                );
                Arc::new(registry)
            })
            .clone()
    }

    /// Starts a custom registry. Descriptors keep the order they are added in.
    pub fn builder() -> ComponentRegistryBuilder {
        ComponentRegistryBuilder::default()
    }

    /// Number of catalogue types.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Iterates over descriptors in catalogue order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &dyn ComponentDescriptor> + '_ {
        self.descriptors.iter().map(|descriptor| descriptor.as_ref())
    }

    /// Iterates over catalogue names in catalogue order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter().map(|descriptor| descriptor.name())
    }

    /// Looks a descriptor up by catalogue name.
    pub fn get_by_name(&self, name: &str) -> Option<&dyn ComponentDescriptor> {
        self.by_name
            .get(name)
            .map(|&index| self.descriptors[index].as_ref())
    }

    /// Looks the descriptor of `C` up.
    pub fn get<C: Component>(&self) -> Option<&dyn ComponentDescriptor> {
        self.by_type
            .get(&TypeId::of::<C>())
            .map(|&index| self.descriptors[index].as_ref())
    }

    /// Catalogue position of `C`.
    pub fn index_of<C: Component>(&self) -> Option<usize> {
        self.by_type.get(&TypeId::of::<C>()).copied()
    }

    /// Returns `true` if `name` is a catalogue name.
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Builds a [`ComponentRegistry`].
#[derive(Default)]
pub struct ComponentRegistryBuilder {
    descriptors: Vec<Box<dyn ComponentDescriptor>>,
}

impl ComponentRegistryBuilder {
    /// Appends the descriptor of `C`.
    pub fn register<C: Component>(self) -> Self {
        self.with_descriptor(TypedDescriptor::<C>::boxed())
    }

    /// Appends a hand-written descriptor.
    pub fn with_descriptor(mut self, descriptor: Box<dyn ComponentDescriptor>) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Freezes the catalogue.
    ///
    /// # Panics
    ///
    /// If two descriptors share a type or a name.
    pub fn build(self) -> ComponentRegistry {
        let mut by_name = HashMap::with_capacity(self.descriptors.len());
        let mut by_type = HashMap::with_capacity(self.descriptors.len());
        for (index, descriptor) in self.descriptors.iter().enumerate() {
            if by_type.insert(descriptor.component_type(), index).is_some() {
                panic!("component type `{}` is registered twice", descriptor.name());
            }
            if by_name.insert(descriptor.name(), index).is_some() {
                panic!("component name `{}` is registered twice", descriptor.name());
            }
        }
        ComponentRegistry {
            descriptors: self.descriptors,
            by_name,
            by_type,
        }
    }
}
