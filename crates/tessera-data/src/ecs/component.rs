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

//! The capability interface every catalogue type implements.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tessera_core::{inspector::InspectorUi, scripting::ScriptBindings};

use crate::scene::EntityMut;

/// A type that can be attached to an entity and persisted with its scene.
///
/// Besides being plain data, a component exposes four capabilities:
///
/// - lifecycle: [`on_added`](Self::on_added) runs exactly once, right after
///   the value is stored; [`on_removed`](Self::on_removed) runs exactly once,
///   while the value is still attached, right before it is erased.
/// - inspection: [`render_inspector`](Self::render_inspector) for the
///   editor collaborator.
/// - persistence: through `serde`. The serialized field set is what appears
///   in scene files under [`NAME`](Self::NAME).
/// - scripting: [`add_bindings`](Self::add_bindings), invoked once per type.
///
/// Every hook has a default, so hook-less types can simply
/// `#[derive(Component)]`.
pub trait Component: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The catalogue name, used as the field name in scene files.
    const NAME: &'static str;

    /// Called right after the component has been attached to `entity`.
    fn on_added(_entity: &mut EntityMut<'_>) {}

    /// Called right before the component is detached from `entity`.
    /// The component is still readable here.
    fn on_removed(_entity: &mut EntityMut<'_>) {}

    /// Presents the component to an editor and applies the edits.
    fn render_inspector(entity: &mut EntityMut<'_>, ui: &mut dyn InspectorUi) {
        let Some(current) = entity.try_get::<Self>() else {
            return;
        };
        if let Some(edited) = inspect_fields(current, ui) {
            *entity.get_mut::<Self>() = edited;
        }
    }

    /// Declares the type to the scripting runtime.
    fn add_bindings(bindings: &mut dyn ScriptBindings) {
        let fields = match serde_json::to_value(Self::default()) {
            Ok(Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        };
        bindings.register_type(Self::NAME, &fields);
    }
}

/// Shows every serialized field of `component` to `ui`.
///
/// Returns the edited value if the user changed anything and the edit still
/// deserializes; invalid edits are dropped with a warning.
pub fn inspect_fields<C: Component>(component: &C, ui: &mut dyn InspectorUi) -> Option<C> {
    let mut fields = match serde_json::to_value(component) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => serde_json::Map::new(),
        Err(err) => {
            log::warn!("Cannot inspect {}: {err}", C::NAME);
            return None;
        }
    };

    if !ui.begin_component(C::NAME) {
        return None;
    }
    let mut changed = false;
    for (label, value) in fields.iter_mut() {
        changed |= ui.field(label, value);
    }
    ui.end_component();

    if !changed {
        return None;
    }
    match serde_json::from_value(Value::Object(fields)) {
        Ok(edited) => Some(edited),
        Err(err) => {
            log::warn!("Rejected inspector edit of {}: {err}", C::NAME);
            None
        }
    }
}
