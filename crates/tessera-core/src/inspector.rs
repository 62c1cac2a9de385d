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

//! The inspector (editor UI) collaborator contract.

use serde_json::Value;

/// Widget surface offered by an editor to component inspectors.
///
/// Values travel as [`serde_json::Value`] so one widget set can edit every
/// catalogue type generically. Returning `true` from [`field`](Self::field)
/// means the user changed the value in place.
pub trait InspectorUi {
    /// Opens the section for one component. Returns `false` when the section
    /// is collapsed, in which case no fields are drawn.
    fn begin_component(&mut self, name: &str) -> bool;

    /// Draws (and possibly edits) one field.
    fn field(&mut self, label: &str, value: &mut Value) -> bool;

    /// Closes the section opened by [`begin_component`](Self::begin_component).
    fn end_component(&mut self);
}
