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

use std::any::Any;
use std::fmt;

use super::Component;

/// A type-erased component value travelling between the registry and a
/// snapshot.
///
/// It remembers the catalogue name of the value it holds so mismatches can be
/// reported meaningfully.
pub struct ComponentValue {
    name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

impl ComponentValue {
    /// Erases `component`.
    pub fn new<C: Component>(component: C) -> Self {
        Self {
            name: C::NAME,
            value: Box::new(component),
        }
    }

    /// The catalogue name of the held value.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if the held value is a `C`.
    pub fn is<C: Component>(&self) -> bool {
        self.value.is::<C>()
    }

    /// Borrows the held value as a `C`.
    pub fn downcast_ref<C: Component>(&self) -> Option<&C> {
        self.value.downcast_ref::<C>()
    }

    /// Recovers the held value, or gives `self` back on a type mismatch.
    pub fn downcast<C: Component>(self) -> Result<C, Self> {
        let name = self.name;
        self.value
            .downcast::<C>()
            .map(|boxed| *boxed)
            .map_err(|value| Self { name, value })
    }
}

impl fmt::Debug for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentValue").field(&self.name).finish()
    }
}
