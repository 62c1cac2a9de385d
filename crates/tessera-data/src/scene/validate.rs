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

use std::fmt;

use tessera_core::ecs::EntityHandle;

use super::Scene;

/// A structural problem found by [`Scene::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The parent GUID does not name an entity of the scene.
    DanglingParent {
        /// The child.
        entity: EntityHandle,
        /// The missing parent.
        parent: EntityHandle,
    },
    /// The entity is its own parent.
    SelfParent {
        /// The offending entity.
        entity: EntityHandle,
    },
    /// Following parent links from the entity leads back to it.
    ParentCycle {
        /// One member of the cycle.
        entity: EntityHandle,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::DanglingParent { entity, parent } => {
                write!(f, "entity {entity} has unknown parent {parent}")
            }
            ValidationIssue::SelfParent { entity } => {
                write!(f, "entity {entity} is its own parent")
            }
            ValidationIssue::ParentCycle { entity } => {
                write!(f, "entity {entity} is part of a parent cycle")
            }
        }
    }
}

impl Scene {
    /// Checks parent links. An empty result means the hierarchy is a forest.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for entity in self.iter() {
            let meta = entity.metadata();
            let guid = meta.guid();
            let parent = &meta.parent_entity;
            if parent.is_none() {
                continue;
            }
            if parent == guid {
                issues.push(ValidationIssue::SelfParent {
                    entity: guid.clone(),
                });
                continue;
            }
            if !self.contains(parent) {
                issues.push(ValidationIssue::DanglingParent {
                    entity: guid.clone(),
                    parent: parent.clone(),
                });
                continue;
            }

            // A chain longer than the scene can only be a cycle.
            let mut cursor = self.get(parent);
            let mut steps = 0;
            while let Some(ancestor) = cursor {
                if ancestor.guid() == guid {
                    issues.push(ValidationIssue::ParentCycle {
                        entity: guid.clone(),
                    });
                    break;
                }
                steps += 1;
                if steps > self.len() {
                    break;
                }
                cursor = ancestor.parent();
            }
        }
        issues
    }
}
