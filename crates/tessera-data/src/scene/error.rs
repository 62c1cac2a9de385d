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

use crate::ecs::ArchiveError;

/// An error raised while building or restoring a scene.
#[derive(Debug)]
pub enum SceneError {
    /// Two entities claim the same GUID.
    DuplicateGuid(EntityHandle),
    /// A component or metadata field could not be encoded or decoded.
    Archive(ArchiveError),
    /// A record has no `EntityMetadata`.
    MissingMetadata,
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::DuplicateGuid(guid) => write!(f, "Duplicate entity GUID `{guid}`"),
            SceneError::Archive(err) => write!(f, "{err}"),
            SceneError::MissingMetadata => write!(f, "Entity record without EntityMetadata"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Archive(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ArchiveError> for SceneError {
    fn from(err: ArchiveError) -> Self {
        SceneError::Archive(err)
    }
}
