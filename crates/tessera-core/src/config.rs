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

//! Serialization settings, loaded by tools from `Tessera.toml`.

use serde::{Deserialize, Serialize};

use crate::scene::SceneFormat;

/// Tunables for scene persistence.
///
/// Every field has a default so partial configuration files are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializationSettings {
    /// Format used when neither the caller nor the file extension picks one.
    pub default_format: SceneFormat,
    /// Indent text formats.
    pub pretty: bool,
    /// Write files through a temporary sibling that is renamed on success.
    pub atomic_writes: bool,
}

impl Default for SerializationSettings {
    fn default() -> Self {
        Self {
            default_format: SceneFormat::Json,
            pretty: true,
            atomic_writes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: SerializationSettings =
            serde_json::from_str(r#"{ "default_format": "binary" }"#).unwrap();
        assert_eq!(settings.default_format, SceneFormat::Binary);
        assert!(settings.pretty);
        assert!(settings.atomic_writes);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result: Result<SerializationSettings, _> =
            serde_json::from_str(r#"{ "default_format": "xml" }"#);
        assert!(result.is_err());
    }
}
