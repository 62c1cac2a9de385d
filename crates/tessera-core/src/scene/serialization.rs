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

//! Defines how callers choose a scene encoding.
//!
//! Callers either name a concrete [`SceneFormat`] or express an *intent* with
//! a [`SerializationGoal`] and let the serialization agent pick the format.

use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, str::FromStr};

/// Defines the developer's high-level intention for a serialization operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerializationGoal {
    /// Prioritizes the fastest possible loading time.
    FastestLoad,

    /// Prioritizes the smallest possible file size on disk.
    SmallestFileSize,

    /// Prioritizes human-readability for debugging and version control.
    HumanReadableDebug,

    /// Prioritizes long-term stability and interchange with other tools.
    LongTermStability,
}

/// A concrete scene encoding. Each one is implemented by one loader lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneFormat {
    /// The textual `{"entities": [...]}` document.
    #[default]
    Json,
    /// The same document tree written as RON.
    Ron,
    /// A versioned, self-describing binary container.
    Binary,
}

impl SceneFormat {
    /// All formats, in a stable order.
    pub const ALL: [SceneFormat; 3] = [SceneFormat::Json, SceneFormat::Ron, SceneFormat::Binary];

    /// Picks the format that best serves `goal`.
    pub fn for_goal(goal: SerializationGoal) -> Self {
        match goal {
            SerializationGoal::FastestLoad | SerializationGoal::SmallestFileSize => {
                SceneFormat::Binary
            }
            SerializationGoal::HumanReadableDebug => SceneFormat::Ron,
            SerializationGoal::LongTermStability => SceneFormat::Json,
        }
    }

    /// Maps a file extension (without the dot, case-insensitive) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(SceneFormat::Json),
            "ron" => Some(SceneFormat::Ron),
            "tscene" | "bin" => Some(SceneFormat::Binary),
            _ => None,
        }
    }

    /// Maps a path's extension to a format.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// The canonical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            SceneFormat::Json => "json",
            SceneFormat::Ron => "ron",
            SceneFormat::Binary => "tscene",
        }
    }

    /// Returns `true` for the text formats.
    pub fn is_text(&self) -> bool {
        !matches!(self, SceneFormat::Binary)
    }
}

impl fmt::Display for SceneFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SceneFormat::Json => "json",
            SceneFormat::Ron => "ron",
            SceneFormat::Binary => "binary",
        })
    }
}

impl FromStr for SceneFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(SceneFormat::Json),
            "ron" => Ok(SceneFormat::Ron),
            "binary" | "bin" | "tscene" => Ok(SceneFormat::Binary),
            other => Err(format!("unknown scene format `{other}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_mapping() {
        assert_eq!(SceneFormat::from_extension("JSON"), Some(SceneFormat::Json));
        assert_eq!(SceneFormat::from_extension("ron"), Some(SceneFormat::Ron));
        assert_eq!(SceneFormat::from_extension("tscene"), Some(SceneFormat::Binary));
        assert_eq!(SceneFormat::from_extension("txt"), None);
        assert_eq!(
            SceneFormat::from_path(Path::new("levels/intro.tscene")),
            Some(SceneFormat::Binary)
        );
    }

    #[test]
    fn test_every_format_round_trips_through_its_name_and_extension() {
        for format in SceneFormat::ALL {
            assert_eq!(format.to_string().parse::<SceneFormat>(), Ok(format));
            assert_eq!(SceneFormat::from_extension(format.extension()), Some(format));
        }
    }

    #[test]
    fn test_goal_mapping() {
        assert_eq!(
            SceneFormat::for_goal(SerializationGoal::FastestLoad),
            SceneFormat::Binary
        );
        assert_eq!(
            SceneFormat::for_goal(SerializationGoal::LongTermStability),
            SceneFormat::Json
        );
        assert_eq!(
            SceneFormat::for_goal(SerializationGoal::HumanReadableDebug),
            SceneFormat::Ron
        );
    }
}
