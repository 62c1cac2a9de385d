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

//! The bidirectional archive a descriptor reads fields from or writes them to.
//!
//! JSON records are objects whose keys are catalogue names. RON and binary
//! records keep one encoded value per present component, tagged with its
//! catalogue name, so a reader can skip entries it does not know.

use std::fmt;

use bincode::{Decode, Encode};
use ron::value::RawValue;
use serde_json::{Map, Value};

/// One serialized component inside a binary record.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct BinaryField {
    /// Catalogue name of the component.
    pub name: String,
    /// The component encoded with bincode's serde bridge.
    pub data: Vec<u8>,
}

/// One serialized component inside a RON record, kept as its own RON text.
#[derive(Debug)]
pub struct RonField {
    /// Catalogue name of the component.
    pub name: String,
    /// The component written as RON.
    pub value: Box<RawValue>,
}

/// Where [`ComponentDescriptor::serialize_field`](super::ComponentDescriptor::serialize_field)
/// reads from or writes to.
pub enum FieldArchive<'a> {
    /// Writes present components as named JSON values.
    JsonWriter(&'a mut Map<String, Value>),
    /// Reads named JSON values. Missing or `null` means absent.
    JsonReader(&'a Map<String, Value>),
    /// Appends present components as named binary blobs.
    BinaryWriter(&'a mut Vec<BinaryField>),
    /// Reads named binary blobs. Missing means absent.
    BinaryReader(&'a [BinaryField]),
    /// Appends present components as named RON values.
    RonWriter(&'a mut Vec<RonField>),
    /// Reads named RON values. Missing means absent.
    RonReader(&'a [RonField]),
}

impl FieldArchive<'_> {
    /// Returns `true` for the reading variants.
    pub fn is_reader(&self) -> bool {
        matches!(
            self,
            FieldArchive::JsonReader(_) | FieldArchive::BinaryReader(_) | FieldArchive::RonReader(_)
        )
    }
}

/// A component field that could not be encoded or decoded.
#[derive(Debug)]
pub enum ArchiveError {
    /// A JSON value did not match the component's field set.
    Json {
        /// Catalogue name of the component.
        component: &'static str,
        /// The underlying error.
        source: serde_json::Error,
    },
    /// A float JSON cannot represent (NaN or infinite).
    NonFinite {
        /// Catalogue name of the component.
        component: &'static str,
        /// Dotted path of the offending field.
        field: String,
    },
    /// A RON value could not be encoded or decoded.
    Ron {
        /// Catalogue name of the component.
        component: &'static str,
        /// The underlying error, rendered.
        message: String,
    },
    /// A binary blob could not be encoded or decoded.
    Binary {
        /// Catalogue name of the component.
        component: &'static str,
        /// The underlying error, rendered.
        message: String,
    },
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveError::Json { component, source } => {
                write!(f, "Invalid `{component}` field: {source}")
            }
            ArchiveError::NonFinite { component, field } => write!(
                f,
                "`{component}.{field}` is not a finite number and cannot be written as JSON"
            ),
            ArchiveError::Ron { component, message } => {
                write!(f, "Invalid RON `{component}` field: {message}")
            }
            ArchiveError::Binary { component, message } => {
                write!(f, "Invalid binary `{component}` field: {message}")
            }
        }
    }
}

impl std::error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArchiveError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
