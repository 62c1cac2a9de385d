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

//! Defines the binary container format for Tessera scenes.
//!
//! A binary scene file is a fixed-size [`SceneHeader`] followed by a
//! variable-length payload. The header identifies the file, carries the
//! container version, and names the strategy that encoded the payload so the
//! loader can dispatch it to the matching lane. Text scenes (JSON, RON) are
//! written without a header.

use std::fmt;

/// A unique byte sequence to identify Tessera scene files. ("TSRSCENE").
pub const HEADER_MAGIC_BYTES: [u8; 8] = *b"TSRSCENE";
/// The only container version this build reads and writes.
pub const HEADER_FORMAT_VERSION: u8 = 1;
const STRATEGY_ID_LEN: usize = 32;

/// An error raised while reading or building a scene file container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// Fewer bytes than a header needs.
    TooShort {
        /// Number of bytes available.
        available: usize,
    },
    /// The magic bytes do not match [`HEADER_MAGIC_BYTES`].
    BadMagic,
    /// The header was written by an unsupported container version.
    UnsupportedVersion(u8),
    /// The strategy id is not valid UTF-8 or does not fit in the header.
    InvalidStrategyId,
    /// The payload is shorter or longer than the header declares.
    PayloadLengthMismatch {
        /// Length declared by the header.
        declared: u64,
        /// Length actually present.
        actual: u64,
    },
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderError::TooShort { available } => write!(
                f,
                "Not enough bytes to form a valid header ({available} of {})",
                SceneHeader::SIZE
            ),
            HeaderError::BadMagic => write!(f, "Invalid magic bytes; not a Tessera scene file"),
            HeaderError::UnsupportedVersion(v) => write!(
                f,
                "Unsupported scene container version {v} (expected {HEADER_FORMAT_VERSION})"
            ),
            HeaderError::InvalidStrategyId => write!(f, "Invalid strategy id in scene header"),
            HeaderError::PayloadLengthMismatch { declared, actual } => write!(
                f,
                "Payload length mismatch: header declares {declared} bytes, found {actual}"
            ),
        }
    }
}

impl std::error::Error for HeaderError {}

/// The fixed-size header at the beginning of every binary scene file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneHeader {
    /// Magic bytes to identify the file type, must be `HEADER_MAGIC_BYTES`.
    pub magic_bytes: [u8; 8],
    /// The version of the header format itself.
    pub format_version: u8,
    /// A null-padded UTF-8 string identifying the serialization strategy used.
    /// e.g., "TS_BINARY_V1".
    pub strategy_id: [u8; STRATEGY_ID_LEN],
    /// The length of the payload data that follows this header, in bytes.
    pub payload_length: u64,
}

/// A logical representation of a full binary scene file in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneFile {
    /// The parsed header data.
    pub header: SceneHeader,
    /// The raw, variable-length payload data.
    pub payload: Vec<u8>,
}

// The header is a fixed layout written byte by byte; serde is only used for payloads.
impl SceneHeader {
    /// The total size of the header in bytes.
    pub const SIZE: usize = 8 + 1 + STRATEGY_ID_LEN + 8;

    /// Builds a header for a payload produced by `strategy_id`.
    pub fn new(strategy_id: &str, payload_length: u64) -> Result<Self, HeaderError> {
        let bytes = strategy_id.as_bytes();
        if bytes.is_empty() || bytes.len() > STRATEGY_ID_LEN {
            return Err(HeaderError::InvalidStrategyId);
        }
        let mut padded = [0u8; STRATEGY_ID_LEN];
        padded[..bytes.len()].copy_from_slice(bytes);

        Ok(Self {
            magic_bytes: HEADER_MAGIC_BYTES,
            format_version: HEADER_FORMAT_VERSION,
            strategy_id: padded,
            payload_length,
        })
    }

    /// Returns the strategy id without its null padding.
    pub fn strategy_id_str(&self) -> Result<&str, HeaderError> {
        std::str::from_utf8(&self.strategy_id)
            .map(|s| s.trim_end_matches('\0'))
            .map_err(|_| HeaderError::InvalidStrategyId)
    }

    /// Encodes the header into its fixed little-endian layout.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..8].copy_from_slice(&self.magic_bytes);
        out[8] = self.format_version;
        out[9..9 + STRATEGY_ID_LEN].copy_from_slice(&self.strategy_id);
        out[9 + STRATEGY_ID_LEN..].copy_from_slice(&self.payload_length.to_le_bytes());
        out
    }

    /// Attempts to parse a `SceneHeader` from the beginning of a byte slice.
    ///
    /// Fails on a short buffer, wrong magic, or a container version other
    /// than [`HEADER_FORMAT_VERSION`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HeaderError> {
        if bytes.len() < Self::SIZE {
            return Err(HeaderError::TooShort {
                available: bytes.len(),
            });
        }

        let mut magic_bytes = [0u8; 8];
        magic_bytes.copy_from_slice(&bytes[0..8]);
        if magic_bytes != HEADER_MAGIC_BYTES {
            log::warn!("Rejected scene file: bad magic bytes {magic_bytes:02x?}");
            return Err(HeaderError::BadMagic);
        }

        let format_version = bytes[8];
        if format_version != HEADER_FORMAT_VERSION {
            log::warn!("Rejected scene file: container version {format_version}");
            return Err(HeaderError::UnsupportedVersion(format_version));
        }

        let mut strategy_id = [0u8; STRATEGY_ID_LEN];
        strategy_id.copy_from_slice(&bytes[9..9 + STRATEGY_ID_LEN]);

        let mut length = [0u8; 8];
        length.copy_from_slice(&bytes[9 + STRATEGY_ID_LEN..Self::SIZE]);

        Ok(Self {
            magic_bytes,
            format_version,
            strategy_id,
            payload_length: u64::from_le_bytes(length),
        })
    }
}

impl SceneFile {
    /// Wraps a payload produced by `strategy_id` in a fresh header.
    pub fn new(strategy_id: &str, payload: Vec<u8>) -> Result<Self, HeaderError> {
        let header = SceneHeader::new(strategy_id, payload.len() as u64)?;
        Ok(Self { header, payload })
    }

    /// Returns `true` if `bytes` start with the scene magic.
    pub fn is_scene_file(bytes: &[u8]) -> bool {
        bytes.starts_with(&HEADER_MAGIC_BYTES)
    }

    /// Concatenates header and payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SceneHeader::SIZE + self.payload.len());
        out.extend_from_slice(&self.header.to_bytes());
        out.extend_from_slice(&self.payload);
        out
    }

    /// Parses a complete file, checking the payload length against the header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HeaderError> {
        let header = SceneHeader::from_bytes(bytes)?;
        let payload = &bytes[SceneHeader::SIZE..];
        if payload.len() as u64 != header.payload_length {
            log::warn!(
                "Rejected scene file: header declares {} payload bytes, found {}",
                header.payload_length,
                payload.len()
            );
            return Err(HeaderError::PayloadLengthMismatch {
                declared: header.payload_length,
                actual: payload.len() as u64,
            });
        }
        Ok(Self {
            header,
            payload: payload.to_vec(),
        })
    }
}
