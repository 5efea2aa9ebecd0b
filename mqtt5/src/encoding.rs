//! Text encodings for packet payloads.
//!
//! [`PayloadEncoding`] selects how a string is turned into payload bytes
//! (and back). The names and aliases follow the text encodings commonly
//! accepted by MQTT tooling: `utf8`, `utf16le`, `latin1`, `ascii`,
//! `base64`, `base64url` and `hex`.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

use crate::error::{PacketError, Result};

/// Encoding selector for string payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PayloadEncoding {
    /// UTF-8 text.
    #[default]
    Utf8,
    /// UTF-16, little endian (`ucs2` is an alias).
    Utf16Le,
    /// ISO-8859-1, one byte per code point (`binary` is an alias).
    Latin1,
    /// 7-bit ASCII.
    Ascii,
    /// Standard Base64 with padding.
    Base64,
    /// URL-safe Base64 without padding.
    Base64Url,
    /// Lowercase hexadecimal.
    Hex,
}

impl PayloadEncoding {
    /// Returns the canonical name of the encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadEncoding::Utf8 => "utf8",
            PayloadEncoding::Utf16Le => "utf16le",
            PayloadEncoding::Latin1 => "latin1",
            PayloadEncoding::Ascii => "ascii",
            PayloadEncoding::Base64 => "base64",
            PayloadEncoding::Base64Url => "base64url",
            PayloadEncoding::Hex => "hex",
        }
    }

    /// Converts text into payload bytes.
    ///
    /// Text the encoding cannot represent is rejected rather than truncated.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            PayloadEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            PayloadEncoding::Utf16Le => Ok(text
                .encode_utf16()
                .flat_map(|unit| unit.to_le_bytes())
                .collect()),
            PayloadEncoding::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| {
                        PacketError::InvalidPayload(format!("{:?} is not latin1", c))
                    })
                })
                .collect(),
            PayloadEncoding::Ascii => {
                if text.is_ascii() {
                    Ok(text.as_bytes().to_vec())
                } else {
                    Err(PacketError::InvalidPayload("text is not ascii".to_string()))
                }
            }
            PayloadEncoding::Base64 => STANDARD
                .decode(text)
                .map_err(|e| PacketError::InvalidPayload(e.to_string())),
            PayloadEncoding::Base64Url => URL_SAFE_NO_PAD
                .decode(text)
                .map_err(|e| PacketError::InvalidPayload(e.to_string())),
            PayloadEncoding::Hex => {
                // decode() emits lowercase only.
                if text.bytes().any(|b| b.is_ascii_uppercase()) {
                    return Err(PacketError::InvalidPayload(
                        "hex must be lowercase".to_string(),
                    ));
                }
                hex::decode(text).map_err(|e| PacketError::InvalidPayload(e.to_string()))
            }
        }
    }

    /// Converts payload bytes back into text.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self {
            PayloadEncoding::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|e| PacketError::InvalidPayload(e.to_string())),
            PayloadEncoding::Utf16Le => {
                if bytes.len() % 2 != 0 {
                    return Err(PacketError::InvalidPayload(
                        "utf16le payload has odd length".to_string(),
                    ));
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).map_err(|e| PacketError::InvalidPayload(e.to_string()))
            }
            PayloadEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            PayloadEncoding::Ascii => {
                if bytes.is_ascii() {
                    Ok(bytes.iter().map(|&b| char::from(b)).collect())
                } else {
                    Err(PacketError::InvalidPayload("payload is not ascii".to_string()))
                }
            }
            PayloadEncoding::Base64 => Ok(STANDARD.encode(bytes)),
            PayloadEncoding::Base64Url => Ok(URL_SAFE_NO_PAD.encode(bytes)),
            PayloadEncoding::Hex => Ok(hex::encode(bytes)),
        }
    }
}

impl fmt::Display for PayloadEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadEncoding {
    type Err = PacketError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(PayloadEncoding::Utf8),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(PayloadEncoding::Utf16Le),
            "latin1" | "binary" => Ok(PayloadEncoding::Latin1),
            "ascii" => Ok(PayloadEncoding::Ascii),
            "base64" => Ok(PayloadEncoding::Base64),
            "base64url" => Ok(PayloadEncoding::Base64Url),
            "hex" => Ok(PayloadEncoding::Hex),
            other => Err(PacketError::InvalidPayload(format!(
                "unknown encoding: {}",
                other
            ))),
        }
    }
}

/// Serde adapter: payload bytes as a standard Base64 string.
///
/// `null` and a missing value both read as an empty payload.
pub(crate) mod base64_payload {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(payload: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(payload))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        match encoded {
            Some(s) => STANDARD
                .decode(s)
                .map(Bytes::from)
                .map_err(serde::de::Error::custom),
            None => Ok(Bytes::new()),
        }
    }
}
