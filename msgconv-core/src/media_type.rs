//! Media types, charsets and the registry mapping them to wire strings.
//!
//! - [`MediaType`]: the wire formats a converter can negotiate
//! - [`Charset`]: text encodings advertised in `Content-Type`
//! - [`Registry`]: immutable lookup table from identifiers to wire strings

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire format of a message body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// Structured text (`application/json`).
    Json,
    /// Compact binary (`application/x-protobuf`).
    Protobuf,
}

impl MediaType {
    /// Every media type, in canonical order.
    pub const ALL: [MediaType; 2] = [MediaType::Json, MediaType::Protobuf];

    /// Canonical wire string for this media type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Json => "application/json",
            MediaType::Protobuf => "application/x-protobuf",
        }
    }

    /// Whether bodies of this type are encoded as structured text.
    pub fn is_text(&self) -> bool {
        matches!(self, MediaType::Json)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`MediaType`] or [`Charset`] from a string fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseIdentifierError {
    kind: &'static str,
    value: String,
}

impl FromStr for MediaType {
    type Err = ParseIdentifierError;

    /// Parses an exact canonical wire string. Parameters are not stripped;
    /// use [`resolve_media_type`](crate::resolve_media_type) for header values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaType::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ParseIdentifierError {
                kind: "media type",
                value: s.to_owned(),
            })
    }
}

impl Serialize for MediaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MediaType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Text encoding advertised in the `Content-Type` charset parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Charset {
    Iso88591,
    UsAscii,
    #[default]
    Utf8,
}

impl Charset {
    /// Every charset, in canonical order.
    pub const ALL: [Charset; 3] = [Charset::Iso88591, Charset::UsAscii, Charset::Utf8];

    /// Canonical wire string for this charset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Charset::Iso88591 => "ISO-8859-1",
            Charset::UsAscii => "US-ASCII",
            Charset::Utf8 => "UTF-8",
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Charset {
    type Err = ParseIdentifierError;

    // Charset names are case-insensitive on the wire.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Charset::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseIdentifierError {
                kind: "charset",
                value: s.to_owned(),
            })
    }
}

impl Serialize for Charset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Charset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Immutable mapping from media types and charsets to their wire strings.
///
/// Built once at start-up and shared by reference between converters. There
/// is no way to change a registry after [`RegistryBuilder::build`].
///
/// # Example
///
/// ```
/// use msgconv_core::{MediaType, Registry};
///
/// let registry = Registry::shared();
/// assert_eq!(registry.media_type_str(MediaType::Json), Some("application/json"));
/// assert_eq!(registry.lookup("application/x-protobuf"), Some(MediaType::Protobuf));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registry {
    media_types: Vec<(MediaType, &'static str)>,
    charsets: Vec<(Charset, &'static str)>,
}

impl Registry {
    /// Registry holding every canonical media type and charset.
    pub fn standard() -> Self {
        Self {
            media_types: MediaType::ALL.iter().map(|m| (*m, m.as_str())).collect(),
            charsets: Charset::ALL.iter().map(|c| (*c, c.as_str())).collect(),
        }
    }

    /// Process-wide standard registry, constructed on first use.
    pub fn shared() -> Arc<Registry> {
        static SHARED: OnceLock<Arc<Registry>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Registry::standard())).clone()
    }

    /// Start an empty registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Wire string registered for `media_type`.
    pub fn media_type_str(&self, media_type: MediaType) -> Option<&'static str> {
        self.media_types
            .iter()
            .find(|(m, _)| *m == media_type)
            .map(|(_, s)| *s)
    }

    /// Wire string registered for `charset`.
    pub fn charset_str(&self, charset: Charset) -> Option<&'static str> {
        self.charsets
            .iter()
            .find(|(c, _)| *c == charset)
            .map(|(_, s)| *s)
    }

    /// Media type whose wire string is exactly `wire`.
    pub fn lookup(&self, wire: &str) -> Option<MediaType> {
        self.media_types
            .iter()
            .find(|(_, s)| *s == wire)
            .map(|(m, _)| *m)
    }

    /// Whether `media_type` has an entry.
    pub fn contains(&self, media_type: MediaType) -> bool {
        self.media_type_str(media_type).is_some()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for a narrowed [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    media_types: Vec<(MediaType, &'static str)>,
    charsets: Vec<(Charset, &'static str)>,
}

impl RegistryBuilder {
    /// Register `media_type` under its canonical wire string.
    ///
    /// Registering the same media type twice keeps the first entry.
    pub fn media_type(mut self, media_type: MediaType) -> Self {
        if !self.media_types.iter().any(|(m, _)| *m == media_type) {
            self.media_types.push((media_type, media_type.as_str()));
        }
        self
    }

    /// Register `charset` under its canonical wire string.
    pub fn charset(mut self, charset: Charset) -> Self {
        if !self.charsets.iter().any(|(c, _)| *c == charset) {
            self.charsets.push((charset, charset.as_str()));
        }
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            media_types: self.media_types,
            charsets: self.charsets,
        }
    }
}
