//! Converter configuration.
//!
//! Set once when a converter is constructed, never mutated afterwards.

use std::sync::Arc;

use crate::error::ConvertError;
use crate::media_type::{Charset, MediaType, Registry};

/// Per-converter settings: the advertised charset and the ordered list of
/// supported media types, backed by a shared [`Registry`].
///
/// Every supported media type and the charset are guaranteed to have a
/// registry entry; [`ConverterConfigBuilder::build`] rejects anything else.
#[derive(Clone, Debug)]
pub struct ConverterConfig {
    charset: Charset,
    media_types: Vec<MediaType>,
    registry: Arc<Registry>,
}

impl ConverterConfig {
    /// Start from the defaults (UTF-8, JSON then protobuf, shared registry).
    pub fn builder() -> ConverterConfigBuilder {
        ConverterConfigBuilder::default()
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Supported media types in negotiation order.
    pub fn media_types(&self) -> &[MediaType] {
        &self.media_types
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Whether `media_type` is supported.
    pub fn supports(&self, media_type: MediaType) -> bool {
        self.media_types.contains(&media_type)
    }

    /// Wire string of the configured charset.
    pub fn charset_str(&self) -> &'static str {
        // Checked at build time; the fallback only guards a hand-made registry.
        self.registry
            .charset_str(self.charset)
            .unwrap_or(self.charset.as_str())
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            charset: Charset::Utf8,
            media_types: vec![MediaType::Json, MediaType::Protobuf],
            registry: Registry::shared(),
        }
    }
}

/// Builder for [`ConverterConfig`].
///
/// # Example
///
/// ```
/// use msgconv_core::{Charset, ConverterConfig, MediaType};
///
/// let config = ConverterConfig::builder()
///     .charset(Charset::UsAscii)
///     .media_types([MediaType::Protobuf])
///     .build()
///     .unwrap();
/// assert!(!config.supports(MediaType::Json));
/// ```
#[derive(Debug)]
pub struct ConverterConfigBuilder {
    charset: Charset,
    media_types: Vec<MediaType>,
    registry: Arc<Registry>,
}

impl Default for ConverterConfigBuilder {
    fn default() -> Self {
        let config = ConverterConfig::default();
        Self {
            charset: config.charset,
            media_types: config.media_types,
            registry: config.registry,
        }
    }
}

impl ConverterConfigBuilder {
    /// Charset advertised in the `Content-Type` of encoded messages.
    pub fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Replace the supported media types. Order sets negotiation priority;
    /// duplicates are dropped.
    pub fn media_types<I>(mut self, media_types: I) -> Self
    where
        I: IntoIterator<Item = MediaType>,
    {
        self.media_types.clear();
        for m in media_types {
            if !self.media_types.contains(&m) {
                self.media_types.push(m);
            }
        }
        self
    }

    /// Use a different registry than the process-wide standard one.
    pub fn registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = registry;
        self
    }

    /// Validate against the registry and freeze the configuration.
    pub fn build(self) -> Result<ConverterConfig, ConvertError> {
        if let Some(missing) = self
            .media_types
            .iter()
            .find(|m| !self.registry.contains(**m))
        {
            return Err(ConvertError::unsupported(missing.as_str()));
        }
        if self.registry.charset_str(self.charset).is_none() {
            return Err(ConvertError::unsupported(format!(
                "charset={}",
                self.charset.as_str()
            )));
        }
        Ok(ConverterConfig {
            charset: self.charset,
            media_types: self.media_types,
            registry: self.registry,
        })
    }
}
