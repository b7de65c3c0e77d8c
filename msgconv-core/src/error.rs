//! Conversion error types.
//!
//! - [`ConvertError`]: everything a converter operation can fail with
//! - [`CodecError`]: failures from the structured-text or compact-binary codec

use std::io;

/// Codec-level encode or decode failure.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// JSON encoding failed.
    #[error("failed to encode JSON message: {0}")]
    JsonEncode(#[source] serde_json::Error),

    /// JSON decoding failed.
    #[error("failed to decode JSON message: {0}")]
    JsonDecode(#[source] serde_json::Error),

    /// Protobuf encoding failed.
    #[error("failed to encode protobuf message: {0}")]
    ProtobufEncode(#[from] prost::EncodeError),

    /// Protobuf decoding failed.
    #[error("failed to decode protobuf message: {0}")]
    ProtobufDecode(#[from] prost::DecodeError),
}

/// Error returned by converter operations.
///
/// Nothing is retried inside the converter; every failure is handed back to
/// the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// A header-derived or caller-supplied media type is not registered and
    /// supported by this converter.
    #[error("media type not supported: {media_type:?}")]
    UnsupportedMediaType { media_type: String },

    /// The message could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The body could not be read from the transport.
    #[error("failed to read body: {0}")]
    BodyRead(#[source] io::Error),

    /// The outbound request could not be constructed (bad method or URI).
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] http::Error),
}

impl ConvertError {
    /// Create an unsupported media type error for the given raw value.
    pub fn unsupported<S: Into<String>>(media_type: S) -> Self {
        ConvertError::UnsupportedMediaType {
            media_type: media_type.into(),
        }
    }

    pub fn is_unsupported_media_type(&self) -> bool {
        matches!(self, ConvertError::UnsupportedMediaType { .. })
    }

    pub fn is_codec(&self) -> bool {
        matches!(self, ConvertError::Codec(_))
    }

    pub fn is_body_read(&self) -> bool {
        matches!(self, ConvertError::BodyRead(_))
    }
}

impl From<io::Error> for ConvertError {
    fn from(err: io::Error) -> Self {
        ConvertError::BodyRead(err)
    }
}
