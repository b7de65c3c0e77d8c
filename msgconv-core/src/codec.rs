//! Message capability and codec dispatch.
//!
//! This module provides the [`WireMessage`] trait, the capability a message
//! needs for a converter to encode and decode it:
//! - structured text via `serde_json`
//! - compact binary via `prost`
//!
//! Every `prost` message that also derives `serde` gets it for free.

use bytes::Bytes;
use prost::Message;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CodecError;
use crate::media_type::MediaType;

/// A message that can travel as structured text or compact binary.
///
/// Decoding replaces the destination's contents rather than merging into it.
/// The trait is object-safe so `&mut dyn WireMessage` works as a decode target.
///
/// # Example
///
/// ```
/// use msgconv_core::WireMessage;
///
/// #[derive(Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize)]
/// struct Ping {
///     #[prost(string, tag = "1")]
///     pub id: String,
/// }
///
/// let bytes = Ping { id: "a".into() }.encode_text()?;
/// assert_eq!(bytes, br#"{"id":"a"}"#);
///
/// let mut out = Ping::default();
/// out.decode_text(&bytes)?;
/// assert_eq!(out.id, "a");
/// # Ok::<(), msgconv_core::CodecError>(())
/// ```
pub trait WireMessage {
    /// Encode as JSON.
    fn encode_text(&self) -> Result<Vec<u8>, CodecError>;

    /// Replace `self` with the message decoded from JSON.
    fn decode_text(&mut self, body: &[u8]) -> Result<(), CodecError>;

    /// Encode as protobuf.
    fn encode_binary(&self) -> Result<Vec<u8>, CodecError>;

    /// Replace `self` with the message decoded from protobuf.
    fn decode_binary(&mut self, body: &[u8]) -> Result<(), CodecError>;
}

impl<T> WireMessage for T
where
    T: Message + Serialize + DeserializeOwned + Default,
{
    fn encode_text(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(self).map_err(CodecError::JsonEncode)
    }

    fn decode_text(&mut self, body: &[u8]) -> Result<(), CodecError> {
        *self = serde_json::from_slice(body).map_err(CodecError::JsonDecode)?;
        Ok(())
    }

    fn encode_binary(&self) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode(&mut buf)?;
        Ok(buf)
    }

    fn decode_binary(&mut self, body: &[u8]) -> Result<(), CodecError> {
        *self = T::decode(body)?;
        Ok(())
    }
}

/// Encode `message` with the codec matching `media_type`.
pub fn encode_message<M>(media_type: MediaType, message: &M) -> Result<Bytes, CodecError>
where
    M: WireMessage + ?Sized,
{
    let data = match media_type {
        MediaType::Json => message.encode_text()?,
        MediaType::Protobuf => message.encode_binary()?,
    };
    Ok(Bytes::from(data))
}

/// Decode `body` into `destination` with the codec matching `media_type`.
pub fn decode_message<M>(
    media_type: MediaType,
    body: &[u8],
    destination: &mut M,
) -> Result<(), CodecError>
where
    M: WireMessage + ?Sized,
{
    match media_type {
        MediaType::Json => destination.decode_text(body),
        MediaType::Protobuf => destination.decode_binary(body),
    }
}
