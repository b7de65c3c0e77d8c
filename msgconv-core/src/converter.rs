//! Converter contract and the binding-agnostic negotiation core.
//!
//! A binding only has to say how headers and bodies are read from and written
//! to its HTTP object model, by implementing [`InboundMessage`],
//! [`InboundRequest`] and [`OutboundMessage`] for thin views over its types.
//! Negotiation, the GET/DELETE short-circuit and codec dispatch all live in
//! [`ConverterCore`], so every binding behaves the same for the same input.

use std::borrow::Cow;
use std::io;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{ACCEPT, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method};

use crate::codec::{WireMessage, decode_message, encode_message};
use crate::config::ConverterConfig;
use crate::error::ConvertError;
use crate::media_type::MediaType;
use crate::resolve::resolve_media_type;

/// `Cache-Control` value set on every encoded message.
pub const NO_CACHE: &str = "no-cache";

/// The headers a converter reads or writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WireHeader {
    Accept,
    CacheControl,
    ContentLength,
    ContentType,
}

impl WireHeader {
    pub fn name(&self) -> HeaderName {
        match self {
            WireHeader::Accept => ACCEPT,
            WireHeader::CacheControl => CACHE_CONTROL,
            WireHeader::ContentLength => CONTENT_LENGTH,
            WireHeader::ContentType => CONTENT_TYPE,
        }
    }
}

/// Header bag restricted to [`WireHeader`]s.
pub trait HeaderView {
    fn header(&self, header: WireHeader) -> Option<&HeaderValue>;

    /// Replace any existing value.
    fn set_header(&mut self, header: WireHeader, value: HeaderValue);
}

impl HeaderView for HeaderMap {
    fn header(&self, header: WireHeader) -> Option<&HeaderValue> {
        self.get(header.name())
    }

    fn set_header(&mut self, header: WireHeader, value: HeaderValue) {
        self.insert(header.name(), value);
    }
}

/// Read side of a binding's request or response.
pub trait InboundMessage {
    type Headers: HeaderView + ?Sized;

    fn headers(&self) -> &Self::Headers;

    /// Obtain the body bytes. May consume a streaming body.
    fn body(&mut self) -> io::Result<Cow<'_, [u8]>>;
}

/// Read side of a binding's request.
pub trait InboundRequest: InboundMessage {
    fn method(&self) -> &Method;
}

/// Write side of a binding's request or response.
pub trait OutboundMessage {
    type Headers: HeaderView + ?Sized;

    fn headers_mut(&mut self) -> &mut Self::Headers;

    fn set_body(&mut self, body: Bytes);
}

/// A serialized message with the headers that describe it.
#[derive(Clone, Debug)]
pub struct Encoded {
    media_type: MediaType,
    accept: HeaderValue,
    content_type: HeaderValue,
    body: Bytes,
}

impl Encoded {
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// `<media-type>; charset=<charset>`
    pub fn content_type(&self) -> &HeaderValue {
        &self.content_type
    }

    /// Set `Accept`, `Content-Type`, `Cache-Control` and `Content-Length`,
    /// then attach the body.
    pub fn write_to<O>(self, out: &mut O)
    where
        O: OutboundMessage + ?Sized,
    {
        let headers = out.headers_mut();
        headers.set_header(WireHeader::Accept, self.accept);
        headers.set_header(WireHeader::ContentType, self.content_type);
        headers.set_header(WireHeader::CacheControl, HeaderValue::from_static(NO_CACHE));
        headers.set_header(WireHeader::ContentLength, HeaderValue::from(self.body.len()));
        out.set_body(self.body);
    }
}

/// Negotiation and codec dispatch shared by every binding.
///
/// Immutable after construction and cheap to clone; safe to use from many
/// threads at once.
#[derive(Clone, Debug, Default)]
pub struct ConverterCore {
    config: Arc<ConverterConfig>,
}

impl ConverterCore {
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn can_read(&self, media_type: MediaType) -> bool {
        self.config.supports(media_type)
    }

    pub fn can_write(&self, media_type: MediaType) -> bool {
        self.can_read(media_type)
    }

    /// Resolve a raw header value against this converter's supported types.
    pub fn media_type(&self, raw: &str) -> Result<MediaType, ConvertError> {
        resolve_media_type(raw, self.config.media_types(), self.config.registry())
    }

    /// Decode a request body, negotiating on `Accept`.
    ///
    /// GET and DELETE requests return `Ok(())` without looking at the body or
    /// the headers.
    pub fn decode_request<R, M>(
        &self,
        request: &mut R,
        destination: &mut M,
    ) -> Result<(), ConvertError>
    where
        R: InboundRequest + ?Sized,
        M: WireMessage + ?Sized,
    {
        let method = request.method();
        if *method == Method::GET || *method == Method::DELETE {
            tracing::trace!(%method, "request carries no body, skipping decode");
            return Ok(());
        }
        let media_type = self.header_media_type(request.headers(), WireHeader::Accept)?;
        self.decode_body(request, media_type, destination)
    }

    /// Decode a response body, negotiating on `Content-Type`.
    pub fn decode_response<R, M>(
        &self,
        response: &mut R,
        destination: &mut M,
    ) -> Result<(), ConvertError>
    where
        R: InboundMessage + ?Sized,
        M: WireMessage + ?Sized,
    {
        let media_type = self.header_media_type(response.headers(), WireHeader::ContentType)?;
        self.decode_body(response, media_type, destination)
    }

    /// Serialize `message` and prepare the headers describing it.
    ///
    /// Fails with [`ConvertError::UnsupportedMediaType`] before serializing if
    /// `media_type` is not supported.
    pub fn encode<M>(&self, media_type: MediaType, message: &M) -> Result<Encoded, ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        let registry = self.config.registry();
        let wire = match registry.media_type_str(media_type) {
            Some(wire) if self.can_write(media_type) => wire,
            _ => return Err(ConvertError::unsupported(media_type.as_str())),
        };

        let body = encode_message(media_type, message)?;
        let content_type = format!("{wire}; charset={}", self.config.charset_str());
        let content_type = HeaderValue::try_from(content_type).map_err(http::Error::from)?;

        tracing::trace!(%media_type, len = body.len(), "encoded message");
        Ok(Encoded {
            media_type,
            accept: HeaderValue::from_static(wire),
            content_type,
            body,
        })
    }

    fn header_media_type<H>(
        &self,
        headers: &H,
        header: WireHeader,
    ) -> Result<MediaType, ConvertError>
    where
        H: HeaderView + ?Sized,
    {
        match headers.header(header) {
            Some(value) => match value.to_str() {
                Ok(raw) => self.media_type(raw),
                Err(_) => Err(ConvertError::unsupported(
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )),
            },
            None => self.media_type(""),
        }
    }

    fn decode_body<R, M>(
        &self,
        inbound: &mut R,
        media_type: MediaType,
        destination: &mut M,
    ) -> Result<(), ConvertError>
    where
        R: InboundMessage + ?Sized,
        M: WireMessage + ?Sized,
    {
        let body = inbound.body()?;
        decode_message(media_type, &body, destination)?;
        tracing::trace!(%media_type, len = body.len(), "decoded message");
        Ok(())
    }
}

/// The operations every binding's converter offers.
///
/// Capability queries and negotiation come from the shared [`ConverterCore`];
/// implementors only map their own request/response types onto it.
pub trait MessageConverter {
    /// Request type produced by [`encode_request`](Self::encode_request).
    type Request;
    /// Response type produced by [`encode_response`](Self::encode_response).
    type Response;

    fn core(&self) -> &ConverterCore;

    /// Whether `media_type` can be decoded. Always equal to [`can_write`](Self::can_write).
    fn can_read(&self, media_type: MediaType) -> bool {
        self.core().can_read(media_type)
    }

    fn can_write(&self, media_type: MediaType) -> bool {
        self.core().can_write(media_type)
    }

    /// Resolve a raw header value to a supported media type.
    fn media_type(&self, raw: &str) -> Result<MediaType, ConvertError> {
        self.core().media_type(raw)
    }

    fn decode_request<M>(
        &self,
        request: &mut Self::Request,
        destination: &mut M,
    ) -> Result<(), ConvertError>
    where
        M: WireMessage + ?Sized;

    fn decode_response<M>(
        &self,
        response: &mut Self::Response,
        destination: &mut M,
    ) -> Result<(), ConvertError>
    where
        M: WireMessage + ?Sized;

    fn encode_request<M>(
        &self,
        method: Method,
        uri: &str,
        media_type: MediaType,
        message: &M,
    ) -> Result<Self::Request, ConvertError>
    where
        M: WireMessage + ?Sized;

    fn encode_response<M>(
        &self,
        media_type: MediaType,
        message: &M,
    ) -> Result<Self::Response, ConvertError>
    where
        M: WireMessage + ?Sized;
}
