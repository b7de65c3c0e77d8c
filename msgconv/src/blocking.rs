//! Blocking binding over `http::Request` and `http::Response`.
//!
//! Requests and responses are independent values owned by the caller. Bodies
//! are read through [`BlockingBody`]; encoded messages carry a [`Bytes`] body.

use std::borrow::Cow;
use std::io;

use bytes::Bytes;
use http::{HeaderMap, Method, Request, Response, StatusCode, Version};
use msgconv_core::{
    ConvertError, ConverterConfig, ConverterCore, InboundMessage, InboundRequest, MediaType,
    MessageConverter, OutboundMessage, WireMessage,
};

use crate::body::BlockingBody;

/// Converter for the `http` crate's request and response types.
///
/// # Example
///
/// ```
/// use msgconv::prelude::*;
///
/// #[derive(Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize)]
/// struct User {
///     #[prost(uint64, tag = "1")]
///     id: u64,
/// }
///
/// let converter = HttpConverter::new();
/// let mut request =
///     converter.encode_request(Method::POST, "/users", MediaType::Protobuf, &User { id: 7 })?;
/// assert_eq!(request.headers()["content-type"], "application/x-protobuf; charset=UTF-8");
///
/// // ... on the receiving side
/// let mut decoded = User::default();
/// converter.decode_request(&mut request, &mut decoded)?;
/// assert_eq!(decoded.id, 7);
/// # Ok::<(), ConvertError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct HttpConverter {
    core: ConverterCore,
}

impl HttpConverter {
    /// Converter with the default configuration (UTF-8, JSON and protobuf).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConverterConfig) -> Self {
        Self {
            core: ConverterCore::new(config),
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        self.core.config()
    }

    /// Decode a request body into `destination`, negotiating on `Accept`.
    ///
    /// GET and DELETE requests succeed without reading the body.
    pub fn decode_request<B, M>(
        &self,
        request: &mut Request<B>,
        destination: &mut M,
    ) -> Result<(), ConvertError>
    where
        B: BlockingBody,
        M: WireMessage + ?Sized,
    {
        self.core
            .decode_request(&mut RequestView(request), destination)
    }

    /// Decode a response body into `destination`, negotiating on `Content-Type`.
    pub fn decode_response<B, M>(
        &self,
        response: &mut Response<B>,
        destination: &mut M,
    ) -> Result<(), ConvertError>
    where
        B: BlockingBody,
        M: WireMessage + ?Sized,
    {
        self.core
            .decode_response(&mut ResponseView(response), destination)
    }

    /// Build a request carrying `message` encoded as `media_type`.
    pub fn encode_request<M>(
        &self,
        method: Method,
        uri: &str,
        media_type: MediaType,
        message: &M,
    ) -> Result<Request<Bytes>, ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        let encoded = self.core.encode(media_type, message)?;
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .version(Version::HTTP_11)
            .body(Bytes::new())?;
        encoded.write_to(&mut RequestView(&mut request));
        Ok(request)
    }

    /// Build a `200 OK` response carrying `message` encoded as `media_type`.
    pub fn encode_response<M>(
        &self,
        media_type: MediaType,
        message: &M,
    ) -> Result<Response<Bytes>, ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        let encoded = self.core.encode(media_type, message)?;
        let mut response = Response::builder()
            .status(StatusCode::OK)
            .version(Version::HTTP_11)
            .body(Bytes::new())?;
        encoded.write_to(&mut ResponseView(&mut response));
        Ok(response)
    }
}

impl MessageConverter for HttpConverter {
    type Request = Request<Bytes>;
    type Response = Response<Bytes>;

    fn core(&self) -> &ConverterCore {
        &self.core
    }

    fn decode_request<M>(
        &self,
        request: &mut Request<Bytes>,
        destination: &mut M,
    ) -> Result<(), ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        HttpConverter::decode_request(self, request, destination)
    }

    fn decode_response<M>(
        &self,
        response: &mut Response<Bytes>,
        destination: &mut M,
    ) -> Result<(), ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        HttpConverter::decode_response(self, response, destination)
    }

    fn encode_request<M>(
        &self,
        method: Method,
        uri: &str,
        media_type: MediaType,
        message: &M,
    ) -> Result<Request<Bytes>, ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        HttpConverter::encode_request(self, method, uri, media_type, message)
    }

    fn encode_response<M>(
        &self,
        media_type: MediaType,
        message: &M,
    ) -> Result<Response<Bytes>, ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        HttpConverter::encode_response(self, media_type, message)
    }
}

struct RequestView<'a, B>(&'a mut Request<B>);

impl<B: BlockingBody> InboundMessage for RequestView<'_, B> {
    type Headers = HeaderMap;

    fn headers(&self) -> &HeaderMap {
        self.0.headers()
    }

    fn body(&mut self) -> io::Result<Cow<'_, [u8]>> {
        self.0.body_mut().read_body()
    }
}

impl<B: BlockingBody> InboundRequest for RequestView<'_, B> {
    fn method(&self) -> &Method {
        self.0.method()
    }
}

impl OutboundMessage for RequestView<'_, Bytes> {
    type Headers = HeaderMap;

    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.0.headers_mut()
    }

    fn set_body(&mut self, body: Bytes) {
        *self.0.body_mut() = body;
    }
}

struct ResponseView<'a, B>(&'a mut Response<B>);

impl<B: BlockingBody> InboundMessage for ResponseView<'_, B> {
    type Headers = HeaderMap;

    fn headers(&self) -> &HeaderMap {
        self.0.headers()
    }

    fn body(&mut self) -> io::Result<Cow<'_, [u8]>> {
        self.0.body_mut().read_body()
    }
}

impl OutboundMessage for ResponseView<'_, Bytes> {
    type Headers = HeaderMap;

    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.0.headers_mut()
    }

    fn set_body(&mut self, body: Bytes) {
        *self.0.body_mut() = body;
    }
}
