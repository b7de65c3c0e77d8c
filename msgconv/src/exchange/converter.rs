use std::borrow::Cow;
use std::io;

use http::{HeaderMap, Method, Uri};
use msgconv_core::{
    ConvertError, ConverterConfig, ConverterCore, InboundMessage, InboundRequest, MediaType,
    MessageConverter, WireMessage,
};

use super::{Exchange, ExchangeRequest, ExchangeResponse};

/// Converter for the [`Exchange`] object model.
///
/// Besides standalone requests and responses, it can read from and write
/// into the halves of a reused [`Exchange`] in place.
///
/// # Example
///
/// ```
/// use msgconv::prelude::*;
///
/// #[derive(Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize)]
/// struct Order {
///     #[prost(string, tag = "1")]
///     sku: String,
/// }
///
/// let converter = ExchangeConverter::new();
/// let mut exchange = Exchange::new();
/// let incoming = Order { sku: "A-1".into() };
/// converter.encode_exchange_request(
///     &mut exchange,
///     Method::POST,
///     "/orders",
///     MediaType::Json,
///     &incoming,
/// )?;
///
/// // Decode the incoming call, then answer in the same context.
/// let mut order = Order::default();
/// converter.decode_exchange_request(&exchange, &mut order)?;
/// converter.encode_exchange_response(&mut exchange, MediaType::Protobuf, &order)?;
/// assert_eq!(exchange.response.headers()["accept"], "application/x-protobuf");
/// # Ok::<(), ConvertError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExchangeConverter {
    core: ConverterCore,
}

impl ExchangeConverter {
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

    /// Decode a request body, negotiating on `Accept`. GET and DELETE
    /// requests succeed without reading the body.
    pub fn decode_request<M>(
        &self,
        request: &ExchangeRequest,
        destination: &mut M,
    ) -> Result<(), ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        self.core
            .decode_request(&mut RequestRef(request), destination)
    }

    /// [`decode_request`](Self::decode_request) on the exchange's request.
    pub fn decode_exchange_request<M>(
        &self,
        exchange: &Exchange,
        destination: &mut M,
    ) -> Result<(), ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        self.decode_request(&exchange.request, destination)
    }

    /// Decode a response body, negotiating on `Content-Type`.
    pub fn decode_response<M>(
        &self,
        response: &ExchangeResponse,
        destination: &mut M,
    ) -> Result<(), ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        self.core
            .decode_response(&mut ResponseRef(response), destination)
    }

    /// Build a standalone request carrying `message`.
    pub fn encode_request<M>(
        &self,
        method: Method,
        uri: &str,
        media_type: MediaType,
        message: &M,
    ) -> Result<ExchangeRequest, ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        let mut request = ExchangeRequest::default();
        self.encode_request_into(&mut request, method, uri, media_type, message)?;
        Ok(request)
    }

    /// Write `message` into the exchange's request, setting method and URI.
    ///
    /// On error the exchange is left as it was.
    pub fn encode_exchange_request<M>(
        &self,
        exchange: &mut Exchange,
        method: Method,
        uri: &str,
        media_type: MediaType,
        message: &M,
    ) -> Result<(), ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        self.encode_request_into(&mut exchange.request, method, uri, media_type, message)
    }

    /// Build a standalone `200 OK` response carrying `message`.
    pub fn encode_response<M>(
        &self,
        media_type: MediaType,
        message: &M,
    ) -> Result<ExchangeResponse, ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        let mut response = ExchangeResponse::default();
        self.core.encode(media_type, message)?.write_to(&mut response);
        Ok(response)
    }

    /// Write `message` into the exchange's response.
    ///
    /// The status is left alone; on error the exchange is left as it was.
    pub fn encode_exchange_response<M>(
        &self,
        exchange: &mut Exchange,
        media_type: MediaType,
        message: &M,
    ) -> Result<(), ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        let encoded = self.core.encode(media_type, message)?;
        encoded.write_to(&mut exchange.response);
        Ok(())
    }

    fn encode_request_into<M>(
        &self,
        request: &mut ExchangeRequest,
        method: Method,
        uri: &str,
        media_type: MediaType,
        message: &M,
    ) -> Result<(), ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        let encoded = self.core.encode(media_type, message)?;
        let uri = uri.parse::<Uri>().map_err(http::Error::from)?;

        request.set_method(method);
        request.set_uri(uri);
        encoded.write_to(request);
        Ok(())
    }
}

impl MessageConverter for ExchangeConverter {
    type Request = ExchangeRequest;
    type Response = ExchangeResponse;

    fn core(&self) -> &ConverterCore {
        &self.core
    }

    fn decode_request<M>(
        &self,
        request: &mut ExchangeRequest,
        destination: &mut M,
    ) -> Result<(), ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        ExchangeConverter::decode_request(self, request, destination)
    }

    fn decode_response<M>(
        &self,
        response: &mut ExchangeResponse,
        destination: &mut M,
    ) -> Result<(), ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        ExchangeConverter::decode_response(self, response, destination)
    }

    fn encode_request<M>(
        &self,
        method: Method,
        uri: &str,
        media_type: MediaType,
        message: &M,
    ) -> Result<ExchangeRequest, ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        ExchangeConverter::encode_request(self, method, uri, media_type, message)
    }

    fn encode_response<M>(
        &self,
        media_type: MediaType,
        message: &M,
    ) -> Result<ExchangeResponse, ConvertError>
    where
        M: WireMessage + ?Sized,
    {
        ExchangeConverter::encode_response(self, media_type, message)
    }
}

struct RequestRef<'a>(&'a ExchangeRequest);

impl InboundMessage for RequestRef<'_> {
    type Headers = HeaderMap;

    fn headers(&self) -> &HeaderMap {
        self.0.headers()
    }

    fn body(&mut self) -> io::Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.0.body()))
    }
}

impl InboundRequest for RequestRef<'_> {
    fn method(&self) -> &Method {
        self.0.method()
    }
}

struct ResponseRef<'a>(&'a ExchangeResponse);

impl InboundMessage for ResponseRef<'_> {
    type Headers = HeaderMap;

    fn headers(&self) -> &HeaderMap {
        self.0.headers()
    }

    fn body(&mut self) -> io::Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.0.body()))
    }
}
