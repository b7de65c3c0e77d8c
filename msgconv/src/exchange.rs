//! Context-reuse object model.
//!
//! An [`Exchange`] is one reusable per-call context holding both the request
//! and the response as fields. Servers keep a pool of them and call
//! [`Exchange::reset`] between calls instead of allocating fresh objects;
//! header maps and body buffers keep their capacity across resets.
//!
//! [`ExchangeConverter`] implements the converter contract on top of it.

mod converter;

pub use converter::ExchangeConverter;

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, Method, StatusCode, Uri};
use msgconv_core::OutboundMessage;

/// Request half of an [`Exchange`].
#[derive(Clone, Debug, Default)]
pub struct ExchangeRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: BytesMut,
}

impl ExchangeRequest {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            ..Default::default()
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn set_uri(&mut self, uri: Uri) {
        self.uri = uri;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Replace the body, reusing the existing buffer.
    pub fn set_body(&mut self, body: &[u8]) {
        self.body.clear();
        self.body.extend_from_slice(body);
    }

    /// Reset to an empty `GET /`, keeping allocated capacity.
    pub fn reset(&mut self) {
        self.method = Method::GET;
        self.uri = Uri::default();
        self.headers.clear();
        self.body.clear();
    }
}

impl OutboundMessage for ExchangeRequest {
    type Headers = HeaderMap;

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn set_body(&mut self, body: Bytes) {
        ExchangeRequest::set_body(self, &body);
    }
}

/// Response half of an [`Exchange`].
#[derive(Clone, Debug, Default)]
pub struct ExchangeResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: BytesMut,
}

impl ExchangeResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Replace the body, reusing the existing buffer.
    pub fn set_body(&mut self, body: &[u8]) {
        self.body.clear();
        self.body.extend_from_slice(body);
    }

    /// Reset to an empty `200 OK`, keeping allocated capacity.
    pub fn reset(&mut self) {
        self.status = StatusCode::OK;
        self.headers.clear();
        self.body.clear();
    }
}

impl OutboundMessage for ExchangeResponse {
    type Headers = HeaderMap;

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn set_body(&mut self, body: Bytes) {
        ExchangeResponse::set_body(self, &body);
    }
}

/// Per-call context carrying a request and its response.
#[derive(Clone, Debug, Default)]
pub struct Exchange {
    pub request: ExchangeRequest,
    pub response: ExchangeResponse,
}

impl Exchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the exchange for the next call.
    pub fn reset(&mut self) {
        self.request.reset();
        self.response.reset();
    }
}
