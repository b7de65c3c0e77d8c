//! # msgconv
//!
//! Negotiate a wire representation for protobuf messages carried over HTTP
//! and convert between that representation and in-memory messages.
//!
//! Two media types are supported out of the box:
//!
//! - `application/json` (structured text, via `serde_json`)
//! - `application/x-protobuf` (compact binary, via `prost`)
//!
//! ## Bindings
//!
//! The same converter contract ([`MessageConverter`]) is implemented for two
//! HTTP object models:
//!
//! - [`HttpConverter`]: blocking style over `http::Request<B>` / `http::Response<B>`,
//!   where each request and response is an independent value
//! - [`ExchangeConverter`]: context-reuse style over a pooled [`Exchange`]
//!   holding both the request and the response
//!
//! Negotiation and codec dispatch are shared, so both bindings give identical
//! results for identical input.
//!
//! ## Getting Started
//!
//! ```
//! use msgconv::prelude::*;
//!
//! #[derive(Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize)]
//! struct User {
//!     #[prost(string, tag = "1")]
//!     name: String,
//! }
//!
//! let user = User { name: "ada".into() };
//! let converter = HttpConverter::new();
//! let mut request = converter.encode_request(Method::POST, "/users", MediaType::Json, &user)?;
//!
//! let mut decoded = User::default();
//! converter.decode_request(&mut request, &mut decoded)?;
//! assert_eq!(decoded, user);
//! # Ok::<(), ConvertError>(())
//! ```

pub mod blocking;
pub mod body;
pub mod exchange;

pub use blocking::HttpConverter;
pub use body::{BlockingBody, ReaderBody};
pub use exchange::{Exchange, ExchangeConverter, ExchangeRequest, ExchangeResponse};
pub use msgconv_core::*;

// Re-export crates that appear in the public API
pub use bytes;
pub use http;
pub use prost;
pub use serde;

pub mod prelude {
    //! A prelude for `msgconv` providing the most common types.
    pub use crate::blocking::HttpConverter;
    pub use crate::body::{BlockingBody, ReaderBody};
    pub use crate::exchange::{Exchange, ExchangeConverter, ExchangeRequest, ExchangeResponse};
    pub use http::Method;
    pub use msgconv_core::{
        Charset, ConvertError, ConverterConfig, MediaType, MessageConverter, WireMessage,
    };
}
