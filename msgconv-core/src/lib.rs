//! Core types for msgconv.
//!
//! This crate provides everything that does not depend on a particular HTTP
//! object model, shared by the bindings in the `msgconv` crate.
//!
//! ## Modules
//!
//! - [`media_type`]: Media types, charsets and the registry of their wire strings
//! - [`resolve`]: Media type resolution from raw header values
//! - [`codec`]: The [`WireMessage`] capability and codec dispatch
//! - [`config`]: Converter configuration
//! - [`converter`]: The converter contract and the shared negotiation core
//! - [`error`]: Conversion error types

pub mod codec;
pub mod config;
pub mod converter;
pub mod error;
pub mod media_type;
pub mod resolve;

pub use codec::*;
pub use config::*;
pub use converter::*;
pub use error::*;
pub use media_type::*;
pub use resolve::*;
