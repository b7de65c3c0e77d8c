//! Message types shared by the msgconv examples.
//!
//! These are written by hand with the same derives a `prost-build` +
//! serde setup would generate, so the examples need no build script.

use serde::{Deserialize, Serialize};

/// A user record.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[prost(string, tag = "1")]
    #[serde(default)]
    pub id: String,
    #[prost(string, tag = "2")]
    #[serde(default)]
    pub display_name: String,
    #[prost(string, repeated, tag = "3")]
    #[serde(default)]
    pub roles: Vec<String>,
    #[prost(message, optional, tag = "4")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct Address {
    #[prost(string, tag = "1")]
    #[serde(default)]
    pub city: String,
    #[prost(string, tag = "2")]
    #[serde(default)]
    pub country: String,
}

/// A populated user for demos.
pub fn sample_user() -> User {
    User {
        id: "u-1001".into(),
        display_name: "Ada".into(),
        roles: vec!["admin".into(), "billing".into()],
        address: Some(Address {
            city: "London".into(),
            country: "GB".into(),
        }),
    }
}
