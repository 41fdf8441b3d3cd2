//! # Payload of the `greet` command
//!
//! [`GreetArgs`] carries the name and password exactly as typed. It is built
//! from a snapshot of the panel's inputs, so the payload of a call never
//! changes after the call was issued.
//!
//! The `Debug` output masks the password so request logging never leaks it.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Arguments of the `greet` command: `{ "name": .., "password": .. }`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetArgs {
    pub name: String,
    pub password: String,
}

impl GreetArgs {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }

    /// JSON object sent over the command channel.
    pub fn to_value(&self) -> Value {
        json!({
            "name": self.name,
            "password": self.password,
        })
    }
}

impl fmt::Debug for GreetArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreetArgs")
            .field("name", &self.name)
            .field("password", &"********")
            .finish()
    }
}
