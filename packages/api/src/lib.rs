//! # API crate — the command channel between the panel and its backend
//!
//! The panel never talks to the backend directly. It invokes named commands on
//! a [`CommandChannel`] and gets back a JSON value or a [`CommandError`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`channel`] | The [`CommandChannel`] trait and the two-kind [`CommandError`] taxonomy |
//! | [`http`] | [`HttpChannel`], JSON over `POST {base_url}/{command}` |
//! | [`handler`] | [`HandlerChannel`], in-process handlers registered by command name |
//! | [`models`] | Typed payloads ([`GreetArgs`]) |
//!
//! ## Commands
//!
//! | Command | Payload | Answer |
//! |---------|---------|--------|
//! | [`GREET`] | `{ "name": text, "password": text }` | text message |
//! | [`GET_SAVED_USER`] | none | opaque JSON value |
//!
//! The typed wrappers [`greet`] and [`get_saved_user`] issue the request
//! immediately and return a `'static` future for the answer.

use std::future::Future;

use futures::future::LocalBoxFuture;
use serde_json::Value;

pub mod channel;
pub mod handler;
pub mod http;
pub mod models;

pub use channel::{CommandChannel, CommandError, CommandResult};
pub use handler::{HandlerChannel, Invocation};
pub use http::HttpChannel;
pub use models::GreetArgs;

/// Authenticate with name and password and return the backend's message.
pub const GREET: &str = "greet";

/// Fetch the user the backend has saved locally.
pub const GET_SAVED_USER: &str = "get_saved_user";

/// Invoke [`GREET`]. A non-text answer is treated as a rejection.
pub fn greet(
    channel: &dyn CommandChannel,
    args: &GreetArgs,
) -> impl Future<Output = Result<String, CommandError>> + 'static {
    let pending = channel.invoke(GREET, Some(args.to_value()));
    async move {
        match pending.await? {
            Value::String(message) => Ok(message),
            other => Err(CommandError::Rejected(format!(
                "greet answered with non-text value: {other}"
            ))),
        }
    }
}

/// Invoke [`GET_SAVED_USER`]. The answer is not interpreted.
pub fn get_saved_user(channel: &dyn CommandChannel) -> LocalBoxFuture<'static, CommandResult> {
    channel.invoke(GET_SAVED_USER, None)
}
