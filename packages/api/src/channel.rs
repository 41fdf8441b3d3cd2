//! # The command channel boundary
//!
//! Every backend operation is invoked by name with an optional JSON payload and
//! answers with a JSON value or a [`CommandError`]. [`CommandChannel`] is
//! object-safe so callers can hold an `Rc<dyn CommandChannel>` and swap the
//! transport ([`crate::HttpChannel`], [`crate::HandlerChannel`]) freely.
//!
//! ## Contract
//!
//! - `invoke` captures `command` and `args` before it returns. Whatever the
//!   caller does afterwards cannot change a request that was already issued.
//! - The returned future is `'static` and `!Send`; it is meant to be spawned on
//!   a single-threaded executor.
//! - There is no cancellation. Dropping the future abandons the result only.

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use serde_json::Value;
use thiserror::Error;

/// Result of one command invocation.
pub type CommandResult = Result<Value, CommandError>;

/// Why a command did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The backend received the command and answered with an error.
    #[error("command rejected: {0}")]
    Rejected(String),
    /// The command could not be delivered or its answer never arrived intact.
    #[error("command channel unavailable: {0}")]
    Unavailable(String),
}

impl CommandError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// A request/response channel to a process that implements named commands.
pub trait CommandChannel {
    fn invoke(&self, command: &str, args: Option<Value>) -> LocalBoxFuture<'static, CommandResult>;
}

impl<C: CommandChannel + ?Sized> CommandChannel for Rc<C> {
    fn invoke(&self, command: &str, args: Option<Value>) -> LocalBoxFuture<'static, CommandResult> {
        (**self).invoke(command, args)
    }
}
