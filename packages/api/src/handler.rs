//! # In-process command channel
//!
//! [`HandlerChannel`] dispatches commands to closures registered by name, the
//! same shape as an IPC invoke handler. The desktop shell uses it when no
//! backend is configured and the tests use it as a scriptable double.
//!
//! A channel built with [`HandlerChannel::recording`] also keeps every
//! invocation (command name and payload) before the handler runs, so tests can
//! assert on exactly what was sent. Channels built with
//! [`HandlerChannel::new`] keep nothing.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture};
use serde_json::Value;

use crate::channel::{CommandChannel, CommandError, CommandResult};

type Handler = Rc<dyn Fn(Option<Value>) -> LocalBoxFuture<'static, CommandResult>>;

/// A command as it was received by a [`HandlerChannel`].
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub command: String,
    pub args: Option<Value>,
}

/// Command channel backed by in-process handlers.
#[derive(Clone, Default)]
pub struct HandlerChannel {
    handlers: Rc<RefCell<HashMap<String, Handler>>>,
    invocations: Rc<RefCell<Vec<Invocation>>>,
    record: bool,
}

impl HandlerChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel that keeps every invocation it receives.
    pub fn recording() -> Self {
        Self {
            record: true,
            ..Self::default()
        }
    }

    /// Register (or replace) the handler for `command`.
    pub fn register<F, Fut>(&self, command: &str, handler: F)
    where
        F: Fn(Option<Value>) -> Fut + 'static,
        Fut: Future<Output = CommandResult> + 'static,
    {
        let handler: Handler = Rc::new(move |args| handler(args).boxed_local());
        self.handlers
            .borrow_mut()
            .insert(command.to_string(), handler);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_handler<F, Fut>(self, command: &str, handler: F) -> Self
    where
        F: Fn(Option<Value>) -> Fut + 'static,
        Fut: Future<Output = CommandResult> + 'static,
    {
        self.register(command, handler);
        self
    }

    /// Every invocation received so far, oldest first. Always empty unless the
    /// channel was built with [`recording`](Self::recording).
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// Invocations of one command, oldest first.
    pub fn invocations_of(&self, command: &str) -> Vec<Invocation> {
        self.invocations
            .borrow()
            .iter()
            .filter(|i| i.command == command)
            .cloned()
            .collect()
    }
}

impl CommandChannel for HandlerChannel {
    fn invoke(&self, command: &str, args: Option<Value>) -> LocalBoxFuture<'static, CommandResult> {
        if self.record {
            self.invocations.borrow_mut().push(Invocation {
                command: command.to_string(),
                args: args.clone(),
            });
        }

        let handler = self.handlers.borrow().get(command).cloned();
        match handler {
            // Called here, not lazily, so the handler sees the call at invoke time
            Some(handler) => handler(args),
            None => {
                tracing::warn!("No handler registered for command '{}'", command);
                future::ready(Err(CommandError::rejected(format!(
                    "unknown command: {command}"
                ))))
                .boxed_local()
            }
        }
    }
}
