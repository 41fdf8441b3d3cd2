//! # HTTP command channel
//!
//! [`HttpChannel`] sends each command as `POST {base_url}/{command}` with the
//! payload as a JSON body (`{}` when the command takes no arguments).
//!
//! | Outcome | Result |
//! |---------|--------|
//! | 2xx with a JSON body | the parsed value |
//! | 2xx with a non-JSON body | the raw body as a JSON string |
//! | any other status | [`CommandError::Rejected`] with the body (or the status if the body is empty) |
//! | connect, timeout or read failure | [`CommandError::Unavailable`] |
//!
//! No timeout is applied unless one is configured.

use std::time::Duration;

use futures::future::{FutureExt, LocalBoxFuture};
use reqwest::header;
use serde_json::{Map, Value};
use store::config::BackendConfig;

use crate::channel::{CommandChannel, CommandError, CommandResult};

const USER_AGENT: &str = concat!("Rustyfin/", env!("CARGO_PKG_VERSION"));

/// Command channel speaking JSON over HTTP.
#[derive(Clone, Debug)]
pub struct HttpChannel {
    client: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpChannel {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(config.base_url.clone()).with_timeout(config.timeout())
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Endpoint a command is posted to.
    pub fn command_url(&self, command: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), command)
    }
}

impl CommandChannel for HttpChannel {
    fn invoke(&self, command: &str, args: Option<Value>) -> LocalBoxFuture<'static, CommandResult> {
        let url = self.command_url(command);
        let body = args.unwrap_or_else(|| Value::Object(Map::new()));

        let mut request = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, USER_AGENT)
            .header("X-Application", USER_AGENT)
            .json(&body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("POST {}", url);

        async move {
            let response = request
                .send()
                .await
                .map_err(|e| CommandError::unavailable(e.to_string()))?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| CommandError::unavailable(e.to_string()))?;

            if !status.is_success() {
                tracing::warn!("{} answered {}", url, status);
                return Err(CommandError::Rejected(rejection_message(status, text)));
            }

            Ok(parse_body(&text))
        }
        .boxed_local()
    }
}

fn rejection_message(status: reqwest::StatusCode, body: String) -> String {
    if body.trim().is_empty() {
        status.to_string()
    } else {
        body
    }
}

/// Parse a success body, keeping plain-text answers as a JSON string.
fn parse_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
