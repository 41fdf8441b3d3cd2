//! # Login panel controller
//!
//! [`Panel`] owns the panel's [`PanelState`], the command channel and the
//! diagnostic log, and implements the two actions behind the buttons.
//!
//! ## Actions
//!
//! Both actions issue their command synchronously and return a `'static`
//! future. The caller spawns it on the UI executor and forgets about it.
//!
//! | Action | Command | On success | On failure |
//! |--------|---------|------------|------------|
//! | [`greet`](Panel::greet) | `greet { name, password }` | writes `greet_message` | logged only |
//! | [`fetch_saved_user`](Panel::fetch_saved_user) | `get_saved_user` | logged only | logged only |
//!
//! Calls are not sequenced. Two overlapping greets both write `greet_message`
//! in the order their answers arrive, so the slower answer is the one left on
//! screen. Failures never reach the view: `greet_message` keeps its previous
//! value and the error goes to the [`DiagnosticLog`].

use std::future::Future;
use std::rc::Rc;

use api::{CommandChannel, GreetArgs};
use store::PanelState;

use crate::diagnostics::{DiagnosticLog, LogLevel};

pub struct Panel {
    state: PanelState,
    channel: Rc<dyn CommandChannel>,
    diagnostics: DiagnosticLog,
}

impl Panel {
    pub fn new(channel: Rc<dyn CommandChannel>) -> Self {
        Self::with_diagnostics(channel, DiagnosticLog::new())
    }

    pub fn with_diagnostics(channel: Rc<dyn CommandChannel>, diagnostics: DiagnosticLog) -> Self {
        Self {
            state: PanelState::new(),
            channel,
            diagnostics,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    /// Name input handler.
    pub fn set_name(&self, name: impl Into<String>) {
        self.state.name.set(name.into());
    }

    /// Password input handler.
    pub fn set_password(&self, password: impl Into<String>) {
        self.state.password.set(password.into());
    }

    /// Send the current name and password to `greet`.
    ///
    /// The inputs are read and the command issued before this returns; the
    /// future only waits for the answer and writes it.
    pub fn greet(&self) -> impl Future<Output = ()> + 'static {
        let args = GreetArgs::new(self.state.name.get(), self.state.password.get());
        self.diagnostics
            .record(LogLevel::Info, format!("greet: sending {:?}", args));

        let pending = api::greet(self.channel.as_ref(), &args);
        let greet_message = self.state.greet_message.clone();
        let diagnostics = self.diagnostics.clone();

        async move {
            match pending.await {
                Ok(message) => {
                    diagnostics.record(LogLevel::Success, format!("greet: {message}"));
                    greet_message.set(message);
                }
                Err(e) => {
                    diagnostics.record(LogLevel::Error, format!("greet failed: {e}"));
                }
            }
        }
    }

    /// Ask the backend for its saved user and log whatever comes back.
    pub fn fetch_saved_user(&self) -> impl Future<Output = ()> + 'static {
        self.diagnostics
            .record(LogLevel::Info, "get_saved_user: sending");

        let pending = api::get_saved_user(self.channel.as_ref());
        let diagnostics = self.diagnostics.clone();

        async move {
            match pending.await {
                Ok(user) => {
                    diagnostics.record(LogLevel::Success, format!("get_saved_user: {user}"));
                }
                Err(e) => {
                    diagnostics.record(LogLevel::Error, format!("get_saved_user failed: {e}"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::PanelView;
    use api::{CommandError, CommandResult, HandlerChannel, GET_SAVED_USER, GREET};
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;
    use tokio::task::{spawn_local, LocalSet};

    type Gates = Rc<RefCell<VecDeque<oneshot::Sender<CommandResult>>>>;

    /// A channel whose `command` calls stay pending until the test opens their gate.
    fn gated(command: &str) -> (HandlerChannel, Gates) {
        let gates: Gates = Rc::new(RefCell::new(VecDeque::new()));
        let channel = HandlerChannel::recording();
        {
            let gates = gates.clone();
            channel.register(command, move |_| {
                let (tx, rx) = oneshot::channel();
                gates.borrow_mut().push_back(tx);
                async move {
                    rx.await
                        .unwrap_or_else(|_| Err(CommandError::unavailable("gate dropped")))
                }
            });
        }
        (channel, gates)
    }

    fn open(gates: &Gates, result: CommandResult) {
        let gate = gates.borrow_mut().pop_front().expect("no pending call");
        let _ = gate.send(result);
    }

    fn sent_name(channel: &HandlerChannel, index: usize) -> Value {
        channel.invocations_of(GREET)[index]
            .args
            .as_ref()
            .map(|a| a["name"].clone())
            .unwrap_or(Value::Null)
    }

    #[tokio::test]
    async fn test_greet_renders_answer() {
        let channel = HandlerChannel::recording().with_handler(GREET, |_| async {
            Ok(json!("Hello, Alice!"))
        });
        let panel = Panel::new(Rc::new(channel.clone()));
        let view = PanelView::mount(panel.state(), || {});

        panel.set_name("Alice");
        panel.set_password("secret");
        panel.greet().await;

        assert_eq!(panel.state().greet_message.get(), "Hello, Alice!");
        assert_eq!(view.greeting().text(), "Hello, Alice!");
        assert_eq!(
            channel.invocations_of(GREET)[0].args,
            Some(json!({ "name": "Alice", "password": "secret" }))
        );
    }

    #[tokio::test]
    async fn test_overlapping_greets_last_completion_wins() {
        LocalSet::new()
            .run_until(async {
                let (channel, gates) = gated(GREET);
                let panel = Panel::new(Rc::new(channel.clone()));
                let view = PanelView::mount(panel.state(), || {});

                let shown = Rc::new(RefCell::new(Vec::new()));
                let _sub = {
                    let shown = shown.clone();
                    let message = panel.state().greet_message.clone();
                    panel
                        .state()
                        .greet_message
                        .subscribe(move || shown.borrow_mut().push(message.get()))
                };

                panel.set_name("A");
                let first = spawn_local(panel.greet());
                panel.set_name("B");
                let second = spawn_local(panel.greet());

                assert_eq!(channel.invocations_of(GREET).len(), 2);
                let gate_a = gates.borrow_mut().pop_front().unwrap();
                let gate_b = gates.borrow_mut().pop_front().unwrap();

                // B answers first
                gate_b.send(Ok(json!("Hello, B!"))).unwrap();
                second.await.unwrap();
                assert_eq!(view.greeting().text(), "Hello, B!");

                // A answers last and overwrites B, even though B was invoked last
                gate_a.send(Ok(json!("Hello, A!"))).unwrap();
                first.await.unwrap();
                assert_eq!(view.greeting().text(), "Hello, A!");

                assert_eq!(*shown.borrow(), vec!["Hello, B!", "Hello, A!"]);
            })
            .await;
    }

    #[tokio::test]
    async fn test_edit_during_pending_greet_keeps_payload() {
        LocalSet::new()
            .run_until(async {
                let (channel, gates) = gated(GREET);
                let panel = Panel::new(Rc::new(channel.clone()));

                panel.set_name("Alice");
                panel.set_password("secret");
                let task = spawn_local(panel.greet());

                panel.set_name("Mallory");
                panel.set_password("changed");

                assert_eq!(sent_name(&channel, 0), json!("Alice"));
                assert_eq!(
                    channel.invocations_of(GREET)[0].args,
                    Some(json!({ "name": "Alice", "password": "secret" }))
                );

                open(&gates, Ok(json!("Hello, Alice!")));
                task.await.unwrap();
                assert_eq!(panel.state().greet_message.get(), "Hello, Alice!");

                // The next call picks up the edit
                let task = spawn_local(panel.greet());
                assert_eq!(sent_name(&channel, 1), json!("Mallory"));
                open(&gates, Ok(json!("Hello, Mallory!")));
                task.await.unwrap();
            })
            .await;
    }

    #[tokio::test]
    async fn test_rejected_greet_is_silent() {
        let channel = HandlerChannel::new()
            .with_handler(GREET, |_| async { Err(CommandError::rejected("Unauthorized")) });
        let panel = Panel::new(Rc::new(channel));
        let view = PanelView::mount(panel.state(), || {});

        panel.set_name("Alice");
        panel.greet().await;

        assert_eq!(panel.state().greet_message.get(), "");
        assert_eq!(view.greeting().text(), "");
        assert_eq!(view.greeting().render_count(), 1);

        let last = panel.diagnostics().last().unwrap();
        assert_eq!(last.level, LogLevel::Error);
        assert!(last.message.contains("Unauthorized"));
    }

    #[tokio::test]
    async fn test_failed_greet_keeps_previous_message() {
        let (channel, gates) = gated(GREET);
        let panel = Panel::new(Rc::new(channel));

        let ok = panel.greet();
        open(&gates, Ok(json!("Hello, Alice!")));
        ok.await;

        let unreachable = panel.greet();
        open(&gates, Err(CommandError::unavailable("connection refused")));
        unreachable.await;

        let rejected = panel.greet();
        open(&gates, Err(CommandError::rejected("Other")));
        rejected.await;

        assert_eq!(panel.state().greet_message.get(), "Hello, Alice!");
        let errors = panel
            .diagnostics()
            .entries()
            .into_iter()
            .filter(|e| e.level == LogLevel::Error)
            .count();
        assert_eq!(errors, 2);
    }

    #[tokio::test]
    async fn test_greet_without_backend_handler_is_silent() {
        let panel = Panel::new(Rc::new(HandlerChannel::new()));
        panel.greet().await;
        assert_eq!(panel.state().greet_message.get(), "");
        assert_eq!(panel.diagnostics().last().map(|e| e.level), Some(LogLevel::Error));
    }

    #[tokio::test]
    async fn test_fetch_saved_user_changes_nothing_rendered() {
        let channel = HandlerChannel::recording().with_handler(GET_SAVED_USER, |_| async {
            Ok(json!("SavedUser { id: 1, accesstoken: \"abc\" }"))
        });
        let panel = Panel::new(Rc::new(channel.clone()));
        panel.state().greet_message.set("before".to_string());
        let view = PanelView::mount(panel.state(), || {});

        panel.fetch_saved_user().await;

        assert_eq!(view.greeting().text(), "before");
        assert_eq!(view.greeting().render_count(), 1);
        assert_eq!(view.name_input().render_count(), 1);
        assert_eq!(view.password_input().render_count(), 1);
        assert_eq!(channel.invocations_of(GET_SAVED_USER)[0].args, None);

        let last = panel.diagnostics().last().unwrap();
        assert_eq!(last.level, LogLevel::Success);
        assert!(last.message.contains("accesstoken"));
    }

    #[tokio::test]
    async fn test_fetch_saved_user_failure_changes_nothing_rendered() {
        let channel = HandlerChannel::new().with_handler(GET_SAVED_USER, |_| async {
            Err(CommandError::rejected("no such table: user"))
        });
        let panel = Panel::new(Rc::new(channel));
        let view = PanelView::mount(panel.state(), || {});

        panel.fetch_saved_user().await;

        assert_eq!(view.greeting().text(), "");
        assert_eq!(view.greeting().render_count(), 1);
        assert_eq!(panel.diagnostics().last().map(|e| e.level), Some(LogLevel::Error));
    }

    #[tokio::test]
    async fn test_answer_after_panel_dropped() {
        LocalSet::new()
            .run_until(async {
                let (channel, gates) = gated(GREET);
                let panel = Panel::new(Rc::new(channel));
                let message = panel.state().greet_message.clone();
                let diagnostics = panel.diagnostics().clone();
                let task = spawn_local(panel.greet());
                drop(panel);

                open(&gates, Ok(json!("late")));
                task.await.unwrap();

                // Nothing cancels a pending call; its answer is still written
                assert_eq!(message.get(), "late");
                assert_eq!(diagnostics.last().map(|e| e.level), Some(LogLevel::Success));
            })
            .await;
    }
}
