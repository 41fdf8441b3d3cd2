//! This crate contains the login panel: its controller, the retained view
//! bindings and the Dioxus component that renders them.

pub mod binding;
pub mod controller;
pub mod diagnostics;

mod greet_panel;
pub use greet_panel::{use_panel, GreetPanel};

pub use binding::{PanelView, TextBinding};
pub use controller::Panel;
pub use diagnostics::{DiagnosticLog, LogEntry, LogLevel};
