//! Login page view for desktop.

use dioxus::prelude::*;
use ui::GreetPanel;

/// The only page of the app: the heading above the login panel.
#[component]
pub fn Login() -> Element {
    rsx! {
        div {
            class: "container",

            h1 { "Welcome to Rustyfin!" }

            GreetPanel {}
        }
    }
}
