//! The login panel component.
//!
//! Action tasks are spawned with `spawn_forever` on the root scope, so a
//! pending call still completes and writes its cell if this component unmounts.

use std::rc::Rc;

use dioxus::prelude::*;

use crate::binding::PanelView;
use crate::controller::Panel;

/// Get the panel provided by an ancestor through `use_context_provider`.
pub fn use_panel() -> Rc<Panel> {
    use_context::<Rc<Panel>>()
}

/// Name and password inputs, the two action buttons and the greet message.
#[component]
pub fn GreetPanel() -> Element {
    let panel = use_panel();

    // Mounted once; each binding repaints this component when its cell changes
    let view = use_hook(|| {
        let redraw = schedule_update();
        Rc::new(PanelView::mount(panel.state(), move || redraw()))
    });

    let name = view.name_input().text();
    let password = view.password_input().text();
    let greeting = view.greeting().text();

    let on_name = {
        let panel = panel.clone();
        move |evt: FormEvent| panel.set_name(evt.value())
    };
    let on_password = {
        let panel = panel.clone();
        move |evt: FormEvent| panel.set_password(evt.value())
    };
    let on_greet = {
        let panel = panel.clone();
        move |_: MouseEvent| {
            spawn_forever(panel.greet());
        }
    };
    let on_fetch = {
        let panel = panel.clone();
        move |_: MouseEvent| {
            spawn_forever(panel.fetch_saved_user());
        }
    };

    rsx! {
        div {
            class: "row",
            div {
                input {
                    id: "greet-input",
                    placeholder: "Enter a name...",
                    value: "{name}",
                    oninput: on_name,
                }
                input {
                    id: "password-input",
                    r#type: "password",
                    placeholder: "Enter a password...",
                    value: "{password}",
                    oninput: on_password,
                }
                button {
                    r#type: "button",
                    onclick: on_greet,
                    "Greet"
                }
            }
        }

        p { "{greeting}" }

        div {
            class: "row",
            div {
                button {
                    r#type: "button",
                    onclick: on_fetch,
                    "Get Database Items"
                }
            }
        }
    }
}
