//! # Retained text bindings
//!
//! A [`TextBinding`] is one rendered text node tied to one [`StateCell`]. It
//! keeps the last rendered text and re-renders only when its own cell is
//! written, then calls the redraw hook so the host can repaint.
//!
//! [`PanelView`] mounts the three bindings of the login panel. The Dioxus
//! component reads from it and hands Dioxus' `schedule_update` in as the hook.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use store::{PanelState, StateCell, Subscription};

/// A text node rendered from a cell.
pub struct TextBinding {
    text: Rc<RefCell<String>>,
    renders: Rc<Cell<usize>>,
    _subscription: Subscription,
}

impl TextBinding {
    /// Render `cell` now and again after every write to it.
    pub fn bind(cell: &StateCell<String>, redraw: Rc<dyn Fn()>) -> Self {
        let text = Rc::new(RefCell::new(cell.get()));
        let renders = Rc::new(Cell::new(1));

        let subscription = {
            let source = cell.clone();
            let text = text.clone();
            let renders = renders.clone();
            cell.subscribe(move || {
                *text.borrow_mut() = source.get();
                renders.set(renders.get() + 1);
                redraw();
            })
        };

        Self {
            text,
            renders,
            _subscription: subscription,
        }
    }

    /// The text as last rendered.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// How many times this node was rendered, the initial render included.
    pub fn render_count(&self) -> usize {
        self.renders.get()
    }
}

/// The rendered login panel.
pub struct PanelView {
    name_input: TextBinding,
    password_input: TextBinding,
    greeting: TextBinding,
}

impl PanelView {
    pub fn mount(state: &PanelState, redraw: impl Fn() + 'static) -> Self {
        let redraw: Rc<dyn Fn()> = Rc::new(redraw);
        Self {
            name_input: TextBinding::bind(&state.name, redraw.clone()),
            password_input: TextBinding::bind(&state.password, redraw.clone()),
            greeting: TextBinding::bind(&state.greet_message, redraw),
        }
    }

    /// Value shown in the name input.
    pub fn name_input(&self) -> &TextBinding {
        &self.name_input
    }

    /// Value held by the password input. Masking is left to the input element.
    pub fn password_input(&self) -> &TextBinding {
        &self.password_input
    }

    /// The paragraph showing the last greet message.
    pub fn greeting(&self) -> &TextBinding {
        &self.greeting
    }
}
