//! The state owned by one login panel.

use crate::cell::StateCell;

/// The three cells behind the login panel.
///
/// Created empty when the panel is built and dropped with it. Cloning shares
/// the cells, it does not copy them.
#[derive(Clone, Debug, Default)]
pub struct PanelState {
    /// Current value of the name input.
    pub name: StateCell<String>,
    /// Current value of the password input. Masking happens in the view.
    pub password: StateCell<String>,
    /// Text of the last completed greet call.
    pub greet_message: StateCell<String>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }
}
