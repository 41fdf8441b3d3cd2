pub mod cell;
pub mod config;
pub mod state;

pub use cell::{StateCell, Subscription};
pub use config::RustyfinConfig;
pub use state::PanelState;
