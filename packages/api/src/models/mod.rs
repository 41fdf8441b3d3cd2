//! Payloads exchanged with the command backend.

mod greet;

pub use greet::GreetArgs;
