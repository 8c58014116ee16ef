//! ledrelay — relay LED on/off state over UDP.
//!
//! A `listen` daemon mirrors three logical LEDs (Red/Green/Blue) whose
//! state arrives as `"<led>:<ON|OFF>"` datagrams, typically emitted by the
//! companion Linux kernel module on LED brightness changes; a `send`
//! utility produces the same wire format by hand.

pub mod config;
pub mod listener;
pub mod render;
pub mod store;

pub use config::Config;
pub use listener::{ListenerError, UdpListener};
pub use store::{LedChange, LedState, LedTable, Rgb};

// Re-export the wire types for consumers (CLI handlers, integration tests).
pub use ledrelay_protocol::{LedColor, LedCommand, ProtocolError, SwitchState};
