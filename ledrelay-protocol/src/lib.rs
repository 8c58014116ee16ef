//! Wire protocol for ledrelay LED state datagrams
//!
//! One UDP datagram carries one ASCII line of the form:
//!
//! ```text
//! <LedToken>:<StateToken>
//! ```
//!
//! `LedToken` is `R`, `G` or `B`; `StateToken` is `ON` or `OFF`. The Linux
//! kernel module emits exactly this (`"%s:%s"` over the LED name and power
//! state), so formatting here must stay byte-compatible with it. There is no
//! framing beyond the datagram boundary, no checksum beyond UDP's own, and
//! no acknowledgement.

pub mod command;
pub mod error;

pub use command::{LedColor, LedCommand, SwitchState};
pub use error::ProtocolError;

/// Default UDP port for LED state datagrams.
pub const DEFAULT_PORT: u16 = 8888;
