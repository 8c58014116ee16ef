//! Command parsing and formatting for the LED datagram protocol.

use std::fmt;
use std::str::FromStr;

use crate::error::ProtocolError;

/// Logical LED channel addressed by a datagram.
///
/// `Unknown` is the tolerant-parse sentinel: a datagram naming a channel
/// this relay does not know still decodes successfully, and the receiver
/// drops it as a no-op. Only a structurally broken payload is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedColor {
    Red,
    Green,
    Blue,
    Unknown,
}

impl LedColor {
    /// All addressable channels, in display order.
    pub const CHANNELS: [LedColor; 3] = [LedColor::Red, LedColor::Green, LedColor::Blue];

    /// Map a wire token to a channel. Anything but `R`/`G`/`B` is `Unknown`.
    pub fn from_token(s: &str) -> Self {
        match s {
            "R" => LedColor::Red,
            "G" => LedColor::Green,
            "B" => LedColor::Blue,
            _ => LedColor::Unknown,
        }
    }

    /// The wire token for this channel. `Unknown` has no token and must
    /// never be sent on the wire.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            LedColor::Red => Some("R"),
            LedColor::Green => Some("G"),
            LedColor::Blue => Some("B"),
            LedColor::Unknown => None,
        }
    }
}

impl fmt::Display for LedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token().unwrap_or("UNKNOWN"))
    }
}

/// Requested power state for a channel.
///
/// `Unknown` means the state token was recognized as *something* after the
/// delimiter, just not one of the two defined tokens. What brightness that
/// maps to is the receiver's policy, not the protocol's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    On,
    Off,
    Unknown,
}

impl SwitchState {
    /// Map a wire token to a state. Anything but `ON`/`OFF` is `Unknown`.
    pub fn from_token(s: &str) -> Self {
        match s {
            "ON" => SwitchState::On,
            "OFF" => SwitchState::Off,
            _ => SwitchState::Unknown,
        }
    }

    /// The wire token for this state, or `None` for `Unknown`.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            SwitchState::On => Some("ON"),
            SwitchState::Off => Some("OFF"),
            SwitchState::Unknown => None,
        }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token().unwrap_or("UNKNOWN"))
    }
}

/// One decoded datagram: which LED, and the requested power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedCommand {
    pub color: LedColor,
    pub state: SwitchState,
}

impl LedCommand {
    pub fn new(color: LedColor, state: SwitchState) -> Self {
        Self { color, state }
    }
}

impl FromStr for LedCommand {
    type Err = ProtocolError;

    /// Split on the *first* `:`; everything after it is the state token
    /// (`"R:ON:X"` has state token `"ON:X"`, which is `Unknown`). A missing
    /// delimiter is the only hard failure.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (led, state) = s
            .split_once(':')
            .ok_or_else(|| ProtocolError::MalformedMessage(s.to_string()))?;

        Ok(LedCommand {
            color: LedColor::from_token(led),
            state: SwitchState::from_token(state),
        })
    }
}

impl fmt::Display for LedCommand {
    /// Wire form of the command, `<LedToken>:<StateToken>`. Commands with
    /// `Unknown` parts render the literal `UNKNOWN` token — useful in logs,
    /// never valid to send.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.color, self.state)
    }
}
