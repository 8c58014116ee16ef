//! The `send` subcommand — emit one LED state datagram.
//!
//! This is the sender side of the wire protocol, the same role the kernel
//! module plays on a brightness change: format `"<led>:<ON|OFF>"` and fire
//! one datagram at the configured destination. No response is expected.

use std::net::UdpSocket;

use super::CommandResult;
use ledrelay::{LedColor, LedCommand, SwitchState};

/// Parse the CLI's LED argument (case-insensitive).
fn parse_led(s: &str) -> Result<LedColor, String> {
    let color = LedColor::from_token(&s.to_ascii_uppercase());
    if color == LedColor::Unknown {
        return Err(format!("unknown LED {s:?} (expected R, G or B)"));
    }
    Ok(color)
}

/// Parse the CLI's state argument (case-insensitive).
fn parse_state(s: &str) -> Result<SwitchState, String> {
    let state = SwitchState::from_token(&s.to_ascii_uppercase());
    if state == SwitchState::Unknown {
        return Err(format!("unknown state {s:?} (expected on or off)"));
    }
    Ok(state)
}

pub fn send(led: &str, state: &str, destination: &str) -> CommandResult {
    let cmd = LedCommand::new(parse_led(led)?, parse_state(state)?);

    let socket = UdpSocket::bind("0.0.0.0:0")?;
    let payload = cmd.to_string();
    socket.send_to(payload.as_bytes(), destination)?;

    println!("Sent {payload:?} to {destination}");
    Ok(())
}
