//! Status-line rendering of an LED snapshot.

use crate::store::LedState;

/// Format a snapshot as one status line, e.g. `R:1.00  G:0.00  B:0.39`.
///
/// Each field is the LED's wire token and its brightness as a fraction of
/// full scale.
pub fn status_line(snapshot: &[LedState]) -> String {
    snapshot
        .iter()
        .map(|led| format!("{}:{:.2}", led.color, led.brightness as f32 / 255.0))
        .collect::<Vec<_>>()
        .join("  ")
}
