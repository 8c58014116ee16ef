//! Shared LED state table and its change feed.
//!
//! The table is the one piece of mutable state shared between threads. The
//! listener thread is its single writer (through [`LedTable::apply`]);
//! everything else either copies it out via [`LedTable::snapshot`] or
//! follows the broadcast change feed, so rendering always happens on the
//! thread that owns the display.

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::debug;

use ledrelay_protocol::{LedColor, LedCommand, SwitchState};

/// Broadcast channel capacity for change events.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Brightness applied on an `ON` command.
pub const BRIGHTNESS_ON: u8 = 255;

/// Brightness applied on an `OFF` command.
pub const BRIGHTNESS_OFF: u8 = 0;

/// Default brightness applied when the state token is unrecognized.
/// Overridable per table; see `fallback_brightness` in the config.
pub const DEFAULT_FALLBACK_BRIGHTNESS: u8 = 100;

/// RGB display color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const RED: Self = Self { r: 255, g: 0, b: 0 };
    pub const GREEN: Self = Self { r: 0, g: 255, b: 0 };
    pub const BLUE: Self = Self { r: 0, g: 0, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale brightness by a factor in [0, 1].
    pub fn scale(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * f) as u8,
            g: (self.g as f32 * f) as u8,
            b: (self.b as f32 * f) as u8,
        }
    }
}

/// One LED's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedState {
    /// Which channel this entry is.
    pub color: LedColor,
    /// Base display color at full brightness.
    pub rgb: Rgb,
    /// Current brightness, 0-255.
    pub brightness: u8,
}

impl LedState {
    /// Display color weighted by the current brightness.
    pub fn display_rgb(&self) -> Rgb {
        self.rgb.scale(self.brightness as f32 / 255.0)
    }
}

/// A single applied state change, as published on the change feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedChange {
    pub color: LedColor,
    pub brightness: u8,
}

/// The fixed three-LED table.
///
/// LEDs are a static set — created once at full brightness, mutated in
/// place, never added or removed. Lock hold times are bounded to the copy
/// in or out; the change broadcast happens after the lock is released, so a
/// subscriber that reacts to an event always observes the new value.
pub struct LedTable {
    leds: Mutex<[LedState; 3]>,
    fallback_brightness: u8,
    change_tx: broadcast::Sender<LedChange>,
}

impl Default for LedTable {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_BRIGHTNESS)
    }
}

impl LedTable {
    /// Create the table with every LED at full brightness.
    pub fn new(fallback_brightness: u8) -> Self {
        let leds = [
            LedState {
                color: LedColor::Red,
                rgb: Rgb::RED,
                brightness: BRIGHTNESS_ON,
            },
            LedState {
                color: LedColor::Green,
                rgb: Rgb::GREEN,
                brightness: BRIGHTNESS_ON,
            },
            LedState {
                color: LedColor::Blue,
                rgb: Rgb::BLUE,
                brightness: BRIGHTNESS_ON,
            },
        ];
        let (change_tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);

        Self {
            leds: Mutex::new(leds),
            fallback_brightness,
            change_tx,
        }
    }

    /// Apply one decoded command. This is the sole mutating entry point.
    ///
    /// A command addressing a channel this table does not hold (including
    /// the `Unknown` parse sentinel) leaves the table untouched and
    /// publishes nothing. On a match the new brightness is `ON` -> 255,
    /// `OFF` -> 0, anything else -> the configured fallback.
    pub fn apply(&self, cmd: &LedCommand) -> Option<LedChange> {
        let brightness = match cmd.state {
            SwitchState::On => BRIGHTNESS_ON,
            SwitchState::Off => BRIGHTNESS_OFF,
            SwitchState::Unknown => self.fallback_brightness,
        };

        let change = {
            let mut leds = self.leds.lock();
            let led = leds.iter_mut().find(|l| l.color == cmd.color)?;
            led.brightness = brightness;
            LedChange {
                color: led.color,
                brightness,
            }
        };

        debug!("applied {:?} -> brightness {}", change.color, brightness);
        // Publish to all subscribers (ignores if no receivers).
        let _ = self.change_tx.send(change);
        Some(change)
    }

    /// Copy of the table in display order (Red, Green, Blue).
    pub fn snapshot(&self) -> [LedState; 3] {
        *self.leds.lock()
    }

    /// Subscribe to applied changes.
    pub fn subscribe(&self) -> broadcast::Receiver<LedChange> {
        self.change_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brightness_of(table: &LedTable, color: LedColor) -> u8 {
        table
            .snapshot()
            .iter()
            .find(|l| l.color == color)
            .map(|l| l.brightness)
            .unwrap()
    }

    #[test]
    fn test_initial_state_full_brightness() {
        let table = LedTable::default();
        let snapshot = table.snapshot();
        assert_eq!(
            snapshot.map(|l| l.color),
            [LedColor::Red, LedColor::Green, LedColor::Blue]
        );
        assert!(snapshot.iter().all(|l| l.brightness == BRIGHTNESS_ON));
    }

    #[test]
    fn test_apply_on_off() {
        let table = LedTable::default();

        let change = table
            .apply(&LedCommand::new(LedColor::Green, SwitchState::Off))
            .unwrap();
        assert_eq!(change.brightness, BRIGHTNESS_OFF);
        assert_eq!(brightness_of(&table, LedColor::Green), 0);
        // Other channels untouched.
        assert_eq!(brightness_of(&table, LedColor::Red), 255);
        assert_eq!(brightness_of(&table, LedColor::Blue), 255);

        table
            .apply(&LedCommand::new(LedColor::Green, SwitchState::On))
            .unwrap();
        assert_eq!(brightness_of(&table, LedColor::Green), 255);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let table = LedTable::default();
        let cmd = LedCommand::new(LedColor::Blue, SwitchState::Off);
        table.apply(&cmd).unwrap();
        let first = table.snapshot();
        table.apply(&cmd).unwrap();
        assert_eq!(table.snapshot(), first);
    }

    #[test]
    fn test_unknown_color_is_a_noop() {
        let table = LedTable::default();
        let mut changes = table.subscribe();
        let before = table.snapshot();

        let result = table.apply(&LedCommand::new(LedColor::Unknown, SwitchState::On));
        assert!(result.is_none());
        assert_eq!(table.snapshot(), before);
        assert!(changes.try_recv().is_err());
    }

    #[test]
    fn test_unknown_state_uses_fallback() {
        let table = LedTable::new(DEFAULT_FALLBACK_BRIGHTNESS);
        let change = table
            .apply(&LedCommand::new(LedColor::Red, SwitchState::Unknown))
            .unwrap();
        // The documented default: a recognized LED with an unrecognized
        // state token lands at 100, not 0 or 255.
        assert_eq!(change.brightness, 100);
        assert_eq!(brightness_of(&table, LedColor::Red), 100);

        let dim = LedTable::new(32);
        dim.apply(&LedCommand::new(LedColor::Red, SwitchState::Unknown))
            .unwrap();
        assert_eq!(brightness_of(&dim, LedColor::Red), 32);
    }

    #[test]
    fn test_change_feed_publishes_after_mutation() {
        let table = LedTable::default();
        let mut changes = table.subscribe();

        table
            .apply(&LedCommand::new(LedColor::Red, SwitchState::Off))
            .unwrap();

        let change = changes.try_recv().unwrap();
        assert_eq!(change.color, LedColor::Red);
        assert_eq!(change.brightness, 0);
        // The event is observed only after the table already holds the
        // value it announces.
        assert_eq!(brightness_of(&table, LedColor::Red), 0);
    }

    #[test]
    fn test_display_rgb_scaling() {
        assert_eq!(Rgb::RED.scale(1.0), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::RED.scale(0.0), Rgb::new(0, 0, 0));
        assert_eq!(Rgb::new(0, 255, 0).scale(0.5), Rgb::new(0, 127, 0));

        let led = LedState {
            color: LedColor::Blue,
            rgb: Rgb::BLUE,
            brightness: 0,
        };
        assert_eq!(led.display_rgb(), Rgb::new(0, 0, 0));
    }
}
