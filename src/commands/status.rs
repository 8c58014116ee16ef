//! The `status` subcommand — render the startup state table.

use super::CommandResult;
use ledrelay::render;
use ledrelay::store::LedTable;
use ledrelay::Config;

/// Print the table a fresh `listen` daemon would start with. Mostly a
/// debugging aid for the render format.
pub fn status(config: &Config) -> CommandResult {
    let table = LedTable::new(config.fallback_brightness);
    let snapshot = table.snapshot();

    println!("{}", render::status_line(&snapshot));
    for led in &snapshot {
        println!(
            "  {}  rgb({}, {}, {})  brightness {}/255",
            led.color, led.rgb.r, led.rgb.g, led.rgb.b, led.brightness
        );
    }
    Ok(())
}
