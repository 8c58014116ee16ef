//! Command handlers for the CLI application.
//!
//! - `listen`: the relay daemon (UDP listener + LED table + renderer)
//! - `send`: one-shot datagram sender
//! - `status`: render the startup state table

pub mod listen;
pub mod send;
pub mod status;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result type for command handlers
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Set up a Ctrl-C handler that clears the given flag when triggered.
/// Returns the Arc<AtomicBool> for use in the main loop.
pub fn setup_interrupt_handler() -> Arc<AtomicBool> {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .ok();

    running
}
