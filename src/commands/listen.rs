//! The `listen` subcommand — run the relay daemon.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::TryRecvError;
use tracing::warn;

use super::CommandResult;
use ledrelay::render;
use ledrelay::store::LedTable;
use ledrelay::{Config, LedCommand, UdpListener};

/// Poll interval for the change feed on the rendering (main) thread.
const RENDER_POLL: Duration = Duration::from_millis(50);

/// Run the relay daemon until Ctrl-C.
///
/// The listener thread decodes and applies each datagram; this thread only
/// follows the table's change feed and renders, so all output happens on
/// the thread that owns the terminal.
pub fn listen(config: &Config, quiet: bool) -> CommandResult {
    let table = Arc::new(LedTable::new(config.fallback_brightness));
    let mut changes = table.subscribe();

    let handler_table = Arc::clone(&table);
    let mut listener = UdpListener::new(config.port, move |payload: &str| {
        match payload.parse::<LedCommand>() {
            Ok(cmd) => {
                if handler_table.apply(&cmd).is_none() {
                    warn!("ignoring command for unknown LED: {payload:?}");
                }
            }
            Err(e) => warn!("dropping datagram: {e}"),
        }
    });

    // A failed bind disables the whole feature; report it upward instead
    // of crashing mid-setup.
    listener.start()?;

    println!("Listening on UDP port {}.", config.port);
    println!("{}", render::status_line(&table.snapshot()));
    println!("Ready. Ctrl+C to stop.");

    let running = super::setup_interrupt_handler();
    while running.load(Ordering::SeqCst) {
        match changes.try_recv() {
            Ok(_) => {
                if !quiet {
                    println!("{}", render::status_line(&table.snapshot()));
                }
            }
            Err(TryRecvError::Empty) => std::thread::sleep(RENDER_POLL),
            Err(TryRecvError::Lagged(n)) => {
                // Catch up on the next recv; the status line always renders
                // the current table, so skipped events lose nothing.
                warn!("renderer lagged by {n} changes");
            }
            Err(TryRecvError::Closed) => break,
        }
    }

    println!("\nStopping listener...");
    listener.stop();
    println!("Done.");
    Ok(())
}
