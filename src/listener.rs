//! UDP listener — socket ownership and the background receive loop.
//!
//! One started listener owns one bound socket and one named thread that
//! drains it. The message handler runs synchronously on that thread, one
//! datagram at a time, in arrival order; it must not touch anything owned
//! by another thread (hand state over through the table's change feed
//! instead).

use std::io;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

/// How long a blocked receive waits before re-checking the shutdown flag.
const READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Sleep after a receive error before retrying.
const ERROR_SLEEP: Duration = Duration::from_millis(100);

/// Receive buffer size. Protocol payloads are a handful of bytes; an
/// oversized datagram truncates, which can only yield unknown tokens or a
/// malformed payload — both dropped downstream.
const RECV_BUF_SIZE: usize = 64;

/// Errors from starting a listener.
#[derive(Error, Debug)]
pub enum ListenerError {
    /// Socket creation or bind failed (e.g. port already in use). Nothing
    /// was spawned; the caller decides whether this disables the feature or
    /// aborts.
    #[error("failed to bind UDP port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("listener already running")]
    AlreadyRunning,
}

/// Owns a bound UDP socket and the dedicated thread that drains it.
///
/// Construction does no I/O; [`start`](UdpListener::start) binds and
/// spawns. [`stop`](UdpListener::stop) signals the thread and joins it, so
/// once it returns no further handler invocation can occur.
pub struct UdpListener {
    port: u16,
    handler: Arc<dyn Fn(&str) + Send + Sync>,
    local_addr: Option<SocketAddr>,
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl UdpListener {
    /// Create an unstarted listener for `port` (0 picks an ephemeral port
    /// at bind time).
    pub fn new(port: u16, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            port,
            handler: Arc::new(handler),
            local_addr: None,
            shutdown: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }

    /// Bind `0.0.0.0:<port>` and launch the receive thread.
    ///
    /// Bind failure is returned and nothing is spawned; errors after this
    /// point are handled inside the loop and never surface here.
    pub fn start(&mut self) -> Result<(), ListenerError> {
        if self.thread.is_some() {
            return Err(ListenerError::AlreadyRunning);
        }

        let port = self.port;
        let bind_err = move |e| ListenerError::Bind { port, source: e };
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, port)).map_err(bind_err)?;
        // A bounded read timeout is what lets the loop observe the shutdown
        // flag; std sockets cannot be closed out from under a blocked read.
        socket
            .set_read_timeout(Some(READ_TIMEOUT))
            .map_err(bind_err)?;
        let local_addr = socket.local_addr().map_err(bind_err)?;

        debug!("udp listener bound to {}", local_addr);
        self.local_addr = Some(local_addr);
        self.shutdown.store(false, Ordering::SeqCst);

        let handler = Arc::clone(&self.handler);
        let shutdown = Arc::clone(&self.shutdown);
        let thread = std::thread::Builder::new()
            .name("udp-listener".into())
            .spawn(move || run_receive_loop(socket, handler, shutdown))
            .expect("failed to spawn udp listener thread");
        self.thread = Some(thread);

        Ok(())
    }

    /// The bound address once started (useful when constructed with port 0).
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Signal the receive loop and join it.
    ///
    /// Blocks until the thread has exited and the socket is dropped. Safe
    /// to call if `start()` was never called, failed, or `stop()` already
    /// ran.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("udp listener thread panicked");
            }
        }
        self.local_addr = None;
    }
}

impl Drop for UdpListener {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Receive loop run on the dedicated listener thread.
///
/// Timeouts exist only so the shutdown flag gets checked; any other receive
/// error is logged and survived (the socket may recover).
fn run_receive_loop(
    socket: UdpSocket,
    handler: Arc<dyn Fn(&str) + Send + Sync>,
    shutdown: Arc<AtomicBool>,
) {
    debug!("udp listener thread started");
    let mut buf = [0u8; RECV_BUF_SIZE];

    while !shutdown.load(Ordering::Relaxed) {
        match socket.recv_from(&mut buf) {
            Ok((len, peer)) => {
                let payload = String::from_utf8_lossy(&buf[..len]);
                // Tolerate a trailing newline so `echo R:ON | nc -u` works.
                let payload = payload.trim_end_matches(['\r', '\n']);
                debug!("received {} bytes from {}: {:?}", len, peer, payload);
                handler(payload);
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                // Timeout, no data - loop continues to check shutdown.
            }
            Err(e) => {
                warn!("udp receive error: {}", e);
                std::thread::sleep(ERROR_SLEEP);
            }
        }
    }

    debug!("udp listener thread exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_does_no_io() {
        let listener = UdpListener::new(0, |_| {});
        assert!(listener.local_addr().is_none());
    }

    #[test]
    fn test_double_start_is_rejected() {
        let mut listener = UdpListener::new(0, |_| {});
        listener.start().unwrap();
        assert!(matches!(
            listener.start(),
            Err(ListenerError::AlreadyRunning)
        ));
        listener.stop();
    }

    #[test]
    fn test_bind_conflict_is_reported() {
        let mut first = UdpListener::new(0, |_| {});
        first.start().unwrap();
        let port = first.local_addr().unwrap().port();

        let mut second = UdpListener::new(port, |_| {});
        match second.start() {
            Err(ListenerError::Bind { port: p, .. }) => assert_eq!(p, port),
            other => panic!("expected bind failure, got {other:?}"),
        }
        assert!(second.local_addr().is_none());

        // stop() on a listener that never started is a no-op.
        second.stop();
        first.stop();
    }

    #[test]
    fn test_stop_without_start() {
        let mut listener = UdpListener::new(0, |_| {});
        listener.stop();
        listener.stop();
    }

    #[test]
    fn test_restart_after_stop() {
        let mut listener = UdpListener::new(0, |_| {});
        listener.start().unwrap();
        listener.stop();
        listener.start().unwrap();
        assert!(listener.local_addr().is_some());
        listener.stop();
    }
}
