//! Log sinks for background diagnostics.
//!
//! The receive workers run detached from any caller, so read failures and
//! dropped datagrams cannot be returned as errors; they go to a pluggable
//! [`Logger`] sink instead. The default sink prints to stdout. Hosts that
//! route diagnostics through the `log` facade can install [`LogFacade`].
//!
//! The sink is stored in an atomic cell and may be swapped at any time,
//! including while workers are logging.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use arc_swap::ArcSwap;

/// A concurrency-safe line printer.
pub trait Logger: Send + Sync {
    /// Prints one formatted line.
    fn print(&self, args: fmt::Arguments<'_>);
}

/// Default sink: prints each line to stdout.
#[derive(Debug, Default)]
pub struct StdoutLogger;

impl Logger for StdoutLogger {
    fn print(&self, args: fmt::Arguments<'_>) {
        println!("{args}");
    }
}

/// Sink that forwards each line to the `log` facade at warn level, under
/// the `fins` target.
#[derive(Debug, Default)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn print(&self, args: fmt::Arguments<'_>) {
        log::warn!(target: "fins", "{args}");
    }
}

/// Shared logging state for a client or server: the swappable sink and the
/// packet-dump switch.
pub(crate) struct CommLogger {
    sink: ArcSwap<Box<dyn Logger>>,
    show_packet: AtomicBool,
}

impl CommLogger {
    pub fn new() -> Self {
        Self {
            sink: ArcSwap::from_pointee(Box::new(StdoutLogger) as Box<dyn Logger>),
            show_packet: AtomicBool::new(false),
        }
    }

    pub fn set_sink(&self, sink: Box<dyn Logger>) {
        self.sink.store(std::sync::Arc::new(sink));
    }

    pub fn set_show_packet(&self, show: bool) {
        self.show_packet.store(show, Ordering::Relaxed);
    }

    pub fn print_error(&self, args: fmt::Arguments<'_>) {
        self.sink.load().print(args);
    }

    /// Hex-dumps a datagram when packet tracing is on.
    pub fn print_packet(&self, direction: &str, packet: &[u8]) {
        if !self.show_packet.load(Ordering::Relaxed) {
            return;
        }
        self.sink
            .load()
            .print(format_args!("{direction}: {}", hex::encode_upper(packet)));
    }
}

impl fmt::Debug for CommLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommLogger")
            .field("show_packet", &self.show_packet.load(Ordering::Relaxed))
            .finish()
    }
}
