//! # Omron FINS/UDP Client Library
//!
//! A Rust library for communicating with Omron PLCs over the FINS
//! (Factory Interface Network Service) protocol on UDP.
//!
//! The core of the crate is a **concurrent request/response engine**: one
//! UDP socket is shared by any number of callers, each request carries an
//! 8-bit service ID, and a pool of background receive workers routes every
//! reply to the waiter registered for its SID. Replies may be reordered,
//! lost or late; each request waits on its own delivery channel, the
//! cancel signal and a per-request timeout.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fins_udp::{MemoryArea, UdpClient, UdpEndpoint};
//!
//! fn main() -> fins_udp::Result<()> {
//!     let local = UdpEndpoint::any(0, 2, 0);
//!     let plc = UdpEndpoint::new("192.168.1.250:9600".parse().unwrap(), 0, 10, 0);
//!     let client = UdpClient::new(local, plc)?;
//!     client.set_timeout_ms(50);
//!
//!     client.write_words(MemoryArea::DmWord, 100, &[5, 4, 3, 2, 1])?;
//!     let words = client.read_words(MemoryArea::DmWord, 100, 5)?;
//!     println!("DM100..105 = {words:?}");
//!
//!     let clock = client.read_clock()?;
//!     println!("PLC clock: {clock}");
//!
//!     client.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Memory areas
//!
//! Four regions, each at word or bit granularity ([`MemoryArea`]):
//! DM (Data Memory), WR (Work), HR (Holding) and AR (Auxiliary Relay).
//! Word operations (`read_words`, `read_bytes`, `read_string`,
//! `write_words`, …) require a word-granular area; bit operations
//! (`read_bits`, `write_bits`, `set_bit`, …) require a bit-granular one.
//! The wrong pairing fails with
//! [`FinsError::IncompatibleMemoryArea`] before anything is sent.
//!
//! ## Lifecycle
//!
//! The socket opens lazily on the first operation and
//! [`UdpClient::close`] tears it down again: the cancel signal fires
//! once, every waiting operation fails promptly with
//! [`FinsError::Closed`], in-flight work is drained, and the client
//! returns to idle. Close is idempotent — concurrent callers share a
//! single teardown — and the client is reusable afterwards.
//!
//! ## Testing against the simulator
//!
//! [`UdpServer`] is a minimal in-process PLC that serves the DM area
//! only; the integration tests run the client against it. It is not a
//! production server.

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod address;
mod bcd;
mod client;
mod command;
mod endcode;
mod error;
mod header;
mod logger;
mod memory;
mod response;
mod server;
mod sync;

// Public re-exports
pub use address::{DeviceAddress, UdpEndpoint};
pub use client::{
    UdpClient, WordOrder, DEFAULT_TIMEOUT_MS, DEFAULT_WORKER_COUNT, UDP_PACKET_MAX_SIZE,
};
pub use command::{
    Command, COMMAND_CODE_CLOCK_READ, COMMAND_CODE_MEMORY_AREA_READ,
    COMMAND_CODE_MEMORY_AREA_WRITE, MIN_REQUEST_SIZE,
};
pub use endcode::*;
pub use error::{FinsError, Result};
pub use header::{FinsHeader, FINS_HEADER_SIZE};
pub use logger::{LogFacade, Logger, StdoutLogger};
pub use memory::{MemoryAddress, MemoryArea};
pub use response::{Response, MIN_RESPONSE_SIZE};
pub use server::{UdpServer, DM_AREA_SIZE};
