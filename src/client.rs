//! FINS UDP client.
//!
//! One [`UdpClient`] shares one UDP socket among any number of concurrent
//! callers. Each request is stamped with a service ID (SID); a pool of
//! receive workers decodes incoming datagrams and routes each reply to the
//! waiter registered for its SID, so replies may arrive in any order and
//! on any worker.
//!
//! The socket is opened lazily by the first operation and torn down by
//! [`UdpClient::close`], which cancels every waiter, drains in-flight
//! work, and returns the client to idle; a later operation re-opens it.
//! Close is single-flight: concurrent callers share one teardown.
//!
//! # Example
//!
//! ```no_run
//! use fins_udp::{MemoryArea, UdpClient, UdpEndpoint};
//!
//! fn main() -> fins_udp::Result<()> {
//!     let local = UdpEndpoint::any(0, 2, 0);
//!     let plc = UdpEndpoint::new("192.168.1.10:9600".parse().unwrap(), 0, 10, 0);
//!     let client = UdpClient::new(local, plc)?;
//!
//!     client.write_words(MemoryArea::DmWord, 100, &[0x1234, 0x5678])?;
//!     let words = client.read_words(MemoryArea::DmWord, 100, 2)?;
//!     println!("DM100-101: {words:?}");
//!
//!     client.close();
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::convert::Infallible;
use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use arc_swap::ArcSwap;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use chrono::{DateTime, Local};
use crossbeam_channel::{after, bounded, never, select, Receiver, Sender};
use crossbeam_utils::atomic::AtomicCell;
use crossbeam_utils::sync::WaitGroup;
use parking_lot::Mutex;

use crate::address::UdpEndpoint;
use crate::bcd::decode_clock;
use crate::command::Command;
use crate::endcode::END_CODE_NORMAL_COMPLETION;
use crate::error::{FinsError, Result};
use crate::header::FinsHeader;
use crate::logger::{CommLogger, Logger};
use crate::memory::{MemoryAddress, MemoryArea};
use crate::response::{Response, MIN_RESPONSE_SIZE};
use crate::sync::{cancelled, wait_moment, SidCounter, SingleFlight, SlotTable};

/// Default response timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 20;
/// Default number of receive workers spawned per open.
pub const DEFAULT_WORKER_COUNT: u8 = 8;
/// Maximum FINS UDP datagram size.
pub const UDP_PACKET_MAX_SIZE: usize = 1500;

/// How often a blocked datagram read re-checks the cancel signal. Bounds
/// the close latency contributed by idle workers.
const RECV_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Backoff after a failed or undersized datagram read.
const READ_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Byte order of the word/byte views presented to callers.
///
/// Affects only how words are split into bytes and reassembled; wire
/// encoding of counts and addresses is always big-endian per the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordOrder {
    /// High byte first (FINS wire order, the default).
    #[default]
    BigEndian,
    /// Low byte first.
    LittleEndian,
}

impl WordOrder {
    pub(crate) fn words_to_bytes(self, words: &[u16]) -> Vec<u8> {
        let mut bytes = vec![0u8; words.len() * 2];
        match self {
            WordOrder::BigEndian => BigEndian::write_u16_into(words, &mut bytes),
            WordOrder::LittleEndian => LittleEndian::write_u16_into(words, &mut bytes),
        }
        bytes
    }

    pub(crate) fn bytes_to_words(self, bytes: &[u8]) -> Vec<u16> {
        let mut words = vec![0u16; bytes.len() / 2];
        let even = &bytes[..words.len() * 2];
        match self {
            WordOrder::BigEndian => BigEndian::read_u16_into(even, &mut words),
            WordOrder::LittleEndian => LittleEndian::read_u16_into(even, &mut words),
        }
        words
    }
}

/// Per-open connection state, swapped in and out as a unit under the
/// lifecycle mutex.
struct ConnState {
    socket: Arc<UdpSocket>,
    cancel_tx: Sender<Infallible>,
    cancel_rx: Receiver<Infallible>,
    work: WaitGroup,
}

struct Shared {
    local: UdpEndpoint,
    remote: UdpEndpoint,
    remote_addr: SocketAddr,

    timeout_ms: AtomicU64,
    word_order: AtomicCell<WordOrder>,
    worker_count: AtomicU8,
    ignore_end_codes: ArcSwap<HashSet<u16>>,
    log: CommLogger,

    sid: SidCounter,
    slots: SlotTable,

    closing: AtomicBool,
    close_gate: SingleFlight,
    conn: Mutex<Option<ConnState>>,
}

/// Concurrency-safe Omron FINS client over UDP.
///
/// See the [module documentation](self) for the engine design. All
/// methods take `&self`; share the client between threads by reference or
/// inside an `Arc`.
pub struct UdpClient {
    shared: Arc<Shared>,
}

impl UdpClient {
    /// Creates a new client. No socket is opened until the first
    /// operation.
    ///
    /// # Errors
    ///
    /// Returns [`FinsError::MissingRemoteAddress`] if `remote` carries no
    /// socket address.
    pub fn new(local: UdpEndpoint, remote: UdpEndpoint) -> Result<Self> {
        let remote_addr = remote.addr().ok_or(FinsError::MissingRemoteAddress)?;
        Ok(Self {
            shared: Arc::new(Shared {
                local,
                remote,
                remote_addr,
                timeout_ms: AtomicU64::new(DEFAULT_TIMEOUT_MS),
                word_order: AtomicCell::new(WordOrder::BigEndian),
                worker_count: AtomicU8::new(DEFAULT_WORKER_COUNT),
                ignore_end_codes: ArcSwap::from_pointee(HashSet::new()),
                log: CommLogger::new(),
                sid: SidCounter::new(),
                slots: SlotTable::new(),
                closing: AtomicBool::new(false),
                close_gate: SingleFlight::new(),
                conn: Mutex::new(None),
            }),
        })
    }

    // ---- configuration ----

    /// Sets the response timeout in milliseconds. Consulted at each
    /// submission; 0 waits indefinitely. Default 20 ms.
    pub fn set_timeout_ms(&self, ms: u64) {
        self.shared.timeout_ms.store(ms, Ordering::Relaxed);
    }

    /// Sets the byte order of word/byte conversions. Default big-endian.
    pub fn set_byte_order(&self, order: WordOrder) {
        self.shared.word_order.store(order);
    }

    /// Sets the receive worker count for future opens. Zero is ignored;
    /// workers already running are not affected. Default 8.
    pub fn set_worker_count(&self, count: u8) {
        if count > 0 {
            self.shared.worker_count.store(count, Ordering::Relaxed);
        }
    }

    /// Sets the end codes treated as success. Replaces the previous set.
    pub fn set_ignore_end_codes(&self, codes: &[u16]) {
        self.shared
            .ignore_end_codes
            .store(Arc::new(codes.iter().copied().collect()));
    }

    /// Installs the sink for background diagnostics. Default prints to
    /// stdout.
    pub fn set_log_sink(&self, sink: impl Logger + 'static) {
        self.shared.log.set_sink(Box::new(sink));
    }

    /// Enables or disables hex dumps of every datagram sent and received.
    pub fn set_show_packet(&self, show: bool) {
        self.shared.log.set_show_packet(show);
    }

    // ---- read operations ----

    /// Reads `count` words from a word-granular area.
    pub fn read_words(&self, area: MemoryArea, address: u16, count: u16) -> Result<Vec<u16>> {
        let bytes = self.read_bytes(area, address, count)?;
        Ok(self.shared.word_order.load().bytes_to_words(&bytes))
    }

    /// Reads `count` words from a word-granular area as raw bytes.
    ///
    /// `count` is a word count; the result holds `2 * count` bytes.
    pub fn read_bytes(&self, area: MemoryArea, address: u16, count: u16) -> Result<Vec<u8>> {
        area.require_word_access()?;
        let resp = self.transact(Command::read(MemoryAddress::word(area, address), count))?;
        let data = self.check_end_code(resp)?;
        let want = usize::from(count) * 2;
        if data.len() != want {
            return Err(FinsError::ResponseLength {
                want,
                got: data.len(),
            });
        }
        Ok(data)
    }

    /// Reads `count` words and interprets them as a NUL-terminated string.
    ///
    /// `count` is a word count, not a character count. Bytes after the
    /// first NUL are discarded; the rest are taken as UTF-8.
    pub fn read_string(&self, area: MemoryArea, address: u16, count: u16) -> Result<String> {
        let mut bytes = self.read_bytes(area, address, count)?;
        if let Some(nul) = bytes.iter().position(|&b| b == 0) {
            bytes.truncate(nul);
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads `count` bits from a bit-granular area.
    pub fn read_bits(
        &self,
        area: MemoryArea,
        address: u16,
        bit_offset: u8,
        count: u16,
    ) -> Result<Vec<bool>> {
        area.require_bit_access()?;
        let resp = self.transact(Command::read(
            MemoryAddress::bit(area, address, bit_offset),
            count,
        ))?;
        let data = self.check_end_code(resp)?;
        if data.len() != usize::from(count) {
            return Err(FinsError::ResponseLength {
                want: usize::from(count),
                got: data.len(),
            });
        }
        Ok(data.iter().map(|b| b & 0x01 != 0).collect())
    }

    /// Reads the PLC clock.
    pub fn read_clock(&self) -> Result<DateTime<Local>> {
        let resp = self.transact(Command::clock_read())?;
        let data = self.check_end_code(resp)?;
        decode_clock(&data)
    }

    // ---- write operations ----

    /// Writes words to a word-granular area.
    pub fn write_words(&self, area: MemoryArea, address: u16, data: &[u16]) -> Result<()> {
        let bytes = self.shared.word_order.load().words_to_bytes(data);
        self.write_bytes(area, address, &bytes)
    }

    /// Writes raw bytes to a word-granular area.
    ///
    /// An odd-length payload is padded with one trailing zero, so the low
    /// byte of the last word written becomes zero.
    pub fn write_bytes(&self, area: MemoryArea, address: u16, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Err(FinsError::EmptyWriteRequest);
        }
        area.require_word_access()?;
        let mut data = bytes.to_vec();
        if data.len() % 2 != 0 {
            data.push(0);
        }
        let count = (data.len() / 2) as u16;
        let resp = self.transact(Command::write(
            MemoryAddress::word(area, address),
            count,
            &data,
        ))?;
        self.check_end_code(resp)?;
        Ok(())
    }

    /// Writes the UTF-8 bytes of a string to a word-granular area,
    /// padding to even length like [`UdpClient::write_bytes`].
    pub fn write_string(&self, area: MemoryArea, address: u16, s: &str) -> Result<()> {
        self.write_bytes(area, address, s.as_bytes())
    }

    /// Writes bits to a bit-granular area, one wire byte per bit.
    pub fn write_bits(
        &self,
        area: MemoryArea,
        address: u16,
        bit_offset: u8,
        data: &[bool],
    ) -> Result<()> {
        area.require_bit_access()?;
        let bytes: Vec<u8> = data.iter().map(|&b| u8::from(b)).collect();
        let resp = self.transact(Command::write(
            MemoryAddress::bit(area, address, bit_offset),
            data.len() as u16,
            &bytes,
        ))?;
        self.check_end_code(resp)?;
        Ok(())
    }

    /// Sets a single bit.
    pub fn set_bit(&self, area: MemoryArea, address: u16, bit_offset: u8) -> Result<()> {
        self.bit_twiddle(area, address, bit_offset, 0x01)
    }

    /// Resets a single bit.
    pub fn reset_bit(&self, area: MemoryArea, address: u16, bit_offset: u8) -> Result<()> {
        self.bit_twiddle(area, address, bit_offset, 0x00)
    }

    /// Toggles a single bit by reading it and writing its complement.
    ///
    /// Not atomic: a concurrent writer touching the same bit between the
    /// read and the write can be lost. Serialize externally if that
    /// matters.
    pub fn toggle_bit(&self, area: MemoryArea, address: u16, bit_offset: u8) -> Result<()> {
        let bits = self.read_bits(area, address, bit_offset, 1)?;
        let on = bits.first().copied().unwrap_or(false);
        self.bit_twiddle(area, address, bit_offset, u8::from(!on))
    }

    fn bit_twiddle(&self, area: MemoryArea, address: u16, bit_offset: u8, value: u8) -> Result<()> {
        area.require_bit_access()?;
        let resp = self.transact(Command::write(
            MemoryAddress::bit(area, address, bit_offset),
            1,
            &[value],
        ))?;
        self.check_end_code(resp)?;
        Ok(())
    }

    // ---- lifecycle ----

    /// Closes the client: cancels every waiting operation, drains
    /// in-flight work and releases the socket.
    ///
    /// Idempotent; concurrent callers share one teardown and all return
    /// once it completes. The client is reusable afterwards — the next
    /// operation re-opens the socket.
    pub fn close(&self) {
        let shared = Arc::clone(&self.shared);
        self.shared.close_gate.run(move || {
            shared.closing.store(true, Ordering::SeqCst);
            let state = shared.conn.lock().take();
            if let Some(state) = state {
                let ConnState {
                    socket,
                    cancel_tx,
                    cancel_rx,
                    work,
                } = state;
                // Cancel fires strictly before the socket handle goes
                // away; waiters observe it before any read error.
                drop(cancel_tx);
                drop(cancel_rx);
                drop(socket);
                work.wait();
            }
            shared.closing.store(false, Ordering::SeqCst);
        });
    }

    /// Opens the socket and spawns the receive workers if the client is
    /// idle, then hands out per-operation handles. The wait-group ref
    /// comes first so a caller binding the tuple drops it after the
    /// socket handle.
    fn ensure_open(&self) -> Result<(WaitGroup, Arc<UdpSocket>, Receiver<Infallible>)> {
        let shared = &self.shared;
        let mut conn = shared.conn.lock();
        if shared.closing.load(Ordering::SeqCst) {
            return Err(FinsError::Closing);
        }
        if let Some(state) = conn.as_ref() {
            return Ok((
                state.work.clone(),
                Arc::clone(&state.socket),
                state.cancel_rx.clone(),
            ));
        }

        let local_addr = shared
            .local
            .addr()
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 0)));
        let socket = UdpSocket::bind(local_addr)?;
        socket.connect(shared.remote_addr)?;
        socket.set_read_timeout(Some(RECV_POLL_INTERVAL))?;
        let socket = Arc::new(socket);

        let (cancel_tx, cancel_rx) = bounded::<Infallible>(0);
        let work = WaitGroup::new();

        let count = shared.worker_count.load(Ordering::Relaxed).max(1);
        for i in 0..count {
            let worker = ReceiveWorker {
                shared: Arc::clone(shared),
                socket: Arc::clone(&socket),
                cancel: cancel_rx.clone(),
                _work: work.clone(),
            };
            let spawned = thread::Builder::new()
                .name(format!("fins-recv-{i}"))
                .spawn(move || worker.run());
            if let Err(e) = spawned {
                // Cancel the workers already running and report.
                drop(cancel_tx);
                return Err(e.into());
            }
        }

        let handles = (work.clone(), Arc::clone(&socket), cancel_rx.clone());
        *conn = Some(ConnState {
            socket,
            cancel_tx,
            cancel_rx,
            work,
        });
        Ok(handles)
    }

    // ---- request submission ----

    /// Sends one command and waits for its reply, the cancel signal or
    /// the timeout, whichever comes first.
    fn transact(&self, command: Command) -> Result<Response> {
        // The wait-group ref is held for the whole exchange so close
        // drains after us; it outlives the socket handle (locals drop in
        // reverse declaration order).
        let (_work, socket, cancel) = self.ensure_open()?;

        let shared = &self.shared;
        let sid = shared.sid.next();
        let header = FinsHeader::command(shared.remote.device(), shared.local.device(), sid);
        let frame = command.encode(&header);

        let (reply_tx, reply_rx) = bounded::<Response>(1);
        // Keep a sender alive locally: if 256 in-flight requests wrap the
        // SID space and overwrite this slot, the waiter must run into its
        // timeout rather than see a dead channel.
        let _keepalive = reply_tx.clone();
        shared.slots.install(sid, reply_tx);
        let _slot = SlotGuard { shared, sid };

        shared.log.print_packet("write", &frame);
        socket.send(&frame)?;

        let timeout = Duration::from_millis(shared.timeout_ms.load(Ordering::Relaxed));
        let timer = if timeout.is_zero() {
            never()
        } else {
            after(timeout)
        };

        select! {
            recv(reply_rx) -> resp => resp.map_err(|_| FinsError::Closed),
            recv(cancel) -> _ => Err(FinsError::Closed),
            recv(timer) -> _ => Err(FinsError::ResponseTimeout(timeout)),
        }
    }

    /// Applies the end-code policy and unwraps the payload.
    fn check_end_code(&self, resp: Response) -> Result<Vec<u8>> {
        if resp.end_code == END_CODE_NORMAL_COMPLETION
            || self.shared.ignore_end_codes.load().contains(&resp.end_code)
        {
            Ok(resp.data)
        } else {
            Err(FinsError::EndCode(resp.end_code))
        }
    }
}

impl std::fmt::Debug for UdpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdpClient")
            .field("local", &self.shared.local)
            .field("remote", &self.shared.remote)
            .field("open", &self.shared.conn.lock().is_some())
            .finish()
    }
}

/// Removes the submitter's router slot on every exit path.
struct SlotGuard<'a> {
    shared: &'a Shared,
    sid: u8,
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        self.shared.slots.remove(self.sid);
    }
}

/// One receive worker: reads datagrams, decodes them and routes each
/// reply to the waiter for its SID.
struct ReceiveWorker {
    shared: Arc<Shared>,
    socket: Arc<UdpSocket>,
    cancel: Receiver<Infallible>,
    /// Ref on the in-flight counter, released when the worker exits.
    _work: WaitGroup,
}

impl ReceiveWorker {
    fn run(self) {
        let mut buf = [0u8; UDP_PACKET_MAX_SIZE];
        while !cancelled(&self.cancel) {
            let n = match self.socket.recv(&mut buf) {
                Ok(n) => n,
                Err(e)
                    if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) =>
                {
                    // Read-timeout tick; loop around to re-check cancel.
                    continue;
                }
                Err(e) => {
                    if cancelled(&self.cancel) {
                        return;
                    }
                    self.shared
                        .log
                        .print_error(format_args!("failed to read fins response packet: {e}"));
                    wait_moment(&self.cancel, READ_ERROR_BACKOFF);
                    continue;
                }
            };
            if n < MIN_RESPONSE_SIZE {
                self.shared.log.print_error(format_args!(
                    "short fins response packet: want at least {MIN_RESPONSE_SIZE} bytes, got {n}: {}",
                    hex::encode_upper(&buf[..n])
                ));
                wait_moment(&self.cancel, READ_ERROR_BACKOFF);
                continue;
            }
            let frame = &buf[..n];
            self.shared.log.print_packet("read", frame);
            match Response::from_bytes(frame) {
                Ok(resp) => self.route(resp),
                Err(e) => self
                    .shared
                    .log
                    .print_error(format_args!("failed to decode fins response packet: {e}")),
            }
        }
    }

    fn route(&self, resp: Response) {
        let sid = resp.header.sid;
        let Some(sink) = self.shared.slots.take(sid) else {
            self.shared.log.print_error(format_args!(
                "dropped fins response for sid 0x{sid:02X}: no waiter"
            ));
            return;
        };
        let window = Duration::from_millis(self.shared.timeout_ms.load(Ordering::Relaxed));
        // A zero timeout would block this worker forever on a duplicate
        // reply, so it degrades to a non-blocking attempt.
        let delivered = if window.is_zero() {
            sink.try_send(resp).is_ok()
        } else {
            sink.send_timeout(resp, window).is_ok()
        };
        if !delivered {
            self.shared.log.print_error(format_args!(
                "dropped fins response for sid 0x{sid:02X}: waiter is gone"
            ));
        }
    }
}
