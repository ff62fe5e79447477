//! In-process FINS server simulator.
//!
//! A minimal PLC stand-in for the test suite: it binds a UDP listener,
//! serves memory-area read/write against the DM area only (one 32 KiB
//! buffer per granularity) and answers every other area or command with
//! end code `0x0402` (not supported by model version). Don't use it in
//! production — a real FINS server is the PLC.

use std::convert::Infallible;
use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::address::UdpEndpoint;
use crate::client::UDP_PACKET_MAX_SIZE;
use crate::command::{
    decode_request, Request, COMMAND_CODE_MEMORY_AREA_READ, COMMAND_CODE_MEMORY_AREA_WRITE,
    MIN_REQUEST_SIZE,
};
use crate::endcode::{
    END_CODE_ADDRESS_RANGE_EXCEEDED, END_CODE_COMMAND_TOO_SHORT, END_CODE_NORMAL_COMPLETION,
    END_CODE_NOT_SUPPORTED_BY_MODEL_VERSION,
};
use crate::error::{FinsError, Result};
use crate::header::FinsHeader;
use crate::logger::{CommLogger, Logger};
use crate::memory::{decode_memory_address, MemoryArea};
use crate::response::Response;

/// Size of the simulated DM area, in bytes, per granularity.
pub const DM_AREA_SIZE: usize = 32768;

const SERVE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// FINS PLC simulator serving one command at a time.
pub struct UdpServer {
    local_addr: SocketAddr,
    closed: Arc<AtomicBool>,
    done: Receiver<Infallible>,
    log: Arc<CommLogger>,
}

impl UdpServer {
    /// Binds the listener at the endpoint's socket address and starts the
    /// serve loop.
    ///
    /// # Errors
    ///
    /// Returns [`FinsError::MissingRemoteAddress`] if the endpoint has no
    /// socket address, or the bind error.
    pub fn new(endpoint: UdpEndpoint) -> Result<Self> {
        let addr = endpoint.addr().ok_or(FinsError::MissingRemoteAddress)?;
        let socket = UdpSocket::bind(addr)?;
        socket.set_read_timeout(Some(SERVE_POLL_INTERVAL))?;
        let local_addr = socket.local_addr()?;

        let closed = Arc::new(AtomicBool::new(false));
        let log = Arc::new(CommLogger::new());
        let (done_tx, done_rx) = bounded::<Infallible>(0);

        let loop_closed = Arc::clone(&closed);
        let loop_log = Arc::clone(&log);
        thread::Builder::new()
            .name("fins-server".into())
            .spawn(move || serve_loop(socket, loop_closed, loop_log, done_tx))?;

        Ok(Self {
            local_addr,
            closed,
            done: done_rx,
            log,
        })
    }

    /// Address the listener actually bound, useful when the endpoint
    /// asked for port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Asks the serve loop to exit. Use [`UdpServer::done`] to wait for
    /// it.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Returns a receiver that disconnects when the serve loop has
    /// exited; `recv()` on it blocks until teardown is complete.
    pub fn done(&self) -> Receiver<Infallible> {
        self.done.clone()
    }

    /// Installs the sink for serve-loop diagnostics.
    pub fn set_log_sink(&self, sink: impl Logger + 'static) {
        self.log.set_sink(Box::new(sink));
    }

    /// Enables or disables hex dumps of served datagrams.
    pub fn set_show_packet(&self, show: bool) {
        self.log.set_show_packet(show);
    }
}

impl std::fmt::Debug for UdpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdpServer")
            .field("local_addr", &self.local_addr)
            .field("closed", &self.closed.load(Ordering::SeqCst))
            .finish()
    }
}

fn serve_loop(
    socket: UdpSocket,
    closed: Arc<AtomicBool>,
    log: Arc<CommLogger>,
    done_tx: Sender<Infallible>,
) {
    // Dropped on return; `done()` observers unblock then.
    let _done = done_tx;
    let mut dm_area = vec![0u8; DM_AREA_SIZE];
    let mut bit_dm_area = vec![0u8; DM_AREA_SIZE];
    let mut buf = [0u8; UDP_PACKET_MAX_SIZE];

    loop {
        if closed.load(Ordering::SeqCst) {
            return;
        }
        let (n, remote) = match socket.recv_from(&mut buf) {
            Ok(v) => v,
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                continue;
            }
            Err(e) => {
                log.print_error(format_args!(
                    "fins server: failed to read fins request packet: {e}"
                ));
                return;
            }
        };
        if n < MIN_REQUEST_SIZE {
            log.print_error(format_args!(
                "fins server: short fins request packet from {remote}: want at least {MIN_REQUEST_SIZE} bytes, got {n}"
            ));
            continue;
        }
        let frame = &buf[..n];
        log.print_packet(&format!("read from {remote}"), frame);
        let Ok(request) = decode_request(frame) else {
            // Unreachable after the length check; keep the loop alive.
            continue;
        };
        let reply = handle(&mut dm_area, &mut bit_dm_area, &log, &request).to_bytes();
        log.print_packet(&format!("write to {remote}"), &reply);
        if let Err(e) = socket.send_to(&reply, remote) {
            log.print_error(format_args!(
                "fins server: failed to write fins response packet: {e}"
            ));
        }
    }
}

/// Serves memory-area read/write against DM; everything else is
/// unsupported.
fn handle(dm_area: &mut [u8], bit_dm_area: &mut [u8], log: &CommLogger, request: &Request) -> Response {
    let mut end_code = END_CODE_NOT_SUPPORTED_BY_MODEL_VERSION;
    let mut data = Vec::new();

    match request.code {
        COMMAND_CODE_MEMORY_AREA_READ | COMMAND_CODE_MEMORY_AREA_WRITE => {
            if request.data.len() < 6 {
                end_code = END_CODE_COMMAND_TOO_SHORT;
            } else {
                let mem = decode_memory_address(&[
                    request.data[0],
                    request.data[1],
                    request.data[2],
                    request.data[3],
                ]);
                let count = usize::from(u16::from_be_bytes([request.data[4], request.data[5]]));
                let address = usize::from(mem.address);
                let is_read = request.code == COMMAND_CODE_MEMORY_AREA_READ;

                match MemoryArea::from_code(mem.area_code) {
                    Some(MemoryArea::DmWord) => {
                        if address + count * 2 > DM_AREA_SIZE {
                            end_code = END_CODE_ADDRESS_RANGE_EXCEEDED;
                        } else {
                            let span = address..address + count * 2;
                            if is_read {
                                data = dm_area[span].to_vec();
                            } else {
                                copy_payload(&mut dm_area[span], &request.data[6..]);
                            }
                            end_code = END_CODE_NORMAL_COMPLETION;
                        }
                    }
                    Some(MemoryArea::DmBit) => {
                        let start = address + usize::from(mem.bit_offset);
                        if address + count > DM_AREA_SIZE || start + count > DM_AREA_SIZE {
                            end_code = END_CODE_ADDRESS_RANGE_EXCEEDED;
                        } else {
                            let span = start..start + count;
                            if is_read {
                                data = bit_dm_area[span].to_vec();
                            } else {
                                copy_payload(&mut bit_dm_area[span], &request.data[6..]);
                            }
                            end_code = END_CODE_NORMAL_COMPLETION;
                        }
                    }
                    _ => {
                        log.print_error(format_args!(
                            "fins server: memory area is not supported: 0x{:02x}",
                            mem.area_code
                        ));
                    }
                }
            }
        }
        _ => {
            log.print_error(format_args!(
                "fins server: command code is not supported: 0x{:04x}",
                request.code
            ));
        }
    }

    Response {
        header: FinsHeader::reply_to(&request.header),
        code: request.code,
        end_code,
        data,
    }
}

/// Copies as many payload bytes as are available into the target span.
fn copy_payload(target: &mut [u8], payload: &[u8]) {
    let n = target.len().min(payload.len());
    target[..n].copy_from_slice(&payload[..n]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::DeviceAddress;
    use crate::command::Command;
    use crate::memory::MemoryAddress;

    fn request(command: Command) -> Request {
        let header = FinsHeader::command(
            DeviceAddress::new(0, 10, 0),
            DeviceAddress::new(0, 2, 0),
            0x11,
        );
        decode_request(&command.encode(&header)).unwrap()
    }

    fn serve(dm: &mut [u8], bits: &mut [u8], command: Command) -> Response {
        handle(dm, bits, &CommLogger::new(), &request(command))
    }

    #[test]
    fn test_handle_word_write_then_read() {
        let mut dm = vec![0u8; DM_AREA_SIZE];
        let mut bits = vec![0u8; DM_AREA_SIZE];

        let addr = MemoryAddress::word(MemoryArea::DmWord, 100);
        let write = serve(&mut dm, &mut bits, Command::write(addr, 2, &[1, 2, 3, 4]));
        assert_eq!(write.end_code, END_CODE_NORMAL_COMPLETION);
        assert!(write.data.is_empty());

        let read = serve(&mut dm, &mut bits, Command::read(addr, 2));
        assert_eq!(read.end_code, END_CODE_NORMAL_COMPLETION);
        assert_eq!(read.data, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_handle_bit_write_uses_offset() {
        let mut dm = vec![0u8; DM_AREA_SIZE];
        let mut bits = vec![0u8; DM_AREA_SIZE];

        let addr = MemoryAddress::bit(MemoryArea::DmBit, 10, 2);
        let write = serve(&mut dm, &mut bits, Command::write(addr, 3, &[1, 0, 1]));
        assert_eq!(write.end_code, END_CODE_NORMAL_COMPLETION);
        assert_eq!(&bits[12..15], &[1, 0, 1]);

        let read = serve(
            &mut dm,
            &mut bits,
            Command::read(MemoryAddress::bit(MemoryArea::DmBit, 10, 1), 5),
        );
        assert_eq!(read.data, vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_handle_boundary_exceeded() {
        let mut dm = vec![0u8; DM_AREA_SIZE];
        let mut bits = vec![0u8; DM_AREA_SIZE];

        let addr = MemoryAddress::word(MemoryArea::DmWord, 32767);
        let resp = serve(&mut dm, &mut bits, Command::read(addr, 1));
        assert_eq!(resp.end_code, END_CODE_ADDRESS_RANGE_EXCEEDED);
    }

    #[test]
    fn test_handle_unsupported_area() {
        let mut dm = vec![0u8; DM_AREA_SIZE];
        let mut bits = vec![0u8; DM_AREA_SIZE];

        let addr = MemoryAddress::word(MemoryArea::HrWord, 0);
        let resp = serve(&mut dm, &mut bits, Command::read(addr, 1));
        assert_eq!(resp.end_code, END_CODE_NOT_SUPPORTED_BY_MODEL_VERSION);
    }

    #[test]
    fn test_handle_unsupported_command() {
        let mut dm = vec![0u8; DM_AREA_SIZE];
        let mut bits = vec![0u8; DM_AREA_SIZE];

        let resp = serve(&mut dm, &mut bits, Command::clock_read());
        assert_eq!(resp.end_code, END_CODE_NOT_SUPPORTED_BY_MODEL_VERSION);
    }

    #[test]
    fn test_handle_reply_addressing() {
        let mut dm = vec![0u8; DM_AREA_SIZE];
        let mut bits = vec![0u8; DM_AREA_SIZE];

        let addr = MemoryAddress::word(MemoryArea::DmWord, 0);
        let resp = serve(&mut dm, &mut bits, Command::read(addr, 1));
        assert!(resp.header.is_response());
        assert_eq!(resp.header.sid, 0x11);
        assert_eq!(resp.header.da1, 2);
        assert_eq!(resp.header.sa1, 10);
    }

    #[test]
    fn test_server_requires_addr() {
        assert!(matches!(
            UdpServer::new(UdpEndpoint::any(0, 10, 0)),
            Err(FinsError::MissingRemoteAddress)
        ));
    }
}
