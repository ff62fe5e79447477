//! FINS command framing.
//!
//! A request frame is the 10-byte header, the 2-byte command code, and the
//! command payload. The three command codes this crate speaks:
//!
//! - memory area read (`0x0101`): payload `memaddr(4) || count(2 BE)`
//! - memory area write (`0x0102`): payload `memaddr(4) || count(2 BE) || data`
//! - clock read (`0x0701`): empty payload
//!
//! For word areas `count` is the number of 16-bit words and the write data
//! holds `2 * count` bytes; for bit areas `count` is the number of bits and
//! the data holds one `0x00`/`0x01` byte per bit.

use crate::error::{FinsError, Result};
use crate::header::{FinsHeader, FINS_HEADER_SIZE};
use crate::memory::MemoryAddress;

/// Memory area read command code.
pub const COMMAND_CODE_MEMORY_AREA_READ: u16 = 0x0101;
/// Memory area write command code.
pub const COMMAND_CODE_MEMORY_AREA_WRITE: u16 = 0x0102;
/// Clock read command code.
pub const COMMAND_CODE_CLOCK_READ: u16 = 0x0701;

/// Minimum valid request frame: header plus command code.
pub const MIN_REQUEST_SIZE: usize = FINS_HEADER_SIZE + 2;

/// A FINS command: code plus payload, not yet bound to a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command code.
    pub code: u16,
    /// Command payload.
    pub payload: Vec<u8>,
}

impl Command {
    /// Builds a memory area read command.
    pub fn read(addr: MemoryAddress, count: u16) -> Self {
        let mut payload = Vec::with_capacity(6);
        payload.extend_from_slice(&addr.to_bytes());
        payload.extend_from_slice(&count.to_be_bytes());
        Self {
            code: COMMAND_CODE_MEMORY_AREA_READ,
            payload,
        }
    }

    /// Builds a memory area write command carrying `data`.
    pub fn write(addr: MemoryAddress, count: u16, data: &[u8]) -> Self {
        let mut payload = Vec::with_capacity(6 + data.len());
        payload.extend_from_slice(&addr.to_bytes());
        payload.extend_from_slice(&count.to_be_bytes());
        payload.extend_from_slice(data);
        Self {
            code: COMMAND_CODE_MEMORY_AREA_WRITE,
            payload,
        }
    }

    /// Builds a clock read command.
    pub fn clock_read() -> Self {
        Self {
            code: COMMAND_CODE_CLOCK_READ,
            payload: Vec::new(),
        }
    }

    /// Serializes the full request frame under the given header.
    pub fn encode(&self, header: &FinsHeader) -> Vec<u8> {
        let mut frame = Vec::with_capacity(MIN_REQUEST_SIZE + self.payload.len());
        frame.extend_from_slice(&header.to_bytes());
        frame.extend_from_slice(&self.code.to_be_bytes());
        frame.extend_from_slice(&self.payload);
        frame
    }
}

/// A decoded request frame, as seen by the server simulator.
#[derive(Debug, Clone)]
pub(crate) struct Request {
    pub header: FinsHeader,
    pub code: u16,
    pub data: Vec<u8>,
}

pub(crate) fn decode_request(frame: &[u8]) -> Result<Request> {
    if frame.len() < MIN_REQUEST_SIZE {
        return Err(FinsError::ResponseLength {
            want: MIN_REQUEST_SIZE,
            got: frame.len(),
        });
    }
    let header = FinsHeader::from_bytes(frame)?;
    let code = u16::from_be_bytes([frame[FINS_HEADER_SIZE], frame[FINS_HEADER_SIZE + 1]]);
    Ok(Request {
        header,
        code,
        data: frame[MIN_REQUEST_SIZE..].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::DeviceAddress;
    use crate::memory::{MemoryArea, MemoryAddress};

    fn header() -> FinsHeader {
        FinsHeader::command(
            DeviceAddress::new(0, 10, 0),
            DeviceAddress::new(0, 2, 0),
            0x07,
        )
    }

    #[test]
    fn test_read_command_encoding() {
        let cmd = Command::read(MemoryAddress::word(MemoryArea::DmWord, 100), 5);
        let frame = cmd.encode(&header());
        assert_eq!(
            frame,
            vec![
                0x80, 0x00, 0x02, 0x00, 0x0A, 0x00, 0x00, 0x02, 0x00, 0x07, // header
                0x01, 0x01, // read
                0x82, 0x00, 0x64, 0x00, // DM word 100
                0x00, 0x05, // count
            ]
        );
    }

    #[test]
    fn test_write_command_encoding() {
        let cmd = Command::write(
            MemoryAddress::bit(MemoryArea::DmBit, 10, 2),
            3,
            &[0x01, 0x00, 0x01],
        );
        let frame = cmd.encode(&header());
        assert_eq!(
            &frame[FINS_HEADER_SIZE..],
            &[0x01, 0x02, 0x02, 0x00, 0x0A, 0x02, 0x00, 0x03, 0x01, 0x00, 0x01]
        );
    }

    #[test]
    fn test_clock_read_encoding() {
        let frame = Command::clock_read().encode(&header());
        assert_eq!(frame.len(), MIN_REQUEST_SIZE);
        assert_eq!(&frame[FINS_HEADER_SIZE..], &[0x07, 0x01]);
    }

    #[test]
    fn test_decode_request() {
        let cmd = Command::read(MemoryAddress::word(MemoryArea::DmWord, 100), 5);
        let frame = cmd.encode(&header());
        let req = decode_request(&frame).unwrap();
        assert_eq!(req.code, COMMAND_CODE_MEMORY_AREA_READ);
        assert_eq!(req.header.sid, 0x07);
        assert_eq!(req.data, cmd.payload);
    }

    #[test]
    fn test_decode_request_too_short() {
        assert!(decode_request(&[0x80, 0x00, 0x02]).is_err());
    }
}
