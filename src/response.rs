//! FINS response framing.
//!
//! A response frame is the 10-byte header, the echoed 2-byte command code,
//! the 2-byte end code, and an optional data payload. `0x0000` is normal
//! completion; anything else is looked up in the end-code catalog.

use crate::error::{FinsError, Result};
use crate::header::{FinsHeader, FINS_HEADER_SIZE};

/// Minimum valid response frame: header, command code and end code.
pub const MIN_RESPONSE_SIZE: usize = FINS_HEADER_SIZE + 4;

/// A decoded FINS response.
#[derive(Debug, Clone)]
pub struct Response {
    /// Response header; its SID routes the frame to the waiting request.
    pub header: FinsHeader,
    /// Echoed command code.
    pub code: u16,
    /// End code reported by the PLC.
    pub end_code: u16,
    /// Response data, possibly empty.
    pub data: Vec<u8>,
}

impl Response {
    /// Parses a response frame.
    ///
    /// # Errors
    ///
    /// Returns [`FinsError::ResponseLength`] for frames shorter than
    /// [`MIN_RESPONSE_SIZE`].
    pub fn from_bytes(frame: &[u8]) -> Result<Self> {
        if frame.len() < MIN_RESPONSE_SIZE {
            return Err(FinsError::ResponseLength {
                want: MIN_RESPONSE_SIZE,
                got: frame.len(),
            });
        }
        let header = FinsHeader::from_bytes(frame)?;
        let code = u16::from_be_bytes([frame[FINS_HEADER_SIZE], frame[FINS_HEADER_SIZE + 1]]);
        let end_code =
            u16::from_be_bytes([frame[FINS_HEADER_SIZE + 2], frame[FINS_HEADER_SIZE + 3]]);
        Ok(Self {
            header,
            code,
            end_code,
            data: frame[MIN_RESPONSE_SIZE..].to_vec(),
        })
    }

    /// Serializes the response to its wire form.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(MIN_RESPONSE_SIZE + self.data.len());
        frame.extend_from_slice(&self.header.to_bytes());
        frame.extend_from_slice(&self.code.to_be_bytes());
        frame.extend_from_slice(&self.end_code.to_be_bytes());
        frame.extend_from_slice(&self.data);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame(end_code: u16, data: &[u8]) -> Vec<u8> {
        let mut frame = vec![
            0xC0, 0x00, 0x02, 0x00, 0x02, 0x00, 0x00, 0x0A, 0x00, 0x09, // header
            0x01, 0x01, // command code
        ];
        frame.extend_from_slice(&end_code.to_be_bytes());
        frame.extend_from_slice(data);
        frame
    }

    #[test]
    fn test_from_bytes() {
        let resp = Response::from_bytes(&make_frame(0x0000, &[0x12, 0x34])).unwrap();
        assert_eq!(resp.header.sid, 0x09);
        assert_eq!(resp.code, 0x0101);
        assert_eq!(resp.end_code, 0x0000);
        assert_eq!(resp.data, vec![0x12, 0x34]);
    }

    #[test]
    fn test_from_bytes_end_code() {
        let resp = Response::from_bytes(&make_frame(0x1104, &[])).unwrap();
        assert_eq!(resp.end_code, 0x1104);
        assert!(resp.data.is_empty());
    }

    #[test]
    fn test_from_bytes_too_short() {
        let frame = make_frame(0x0000, &[]);
        assert!(Response::from_bytes(&frame[..13]).is_err());
    }

    #[test]
    fn test_roundtrip() {
        let original = Response::from_bytes(&make_frame(0x0000, &[0xAB, 0xCD, 0xEF])).unwrap();
        let parsed = Response::from_bytes(&original.to_bytes()).unwrap();
        assert_eq!(parsed.end_code, original.end_code);
        assert_eq!(parsed.data, original.data);
        assert_eq!(parsed.header, original.header);
    }
}
