//! Error types for FINS communication.

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::endcode::end_code_message;
use crate::memory::MemoryArea;

/// Result type alias for FINS operations.
pub type Result<T> = std::result::Result<T, FinsError>;

/// Errors that can occur during FINS communication.
#[derive(Debug, Error)]
pub enum FinsError {
    /// The remote endpoint was constructed without a socket address.
    #[error("missing plc udp address")]
    MissingRemoteAddress,

    /// The client was closed while the operation was waiting.
    #[error("client is closed")]
    Closed,

    /// The operation was attempted while a close was in progress.
    #[error("client is closing")]
    Closing,

    /// A write was requested with an empty payload.
    #[error("write request is empty")]
    EmptyWriteRequest,

    /// A response payload had an unexpected byte count.
    #[error("response size: want {want}, got {got}")]
    ResponseLength {
        /// Expected byte count.
        want: usize,
        /// Received byte count.
        got: usize,
    },

    /// No response arrived within the configured timeout. Transient; the
    /// request may be retried.
    #[error("response timeout of {0:?} has been reached")]
    ResponseTimeout(Duration),

    /// The memory area granularity disagrees with the requested data type.
    #[error("memory area is incompatible with the data type: 0x{:02X}", .0.code())]
    IncompatibleMemoryArea(MemoryArea),

    /// A clock response byte held a non-decimal nibble.
    #[error("bad digit in BCD decoding: 0x{0:02X}")]
    BcdBadDigit(u8),

    /// A decoded BCD value fell outside the representable range.
    #[error("overflow occurred in BCD decoding")]
    BcdOverflow,

    /// The PLC reported a non-zero end code not covered by the ignore set.
    #[error("error reported by destination: {}", end_code_message(*.0))]
    EndCode(u16),

    /// I/O error from the socket layer, surfaced unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FinsError {
    /// Returns whether this error is the "transport closed" signal.
    pub fn is_closed(&self) -> bool {
        matches!(self, FinsError::Closed)
    }

    /// Returns whether this error is a response timeout, which is
    /// transient and safe to retry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FinsError::ResponseTimeout(_))
    }

    /// Returns the end code carried by an [`FinsError::EndCode`] error.
    pub fn end_code(&self) -> Option<u16> {
        match self {
            FinsError::EndCode(code) => Some(*code),
            _ => None,
        }
    }
}
