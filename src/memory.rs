//! Memory area definitions for the FINS protocol.
//!
//! Each PLC memory region (DM, WR, HR, AR) is addressable at word or bit
//! granularity, and each combination has its own one-byte FINS area code.
//! Word-granular areas carry 16-bit data; bit-granular areas carry one byte
//! per bit on the wire.
//!
//! | Area | Word code | Bit code |
//! |------|-----------|----------|
//! | DM (Data Memory) | `0x82` | `0x02` |
//! | WR (Work) | `0xB1` | `0x31` |
//! | HR (Holding) | `0xB2` | `0x32` |
//! | AR (Auxiliary) | `0xB3` | `0x33` |

use crate::error::{FinsError, Result};

/// Memory areas available in Omron PLCs, split by access granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryArea {
    /// DM (Data Memory) area, word access.
    DmWord,
    /// DM (Data Memory) area, bit access.
    DmBit,
    /// WR (Work) area, word access.
    WrWord,
    /// WR (Work) area, bit access.
    WrBit,
    /// HR (Holding) area, word access.
    HrWord,
    /// HR (Holding) area, bit access.
    HrBit,
    /// AR (Auxiliary Relay) area, word access.
    ArWord,
    /// AR (Auxiliary Relay) area, bit access.
    ArBit,
}

impl MemoryArea {
    /// Returns the FINS area code sent on the wire.
    pub const fn code(self) -> u8 {
        match self {
            MemoryArea::DmWord => 0x82,
            MemoryArea::DmBit => 0x02,
            MemoryArea::WrWord => 0xB1,
            MemoryArea::WrBit => 0x31,
            MemoryArea::HrWord => 0xB2,
            MemoryArea::HrBit => 0x32,
            MemoryArea::ArWord => 0xB3,
            MemoryArea::ArBit => 0x33,
        }
    }

    /// Looks up the area for a wire code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x82 => Some(MemoryArea::DmWord),
            0x02 => Some(MemoryArea::DmBit),
            0xB1 => Some(MemoryArea::WrWord),
            0x31 => Some(MemoryArea::WrBit),
            0xB2 => Some(MemoryArea::HrWord),
            0x32 => Some(MemoryArea::HrBit),
            0xB3 => Some(MemoryArea::ArWord),
            0x33 => Some(MemoryArea::ArBit),
            _ => None,
        }
    }

    /// Returns whether this area is addressed in 16-bit words.
    pub const fn is_word_access(self) -> bool {
        matches!(
            self,
            MemoryArea::DmWord | MemoryArea::WrWord | MemoryArea::HrWord | MemoryArea::ArWord
        )
    }

    /// Returns whether this area is addressed in single bits.
    pub const fn is_bit_access(self) -> bool {
        !self.is_word_access()
    }

    pub(crate) fn require_word_access(self) -> Result<()> {
        if self.is_word_access() {
            Ok(())
        } else {
            Err(FinsError::IncompatibleMemoryArea(self))
        }
    }

    pub(crate) fn require_bit_access(self) -> Result<()> {
        if self.is_bit_access() {
            Ok(())
        } else {
            Err(FinsError::IncompatibleMemoryArea(self))
        }
    }
}

impl std::fmt::Display for MemoryArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MemoryArea::DmWord => "DM (word)",
            MemoryArea::DmBit => "DM (bit)",
            MemoryArea::WrWord => "WR (word)",
            MemoryArea::WrBit => "WR (bit)",
            MemoryArea::HrWord => "HR (word)",
            MemoryArea::HrBit => "HR (bit)",
            MemoryArea::ArWord => "AR (word)",
            MemoryArea::ArBit => "AR (bit)",
        };
        f.write_str(s)
    }
}

/// A memory address in its four-byte wire form: area code, 16-bit
/// big-endian address, bit offset (zero for word access).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryAddress {
    /// Memory area the address points into.
    pub area: MemoryArea,
    /// Word address within the area.
    pub address: u16,
    /// Bit offset for bit-granular areas, 0 otherwise.
    pub bit_offset: u8,
}

impl MemoryAddress {
    /// Creates a word address (bit offset 0).
    pub const fn word(area: MemoryArea, address: u16) -> Self {
        Self {
            area,
            address,
            bit_offset: 0,
        }
    }

    /// Creates a bit address.
    pub const fn bit(area: MemoryArea, address: u16, bit_offset: u8) -> Self {
        Self {
            area,
            address,
            bit_offset,
        }
    }

    pub(crate) fn to_bytes(self) -> [u8; 4] {
        let [hi, lo] = self.address.to_be_bytes();
        [self.area.code(), hi, lo, self.bit_offset]
    }
}

/// Memory address as decoded by the server side, before the area code is
/// validated against the supported set.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawMemoryAddress {
    pub area_code: u8,
    pub address: u16,
    pub bit_offset: u8,
}

pub(crate) fn decode_memory_address(data: &[u8; 4]) -> RawMemoryAddress {
    RawMemoryAddress {
        area_code: data[0],
        address: u16::from_be_bytes([data[1], data[2]]),
        bit_offset: data[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_codes() {
        assert_eq!(MemoryArea::DmWord.code(), 0x82);
        assert_eq!(MemoryArea::DmBit.code(), 0x02);
        assert_eq!(MemoryArea::WrWord.code(), 0xB1);
        assert_eq!(MemoryArea::WrBit.code(), 0x31);
        assert_eq!(MemoryArea::HrWord.code(), 0xB2);
        assert_eq!(MemoryArea::HrBit.code(), 0x32);
        assert_eq!(MemoryArea::ArWord.code(), 0xB3);
        assert_eq!(MemoryArea::ArBit.code(), 0x33);
    }

    #[test]
    fn test_from_code_roundtrip() {
        for area in [
            MemoryArea::DmWord,
            MemoryArea::DmBit,
            MemoryArea::WrWord,
            MemoryArea::WrBit,
            MemoryArea::HrWord,
            MemoryArea::HrBit,
            MemoryArea::ArWord,
            MemoryArea::ArBit,
        ] {
            assert_eq!(MemoryArea::from_code(area.code()), Some(area));
        }
        assert_eq!(MemoryArea::from_code(0xFF), None);
    }

    #[test]
    fn test_granularity() {
        assert!(MemoryArea::DmWord.is_word_access());
        assert!(!MemoryArea::DmWord.is_bit_access());
        assert!(MemoryArea::ArBit.is_bit_access());
        assert!(MemoryArea::DmWord.require_word_access().is_ok());
        assert!(MemoryArea::DmWord.require_bit_access().is_err());
        assert!(MemoryArea::HrBit.require_bit_access().is_ok());
        assert!(MemoryArea::HrBit.require_word_access().is_err());
    }

    #[test]
    fn test_memory_address_to_bytes() {
        let addr = MemoryAddress::word(MemoryArea::DmWord, 0x1234);
        assert_eq!(addr.to_bytes(), [0x82, 0x12, 0x34, 0x00]);

        let addr = MemoryAddress::bit(MemoryArea::WrBit, 100, 5);
        assert_eq!(addr.to_bytes(), [0x31, 0x00, 0x64, 0x05]);
    }

    #[test]
    fn test_decode_memory_address() {
        let raw = decode_memory_address(&[0x82, 0x01, 0x00, 0x02]);
        assert_eq!(raw.area_code, 0x82);
        assert_eq!(raw.address, 256);
        assert_eq!(raw.bit_offset, 2);
    }
}
