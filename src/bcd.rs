//! BCD decoding for the clock-read response.
//!
//! The PLC clock is reported as six packed-decimal bytes: year, month,
//! day, hour, minute, second. Years below 50 are taken as 20YY, the rest
//! as 19YY.

use chrono::{DateTime, Local, NaiveDate, TimeZone};

use crate::error::{FinsError, Result};

/// Decodes one packed-decimal byte (two digits, 0-99).
pub(crate) fn decode_bcd_byte(b: u8) -> Result<u8> {
    let hi = b >> 4;
    let lo = b & 0x0F;
    if hi > 9 || lo > 9 {
        return Err(FinsError::BcdBadDigit(b));
    }
    Ok(hi * 10 + lo)
}

/// Decodes a clock-read response payload into a local timestamp.
pub(crate) fn decode_clock(data: &[u8]) -> Result<DateTime<Local>> {
    if data.len() < 6 {
        return Err(FinsError::ResponseLength {
            want: 6,
            got: data.len(),
        });
    }
    let year = decode_bcd_byte(data[0])?;
    let month = decode_bcd_byte(data[1])?;
    let day = decode_bcd_byte(data[2])?;
    let hour = decode_bcd_byte(data[3])?;
    let minute = decode_bcd_byte(data[4])?;
    let second = decode_bcd_byte(data[5])?;

    let year = if year < 50 {
        2000 + i32::from(year)
    } else {
        1900 + i32::from(year)
    };

    let date = NaiveDate::from_ymd_opt(year, u32::from(month), u32::from(day))
        .ok_or(FinsError::BcdOverflow)?;
    let datetime = date
        .and_hms_opt(u32::from(hour), u32::from(minute), u32::from(second))
        .ok_or(FinsError::BcdOverflow)?;
    Local
        .from_local_datetime(&datetime)
        .earliest()
        .ok_or(FinsError::BcdOverflow)
}
