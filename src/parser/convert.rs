//! Option value conversions
//!
//! Unsigned values follow `strtoul` conventions (leading whitespace, optional
//! `+`, optional `0x` prefix in base 16) but the whole string must be a
//! number. The statistics options use `atoi` conventions and never fail.

use crate::config::{LogLevel, PortMask};
use crate::error::ValueError;

const PORTMASK_BASE: u32 = 16;
const LOG_LEVEL_BASE: u32 = 10;
const FRAME_SIZE_BASE: u32 = 10;

/// Whitespace as understood by C `isspace`.
fn is_c_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Parses the whole of `s` as an unsigned number in `radix`.
fn parse_unsigned(s: &str, radix: u32) -> Option<u64> {
    let s = s.trim_start_matches(is_c_space);
    let s = s.strip_prefix('+').unwrap_or(s);
    let digits = if radix == 16 {
        s.strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s)
    } else {
        s
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

pub fn parse_portmask(arg: &str) -> Result<PortMask, ValueError> {
    parse_unsigned(arg, PORTMASK_BASE)
        .map(PortMask::new)
        .ok_or_else(|| ValueError::Portmask(arg.to_string()))
}

pub fn parse_log_level(arg: &str) -> Result<LogLevel, ValueError> {
    parse_unsigned(arg, LOG_LEVEL_BASE)
        .and_then(|n| u32::try_from(n).ok())
        .and_then(|n| LogLevel::try_from(n).ok())
        .ok_or_else(|| ValueError::LogLevel(arg.to_string()))
}

pub fn parse_frame_size(arg: &str) -> Result<u32, ValueError> {
    parse_unsigned(arg, FRAME_SIZE_BASE)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&n| n != 0)
        .ok_or_else(|| ValueError::FrameSize(arg.to_string()))
}

/// Lenient decimal conversion: the longest numeric prefix wins, no digits
/// means zero, anything after the digits is ignored.
///
/// The second value is false when part of the input was discarded.
pub fn atoi(arg: &str) -> (i32, bool) {
    let s = arg.trim_start_matches(is_c_space);
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digit_len = s.bytes().take_while(u8::is_ascii_digit).count();
    let magnitude = s[..digit_len].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    let value = if negative { -magnitude } else { magnitude };
    let value = value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;

    let exact = digit_len > 0 && digit_len == s.len();
    (value, exact)
}
