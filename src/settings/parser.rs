//! Single-line settings parser.
//!
//! A line is `KEY<whitespace>VALUE`. The key is matched case-insensitively
//! against the table in order; the value is read with `strtoul`-style base
//! detection (`0x` hex, leading `0` octal, decimal otherwise).

use super::table::{BoundSetting, OperationalSettings};

/// What happened to one settings line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// The value was in range and written.
    Applied {
        /// Matched key.
        key: &'static str,
        /// Value written to the bound field.
        value: u32,
    },
    /// The key matched but the value was out of range; nothing was written.
    Rejected {
        /// Matched key.
        key: &'static str,
        /// Parsed value.
        value: u64,
    },
    /// No key matched; comments and blank lines end up here.
    Unrecognized,
}

/// Whitespace as understood by C `isspace` in the "C" locale.
const fn is_c_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Parses an unsigned integer the way `strtoul(text, NULL, 0)` does.
///
/// Leading whitespace and one sign are skipped, the base is detected from
/// the prefix, and the longest run of valid digits is consumed. No digits
/// yields 0, overflow saturates to `u64::MAX`, and a leading `-` negates
/// the result modulo 2^64.
#[must_use]
pub fn parse_unsigned(text: &[u8]) -> u64 {
    let start = text.iter().position(|&b| !is_c_space(b)).unwrap_or(text.len());
    let mut rest = &text[start..];

    let negative = match rest.first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let (radix, digits) = match rest {
        [b'0', b'x' | b'X', next, ..] if next.is_ascii_hexdigit() => (16, &rest[2..]),
        [b'0', ..] => (8, rest),
        _ => (10, rest),
    };

    let mut value: u64 = 0;
    let mut overflowed = false;
    for &byte in digits {
        let Some(digit) = char::from(byte).to_digit(radix) else {
            break;
        };
        match value
            .checked_mul(u64::from(radix))
            .and_then(|v| v.checked_add(u64::from(digit)))
        {
            Some(next) => value = next,
            None => overflowed = true,
        }
    }

    if overflowed {
        u64::MAX
    } else if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

/// Finds the first table entry whose key starts `line`.
///
/// The key must be followed by one whitespace byte and at least one more
/// byte. An entry whose key matches without that gap is skipped and the
/// scan continues.
#[must_use]
pub fn match_key<'t>(table: &'t [BoundSetting], line: &[u8]) -> Option<&'t BoundSetting> {
    table.iter().find(|setting| {
        let key = setting.key.as_bytes();
        line.len() > key.len() + 1
            && line[..key.len()].eq_ignore_ascii_case(key)
            && is_c_space(line[key.len()])
    })
}

/// Applies one line to `settings`.
///
/// `line` may carry its trailing newline; it counts as the byte that
/// must follow the key's whitespace gap.
pub fn apply_line(
    table: &[BoundSetting],
    line: &[u8],
    settings: &mut OperationalSettings,
) -> LineOutcome {
    let Some(setting) = match_key(table, line) else {
        return LineOutcome::Unrecognized;
    };

    let value = parse_unsigned(&line[setting.key.len() + 1..]);
    if !setting.accepts(value) {
        return LineOutcome::Rejected {
            key: setting.key,
            value,
        };
    }

    // accepts() bounds the value by a u32 max, so this cannot truncate.
    let value = u32::try_from(value).unwrap_or(setting.max);
    *settings.slot(setting.field) = value;
    LineOutcome::Applied {
        key: setting.key,
        value,
    }
}
