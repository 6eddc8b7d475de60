// ABOUTME: Big integer codec shared by every key family.
// ABOUTME: Legacy hex field parsing/formatting and SSH string/mpint wire encoding.

use crate::error::{ConvertError, Result};
use num_bigint::BigUint;
use num_traits::{Num, Zero};

/// Parse a `0x`-prefixed hexadecimal legacy field.
///
/// Surrounding whitespace is ignored and digits may be of either case.
pub fn parse_hex_field(field: &str) -> Result<BigUint> {
    let trimmed = field.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| ConvertError::IntegerDecode {
            field: field.to_string(),
            source: None,
        })?;

    // from_str_radix tolerates '_' and '+', which never appear in a legacy field
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConvertError::IntegerDecode {
            field: field.to_string(),
            source: None,
        });
    }

    BigUint::from_str_radix(digits, 16).map_err(|e| ConvertError::IntegerDecode {
        field: field.to_string(),
        source: Some(e),
    })
}

/// Format an integer as a legacy field: `0x` followed by minimal lowercase hex.
pub fn format_hex_field(n: &BigUint) -> String {
    format!("{:#x}", n)
}

/// Minimal big-endian mpint body for a non-negative integer.
///
/// A zero byte is prepended when the top bit of the first byte is set, so the
/// value is never read back as negative. Zero encodes as an empty string.
pub fn mpint_bytes(n: &BigUint) -> Vec<u8> {
    if n.is_zero() {
        return Vec::new();
    }
    let bytes = n.to_bytes_be();
    if bytes[0] & 0x80 != 0 {
        let mut padded = Vec::with_capacity(bytes.len() + 1);
        padded.push(0);
        padded.extend_from_slice(&bytes);
        padded
    } else {
        bytes
    }
}

/// Read an mpint body back as a non-negative integer.
///
/// Negative mpints (top bit set without a leading zero) are rejected.
pub fn biguint_from_mpint(field: &'static str, bytes: &[u8]) -> Result<BigUint> {
    if bytes.first().is_some_and(|b| b & 0x80 != 0) {
        return Err(ConvertError::FieldRange {
            field,
            bits: bytes.len() * 8 - 1,
        });
    }
    Ok(BigUint::from_bytes_be(bytes))
}

/// Big-endian bytes left-padded with zeros to exactly `width` bytes.
pub fn fixed_width_be(field: &'static str, n: &BigUint, width: usize) -> Result<Vec<u8>> {
    let bytes = n.to_bytes_be();
    let bytes: &[u8] = if n.is_zero() { &[] } else { &bytes };
    if bytes.len() > width {
        return Err(ConvertError::FieldRange {
            field,
            bits: width * 8,
        });
    }
    let mut out = vec![0u8; width - bytes.len()];
    out.extend_from_slice(bytes);
    Ok(out)
}

/// SSH wire encoding helpers for byte buffers.
pub trait SshEncode {
    /// Push a u32 length prefix followed by the bytes.
    fn extend_ssh_string(&mut self, s: &[u8]);
    /// Push an integer in mpint form.
    fn extend_ssh_mpint(&mut self, n: &BigUint);
}

impl SshEncode for Vec<u8> {
    fn extend_ssh_string(&mut self, s: &[u8]) {
        self.extend_from_slice(&(s.len() as u32).to_be_bytes());
        self.extend_from_slice(s);
    }

    fn extend_ssh_mpint(&mut self, n: &BigUint) {
        self.extend_ssh_string(&mpint_bytes(n));
    }
}
