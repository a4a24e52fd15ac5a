// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive codecs and the registry that maps type names to them.
//!
//! # Wire format
//!
//! ```text
//! int     := hex{8}                 big-endian u32
//! string  := int(len) byte{len}     byte := hex{2}, ASCII only
//! ```
//!
//! The registry is an explicit value handed to the decoder and encoder. It is
//! filled at construction and read-only afterwards, so one registry can be
//! shared by any number of concurrent decode/encode calls.

use crate::config::{HexCase, BYTE_HEX_WIDTH, INT_HEX_WIDTH};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// Type name of the built-in integer codec.
pub const INT: &str = "int";
/// Type name of the built-in string codec.
pub const STRING: &str = "string";

const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";
const LOWER_DIGITS: &[u8; 16] = b"0123456789abcdef";

// ---------------------------------------------------------------------------
// HexCursor
// ---------------------------------------------------------------------------

/// Read position in a hex stream, counted in hex characters.
///
/// One cursor belongs to exactly one in-flight decode.
#[derive(Debug)]
pub struct HexCursor<'a> {
    hex: &'a [u8],
    offset: usize,
}

impl<'a> HexCursor<'a> {
    /// Create a cursor at the start of `hex`.
    pub fn new(hex: &'a str) -> Self {
        Self {
            hex: hex.as_bytes(),
            offset: 0,
        }
    }

    /// Current offset in hex characters.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Hex characters left to read.
    pub fn remaining(&self) -> usize {
        self.hex.len().saturating_sub(self.offset)
    }

    /// True once every character has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.hex.len()
    }

    /// Fail unless `count` characters remain. Nothing is consumed.
    pub fn require(&self, count: usize) -> Result<()> {
        if count > self.remaining() {
            return Err(Error::UnexpectedEndOfStream {
                offset: self.offset,
                need: count,
                have: self.remaining(),
            });
        }
        Ok(())
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        self.require(count)?;
        let slice = &self.hex[self.offset..self.offset + count];
        self.offset += count;
        Ok(slice)
    }

    /// Read an 8-character big-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32> {
        let start = self.offset;
        let digits = self.take(INT_HEX_WIDTH)?;
        let mut value = 0u32;
        for (i, &c) in digits.iter().enumerate() {
            value = (value << 4) | u32::from(nibble(c, start + i)?);
        }
        Ok(value)
    }

    /// Read one 2-character byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        let start = self.offset;
        let digits = self.take(BYTE_HEX_WIDTH)?;
        let hi = nibble(digits[0], start)?;
        let lo = nibble(digits[1], start + 1)?;
        Ok((hi << 4) | lo)
    }
}

fn nibble(c: u8, offset: usize) -> Result<u8> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(Error::MalformedHex {
            offset,
            reason: format!("{:?} is not a hex digit", char::from(c)),
        }),
    }
}

/// Append `value` as 8 hex digits.
pub fn write_u32(out: &mut String, value: u32, case: HexCase) {
    let digits = digits_for(case);
    for shift in (0..INT_HEX_WIDTH).rev() {
        let n = (value >> (shift * 4)) & 0xF;
        out.push(char::from(digits[n as usize]));
    }
}

/// Append `byte` as exactly 2 hex digits.
pub fn write_byte(out: &mut String, byte: u8, case: HexCase) {
    let digits = digits_for(case);
    out.push(char::from(digits[usize::from(byte >> 4)]));
    out.push(char::from(digits[usize::from(byte & 0xF)]));
}

fn digits_for(case: HexCase) -> &'static [u8; 16] {
    match case {
        HexCase::Upper => UPPER_DIGITS,
        HexCase::Lower => LOWER_DIGITS,
    }
}

// ---------------------------------------------------------------------------
// PrimitiveCodec
// ---------------------------------------------------------------------------

/// Stateless reader/writer for one primitive type.
///
/// Values travel as text: `int` values are decimal strings, `string` values
/// are the string itself.
pub trait PrimitiveCodec: Send + Sync {
    /// Read one value at the cursor, advancing it past everything consumed.
    fn decode(&self, cursor: &mut HexCursor<'_>) -> Result<String>;

    /// Append the hex form of `value` to `out`.
    fn encode(&self, value: &str, case: HexCase, out: &mut String) -> Result<()>;
}

/// Fixed-width unsigned 32-bit integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntCodec;

impl IntCodec {
    /// Parse a decimal `u32`. Only ASCII digits are accepted.
    pub fn parse(value: &str) -> Result<u32> {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::out_of_range(INT, value));
        }
        value
            .parse::<u32>()
            .map_err(|_| Error::out_of_range(INT, value))
    }
}

impl PrimitiveCodec for IntCodec {
    fn decode(&self, cursor: &mut HexCursor<'_>) -> Result<String> {
        Ok(cursor.read_u32()?.to_string())
    }

    fn encode(&self, value: &str, case: HexCase, out: &mut String) -> Result<()> {
        let v = Self::parse(value)?;
        write_u32(out, v, case);
        Ok(())
    }
}

/// Length-prefixed ASCII string.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl PrimitiveCodec for StringCodec {
    fn decode(&self, cursor: &mut HexCursor<'_>) -> Result<String> {
        let len = cursor.read_u32()? as usize;
        let need = len.checked_mul(BYTE_HEX_WIDTH).ok_or(Error::UnexpectedEndOfStream {
            offset: cursor.position(),
            need: usize::MAX,
            have: cursor.remaining(),
        })?;
        // Check the whole body before reading any of it.
        cursor.require(need)?;

        let mut s = String::with_capacity(len);
        for _ in 0..len {
            let offset = cursor.position();
            let byte = cursor.read_byte()?;
            if !byte.is_ascii() {
                return Err(Error::MalformedHex {
                    offset,
                    reason: format!("byte 0x{:02X} is not ASCII", byte),
                });
            }
            s.push(char::from(byte));
        }
        Ok(s)
    }

    fn encode(&self, value: &str, case: HexCase, out: &mut String) -> Result<()> {
        if !value.is_ascii() {
            return Err(Error::out_of_range(STRING, value));
        }
        let len = u32::try_from(value.len()).map_err(|_| {
            Error::out_of_range(STRING, format!("<{} bytes>", value.len()))
        })?;
        write_u32(out, len, case);
        for byte in value.bytes() {
            write_byte(out, byte, case);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PrimitiveRegistry
// ---------------------------------------------------------------------------

/// Type name -> codec map.
#[derive(Default)]
pub struct PrimitiveRegistry {
    codecs: HashMap<String, Box<dyn PrimitiveCodec>>,
}

impl PrimitiveRegistry {
    /// Registry with no codecs.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the built-in `int` and `string` codecs.
    pub fn builtin() -> Self {
        Self::empty()
            .with_codec(INT, IntCodec)
            .with_codec(STRING, StringCodec)
    }

    /// Add (or replace) a codec. Construction-time only.
    pub fn with_codec(
        mut self,
        name: impl Into<String>,
        codec: impl PrimitiveCodec + 'static,
    ) -> Self {
        self.codecs.insert(name.into(), Box::new(codec));
        self
    }

    /// Look up a codec by type name.
    pub fn lookup(&self, name: &str) -> Option<&dyn PrimitiveCodec> {
        self.codecs.get(name).map(|c| c.as_ref())
    }

    /// True if `name` is a primitive type.
    pub fn contains(&self, name: &str) -> bool {
        self.codecs.contains_key(name)
    }

    /// Registered type names (sorted for determinism).
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.codecs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered codecs.
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Returns `true` if no codecs are registered.
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl fmt::Debug for PrimitiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimitiveRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_with(codec: &dyn PrimitiveCodec, value: &str) -> Result<String> {
        let mut out = String::new();
        codec.encode(value, HexCase::Upper, &mut out)?;
        Ok(out)
    }

    #[test]
    fn test_int_decode_big_endian() {
        let mut cursor = HexCursor::new("0000000A");
        assert_eq!(IntCodec.decode(&mut cursor).unwrap(), "10");
        assert_eq!(cursor.position(), 8);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_int_decode_accepts_lowercase() {
        let mut cursor = HexCursor::new("deadBEEF");
        assert_eq!(IntCodec.decode(&mut cursor).unwrap(), "3735928559");
    }

    #[test]
    fn test_int_decode_short_stream() {
        let mut cursor = HexCursor::new("00001");
        let err = IntCodec.decode(&mut cursor).unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedEndOfStream {
                offset: 0,
                need: 8,
                have: 5
            }
        );
    }

    #[test]
    fn test_int_decode_rejects_non_hex() {
        let mut cursor = HexCursor::new("0000G001");
        match IntCodec.decode(&mut cursor).unwrap_err() {
            Error::MalformedHex { offset, .. } => assert_eq!(offset, 4),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_int_encode_bounds() {
        assert_eq!(encode_with(&IntCodec, "0").unwrap(), "00000000");
        assert_eq!(encode_with(&IntCodec, "4294967295").unwrap(), "FFFFFFFF");
        assert!(matches!(
            encode_with(&IntCodec, "4294967296"),
            Err(Error::ValueOutOfRange { .. })
        ));
        assert!(matches!(
            encode_with(&IntCodec, "-1"),
            Err(Error::ValueOutOfRange { .. })
        ));
        assert!(matches!(
            encode_with(&IntCodec, ""),
            Err(Error::ValueOutOfRange { .. })
        ));
        assert!(matches!(
            encode_with(&IntCodec, "+7"),
            Err(Error::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn test_int_encode_lowercase() {
        let mut out = String::new();
        IntCodec.encode("48879", HexCase::Lower, &mut out).unwrap();
        assert_eq!(out, "0000beef");
    }

    #[test]
    fn test_string_decode() {
        let mut cursor = HexCursor::new("00000002416C");
        assert_eq!(StringCodec.decode(&mut cursor).unwrap(), "Al");
        assert_eq!(cursor.position(), 12);
    }

    #[test]
    fn test_string_decode_empty() {
        let mut cursor = HexCursor::new("00000000");
        assert_eq!(StringCodec.decode(&mut cursor).unwrap(), "");
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_string_decode_overlong_length_does_not_consume() {
        let mut cursor = HexCursor::new("00000005414243");
        let err = StringCodec.decode(&mut cursor).unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedEndOfStream {
                offset: 8,
                need: 10,
                have: 6
            }
        );
        // Only the length prefix was read.
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_string_decode_rejects_non_ascii() {
        let mut cursor = HexCursor::new("00000001C3");
        assert!(matches!(
            StringCodec.decode(&mut cursor),
            Err(Error::MalformedHex { offset: 8, .. })
        ));
    }

    #[test]
    fn test_string_encode_pads_small_bytes() {
        // '\n' is 0x0A and must take two digits.
        assert_eq!(encode_with(&StringCodec, "a\n").unwrap(), "00000002610A");
    }

    #[test]
    fn test_string_encode_rejects_non_ascii() {
        assert!(matches!(
            encode_with(&StringCodec, "caf\u{e9}"),
            Err(Error::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn test_registry_builtin() {
        let registry = PrimitiveRegistry::builtin();
        assert_eq!(registry.names(), vec!["int", "string"]);
        assert!(registry.contains("int"));
        assert!(!registry.contains("Point"));
        assert!(registry.lookup("string").is_some());
        assert!(registry.lookup("float").is_none());
    }

    #[test]
    fn test_registry_custom_codec() {
        #[derive(Debug)]
        struct ByteCodec;

        impl PrimitiveCodec for ByteCodec {
            fn decode(&self, cursor: &mut HexCursor<'_>) -> Result<String> {
                Ok(cursor.read_byte()?.to_string())
            }

            fn encode(&self, value: &str, case: HexCase, out: &mut String) -> Result<()> {
                let b: u8 = value
                    .parse()
                    .map_err(|_| Error::out_of_range("byte", value))?;
                write_byte(out, b, case);
                Ok(())
            }
        }

        let registry = PrimitiveRegistry::builtin().with_codec("byte", ByteCodec);
        assert_eq!(registry.len(), 3);
        let codec = registry.lookup("byte").unwrap();
        let mut cursor = HexCursor::new("FF");
        assert_eq!(codec.decode(&mut cursor).unwrap(), "255");
    }
}
