//! Low-level JSON emission primitives: escaping, number rendering, and the
//! punctuation every composite writer needs. The tree-shaped walk over a
//! shape's emission plan lives in `jcodec-plan`; this module is the set of
//! primitives it calls into.

extern crate alloc;

use alloc::string::String;
use core::fmt::Write as _;

use jcodec_core::{Error, ErrorKind, Result};

use super::sink::Sink;

/// Writes a JSON string literal (including the surrounding quotes),
/// escaping control characters, `"` and `\` per RFC 8259. `text` is
/// assumed to already be valid UTF-8.
///
/// # Errors
/// Propagates the sink's write failure.
pub fn write_escaped_string(sink: &mut dyn Sink, text: &str) -> Result<()> {
    sink.write_byte(b'"')?;
    for b in text.bytes() {
        match b {
            b'"' => sink.write_bytes(b"\\\"")?,
            b'\\' => sink.write_bytes(b"\\\\")?,
            0x08 => sink.write_bytes(b"\\b")?,
            0x0C => sink.write_bytes(b"\\f")?,
            b'\n' => sink.write_bytes(b"\\n")?,
            b'\r' => sink.write_bytes(b"\\r")?,
            b'\t' => sink.write_bytes(b"\\t")?,
            0x00..=0x1F => {
                let mut tmp = [0u8; 6];
                let hex = format_u16_hex(u16::from(b), &mut tmp);
                sink.write_bytes(hex)?;
            }
            _ => sink.write_byte(b)?,
        }
    }
    sink.write_byte(b'"')
}

fn format_u16_hex(value: u16, out: &mut [u8; 6]) -> &[u8] {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    out[0] = b'\\';
    out[1] = b'u';
    out[2] = HEX[((value >> 12) & 0xF) as usize];
    out[3] = HEX[((value >> 8) & 0xF) as usize];
    out[4] = HEX[((value >> 4) & 0xF) as usize];
    out[5] = HEX[(value & 0xF) as usize];
    &out[..]
}

/// Writes a precomputed, already-escaped-and-quoted key literal verbatim.
///
/// # Errors
/// Propagates the sink's write failure.
pub fn write_key_literal(sink: &mut dyn Sink, literal: &[u8]) -> Result<()> {
    sink.write_bytes(literal)
}

/// Precomputes the escaped, quoted byte sequence for an object key, done
/// once at plan-build time rather than on every write.
#[must_use]
pub fn precompute_key_literal(name: &str) -> alloc::vec::Vec<u8> {
    let mut buf = GrowableInMemory(alloc::vec::Vec::with_capacity(name.len() + 2));
    write_escaped_string(&mut buf, name).expect("writing to an in-memory Vec never fails");
    buf.0
}

struct GrowableInMemory(alloc::vec::Vec<u8>);
impl Sink for GrowableInMemory {
    fn write_byte(&mut self, b: u8) -> Result<()> {
        self.0.push(b);
        Ok(())
    }
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.0.extend_from_slice(bytes);
        Ok(())
    }
}

/// Writes a signed integer in plain decimal.
///
/// # Errors
/// Propagates the sink's write failure.
pub fn write_i64(sink: &mut dyn Sink, n: i64) -> Result<()> {
    let mut s = String::new();
    write!(s, "{n}").expect("formatting an integer never fails");
    sink.write_bytes(s.as_bytes())
}

/// Writes an unsigned integer in plain decimal.
///
/// # Errors
/// Propagates the sink's write failure.
pub fn write_u64(sink: &mut dyn Sink, n: u64) -> Result<()> {
    let mut s = String::new();
    write!(s, "{n}").expect("formatting an integer never fails");
    sink.write_bytes(s.as_bytes())
}

/// Writes a floating-point value using Rust's shortest round-trip decimal
/// `Display` rendering (always integral-looking floats get a trailing
/// `.0` so the wire form is never ambiguous with a JSON integer).
///
/// # Errors
/// `NonFiniteNumber` for `NaN`/`±∞`; otherwise the sink's write failure.
pub fn write_f64(sink: &mut dyn Sink, n: f64) -> Result<()> {
    if !n.is_finite() {
        return Err(Error::new(ErrorKind::NonFiniteNumber, 0));
    }
    let mut s = String::new();
    write!(s, "{n}").expect("formatting a float never fails");
    if !s.as_bytes().iter().any(|&b| b == b'.' || b == b'e' || b == b'E') {
        s.push_str(".0");
    }
    sink.write_bytes(s.as_bytes())
}

/// Writes `true`/`false`.
///
/// # Errors
/// Propagates the sink's write failure.
pub fn write_bool(sink: &mut dyn Sink, b: bool) -> Result<()> {
    sink.write_bytes(if b { b"true" } else { b"false" })
}

/// Writes the `null` literal.
///
/// # Errors
/// Propagates the sink's write failure.
pub fn write_null(sink: &mut dyn Sink) -> Result<()> {
    sink.write_bytes(b"null")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::sink::GrowableBufferSink;

    #[test]
    fn escapes_control_characters() {
        let mut sink = GrowableBufferSink::with_capacity(16);
        write_escaped_string(&mut sink, "a\nb\u{1}c").unwrap();
        assert_eq!(sink.into_bytes(), br#""a\nb\u0001c""#);
    }

    #[test]
    fn float_keeps_trailing_dot_zero() {
        let mut sink = GrowableBufferSink::with_capacity(16);
        write_f64(&mut sink, 1.0).unwrap();
        assert_eq!(sink.into_bytes(), b"1.0");
    }

    #[test]
    fn non_finite_float_fails() {
        let mut sink = GrowableBufferSink::with_capacity(16);
        assert!(write_f64(&mut sink, f64::NAN).is_err());
    }

    #[test]
    fn precomputed_key_literal_matches_inline() {
        assert_eq!(precompute_key_literal("name"), br#""name""#.to_vec());
    }
}
