//! Bounded ASCII escaping.
//!
//! Directory strings come out of untrusted files and are not guaranteed to
//! be printable or even NUL-terminated. The escaper walks at most
//! `max_bytes` input bytes, stopping early at a NUL, and renders:
//!
//! - printable bytes (0x20..=0x7E) unchanged;
//! - tab, backspace, carriage return, newline, and vertical tab as their
//!   two-character backslash escapes;
//! - every other non-printable byte as a three-digit backslash octal
//!   escape, zero-padded (`\001`).

use super::buffer::SatWriter;

/// Escape at most `max_bytes` of `bytes` into the accumulator.
///
/// Stops at the first NUL or at the byte limit, whichever comes first, and
/// never reads past the limit.
pub(crate) fn escape_into(out: &mut SatWriter<'_>, bytes: &[u8], max_bytes: usize) {
    for &b in bytes.iter().take(max_bytes) {
        if b == 0 {
            break;
        }
        if (0x20..=0x7E).contains(&b) {
            out.push_byte(b);
            continue;
        }
        match b {
            b'\t' => out.push_bytes(b"\\t"),
            0x08 => out.push_bytes(b"\\b"),
            b'\r' => out.push_bytes(b"\\r"),
            b'\n' => out.push_bytes(b"\\n"),
            0x0B => out.push_bytes(b"\\v"),
            _ => write!(out, "\\{:03o}", b),
        }
    }
}

/// Escape `value` into `buf`, returning the logical length.
///
/// Bounded companion to the directory printer: callers pass raw string
/// bytes and get back printable text, truncated to the buffer but measured
/// in full.
pub fn print_ascii(buf: &mut [u8], value: &[u8]) -> usize {
    let mut out = SatWriter::new(buf);
    escape_into(&mut out, value, value.len());
    out.used()
}

/// Format a `  name: "escaped value"` line into `buf`, returning the
/// logical length.
pub fn print_ascii_tag(buf: &mut [u8], name: &str, value: &[u8]) -> usize {
    let mut out = SatWriter::new(buf);
    write!(out, "  {}: \"", name);
    escape_into(&mut out, value, value.len());
    out.push_bytes(b"\"\n");
    out.used()
}

// =============================================================================
// Tests
// =============================================================================
