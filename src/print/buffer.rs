//! Saturating bounded text accumulator.
//!
//! [`SatWriter`] is the primitive every other printing component writes
//! through. It keeps the classic `snprintf` contract:
//!
//! - at most `capacity - 1` content bytes are physically written, and the
//!   buffer stays NUL-terminated whenever capacity is non-zero;
//! - the logical length keeps growing past the capacity, so a sequence of
//!   appends reports the same total as formatting into an unbounded buffer;
//! - an empty buffer is a legal length-only dry run, letting callers size
//!   an allocation with one measuring pass.
//!
//! Truncation can split a multi-byte UTF-8 sequence at the boundary; the
//! printer only ever emits ASCII, so the written prefix stays valid text.

use std::fmt;

/// Bounded accumulator over a caller-owned byte buffer.
pub struct SatWriter<'a> {
    buf: &'a mut [u8],
    used: usize,
}

impl<'a> SatWriter<'a> {
    /// Wrap a caller-supplied buffer. An empty slice performs a dry run.
    pub fn new(buf: &'a mut [u8]) -> Self {
        let mut w = SatWriter { buf, used: 0 };
        w.terminate();
        w
    }

    /// Logical length accumulated so far, independent of capacity.
    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    /// Whether the logical length has exceeded what the buffer can hold.
    #[inline]
    pub fn truncated(&self) -> bool {
        self.used >= self.buf.len()
    }

    /// Append raw bytes, saturating at the capacity.
    pub fn push_bytes(&mut self, s: &[u8]) {
        let cap = self.buf.len();
        if cap > 0 {
            // Last byte is reserved for the NUL terminator.
            let limit = cap - 1;
            if self.used < limit {
                let n = (limit - self.used).min(s.len());
                self.buf[self.used..self.used + n].copy_from_slice(&s[..n]);
            }
        }
        self.used += s.len();
        self.terminate();
    }

    /// Append a single byte, saturating at the capacity.
    #[inline]
    pub fn push_byte(&mut self, b: u8) {
        self.push_bytes(&[b]);
    }

    /// Append formatted text, saturating at the capacity.
    ///
    /// Inherent so that `write!(out, ...)` is infallible at call sites: the
    /// writer cannot fail, it can only stop copying.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        struct Adapter<'w, 'b>(&'w mut SatWriter<'b>);

        impl fmt::Write for Adapter<'_, '_> {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                self.0.push_bytes(s.as_bytes());
                Ok(())
            }
        }

        let _ = fmt::Write::write_fmt(&mut Adapter(self), args);
    }

    fn terminate(&mut self) {
        let cap = self.buf.len();
        if cap > 0 {
            self.buf[self.used.min(cap - 1)] = 0;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
