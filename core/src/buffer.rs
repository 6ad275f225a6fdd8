//! A growable, shiftable byte buffer with a cursor, fed either by an
//! `embedded_io::Read` reader or by explicit chunk pushes.
//!
//! Grounded on the buffer-shifting discipline of a wrapped incremental
//! parser: bytes already consumed are shifted out of the front of the
//! buffer so long-running streams don't grow the buffer without bound,
//! while an offset counter (`n_shifted_out`) keeps byte offsets in error
//! messages meaningful across shifts.

extern crate alloc;

use alloc::vec::Vec;

use crate::error::{Error, ErrorKind, Result};

/// Byte-buffer cursor for the incremental lexer.
#[derive(Debug)]
pub struct Buffer {
    buf: Vec<u8>,
    /// Read cursor into `buf`; bytes before this have been consumed.
    pos: usize,
    /// True once the upstream source (reader or `feed`-caller) is known to
    /// have no more bytes.
    eof: bool,
    /// Number of bytes shifted out of the front of `buf` over the buffer's
    /// lifetime; added to `pos` to report a stable byte offset.
    n_shifted_out: usize,
}

impl Buffer {
    /// Creates an empty buffer with the given initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Buffer {
            buf: Vec::with_capacity(capacity),
            pos: 0,
            eof: false,
            n_shifted_out: 0,
        }
    }

    /// Wraps an already-filled byte slice as a one-shot buffer with no
    /// further refill possible (`finish(bytes)` mode).
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Buffer {
            buf: bytes.to_vec(),
            pos: 0,
            eof: true,
            n_shifted_out: 0,
        }
    }

    /// Appends more bytes fed by the caller (`finish(stream)`-by-chunks
    /// mode, or the push side of a `feed`-driven API).
    pub fn feed(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Reads more bytes from `reader` into the buffer's tail. Returns the
    /// number of bytes read; `0` means the reader is exhausted.
    ///
    /// # Errors
    /// Propagates I/O errors from `reader.read`.
    pub fn read_more<R: embedded_io::Read>(&mut self, reader: &mut R) -> Result<usize> {
        let start = self.buf.len();
        // Grow in `DEFAULT_STREAM_CHUNK_SIZE`-ish steps so `read` has room.
        let want = core::cmp::max(crate::DEFAULT_STREAM_CHUNK_SIZE, self.buf.capacity() - start.min(self.buf.capacity()));
        self.buf.resize(start + want, 0);
        let n = reader
            .read(&mut self.buf[start..])
            .map_err(|_| Error::new(ErrorKind::Io, self.current_offset()))?;
        self.buf.truncate(start + n);
        if n == 0 {
            self.eof = true;
        }
        Ok(n)
    }

    /// Marks the buffer as exhausted: no more bytes will ever arrive.
    pub fn mark_eof(&mut self) {
        self.eof = true;
    }

    /// True once the upstream source is known to be exhausted.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    /// Peeks the next unconsumed byte without advancing the cursor.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Peeks the byte `n` positions ahead of the cursor, `0` being `peek()`.
    #[must_use]
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.buf.get(self.pos + n).copied()
    }

    /// Consumes and returns the next byte, advancing the cursor.
    pub fn next_byte(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    /// Advances the cursor by `n` bytes without inspecting them.
    pub fn advance(&mut self, n: usize) {
        self.pos = core::cmp::min(self.pos + n, self.buf.len());
    }

    /// Stable byte offset of the cursor, accounting for previously shifted
    /// bytes; safe to use in error messages across suspend/resume cycles.
    #[must_use]
    pub fn current_offset(&self) -> usize {
        self.pos + self.n_shifted_out
    }

    /// Drops already-consumed bytes from the front of the buffer, keeping
    /// memory bounded across a long stream. Cheap to call often: it is a
    /// no-op unless there is something to drop.
    pub fn compact(&mut self) {
        if self.pos == 0 {
            return;
        }
        self.buf.drain(0..self.pos);
        self.n_shifted_out += self.pos;
        self.pos = 0;
    }

    /// Skips ASCII whitespace starting at the cursor. Returns `true` if the
    /// cursor now sits on a non-whitespace byte (or `eof` was reached).
    #[must_use]
    pub fn skip_whitespace(&mut self) -> bool {
        while let Some(b) = self.peek() {
            if is_json_whitespace(b) {
                self.pos += 1;
            } else {
                return true;
            }
        }
        self.eof
    }
}

#[must_use]
pub(crate) fn is_json_whitespace(b: u8) -> bool {
    matches!(b, 0x20 | 0x09 | 0x0A | 0x0D)
}
