//! The resumable parsing context: a buffer plus the scratch state shared by
//! every scanner and parser state that touches it.
//!
//! `ParserContext` intentionally does not know about object/array nesting —
//! that structure (and its state/value stacks) belongs to `jcodec-states`,
//! one layer up. What lives here is exactly what the lexer needs to survive
//! a suspend/resume cycle: the buffer itself, a reusable token scratchpad,
//! and a nesting-depth counter enforced against a configured maximum.

extern crate alloc;

use alloc::vec::Vec;

use crate::buffer::Buffer;
use crate::error::{Error, ErrorKind, Result};
use crate::DEFAULT_MAX_DEPTH;

/// Everything the lexer needs to resume mid-token across buffer refills.
#[derive(Debug)]
pub struct ParserContext {
    buffer: Buffer,
    /// Scratch accumulator for the scalar currently being scanned. Cleared
    /// by the caller (a parser state) once the scalar is materialized.
    token: Vec<u8>,
    max_depth: usize,
    depth: usize,
    /// Set when the last `advance` call ran out of input mid-token; a
    /// driver checks this to decide whether to request more bytes or to
    /// treat the parse as genuinely finished.
    suspended: bool,
}

impl ParserContext {
    /// Builds a context around a buffer that will never receive another
    /// byte once exhausted (`finish(bytes)` mode).
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        ParserContext {
            buffer: Buffer::from_slice(bytes),
            token: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
            suspended: false,
        }
    }

    /// Builds a context around an initially empty buffer, to be filled via
    /// [`ParserContext::feed`] or [`ParserContext::read_more`].
    #[must_use]
    pub fn streaming(capacity: usize) -> Self {
        ParserContext {
            buffer: Buffer::with_capacity(capacity),
            token: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
            suspended: false,
        }
    }

    /// Overrides the default maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    /// Appends more input bytes (push-mode refill).
    pub fn feed(&mut self, chunk: &[u8]) {
        self.buffer.feed(chunk);
    }

    /// Pulls more input from `reader` (pull-mode refill). Returns the
    /// number of bytes read; `0` means the reader is exhausted.
    ///
    /// # Errors
    /// Propagates I/O errors from the reader.
    pub fn read_more<R: embedded_io::Read>(&mut self, reader: &mut R) -> Result<usize> {
        self.buffer.read_more(reader)
    }

    /// Signals that no more bytes will ever arrive.
    pub fn mark_eof(&mut self) {
        self.buffer.mark_eof();
    }

    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn set_suspended(&mut self, suspended: bool) {
        self.suspended = suspended;
    }

    /// The scalar scratch accumulator. Parser states read from it after a
    /// scanner finishes and are responsible for calling
    /// [`ParserContext::clear_token`] before starting the next scalar.
    #[must_use]
    pub fn token(&self) -> &[u8] {
        &self.token
    }

    pub fn token_mut(&mut self) -> &mut Vec<u8> {
        &mut self.token
    }

    pub fn clear_token(&mut self) {
        self.token.clear();
    }

    /// Takes the nesting depth counter one level deeper, failing if this
    /// would exceed the configured maximum.
    ///
    /// # Errors
    /// `UnexpectedToken` (the stack guard's error kind) if `depth + 1`
    /// would exceed `max_depth`.
    pub fn enter_nesting(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(Error::new(ErrorKind::UnexpectedToken, self.buffer.current_offset()));
        }
        self.depth += 1;
        Ok(())
    }

    /// Returns one nesting level, mirroring [`ParserContext::enter_nesting`].
    pub fn exit_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Drops already-consumed bytes from the front of the buffer. Cheap to
    /// call often between top-level values in a stream.
    pub fn compact(&mut self) {
        self.buffer.compact();
    }
}
