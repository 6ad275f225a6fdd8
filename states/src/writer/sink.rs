//! Byte sink abstraction: the three destinations a writer plan can target.

extern crate alloc;

use alloc::vec::Vec;

use jcodec_core::{Error, ErrorKind, Result};

/// A byte-accepting output capability with flush, matching the design's
/// "write-byte, write-bytes, flush" minimal capability.
pub trait Sink {
    /// # Errors
    /// Implementation-specific (capacity exceeded, or the underlying I/O
    /// failing).
    fn write_byte(&mut self, b: u8) -> Result<()>;

    /// # Errors
    /// Same as [`Sink::write_byte`].
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        for &b in bytes {
            self.write_byte(b)?;
        }
        Ok(())
    }

    /// # Errors
    /// Propagates the underlying destination's flush failure, if any.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes into a caller-provided fixed-size buffer; fails once it's full
/// rather than growing.
pub struct FixedBufferSink<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> FixedBufferSink<'a> {
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        FixedBufferSink { buf, len: 0 }
    }

    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Sink for FixedBufferSink<'_> {
    fn write_byte(&mut self, b: u8) -> Result<()> {
        if self.len >= self.buf.len() {
            return Err(Error::new(ErrorKind::Io, self.len));
        }
        self.buf[self.len] = b;
        self.len += 1;
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if self.len + bytes.len() > self.buf.len() {
            return Err(Error::new(ErrorKind::Io, self.len));
        }
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        Ok(())
    }
}

/// Writes into an owned, growable buffer that doubles capacity as needed.
pub struct GrowableBufferSink {
    buf: Vec<u8>,
}

impl GrowableBufferSink {
    #[must_use]
    pub fn with_capacity(initial_capacity: usize) -> Self {
        GrowableBufferSink { buf: Vec::with_capacity(initial_capacity) }
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.buf
    }
}

impl Sink for GrowableBufferSink {
    fn write_byte(&mut self, b: u8) -> Result<()> {
        if self.buf.len() == self.buf.capacity() {
            self.buf.reserve(self.buf.capacity().max(64));
        }
        self.buf.push(b);
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.buf.extend_from_slice(bytes);
        Ok(())
    }
}

/// Buffers into a fixed internal capacity, flushing to an `embedded_io::Write`
/// destination whenever it fills (or when asked explicitly).
pub struct BufferedStreamSink<'a, W: embedded_io::Write> {
    writer: &'a mut W,
    buf: Vec<u8>,
    capacity: usize,
}

impl<'a, W: embedded_io::Write> BufferedStreamSink<'a, W> {
    #[must_use]
    pub fn new(writer: &'a mut W, capacity: usize) -> Self {
        BufferedStreamSink {
            writer,
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    fn flush_buffer(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.writer.write_all(&self.buf).map_err(|_| Error::new(ErrorKind::Io, 0))?;
        self.buf.clear();
        Ok(())
    }
}

impl<W: embedded_io::Write> Sink for BufferedStreamSink<'_, W> {
    fn write_byte(&mut self, b: u8) -> Result<()> {
        if self.buf.len() >= self.capacity {
            self.flush_buffer()?;
        }
        self.buf.push(b);
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        for &b in bytes {
            self.write_byte(b)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flush_buffer()?;
        self.writer.flush().map_err(|_| Error::new(ErrorKind::Io, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_buffer_fails_on_overflow() {
        let mut storage = [0u8; 2];
        let mut sink = FixedBufferSink::new(&mut storage);
        sink.write_bytes(b"ab").unwrap();
        assert!(sink.write_byte(b'c').is_err());
    }

    #[test]
    fn growable_buffer_collects_bytes() {
        let mut sink = GrowableBufferSink::with_capacity(1);
        sink.write_bytes(b"hello").unwrap();
        assert_eq!(sink.into_bytes(), b"hello");
    }
}
