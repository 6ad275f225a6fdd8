//! A built, cacheable writer plan for one shape: an emission closure plus
//! the convenience entry points over buffers/streams.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;

use jcodec_core::Result;
use jcodec_states::writer::{BufferedStreamSink, FixedBufferSink, GrowableBufferSink, Sink};

use crate::options::PlanOptions;

pub(crate) type WriteFn = Arc<dyn Fn(&dyn Any, &mut dyn Sink) -> Result<()> + Send + Sync>;

/// A compiled writer for one canonical type key. Immutable after
/// construction; safe to share and invoke concurrently since it carries
/// no mutable state of its own -- every call operates on its own sink.
pub struct WriterPlan {
    type_key: String,
    write_fn: WriteFn,
}

impl core::fmt::Debug for WriterPlan {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WriterPlan").field("type_key", &self.type_key).finish_non_exhaustive()
    }
}

impl WriterPlan {
    pub(crate) fn new(type_key: String, write_fn: WriteFn) -> Self {
        WriterPlan { type_key, write_fn }
    }

    #[must_use]
    pub fn type_key(&self) -> &str {
        &self.type_key
    }

    /// Writes directly into an arbitrary sink.
    ///
    /// # Errors
    /// `NonFiniteNumber` for a `NaN`/`±∞` float, or the sink's own failure.
    pub fn write_to(&self, value: &dyn Any, sink: &mut dyn Sink) -> Result<()> {
        (self.write_fn)(value, sink)
    }

    /// Writes into a caller-supplied fixed buffer, failing if it overflows.
    ///
    /// # Errors
    /// Same as [`Self::write_to`], plus an `Io` error on overflow.
    pub fn write_into_slice(&self, value: &dyn Any, out: &mut [u8]) -> Result<usize> {
        let mut sink = FixedBufferSink::new(out);
        self.write_to(value, &mut sink)?;
        Ok(sink.written().len())
    }

    /// Writes into a freshly allocated, growable buffer.
    ///
    /// # Errors
    /// Same as [`Self::write_to`].
    pub fn write_bytes(&self, value: &dyn Any, options: &PlanOptions) -> Result<Vec<u8>> {
        let mut sink = GrowableBufferSink::with_capacity(options.initial_output_capacity);
        self.write_to(value, &mut sink)?;
        Ok(sink.into_bytes())
    }

    /// Writes UTF-8 output as a `String`; the writer only ever emits
    /// valid UTF-8, so this cannot fail on encoding grounds.
    ///
    /// # Errors
    /// Same as [`Self::write_to`].
    pub fn write_string(&self, value: &dyn Any, options: &PlanOptions) -> Result<String> {
        let bytes = self.write_bytes(value, options)?;
        Ok(String::from_utf8(bytes).expect("writer only ever emits valid UTF-8"))
    }

    /// Writes through a buffered stream sink into `writer`.
    ///
    /// # Errors
    /// Same as [`Self::write_to`], plus I/O errors from `writer`.
    pub fn write_stream<W: embedded_io::Write>(
        &self,
        value: &dyn Any,
        writer: &mut W,
        options: &PlanOptions,
    ) -> Result<()> {
        let mut sink = BufferedStreamSink::new(writer, options.initial_output_capacity);
        self.write_to(value, &mut sink)?;
        sink.flush()
    }
}
