//! A built, cacheable parser plan for one shape: a factory for fresh root
//! parser states plus the convenience entry points over bytes/streams.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use core::any::Any;

use jcodec_core::{Error, ErrorKind, ParserContext, Result};
use jcodec_states::driver::{parse_complete, parse_stream, Driver, ParserState};

use crate::options::PlanOptions;

pub(crate) type Ctor = Box<dyn Fn() -> Box<dyn ParserState> + Send + Sync>;

/// A compiled parser for one canonical type key. Immutable after
/// construction; safe to share across threads and reused for every parse
/// of that shape (each parse gets its own fresh state tree via
/// `root_ctor`, so concurrent parses of the same plan don't interfere).
pub struct ParserPlan {
    type_key: String,
    root_ctor: Ctor,
}

impl core::fmt::Debug for ParserPlan {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParserPlan").field("type_key", &self.type_key).finish_non_exhaustive()
    }
}

impl ParserPlan {
    pub(crate) fn new(type_key: String, root_ctor: Ctor) -> Self {
        ParserPlan { type_key, root_ctor }
    }

    #[must_use]
    pub fn type_key(&self) -> &str {
        &self.type_key
    }

    /// Parses a complete, already-in-memory byte slice.
    ///
    /// # Errors
    /// Any parse failure, or `UnexpectedToken` for trailing bytes when
    /// `options.strict_trailing` is set.
    pub fn parse_bytes(&self, bytes: &[u8], options: &PlanOptions) -> Result<Box<dyn Any>> {
        parse_complete((self.root_ctor)(), bytes, options.max_nesting_depth, options.strict_trailing)
    }

    /// Parses from a UTF-8 string, a thin wrapper over [`Self::parse_bytes`].
    ///
    /// # Errors
    /// Same as [`Self::parse_bytes`].
    pub fn parse_str(&self, text: &str, options: &PlanOptions) -> Result<Box<dyn Any>> {
        self.parse_bytes(text.as_bytes(), options)
    }

    /// Parses by pulling chunks from `reader`, suspending and resuming the
    /// driver across reads.
    ///
    /// # Errors
    /// Same as [`Self::parse_bytes`], plus I/O errors from `reader`.
    pub fn parse_stream<R: embedded_io::Read>(&self, reader: &mut R, options: &PlanOptions) -> Result<Box<dyn Any>> {
        parse_stream((self.root_ctor)(), reader, options.max_nesting_depth, options.stream_chunk_size)
    }

    /// Parses one value from the front of `bytes`, reporting how many
    /// bytes it consumed and leaving the remainder unexamined. Unlike
    /// [`Self::parse_bytes`], trailing bytes are never an error -- that is
    /// the point, for framed transports that pack multiple values back to
    /// back.
    ///
    /// # Errors
    /// Any parse failure, including an input that ends before the value
    /// completes.
    pub fn parse_prefix(&self, bytes: &[u8], options: &PlanOptions) -> Result<(Box<dyn Any>, usize)> {
        let mut ctx = ParserContext::from_slice(bytes).with_max_depth(options.max_nesting_depth);
        let mut driver = Driver::new((self.root_ctor)());
        driver.drive(&mut ctx)?;
        if !driver.is_complete() {
            return Err(Error::new(ErrorKind::UnexpectedEndOfInput, ctx.buffer().current_offset()));
        }
        Ok((driver.into_result(), ctx.buffer().current_offset()))
    }
}
