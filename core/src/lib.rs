//! The pull-style incremental JSON lexer that the rest of `jcodec` is built on.
//!
//! `jcodec-core` owns the part of the system that has to be resumable
//! mid-token: a byte buffer with refill support, a scalar scratchpad, and
//! the string/number/literal scanners that consume it one byte at a time.
//! It knows nothing about object/array structure or target shapes -- that
//! lives one layer up, in `jcodec-states`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod buffer;
pub mod context;
pub mod error;
pub mod lexer;
pub mod value;

pub use buffer::Buffer;
pub use context::ParserContext;
pub use error::{Error, ErrorKind, Result};
pub use lexer::{Lex, LiteralScan, NumberScan, StringScan};
pub use value::DynValue;

/// Default maximum nesting depth (spec default), used when a caller does
/// not configure one explicitly.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Default chunk size used when driving a `finish(stream)`-style read loop.
pub const DEFAULT_STREAM_CHUNK_SIZE: usize = 4096;
