//! Reusable parser state-machine nodes and the JSON writer engine.
//!
//! This crate knows nothing about any particular target shape — it is the
//! generic "interpreter" half of the codec. `jcodec-plan` is the layer that
//! looks at a `Shape` and wires up `ValueDispatch`/`ObjectParse`/etc nodes
//! with the right child builders, setters and scalar converters for that
//! specific type. Values flowing through here are type-erased behind
//! `Box<dyn Any>`; only `jcodec-plan`'s closures know the concrete types.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod any_value;
pub mod dispatch;
pub mod driver;
pub mod key_match;
pub mod list;
pub mod map;
pub mod object;
pub mod scalar;
pub mod writer;

pub use any_value::any_value_state;
pub use dispatch::{ValueDispatch, ValueExpectation};
pub use driver::{parse_complete, parse_stream, Advance, Driver, ParserState};
pub use key_match::KeyMatch;
pub use list::ListParse;
pub use map::MapParse;
pub use object::{Field, ObjectParse};
pub use scalar::{NullSentinel, ScalarSyntax, ScalarTerminal, ScalarToken};
pub use writer::{BufferedStreamSink, FixedBufferSink, GrowableBufferSink, Sink};
