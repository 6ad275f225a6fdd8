//! Byte sinks and JSON emission primitives.

mod emit;
mod sink;

pub use emit::{
    precompute_key_literal, write_bool, write_escaped_string, write_f64, write_i64,
    write_key_literal, write_null, write_u64,
};
pub use sink::{BufferedStreamSink, FixedBufferSink, GrowableBufferSink, Sink};
