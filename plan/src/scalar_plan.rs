//! Binds a `ScalarKind` to the concrete `ScalarTerminal` construction and
//! `write_*` emission call that produce/consume that kind's native Rust
//! type.
//!
//! Fixed mapping (also the contract `FieldSpec` setters/getters rely on):
//! `Bool -> bool`, `I*/U* -> i8..u64`, `F32/F64 -> f32/f64`, `Char -> char`,
//! `String -> alloc::string::String`.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use core::any::Any;

use jcodec_core::{Error, ErrorKind, Result};
use jcodec_shape::ScalarKind;
use jcodec_states::dispatch::ValueExpectation;
use jcodec_states::scalar::{ScalarSyntax, ScalarTerminal, ScalarToken};
use jcodec_states::writer::{write_bool, write_f64, write_i64, write_u64, Sink};

use crate::parser_plan::Ctor;

/// Wires every branch a `Scalar(kind)` shape accepts into `expectation`.
pub(crate) fn wire_scalar(expectation: ValueExpectation, kind: ScalarKind) -> ValueExpectation {
    match kind {
        ScalarKind::Bool => expectation.with_bool(bool_ctor(true), bool_ctor(false)),
        ScalarKind::String => expectation.with_string(string_ctor()),
        ScalarKind::Char => expectation.with_string(char_ctor()),
        _ if kind.is_integer() => expectation.with_number(integer_ctor(kind)),
        _ => expectation.with_number(float_ctor(kind)),
    }
}

fn bool_ctor(value: bool) -> Ctor {
    Box::new(move || {
        Box::new(ScalarTerminal::new(
            if value { ScalarSyntax::True } else { ScalarSyntax::False },
            Box::new(move |_| Ok(Box::new(value) as Box<dyn Any>)),
        ))
    })
}

fn string_ctor() -> Ctor {
    Box::new(|| {
        Box::new(ScalarTerminal::new(
            ScalarSyntax::String,
            Box::new(|t| match t {
                ScalarToken::Str(bytes) => {
                    let s = String::from_utf8(bytes).map_err(|_| Error::new(ErrorKind::MalformedEscape, 0))?;
                    Ok(Box::new(s) as Box<dyn Any>)
                }
                _ => unreachable!(),
            }),
        ))
    })
}

fn char_ctor() -> Ctor {
    Box::new(|| {
        Box::new(ScalarTerminal::new(
            ScalarSyntax::String,
            Box::new(|t| match t {
                ScalarToken::Str(bytes) => {
                    let s = String::from_utf8(bytes).map_err(|_| Error::new(ErrorKind::MalformedEscape, 0))?;
                    let mut chars = s.chars();
                    let (Some(c), None) = (chars.next(), chars.next()) else {
                        return Err(Error::new(ErrorKind::TypeMismatch { expected: "char" }, 0));
                    };
                    Ok(Box::new(c) as Box<dyn Any>)
                }
                _ => unreachable!(),
            }),
        ))
    })
}

fn integer_ctor(kind: ScalarKind) -> Ctor {
    Box::new(move || {
        Box::new(ScalarTerminal::new(
            ScalarSyntax::Number,
            Box::new(move |t| match t {
                ScalarToken::Num { raw, is_float } => {
                    if is_float {
                        return Err(Error::new(ErrorKind::TypeMismatch { expected: kind.as_key_str() }, 0));
                    }
                    let text = core::str::from_utf8(&raw).expect("number scanner only emits ASCII");
                    let n: i128 = text.parse().map_err(|_| Error::new(ErrorKind::NumberOutOfRange, 0))?;
                    let (min, max) = kind.integer_range().expect("integer kind has a range");
                    if n < min || n > max {
                        return Err(Error::new(ErrorKind::NumberOutOfRange, 0));
                    }
                    Ok(box_integer(kind, n))
                }
                _ => unreachable!(),
            }),
        ))
    })
}

fn box_integer(kind: ScalarKind, n: i128) -> Box<dyn Any> {
    match kind {
        ScalarKind::I8 => Box::new(n as i8),
        ScalarKind::I16 => Box::new(n as i16),
        ScalarKind::I32 => Box::new(n as i32),
        ScalarKind::I64 => Box::new(n as i64),
        ScalarKind::U8 => Box::new(n as u8),
        ScalarKind::U16 => Box::new(n as u16),
        ScalarKind::U32 => Box::new(n as u32),
        ScalarKind::U64 => Box::new(n as u64),
        _ => unreachable!("box_integer only called for integer kinds"),
    }
}

fn float_ctor(kind: ScalarKind) -> Ctor {
    Box::new(move || {
        Box::new(ScalarTerminal::new(
            ScalarSyntax::Number,
            Box::new(move |t| match t {
                ScalarToken::Num { raw, .. } => {
                    let text = core::str::from_utf8(&raw).expect("number scanner only emits ASCII");
                    let n: f64 = text.parse().map_err(|_| Error::new(ErrorKind::NumberOutOfRange, 0))?;
                    match kind {
                        ScalarKind::F32 => {
                            if n.is_finite() && (n as f32).is_infinite() {
                                return Err(Error::new(ErrorKind::NumberOutOfRange, 0));
                            }
                            Ok(Box::new(n as f32) as Box<dyn Any>)
                        }
                        ScalarKind::F64 => {
                            if n.is_infinite() {
                                return Err(Error::new(ErrorKind::NumberOutOfRange, 0));
                            }
                            Ok(Box::new(n) as Box<dyn Any>)
                        }
                        _ => unreachable!("float_ctor only called for float kinds"),
                    }
                }
                _ => unreachable!(),
            }),
        ))
    })
}

/// Writes a boxed scalar value of the given kind. Panics if `value`'s
/// concrete type doesn't match `kind` -- a plan-builder invariant, not a
/// runtime data condition.
///
/// # Errors
/// `NonFiniteNumber` for a `NaN`/`±∞` float, or the sink's own failure.
pub(crate) fn write_scalar(kind: ScalarKind, value: &dyn Any, sink: &mut dyn Sink) -> Result<()> {
    match kind {
        ScalarKind::Bool => write_bool(sink, *value.downcast_ref::<bool>().expect("scalar kind/value mismatch")),
        ScalarKind::I8 => write_i64(sink, i64::from(*value.downcast_ref::<i8>().expect("scalar kind/value mismatch"))),
        ScalarKind::I16 => {
            write_i64(sink, i64::from(*value.downcast_ref::<i16>().expect("scalar kind/value mismatch")))
        }
        ScalarKind::I32 => {
            write_i64(sink, i64::from(*value.downcast_ref::<i32>().expect("scalar kind/value mismatch")))
        }
        ScalarKind::I64 => write_i64(sink, *value.downcast_ref::<i64>().expect("scalar kind/value mismatch")),
        ScalarKind::U8 => write_u64(sink, u64::from(*value.downcast_ref::<u8>().expect("scalar kind/value mismatch"))),
        ScalarKind::U16 => {
            write_u64(sink, u64::from(*value.downcast_ref::<u16>().expect("scalar kind/value mismatch")))
        }
        ScalarKind::U32 => {
            write_u64(sink, u64::from(*value.downcast_ref::<u32>().expect("scalar kind/value mismatch")))
        }
        ScalarKind::U64 => write_u64(sink, *value.downcast_ref::<u64>().expect("scalar kind/value mismatch")),
        ScalarKind::F32 => {
            write_f64(sink, f64::from(*value.downcast_ref::<f32>().expect("scalar kind/value mismatch")))
        }
        ScalarKind::F64 => write_f64(sink, *value.downcast_ref::<f64>().expect("scalar kind/value mismatch")),
        ScalarKind::Char => {
            let c = *value.downcast_ref::<char>().expect("scalar kind/value mismatch");
            let mut buf = [0u8; 4];
            jcodec_states::writer::write_escaped_string(sink, c.encode_utf8(&mut buf))
        }
        ScalarKind::String => {
            let s = value.downcast_ref::<String>().expect("scalar kind/value mismatch");
            jcodec_states::writer::write_escaped_string(sink, s)
        }
    }
}
