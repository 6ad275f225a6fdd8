//! Generic `Any`-shaped parsing: materializes whatever JSON is found into
//! [`jcodec_core::DynValue`]. Used both for genuine `Any` fields and as the
//! parse-and-discard state `ObjectParse` pushes for unrecognized keys.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use jcodec_core::{DynValue, ErrorKind};
use jcodec_core::{Error, Result};

use crate::dispatch::{ValueDispatch, ValueExpectation};
use crate::driver::ParserState;
use crate::list::ListParse;
use crate::map::MapParse;
use crate::scalar::{ScalarSyntax, ScalarTerminal, ScalarToken};

/// A `ValueDispatch` wired to accept any JSON value and produce a boxed
/// `DynValue`. `strict_duplicates` governs nested object values the same way
/// it governs a declared `Map`/`Object` shape.
#[must_use]
pub fn any_value_state(strict_duplicates: bool) -> Box<dyn ParserState> {
    Box::new(ValueDispatch::new(any_expectation(strict_duplicates)))
}

fn any_expectation(strict_duplicates: bool) -> ValueExpectation {
    ValueExpectation::new("any")
        .with_object(Box::new(move || any_object_state(strict_duplicates)))
        .with_array(Box::new(move || any_array_state(strict_duplicates)))
        .with_string(Box::new(|| {
            Box::new(ScalarTerminal::new(
                ScalarSyntax::String,
                Box::new(|t| match t {
                    ScalarToken::Str(bytes) => {
                        let s = String::from_utf8(bytes)
                            .map_err(|_| Error::new(ErrorKind::MalformedEscape, 0))?;
                        Ok(Box::new(DynValue::String(s)) as Box<dyn Any>)
                    }
                    _ => unreachable!(),
                }),
            ))
        }))
        .with_number(Box::new(|| {
            Box::new(ScalarTerminal::new(
                ScalarSyntax::Number,
                Box::new(|t| match t {
                    ScalarToken::Num { raw, is_float } => {
                        Ok(Box::new(parse_any_number(&raw, is_float)?) as Box<dyn Any>)
                    }
                    _ => unreachable!(),
                }),
            ))
        }))
        .with_bool(
            Box::new(|| {
                Box::new(ScalarTerminal::new(
                    ScalarSyntax::True,
                    Box::new(|_| Ok(Box::new(DynValue::Bool(true)) as Box<dyn Any>)),
                ))
            }),
            Box::new(|| {
                Box::new(ScalarTerminal::new(
                    ScalarSyntax::False,
                    Box::new(|_| Ok(Box::new(DynValue::Bool(false)) as Box<dyn Any>)),
                ))
            }),
        )
        .with_null(Box::new(|| {
            Box::new(ScalarTerminal::new(
                ScalarSyntax::Null,
                Box::new(|_| Ok(Box::new(DynValue::Null) as Box<dyn Any>)),
            ))
        }))
}

fn parse_any_number(raw: &[u8], is_float: bool) -> Result<DynValue> {
    let text = core::str::from_utf8(raw).expect("number scanner only emits ASCII");
    if !is_float {
        if let Ok(n) = text.parse::<i64>() {
            return Ok(DynValue::Integer(n));
        }
    }
    text.parse::<f64>()
        .map(DynValue::Float)
        .map_err(|_| Error::new(ErrorKind::NumberOutOfRange, 0))
}

fn any_object_state(strict_duplicates: bool) -> Box<dyn ParserState> {
    Box::new(MapParse::new(
        Box::new(move || any_value_state(strict_duplicates)),
        Box::new(|v: &dyn Any, key: &[u8]| {
            let DynValue::Object(fields) = v.downcast_ref::<DynValue>().expect("any object value") else {
                unreachable!()
            };
            fields.iter().any(|(k, _)| k.as_bytes() == key)
        }),
        Box::new(|v: &mut dyn Any, key: Vec<u8>, child: Box<dyn Any>| {
            let dynv = *child.downcast::<DynValue>().expect("any child value");
            let key_str = String::from_utf8(key).map_err(|_| Error::new(ErrorKind::MalformedEscape, 0))?;
            let DynValue::Object(fields) = v.downcast_mut::<DynValue>().expect("any object value") else {
                unreachable!()
            };
            match fields.iter_mut().find(|(k, _)| *k == key_str) {
                Some(slot) => slot.1 = dynv,
                None => fields.push((key_str, dynv)),
            }
            Ok(())
        }),
        || Box::new(DynValue::Object(Vec::new())),
        strict_duplicates,
    ))
}

fn any_array_state(strict_duplicates: bool) -> Box<dyn ParserState> {
    Box::new(ListParse::new(
        Box::new(move || any_value_state(strict_duplicates)),
        Box::new(|v: &mut dyn Any, child: Box<dyn Any>| {
            let dynv = *child.downcast::<DynValue>().expect("any element value");
            let DynValue::Array(items) = v.downcast_mut::<DynValue>().expect("any array value") else {
                unreachable!()
            };
            items.push(dynv);
            Ok(())
        }),
        || Box::new(DynValue::Array(Vec::new())),
    ))
}
