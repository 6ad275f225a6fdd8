//! The codec plan builder: walks a `Shape`, memoized by canonical key, and
//! produces a parser-state factory and a writer emission closure.
//!
//! Cycle handling: each node is registered in the memo *before* its
//! children are built, as an empty cell. A child that refers back to an
//! in-progress node finds the cell and wires an indirection through it
//! instead of recursing again; by the time any real parse or write runs,
//! every cell has been filled in.

extern crate alloc;

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;

use parking_lot::RwLock;
use tracing::trace;

use jcodec_core::{DynValue, Error, ErrorKind, Result};
use jcodec_shape::{canonical_key, FieldSpec, GetterRef, ListShape, MapShape, ObjectShape, SetterRef, Shape};
use jcodec_states::dispatch::{ValueDispatch, ValueExpectation};
use jcodec_states::driver::ParserState;
use jcodec_states::key_match::KeyMatch;
use jcodec_states::list::ListParse;
use jcodec_states::map::MapParse;
use jcodec_states::object::{Field, ObjectParse};
use jcodec_states::scalar::{NullSentinel, ScalarSyntax, ScalarTerminal};
use jcodec_states::writer::{
    precompute_key_literal, write_bool, write_escaped_string, write_f64, write_i64, write_key_literal, write_null,
    Sink,
};

use crate::options::PlanOptions;
use crate::parser_plan::{Ctor, ParserPlan};
use crate::scalar_plan::{wire_scalar, write_scalar};
use crate::writer_plan::{WriteFn, WriterPlan};

/// Builds one direction (parser or writer) for one root shape. A fresh
/// builder, and fresh memo, is used per [`build_parser_plan`]/
/// [`build_writer_plan`] call: the two directions produce differently
/// shaped artifacts, so they don't share a memo with each other, but each
/// fully dedups and cycle-breaks within its own direction.
struct PlanBuilder {
    options: PlanOptions,
    parser_memo: BTreeMap<String, Arc<RwLock<Option<Ctor>>>>,
    writer_memo: BTreeMap<String, Arc<RwLock<Option<WriteFn>>>>,
}

/// Builds a complete parser plan for `shape`.
///
/// # Errors
/// `PlanBuildFailure` if `shape` contains a construct the builder cannot
/// compile (e.g. a map whose key isn't string-coercible).
pub fn build_parser_plan(shape: Shape, options: &PlanOptions) -> Result<ParserPlan> {
    let type_key = canonical_key(&shape);
    let mut builder = PlanBuilder {
        options: options.clone(),
        parser_memo: BTreeMap::new(),
        writer_memo: BTreeMap::new(),
    };
    let root_ctor = builder.value_ctor(shape, false)?;
    Ok(ParserPlan::new(type_key, root_ctor))
}

/// Builds a complete writer plan for `shape`.
///
/// # Errors
/// Same as [`build_parser_plan`].
pub fn build_writer_plan(shape: Shape, options: &PlanOptions) -> Result<WriterPlan> {
    let type_key = canonical_key(&shape);
    let mut builder = PlanBuilder {
        options: options.clone(),
        parser_memo: BTreeMap::new(),
        writer_memo: BTreeMap::new(),
    };
    let write_fn = builder.write_fn(shape)?;
    Ok(WriterPlan::new(type_key, write_fn))
}

impl PlanBuilder {
    /// Builds the `ValueDispatch`-wrapped factory for a value position
    /// (field, list element, map value, or root). `allow_null` adds a
    /// `null` branch, the signal an optional field's setter checks for.
    fn value_ctor(&mut self, shape: Shape, allow_null: bool) -> Result<Ctor> {
        let memo_key = memo_key_for(&shape, allow_null);
        if let Some(cell) = self.parser_memo.get(&memo_key) {
            trace!(key = %memo_key, "parser plan node cache hit");
            return Ok(indirect_ctor(cell.clone()));
        }
        trace!(key = %memo_key, "building parser plan node");
        let cell: Arc<RwLock<Option<Ctor>>> = Arc::new(RwLock::new(None));
        self.parser_memo.insert(memo_key, cell.clone());
        let ctor = self.value_ctor_uncached(shape, allow_null)?;
        *cell.write() = Some(ctor);
        Ok(indirect_ctor(cell))
    }

    fn value_ctor_uncached(&mut self, shape: Shape, allow_null: bool) -> Result<Ctor> {
        match shape {
            Shape::Any => {
                let strict_duplicates = self.options.strict_duplicates;
                Ok(Box::new(move || jcodec_states::any_value_state(strict_duplicates)))
            }
            Shape::Scalar(kind) => {
                let label = kind.as_key_str();
                let mut expectation = wire_scalar(ValueExpectation::new(label), kind);
                if allow_null {
                    expectation = expectation.with_null(null_ctor());
                }
                Ok(dispatch_ctor(expectation))
            }
            Shape::List(list) => {
                let list_ctor = self.list_ctor(*list)?;
                let mut expectation = ValueExpectation::new("list").with_array(list_ctor);
                if allow_null {
                    expectation = expectation.with_null(null_ctor());
                }
                Ok(dispatch_ctor(expectation))
            }
            Shape::Map(map) => {
                let map_ctor = self.map_ctor(*map)?;
                let mut expectation = ValueExpectation::new("map").with_object(map_ctor);
                if allow_null {
                    expectation = expectation.with_null(null_ctor());
                }
                Ok(dispatch_ctor(expectation))
            }
            Shape::Object(obj) => {
                let type_name = obj.type_name;
                let object_ctor = self.object_ctor(*obj)?;
                let mut expectation = ValueExpectation::new(type_name).with_object(object_ctor);
                if allow_null {
                    expectation = expectation.with_null(null_ctor());
                }
                Ok(dispatch_ctor(expectation))
            }
            Shape::Named(named) => {
                let inner = (named.build)();
                self.value_ctor(inner, allow_null)
            }
        }
    }

    fn list_ctor(&mut self, list: ListShape) -> Result<Ctor> {
        let ListShape { elem, new_container, push, .. } = list;
        let elem_ctor = Arc::new(self.value_ctor(*elem, false)?);
        let push = Arc::new(push);
        let new_container = Arc::new(new_container);
        Ok(Box::new(move || {
            let elem_ctor = elem_ctor.clone();
            let push = push.clone();
            let new_container = new_container.clone();
            Box::new(ListParse::new(
                Box::new(move || elem_ctor()),
                Box::new(move |target, value| {
                    push(target, value);
                    Ok(())
                }),
                move || new_container(),
            )) as Box<dyn ParserState>
        }))
    }

    fn map_ctor(&mut self, map: MapShape) -> Result<Ctor> {
        let MapShape { key, value, new_container, contains, insert, .. } = map;
        if !key.is_string_coercible_key() {
            return Err(Error::new(
                ErrorKind::PlanBuildFailure("map key shape must coerce from a string".to_string()),
                0,
            ));
        }
        let strict_duplicates = self.options.strict_duplicates;
        let value_ctor = Arc::new(self.value_ctor(*value, false)?);
        let contains = Arc::new(contains);
        let insert = Arc::new(insert);
        let new_container = Arc::new(new_container);
        Ok(Box::new(move || {
            let value_ctor = value_ctor.clone();
            let contains = contains.clone();
            let insert = insert.clone();
            let new_container = new_container.clone();
            Box::new(MapParse::new(
                Box::new(move || value_ctor()),
                Box::new(move |target, key_bytes: &[u8]| contains(target, key_bytes)),
                Box::new(move |target, key_bytes: Vec<u8>, value| {
                    insert(target, &key_bytes, value);
                    Ok(())
                }),
                move || new_container(),
                strict_duplicates,
            )) as Box<dyn ParserState>
        }))
    }

    fn object_ctor(&mut self, obj: ObjectShape) -> Result<Ctor> {
        let ObjectShape { type_name: _, fields, new_target } = obj;
        let strict_duplicates = self.options.strict_duplicates;
        let strict_unknown_fields = self.options.strict_unknown_fields;
        let new_target = Arc::new(new_target);

        let mut key_entries = Vec::with_capacity(fields.len());
        let mut built_fields = Vec::with_capacity(fields.len());
        for (idx, field) in fields.into_iter().enumerate() {
            key_entries.push((field.name.clone().into_bytes(), idx));
            let FieldSpec { shape, setter, optional, .. } = field;
            let make_value_state = self.value_ctor(shape, optional)?;
            built_fields.push(FieldBuild { make_value_state: Arc::new(make_value_state), setter: Arc::new(setter) });
        }
        let key_match = KeyMatch::new(key_entries);
        let built_fields = Arc::new(built_fields);

        Ok(Box::new(move || {
            let fields: Vec<Field> = built_fields
                .iter()
                .map(|f| {
                    let ctor = f.make_value_state.clone();
                    let setter = f.setter.clone();
                    Field {
                        make_value_state: Box::new(move || ctor()),
                        set: Box::new(move |target, value| {
                            setter(target, value);
                            Ok(())
                        }),
                    }
                })
                .collect();
            let new_target = new_target.clone();
            Box::new(ObjectParse::new(
                key_match.clone(),
                fields,
                Box::new(move || jcodec_states::any_value_state(strict_duplicates)),
                move || new_target(),
                strict_duplicates,
                strict_unknown_fields,
            )) as Box<dyn ParserState>
        }))
    }

    fn write_fn(&mut self, shape: Shape) -> Result<WriteFn> {
        let memo_key = canonical_key(&shape);
        if let Some(cell) = self.writer_memo.get(&memo_key) {
            trace!(key = %memo_key, "writer plan node cache hit");
            return Ok(indirect_write_fn(cell.clone()));
        }
        trace!(key = %memo_key, "building writer plan node");
        let cell: Arc<RwLock<Option<WriteFn>>> = Arc::new(RwLock::new(None));
        self.writer_memo.insert(memo_key, cell.clone());
        let write_fn = self.write_fn_uncached(shape)?;
        *cell.write() = Some(write_fn);
        Ok(indirect_write_fn(cell))
    }

    fn write_fn_uncached(&mut self, shape: Shape) -> Result<WriteFn> {
        match shape {
            Shape::Any => Ok(Arc::new(write_any)),
            Shape::Scalar(kind) => Ok(Arc::new(move |value, sink| write_scalar(kind, value, sink))),
            Shape::List(list) => self.write_list(*list),
            Shape::Map(map) => self.write_map(*map),
            Shape::Object(obj) => self.write_object(*obj),
            Shape::Named(named) => {
                let inner = (named.build)();
                self.write_fn(inner)
            }
        }
    }

    fn write_list(&mut self, list: ListShape) -> Result<WriteFn> {
        let ListShape { elem, for_each, .. } = list;
        let elem_write = self.write_fn(*elem)?;
        let for_each = Arc::new(for_each);
        Ok(Arc::new(move |value: &dyn Any, sink: &mut dyn Sink| -> Result<()> {
            sink.write_byte(b'[')?;
            let mut first = true;
            let mut first_err: Option<Error> = None;
            for_each(value, &mut |item| {
                if first_err.is_some() {
                    return;
                }
                if !first {
                    if let Err(e) = sink.write_byte(b',') {
                        first_err = Some(e);
                        return;
                    }
                }
                first = false;
                if let Err(e) = elem_write(item, sink) {
                    first_err = Some(e);
                }
            });
            if let Some(e) = first_err {
                return Err(e);
            }
            sink.write_byte(b']')
        }))
    }

    fn write_map(&mut self, map: MapShape) -> Result<WriteFn> {
        let MapShape { value, for_each, .. } = map;
        let value_write = self.write_fn(*value)?;
        let for_each = Arc::new(for_each);
        Ok(Arc::new(move |container: &dyn Any, sink: &mut dyn Sink| -> Result<()> {
            sink.write_byte(b'{')?;
            let mut first = true;
            let mut first_err: Option<Error> = None;
            for_each(container, &mut |key, item| {
                if first_err.is_some() {
                    return;
                }
                if !first {
                    if let Err(e) = sink.write_byte(b',') {
                        first_err = Some(e);
                        return;
                    }
                }
                first = false;
                if let Err(e) = write_escaped_string(sink, key) {
                    first_err = Some(e);
                    return;
                }
                if let Err(e) = sink.write_byte(b':') {
                    first_err = Some(e);
                    return;
                }
                if let Err(e) = value_write(item, sink) {
                    first_err = Some(e);
                }
            });
            if let Some(e) = first_err {
                return Err(e);
            }
            sink.write_byte(b'}')
        }))
    }

    fn write_object(&mut self, obj: ObjectShape) -> Result<WriteFn> {
        let emit_null_for_absent = self.options.emit_null_for_absent;
        let mut compiled = Vec::with_capacity(obj.fields.len());
        for field in obj.fields {
            let FieldSpec { name, shape, getter, optional, .. } = field;
            let key_literal = precompute_key_literal(&name);
            let write_child = self.write_fn(shape)?;
            compiled.push(CompiledField { key_literal, getter: Arc::new(getter), write_child, optional });
        }
        let compiled = Arc::new(compiled);
        Ok(Arc::new(move |value: &dyn Any, sink: &mut dyn Sink| -> Result<()> {
            sink.write_byte(b'{')?;
            let mut first = true;
            for field in compiled.iter() {
                let child = (field.getter)(value);
                let is_absent = field.optional && child.downcast_ref::<NullSentinel>().is_some();
                if is_absent && !emit_null_for_absent {
                    continue;
                }
                if !first {
                    sink.write_byte(b',')?;
                }
                first = false;
                write_key_literal(sink, &field.key_literal)?;
                sink.write_byte(b':')?;
                if is_absent {
                    write_null(sink)?;
                } else {
                    (field.write_child)(child.as_ref(), sink)?;
                }
            }
            sink.write_byte(b'}')
        }))
    }
}

struct FieldBuild {
    make_value_state: Arc<Ctor>,
    setter: Arc<SetterRef>,
}

struct CompiledField {
    key_literal: Vec<u8>,
    getter: Arc<GetterRef>,
    write_child: WriteFn,
    optional: bool,
}

fn memo_key_for(shape: &Shape, allow_null: bool) -> String {
    let mut key = canonical_key(shape);
    if allow_null {
        key.push('?');
    }
    key
}

fn indirect_ctor(cell: Arc<RwLock<Option<Ctor>>>) -> Ctor {
    Box::new(move || {
        let guard = cell.read();
        (guard.as_ref().expect("plan node filled before any parse begins"))()
    })
}

fn indirect_write_fn(cell: Arc<RwLock<Option<WriteFn>>>) -> WriteFn {
    Arc::new(move |value, sink| {
        let guard = cell.read();
        (guard.as_ref().expect("plan node filled before any write begins"))(value, sink)
    })
}

fn null_ctor() -> Ctor {
    Box::new(|| {
        Box::new(ScalarTerminal::new(ScalarSyntax::Null, Box::new(|_| Ok(Box::new(NullSentinel) as Box<dyn Any>))))
    })
}

/// Wraps a fully-wired `ValueExpectation` in a `Ctor` that hands out a
/// fresh `ValueDispatch` each call. `ValueDispatch::new` consumes its
/// expectation, so the expectation is shared behind an `Arc` and a fresh
/// shell rebuilt around it on every call -- each field closure simply
/// calls back through the shared original rather than being cloned.
fn dispatch_ctor(expectation: ValueExpectation) -> Ctor {
    let shared = Arc::new(expectation);
    Box::new(move || Box::new(ValueDispatch::new(share_expectation(&shared))) as Box<dyn ParserState>)
}

fn share_expectation(shared: &Arc<ValueExpectation>) -> ValueExpectation {
    let mut out = ValueExpectation::new(shared.expected_label);
    if shared.on_object.is_some() {
        let s = shared.clone();
        out = out.with_object(Box::new(move || (s.on_object.as_ref().expect("checked Some above"))()));
    }
    if shared.on_array.is_some() {
        let s = shared.clone();
        out = out.with_array(Box::new(move || (s.on_array.as_ref().expect("checked Some above"))()));
    }
    if shared.on_string.is_some() {
        let s = shared.clone();
        out = out.with_string(Box::new(move || (s.on_string.as_ref().expect("checked Some above"))()));
    }
    if shared.on_number.is_some() {
        let s = shared.clone();
        out = out.with_number(Box::new(move || (s.on_number.as_ref().expect("checked Some above"))()));
    }
    if shared.on_true.is_some() && shared.on_false.is_some() {
        let s_true = shared.clone();
        let s_false = shared.clone();
        out = out.with_bool(
            Box::new(move || (s_true.on_true.as_ref().expect("checked Some above"))()),
            Box::new(move || (s_false.on_false.as_ref().expect("checked Some above"))()),
        );
    }
    if shared.on_null.is_some() {
        let s = shared.clone();
        out = out.with_null(Box::new(move || (s.on_null.as_ref().expect("checked Some above"))()));
    }
    out
}

fn write_any(value: &dyn Any, sink: &mut dyn Sink) -> Result<()> {
    let dynv = value.downcast_ref::<DynValue>().expect("Any shape always produces DynValue");
    write_dyn_value(dynv, sink)
}

fn write_dyn_value(value: &DynValue, sink: &mut dyn Sink) -> Result<()> {
    match value {
        DynValue::Null => write_null(sink),
        DynValue::Bool(b) => write_bool(sink, *b),
        DynValue::Integer(n) => write_i64(sink, *n),
        DynValue::Float(n) => write_f64(sink, *n),
        DynValue::String(s) => write_escaped_string(sink, s),
        DynValue::Array(items) => {
            sink.write_byte(b'[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    sink.write_byte(b',')?;
                }
                write_dyn_value(item, sink)?;
            }
            sink.write_byte(b']')
        }
        DynValue::Object(fields) => {
            sink.write_byte(b'{')?;
            for (i, (key, item)) in fields.iter().enumerate() {
                if i > 0 {
                    sink.write_byte(b',')?;
                }
                write_escaped_string(sink, key)?;
                sink.write_byte(b':')?;
                write_dyn_value(item, sink)?;
            }
            sink.write_byte(b'}')
        }
    }
}
