//! `ObjectParse`: drives `{ "key": value, ... }` against a fixed, statically
//! known set of fields.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;

use jcodec_core::{Error, ErrorKind, ParserContext, Result, StringScan};

use crate::driver::{Advance, ParserState};
use crate::key_match::KeyMatch;

/// Shared, read-only across concurrent parses of the same plan: each parse
/// calls it to build its own independent, single-threaded state instance.
type FieldCtor = Box<dyn Fn() -> Box<dyn ParserState> + Send + Sync>;
type FieldSetter = Box<dyn Fn(&mut dyn Any, Box<dyn Any>) -> Result<()> + Send + Sync>;

/// One field's wiring: how to parse its value, and how to write the
/// result into the in-progress target object.
pub struct Field {
    pub make_value_state: FieldCtor,
    pub set: FieldSetter,
}

impl core::fmt::Debug for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Field").finish_non_exhaustive()
    }
}

#[derive(Debug)]
enum Step {
    ExpectOpenBrace,
    /// Only reachable right after `{`; unlike `ExpectKey`, an immediate
    /// `}` here completes an empty object.
    ExpectKeyOrClose,
    ExpectKey,
    ScanningKey(StringScan),
    ExpectColon,
    ExpectCommaOrClose,
}

/// Parses a JSON object into a target value whose field set is fixed at
/// plan-build time. Unknown keys are parsed and discarded via
/// `discard_value_state`, preserving structural validity without storing
/// anything.
pub struct ObjectParse {
    key_match: KeyMatch,
    fields: Vec<Field>,
    discard_value_state: Box<dyn Fn() -> Box<dyn ParserState> + Send + Sync>,
    value: Box<dyn Any>,
    step: Step,
    pending_key: Vec<u8>,
    key_offset: usize,
    pending_field: Option<usize>,
    seen: Vec<bool>,
    strict_duplicates: bool,
    strict_unknown_fields: bool,
}

impl core::fmt::Debug for ObjectParse {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObjectParse").field("step", &self.step).finish_non_exhaustive()
    }
}

impl ObjectParse {
    #[must_use]
    pub fn new(
        key_match: KeyMatch,
        fields: Vec<Field>,
        discard_value_state: Box<dyn Fn() -> Box<dyn ParserState> + Send + Sync>,
        new_value: impl FnOnce() -> Box<dyn Any>,
        strict_duplicates: bool,
        strict_unknown_fields: bool,
    ) -> Self {
        let seen = alloc::vec![false; fields.len()];
        ObjectParse {
            key_match,
            fields,
            discard_value_state,
            value: new_value(),
            step: Step::ExpectOpenBrace,
            pending_key: Vec::new(),
            key_offset: 0,
            pending_field: None,
            seen,
            strict_duplicates,
            strict_unknown_fields,
        }
    }
}

impl ParserState for ObjectParse {
    fn advance(&mut self, ctx: &mut ParserContext) -> Result<Advance> {
        loop {
            match &mut self.step {
                Step::ExpectOpenBrace => {
                    if !ctx.buffer_mut().skip_whitespace() {
                        return Ok(Advance::Stay);
                    }
                    match ctx.buffer().peek() {
                        Some(b'{') => {
                            ctx.buffer_mut().advance(1);
                            self.step = Step::ExpectKeyOrClose;
                        }
                        Some(_) => {
                            return Err(Error::new(
                                ErrorKind::TypeMismatch { expected: "object" },
                                ctx.buffer().current_offset(),
                            ));
                        }
                        None => return Err(Error::new(ErrorKind::UnexpectedEndOfInput, ctx.buffer().current_offset())),
                    }
                }
                Step::ExpectKeyOrClose | Step::ExpectKey => {
                    if !ctx.buffer_mut().skip_whitespace() {
                        return Ok(Advance::Stay);
                    }
                    let allow_close = matches!(self.step, Step::ExpectKeyOrClose);
                    match ctx.buffer().peek() {
                        Some(b'}') if allow_close => {
                            ctx.buffer_mut().advance(1);
                            let value = core::mem::replace(&mut self.value, Box::new(()));
                            return Ok(Advance::Pop(value));
                        }
                        Some(b'"') => {
                            self.key_offset = ctx.buffer().current_offset();
                            ctx.clear_token();
                            self.step = Step::ScanningKey(StringScan::new());
                        }
                        Some(_) => {
                            return Err(Error::new(ErrorKind::UnexpectedToken, ctx.buffer().current_offset()));
                        }
                        None => return Err(Error::new(ErrorKind::UnexpectedEndOfInput, ctx.buffer().current_offset())),
                    }
                }
                Step::ScanningKey(scan) => {
                    let (buf, token) = (ctx.buffer_mut(), ctx.token_mut());
                    match scan.advance(buf, token)? {
                        jcodec_core::Lex::Suspend => return Ok(Advance::Stay),
                        jcodec_core::Lex::Done(()) => {
                            self.pending_key = core::mem::take(ctx.token_mut());
                            self.step = Step::ExpectColon;
                        }
                    }
                }
                Step::ExpectColon => {
                    if !ctx.buffer_mut().skip_whitespace() {
                        return Ok(Advance::Stay);
                    }
                    match ctx.buffer().peek() {
                        Some(b':') => ctx.buffer_mut().advance(1),
                        Some(_) => return Err(Error::new(ErrorKind::UnexpectedToken, ctx.buffer().current_offset())),
                        None => return Err(Error::new(ErrorKind::UnexpectedEndOfInput, ctx.buffer().current_offset())),
                    }

                    let resolved = self.key_match.resolve(&self.pending_key);
                    self.step = Step::ExpectCommaOrClose;
                    match resolved {
                        Some(idx) => {
                            if self.seen[idx] && self.strict_duplicates {
                                return Err(Error::new(ErrorKind::DuplicateField, self.key_offset));
                            }
                            self.seen[idx] = true;
                            self.pending_field = Some(idx);
                            return Ok(Advance::Push((self.fields[idx].make_value_state)()));
                        }
                        None => {
                            if self.strict_unknown_fields {
                                return Err(Error::new(ErrorKind::UnknownField, ctx.buffer().current_offset()));
                            }
                            self.pending_field = None;
                            return Ok(Advance::Push((self.discard_value_state)()));
                        }
                    }
                }
                Step::ExpectCommaOrClose => {
                    if !ctx.buffer_mut().skip_whitespace() {
                        return Ok(Advance::Stay);
                    }
                    match ctx.buffer().peek() {
                        Some(b',') => {
                            ctx.buffer_mut().advance(1);
                            self.step = Step::ExpectKey;
                        }
                        Some(b'}') => {
                            ctx.buffer_mut().advance(1);
                            let value = core::mem::replace(&mut self.value, Box::new(()));
                            return Ok(Advance::Pop(value));
                        }
                        Some(_) => return Err(Error::new(ErrorKind::UnexpectedToken, ctx.buffer().current_offset())),
                        None => return Err(Error::new(ErrorKind::UnexpectedEndOfInput, ctx.buffer().current_offset())),
                    }
                }
            }
        }
    }

    fn receive_child(&mut self, _ctx: &mut ParserContext, value: Box<dyn Any>) -> Result<()> {
        match self.pending_field.take() {
            Some(idx) => (self.fields[idx].set)(self.value.as_mut(), value),
            None => Ok(()), // unknown key's value, discarded
        }
    }

    fn is_composite(&self) -> bool {
        true
    }
}
