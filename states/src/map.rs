//! `MapParse`: drives `{ "key": value, ... }` into a homogeneous
//! string-keyed map, with configurable duplicate-key handling.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;

use jcodec_core::{Error, ErrorKind, ParserContext, Result, StringScan};

use crate::driver::{Advance, ParserState};

type ValueCtor = Box<dyn Fn() -> Box<dyn ParserState> + Send + Sync>;
type Contains = Box<dyn Fn(&dyn Any, &[u8]) -> bool + Send + Sync>;
type Insert = Box<dyn Fn(&mut dyn Any, Vec<u8>, Box<dyn Any>) -> Result<()> + Send + Sync>;

#[derive(Debug)]
enum Step {
    ExpectOpenBrace,
    ExpectKeyOrClose,
    ExpectKey,
    ScanningKey(StringScan),
    ExpectColon,
    ExpectCommaOrClose,
}

/// Parses a JSON object into a string-keyed map of a single value shape.
/// Unlike `ObjectParse`, the key set is not known ahead of time.
pub struct MapParse {
    value_ctor: ValueCtor,
    contains: Contains,
    insert: Insert,
    value: Box<dyn Any>,
    step: Step,
    pending_key: Vec<u8>,
    key_offset: usize,
    strict_duplicates: bool,
}

impl core::fmt::Debug for MapParse {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MapParse").field("step", &self.step).finish_non_exhaustive()
    }
}

impl MapParse {
    #[must_use]
    pub fn new(
        value_ctor: ValueCtor,
        contains: Contains,
        insert: Insert,
        new_value: impl FnOnce() -> Box<dyn Any>,
        strict_duplicates: bool,
    ) -> Self {
        MapParse {
            value_ctor,
            contains,
            insert,
            value: new_value(),
            step: Step::ExpectOpenBrace,
            pending_key: Vec::new(),
            key_offset: 0,
            strict_duplicates,
        }
    }
}

impl ParserState for MapParse {
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
                                ErrorKind::TypeMismatch { expected: "map" },
                                ctx.buffer().current_offset(),
                            ))
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
                        Some(_) => return Err(Error::new(ErrorKind::UnexpectedToken, ctx.buffer().current_offset())),
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
                    if self.strict_duplicates && (self.contains)(self.value.as_ref(), &self.pending_key) {
                        return Err(Error::new(ErrorKind::DuplicateField, self.key_offset));
                    }
                    self.step = Step::ExpectCommaOrClose;
                    return Ok(Advance::Push((self.value_ctor)()));
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
        let key = core::mem::take(&mut self.pending_key);
        (self.insert)(self.value.as_mut(), key, value)
    }

    fn is_composite(&self) -> bool {
        true
    }
}
