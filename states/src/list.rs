//! `ListParse`: drives `[ elem, elem, ... ]` against a homogeneous element
//! shape.

extern crate alloc;

use alloc::boxed::Box;
use core::any::Any;

use jcodec_core::{Error, ErrorKind, ParserContext, Result};

use crate::driver::{Advance, ParserState};

type ElemCtor = Box<dyn Fn() -> Box<dyn ParserState> + Send + Sync>;
type Pusher = Box<dyn Fn(&mut dyn Any, Box<dyn Any>) -> Result<()> + Send + Sync>;

#[derive(Debug)]
enum Step {
    ExpectOpenBracket,
    ExpectElemOrClose,
    ExpectCommaOrClose,
}

/// Parses a JSON array into a target container, pushing each element via
/// the `push` closure supplied at construction.
pub struct ListParse {
    elem_ctor: ElemCtor,
    push: Pusher,
    value: Box<dyn Any>,
    step: Step,
}

impl core::fmt::Debug for ListParse {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListParse").field("step", &self.step).finish_non_exhaustive()
    }
}

impl ListParse {
    #[must_use]
    pub fn new(elem_ctor: ElemCtor, push: Pusher, new_value: impl FnOnce() -> Box<dyn Any>) -> Self {
        ListParse {
            elem_ctor,
            push,
            value: new_value(),
            step: Step::ExpectOpenBracket,
        }
    }
}

impl ParserState for ListParse {
    fn advance(&mut self, ctx: &mut ParserContext) -> Result<Advance> {
        loop {
            match self.step {
                Step::ExpectOpenBracket => {
                    if !ctx.buffer_mut().skip_whitespace() {
                        return Ok(Advance::Stay);
                    }
                    match ctx.buffer().peek() {
                        Some(b'[') => {
                            ctx.buffer_mut().advance(1);
                            self.step = Step::ExpectElemOrClose;
                        }
                        Some(_) => {
                            return Err(Error::new(
                                ErrorKind::TypeMismatch { expected: "list" },
                                ctx.buffer().current_offset(),
                            ))
                        }
                        None => return Err(Error::new(ErrorKind::UnexpectedEndOfInput, ctx.buffer().current_offset())),
                    }
                }
                Step::ExpectElemOrClose => {
                    if !ctx.buffer_mut().skip_whitespace() {
                        return Ok(Advance::Stay);
                    }
                    match ctx.buffer().peek() {
                        Some(b']') => {
                            ctx.buffer_mut().advance(1);
                            let value = core::mem::replace(&mut self.value, Box::new(()));
                            return Ok(Advance::Pop(value));
                        }
                        Some(_) => {
                            self.step = Step::ExpectCommaOrClose;
                            return Ok(Advance::Push((self.elem_ctor)()));
                        }
                        None => return Err(Error::new(ErrorKind::UnexpectedEndOfInput, ctx.buffer().current_offset())),
                    }
                }
                Step::ExpectCommaOrClose => {
                    if !ctx.buffer_mut().skip_whitespace() {
                        return Ok(Advance::Stay);
                    }
                    match ctx.buffer().peek() {
                        Some(b',') => {
                            ctx.buffer_mut().advance(1);
                            self.step = Step::ExpectElemOrClose;
                            return Ok(Advance::Push((self.elem_ctor)()));
                        }
                        Some(b']') => {
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
        (self.push)(self.value.as_mut(), value)
    }

    fn is_composite(&self) -> bool {
        true
    }
}
