//! The state-stack interpreter: a loop that repeatedly advances the state
//! on top of the stack until it is empty (a value is complete) or the
//! input is exhausted (suspension).

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;

use jcodec_core::{Error, ErrorKind, ParserContext, Result};

/// One step's outcome from a parser state.
pub enum Advance {
    /// No structural change; call `advance` again (more bytes needed or
    /// more internal progress to make with what's already buffered).
    Stay,
    /// This state is finished; its value should flow to whatever is below
    /// it on the stack (or become the final result, if nothing is below).
    Pop(Box<dyn Any>),
    /// Enter a new, nested state; its eventual `Pop` flows back to us via
    /// [`ParserState::receive_child`].
    Push(Box<dyn ParserState>),
    /// Swap this frame for another occupying the same logical value slot
    /// (used by `ValueDispatch` once it has identified the concrete state
    /// for the value it is looking at). The replacement's eventual `Pop`
    /// flows to whatever is below the replaced frame, exactly as if the
    /// replacement had been there from the start.
    Replace(Box<dyn ParserState>),
}

/// A node in the parser state-machine tree.
///
/// Implementors are generic over *how* a value is structured, not over what
/// Rust type it ultimately becomes -- that binding is supplied by the
/// closures `jcodec-plan` wires into `Field`, `ScalarTerminal`, and friends.
pub trait ParserState: core::fmt::Debug {
    /// Makes one step of progress, consuming as many bytes as are
    /// immediately available.
    fn advance(&mut self, ctx: &mut ParserContext) -> Result<Advance>;

    /// Delivers a child's completed value to this (composite) state.
    /// Terminal states that never push children keep the default, which
    /// is unreachable in a correctly wired plan.
    fn receive_child(&mut self, _ctx: &mut ParserContext, _value: Box<dyn Any>) -> Result<()> {
        unreachable!("receive_child called on a state that never pushes children")
    }

    /// Whether entering this state counts as one level of nesting depth.
    /// Object/list/map frames are composite; dispatch and scalar frames
    /// are not (they occupy the same logical value slot as their parent).
    fn is_composite(&self) -> bool {
        false
    }
}

/// Owns the state stack and drives it to completion or suspension.
#[derive(Debug)]
pub struct Driver {
    state_stack: Vec<Box<dyn ParserState>>,
    result: Option<Box<dyn Any>>,
}

impl Driver {
    /// Creates a driver whose single stack frame is `root`.
    #[must_use]
    pub fn new(root: Box<dyn ParserState>) -> Self {
        Driver {
            state_stack: alloc::vec![root],
            result: None,
        }
    }

    #[must_use]
    pub fn is_suspended_on_empty_input(&self, ctx: &ParserContext) -> bool {
        !self.is_complete() && ctx.buffer().peek().is_none() && !ctx.buffer().is_eof()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state_stack.is_empty()
    }

    /// Drives the stack as far as it can go with the bytes currently in
    /// `ctx`'s buffer. Returns once the stack empties (value complete) or
    /// the buffer runs dry.
    ///
    /// # Errors
    /// Any `ParserState::advance` failure propagates immediately; the
    /// driver's internal state after an error is not meant to be reused.
    pub fn drive(&mut self, ctx: &mut ParserContext) -> Result<()> {
        while let Some(top) = self.state_stack.last_mut() {
            if ctx.buffer().peek().is_none() && !ctx.buffer().is_eof() {
                ctx.set_suspended(true);
                return Ok(());
            }
            match top.advance(ctx)? {
                Advance::Stay => {}
                Advance::Push(child) => {
                    if child.is_composite() {
                        ctx.enter_nesting()?;
                    }
                    self.state_stack.push(child);
                }
                Advance::Replace(replacement) => {
                    let was_composite = top.is_composite();
                    if replacement.is_composite() && !was_composite {
                        ctx.enter_nesting()?;
                    }
                    *self.state_stack.last_mut().expect("checked Some above") = replacement;
                }
                Advance::Pop(value) => {
                    let finished = self.state_stack.pop().expect("checked Some above");
                    if finished.is_composite() {
                        ctx.exit_nesting();
                    }
                    match self.state_stack.last_mut() {
                        Some(parent) => parent.receive_child(ctx, value)?,
                        None => self.result = Some(value),
                    }
                }
            }
        }
        ctx.set_suspended(false);
        Ok(())
    }

    /// Consumes the driver, returning the completed root value.
    ///
    /// # Panics
    /// If called before [`Driver::is_complete`] returns `true`.
    #[must_use]
    pub fn into_result(self) -> Box<dyn Any> {
        self.result.expect("drive() has not completed yet")
    }
}

/// Drives `root` to completion against a one-shot, already-fully-fed buffer.
///
/// # Errors
/// `UnexpectedEndOfInput` if the input ends before the root value
/// completes; `UnexpectedToken` if `strict_trailing` is set and non-
/// whitespace bytes remain after the value.
pub fn parse_complete(
    root: Box<dyn ParserState>,
    bytes: &[u8],
    max_depth: usize,
    strict_trailing: bool,
) -> Result<Box<dyn Any>> {
    let mut ctx = ParserContext::from_slice(bytes).with_max_depth(max_depth);
    let mut driver = Driver::new(root);
    driver.drive(&mut ctx)?;
    if !driver.is_complete() {
        return Err(Error::new(ErrorKind::UnexpectedEndOfInput, ctx.buffer().current_offset()));
    }
    if strict_trailing {
        ctx.buffer_mut().skip_whitespace();
        if ctx.buffer().peek().is_some() {
            return Err(Error::new(ErrorKind::UnexpectedToken, ctx.buffer().current_offset()));
        }
    }
    Ok(driver.into_result())
}

/// Drives `root` to completion, pulling more bytes from `reader` in
/// `chunk_size`-sized reads whenever the driver suspends.
///
/// # Errors
/// Same as [`parse_complete`], plus I/O errors from `reader`.
pub fn parse_stream<R: embedded_io::Read>(
    root: Box<dyn ParserState>,
    reader: &mut R,
    max_depth: usize,
    chunk_size: usize,
) -> Result<Box<dyn Any>> {
    let mut ctx = ParserContext::streaming(chunk_size).with_max_depth(max_depth);
    let mut driver = Driver::new(root);
    loop {
        driver.drive(&mut ctx)?;
        if driver.is_complete() {
            return Ok(driver.into_result());
        }
        let n = ctx.read_more(reader)?;
        if n == 0 {
            ctx.mark_eof();
            driver.drive(&mut ctx)?;
            if driver.is_complete() {
                return Ok(driver.into_result());
            }
            return Err(Error::new(ErrorKind::UnexpectedEndOfInput, ctx.buffer().current_offset()));
        }
        ctx.compact();
    }
}
