//! `ScalarTerminal`: the leaf parser state that delegates to a lexical
//! scanner and, on completion, converts the accumulated bytes into a typed
//! value via a closure supplied by the plan builder.

extern crate alloc;

use alloc::boxed::Box;
use core::any::Any;

use jcodec_core::{Lex, LiteralScan, NumberScan, ParserContext, Result, StringScan};

use crate::driver::{Advance, ParserState};

/// Marker boxed in place of a real value when a scalar position was `null`.
/// Plan-supplied setters check for this to decide whether to leave an
/// optional field at its default rather than downcasting to the scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullSentinel;

/// The raw lexical result handed to a `ScalarTerminal`'s convert closure.
#[derive(Debug, Clone)]
pub enum ScalarToken {
    Str(alloc::vec::Vec<u8>),
    Num { raw: alloc::vec::Vec<u8>, is_float: bool },
    Bool(bool),
    Null,
}

#[derive(Debug)]
enum Scanning {
    Str(StringScan),
    Num(NumberScan),
    Lit(LiteralScan, ScalarToken),
}

/// Which lexical form a `ScalarTerminal` is currently scanning; chosen by
/// `ValueDispatch` from the first byte of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarSyntax {
    String,
    Number,
    True,
    False,
    Null,
}

/// A leaf parser state converting one scanned scalar into a typed value.
pub struct ScalarTerminal {
    scanning: Scanning,
    convert: Box<dyn FnMut(ScalarToken) -> Result<Box<dyn Any>>>,
}

impl core::fmt::Debug for ScalarTerminal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScalarTerminal").field("scanning", &self.scanning).finish()
    }
}

impl ScalarTerminal {
    #[must_use]
    pub fn new(
        syntax: ScalarSyntax,
        convert: Box<dyn FnMut(ScalarToken) -> Result<Box<dyn Any>>>,
    ) -> Self {
        let scanning = match syntax {
            ScalarSyntax::String => Scanning::Str(StringScan::new()),
            ScalarSyntax::Number => Scanning::Num(NumberScan::new()),
            ScalarSyntax::True => Scanning::Lit(LiteralScan::tru(), ScalarToken::Bool(true)),
            ScalarSyntax::False => Scanning::Lit(LiteralScan::fals(), ScalarToken::Bool(false)),
            ScalarSyntax::Null => Scanning::Lit(LiteralScan::null(), ScalarToken::Null),
        };
        ScalarTerminal { scanning, convert }
    }
}

impl ParserState for ScalarTerminal {
    fn advance(&mut self, ctx: &mut ParserContext) -> Result<Advance> {
        match &mut self.scanning {
            Scanning::Str(scan) => {
                let (buf, token) = (ctx.buffer_mut(), ctx.token_mut());
                match scan.advance(buf, token)? {
                    Lex::Suspend => Ok(Advance::Stay),
                    Lex::Done(()) => {
                        let raw = core::mem::take(ctx.token_mut());
                        // +1 for the opening quote, which isn't part of `raw`.
                        let start = ctx.buffer().current_offset().saturating_sub(raw.len() + 1);
                        let value = (self.convert)(ScalarToken::Str(raw)).map_err(|e| e.at_offset(start))?;
                        Ok(Advance::Pop(value))
                    }
                }
            }
            Scanning::Num(scan) => {
                let (buf, token) = (ctx.buffer_mut(), ctx.token_mut());
                match scan.advance(buf, token)? {
                    Lex::Suspend => Ok(Advance::Stay),
                    Lex::Done(()) => {
                        let raw = core::mem::take(ctx.token_mut());
                        let is_float = scan.is_float;
                        let start = ctx.buffer().current_offset().saturating_sub(raw.len());
                        let value = (self.convert)(ScalarToken::Num { raw, is_float }).map_err(|e| e.at_offset(start))?;
                        Ok(Advance::Pop(value))
                    }
                }
            }
            Scanning::Lit(scan, token) => match scan.advance(ctx.buffer_mut())? {
                Lex::Suspend => Ok(Advance::Stay),
                Lex::Done(()) => {
                    let value = (self.convert)(token.clone())?;
                    Ok(Advance::Pop(value))
                }
            },
        }
    }
}
