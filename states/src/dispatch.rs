//! `ValueDispatch`: looks at the next non-whitespace byte and replaces
//! itself with whichever concrete parser state actually handles it.

extern crate alloc;

use alloc::boxed::Box;

use jcodec_core::{Error, ErrorKind, ParserContext, Result};

use crate::driver::{Advance, ParserState};

type Ctor = Box<dyn Fn() -> Box<dyn ParserState> + Send + Sync>;

/// Which lexical branches a value position accepts, and the state to
/// construct for each. A concrete shape sets only the branches it allows
/// (e.g. `Scalar(i32)` sets only `on_number`, plus `on_null` if the field
/// is optional); `Any` sets all seven.
pub struct ValueExpectation {
    pub on_object: Option<Ctor>,
    pub on_array: Option<Ctor>,
    pub on_string: Option<Ctor>,
    pub on_number: Option<Ctor>,
    pub on_true: Option<Ctor>,
    pub on_false: Option<Ctor>,
    pub on_null: Option<Ctor>,
    /// Human-readable description of what was expected, used in
    /// `TypeMismatch` errors (e.g. `"object"`, `"i32"`, `"list"`).
    pub expected_label: &'static str,
}

impl core::fmt::Debug for ValueExpectation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ValueExpectation").field("expected_label", &self.expected_label).finish()
    }
}

impl ValueExpectation {
    #[must_use]
    pub fn new(expected_label: &'static str) -> Self {
        ValueExpectation {
            on_object: None,
            on_array: None,
            on_string: None,
            on_number: None,
            on_true: None,
            on_false: None,
            on_null: None,
            expected_label,
        }
    }

    #[must_use]
    pub fn with_object(mut self, ctor: Ctor) -> Self {
        self.on_object = Some(ctor);
        self
    }

    #[must_use]
    pub fn with_array(mut self, ctor: Ctor) -> Self {
        self.on_array = Some(ctor);
        self
    }

    #[must_use]
    pub fn with_string(mut self, ctor: Ctor) -> Self {
        self.on_string = Some(ctor);
        self
    }

    #[must_use]
    pub fn with_number(mut self, ctor: Ctor) -> Self {
        self.on_number = Some(ctor);
        self
    }

    #[must_use]
    pub fn with_bool(mut self, on_true: Ctor, on_false: Ctor) -> Self {
        self.on_true = Some(on_true);
        self.on_false = Some(on_false);
        self
    }

    #[must_use]
    pub fn with_null(mut self, ctor: Ctor) -> Self {
        self.on_null = Some(ctor);
        self
    }
}

/// Entry state for every value position. Never produces a value itself --
/// it replaces itself with the concrete state that will.
#[derive(Debug)]
pub struct ValueDispatch {
    expectation: ValueExpectation,
}

impl ValueDispatch {
    #[must_use]
    pub fn new(expectation: ValueExpectation) -> Self {
        ValueDispatch { expectation }
    }
}

impl ParserState for ValueDispatch {
    fn advance(&mut self, ctx: &mut ParserContext) -> Result<Advance> {
        if !ctx.buffer_mut().skip_whitespace() {
            return Ok(Advance::Stay);
        }
        let offset = ctx.buffer().current_offset();
        let Some(b) = ctx.buffer().peek() else {
            return Err(Error::new(ErrorKind::UnexpectedEndOfInput, offset));
        };

        let ctor = match b {
            b'{' => self.expectation.on_object.as_ref(),
            b'[' => self.expectation.on_array.as_ref(),
            b'"' => self.expectation.on_string.as_ref(),
            b'-' | b'0'..=b'9' => self.expectation.on_number.as_ref(),
            b't' => self.expectation.on_true.as_ref(),
            b'f' => self.expectation.on_false.as_ref(),
            b'n' => self.expectation.on_null.as_ref(),
            _ => None,
        };

        match ctor {
            Some(ctor) => Ok(Advance::Replace(ctor())),
            None => {
                let syntactically_valid_byte =
                    matches!(b, b'{' | b'[' | b'"' | b'-' | b'0'..=b'9' | b't' | b'f' | b'n');
                if syntactically_valid_byte {
                    Err(Error::new(
                        ErrorKind::TypeMismatch { expected: self.expectation.expected_label },
                        offset,
                    ))
                } else {
                    Err(Error::new(ErrorKind::UnexpectedToken, offset))
                }
            }
        }
    }
}
