//! The fixed set of leaf scalar kinds a `Shape::Scalar` can describe.

/// One of the primitive JSON-representable scalar types a field or
/// element can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
    String,
}

impl ScalarKind {
    /// Canonical-key fragment for this kind. Stable across versions since
    /// it feeds the plan cache key.
    #[must_use]
    pub fn as_key_str(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Char => "char",
            ScalarKind::String => "string",
        }
    }

    /// True for kinds whose JSON literal must be a number without a
    /// fractional part or exponent (a decimal point or exponent present in
    /// the input is a `TypeMismatch` for these kinds).
    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ScalarKind::I8
                | ScalarKind::I16
                | ScalarKind::I32
                | ScalarKind::I64
                | ScalarKind::U8
                | ScalarKind::U16
                | ScalarKind::U32
                | ScalarKind::U64
        )
    }

    #[must_use]
    pub fn is_float(self) -> bool {
        matches!(self, ScalarKind::F32 | ScalarKind::F64)
    }

    /// Inclusive range an integer kind's literal must fall within. `None`
    /// for non-integer kinds.
    #[must_use]
    pub fn integer_range(self) -> Option<(i128, i128)> {
        match self {
            ScalarKind::I8 => Some((i8::MIN as i128, i8::MAX as i128)),
            ScalarKind::I16 => Some((i16::MIN as i128, i16::MAX as i128)),
            ScalarKind::I32 => Some((i32::MIN as i128, i32::MAX as i128)),
            ScalarKind::I64 => Some((i64::MIN as i128, i64::MAX as i128)),
            ScalarKind::U8 => Some((u8::MIN as i128, u8::MAX as i128)),
            ScalarKind::U16 => Some((u16::MIN as i128, u16::MAX as i128)),
            ScalarKind::U32 => Some((u32::MIN as i128, u32::MAX as i128)),
            ScalarKind::U64 => Some((u64::MIN as i128, u64::MAX as i128)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_range_matches_native_bounds() {
        assert_eq!(ScalarKind::I8.integer_range(), Some((-128, 127)));
        assert_eq!(ScalarKind::U8.integer_range(), Some((0, 255)));
        assert_eq!(ScalarKind::F64.integer_range(), None);
    }

    #[test]
    fn classifies_integer_vs_float() {
        assert!(ScalarKind::I32.is_integer());
        assert!(!ScalarKind::I32.is_float());
        assert!(ScalarKind::F64.is_float());
        assert!(!ScalarKind::F64.is_integer());
        assert!(!ScalarKind::String.is_integer());
    }
}
