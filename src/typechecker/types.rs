use std::fmt::Display;

pub use crate::lexer::Base;

/// Static type of an expression: a base type plus the number of outstanding
/// array dimensions. A scalar has `dims == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub base: Base,
    pub dims: usize,
}

impl TypeDescriptor {
    pub fn scalar(base: Base) -> Self {
        Self { base, dims: 0 }
    }

    pub fn is_scalar(&self) -> bool {
        self.dims == 0
    }

    /// Scalar `int` or `double`.
    pub fn is_numeric(&self) -> bool {
        self.is_scalar() && matches!(self.base, Base::Int | Base::Double)
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base)?;
        for _ in 0..self.dims {
            write!(f, "[]")?;
        }

        Ok(())
    }
}
