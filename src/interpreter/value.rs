use std::fmt::Display;

use crate::lexer::Base;

/// A runtime value. Arrays are rectangular nested vectors whose cells carry
/// the declared base type's tag from the moment they are zero-initialized.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Real(f64),
    Bool(bool),
    Str(String),
    Array(Vec<Value>),
}

impl Value {
    /// The zero of a base type: `0`, `0.0`, `false`, `""`.
    pub fn zero(base: Base) -> Value {
        match base {
            Base::Int => Value::Int(0),
            Base::Double => Value::Real(0.0),
            Base::Bool => Value::Bool(false),
            Base::Str => Value::Str(String::new()),
        }
    }

    /// The initial value of a declaration: the base zero for scalars, a
    /// rectangular nested array of base zeros otherwise.
    pub fn for_declaration(base: Base, shape: &[usize]) -> Value {
        match shape.split_first() {
            None => Self::zero(base),
            Some((&size, rest)) => {
                Value::Array(vec![Self::for_declaration(base, rest); size])
            }
        }
    }

    /// Conversion applied when a value lands in a typed cell: reals truncate
    /// into int cells, ints widen into double cells.
    pub(crate) fn adapted_to(self, target: &Value) -> Value {
        match (target, self) {
            (Value::Int(_), Value::Real(real)) => Value::Int(real as i64),
            (Value::Real(_), Value::Int(int)) => Value::Real(int as f64),
            (_, value) => value,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Real(value) => {
                // keep a decimal point so real values stay recognizable
                if value.is_finite() && value.fract() == 0.0 {
                    write!(f, "{value:.1}")
                } else {
                    write!(f, "{value}")
                }
            }
            Value::Bool(value) => write!(f, "{value}"),
            Value::Str(value) => f.write_str(value),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}
