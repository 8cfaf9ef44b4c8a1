use std::{error::Error, fmt::Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    DivisionByZero,
    IndexOutOfRange {
        name: String,
        index: i64,
        size: usize,
    },
    NegativeIndex {
        name: String,
        index: i64,
    },
    Output(String),
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeError::DivisionByZero => f.write_str("division by zero"),
            RuntimeError::IndexOutOfRange { name, index, size } => write!(
                f,
                "index {index} is out of range for '{name}' (size {size})"
            ),
            RuntimeError::NegativeIndex { name, index } => {
                write!(f, "negative index {index} for '{name}'")
            }
            RuntimeError::Output(message) => write!(f, "failed to write output: {message}"),
        }
    }
}

impl Error for RuntimeError {}
