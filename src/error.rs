//! Top-level error type returned by the interpreter pipeline.

use std::{error::Error, fmt::Display};

use crate::{
    interpreter::RuntimeError, lexer::LexError, parser::ParseError, typechecker::TypeError,
};

/// Any failure a program can produce, tagged by the phase that raised it.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramError {
    Lex(LexError),
    Parse(ParseError),
    Type(TypeError),
    Runtime(RuntimeError),
}

impl Display for ProgramError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgramError::Lex(e) => write!(f, "lex error: {e}"),
            ProgramError::Parse(e) => write!(f, "parse error: {e}"),
            ProgramError::Type(e) => write!(f, "type error: {e}"),
            ProgramError::Runtime(e) => write!(f, "runtime error: {e}"),
        }
    }
}

impl Error for ProgramError {}

impl From<LexError> for ProgramError {
    fn from(value: LexError) -> Self {
        ProgramError::Lex(value)
    }
}

impl From<ParseError> for ProgramError {
    fn from(value: ParseError) -> Self {
        ProgramError::Parse(value)
    }
}

impl From<TypeError> for ProgramError {
    fn from(value: TypeError) -> Self {
        ProgramError::Type(value)
    }
}

impl From<RuntimeError> for ProgramError {
    fn from(value: RuntimeError) -> Self {
        ProgramError::Runtime(value)
    }
}
