use std::{error::Error, fmt::Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    RedefinedVariable(String),
    UndefinedVariable(String),
    Mismatch(String),
    InvalidSubscript {
        name: String,
        declared: usize,
        given: usize,
    },
}

impl Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeError::RedefinedVariable(name) => {
                write!(f, "cannot redefine variable '{name}'")
            }
            TypeError::UndefinedVariable(name) => write!(f, "undefined variable '{name}'"),
            TypeError::Mismatch(message) => f.write_str(message),
            TypeError::InvalidSubscript {
                name,
                declared,
                given,
            } => write!(
                f,
                "invalid subscript: '{name}' has rank {declared} but {given} subscripts were given"
            ),
        }
    }
}

impl Error for TypeError {}
