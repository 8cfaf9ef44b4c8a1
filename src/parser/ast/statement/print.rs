use std::fmt::Display;

use crate::lexer::TokenKind;
use crate::parser::{ast::Expression, FromTokens, ParseError, ParseState};

/// `"print" <bool> ";"`
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStatement {
    pub value: Expression,
}

impl FromTokens for PrintStatement {
    fn parse(state: &mut ParseState) -> Result<Self, ParseError> {
        state.consume(TokenKind::Print)?;
        let value = Expression::parse(state)?;
        state.consume(TokenKind::Semicolon)?;

        Ok(PrintStatement { value })
    }
}

impl Display for PrintStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "print {} ;", self.value)
    }
}
