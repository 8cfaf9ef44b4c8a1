use std::fmt::Display;

use crate::lexer::TokenKind;
use crate::parser::{ast::Expression, FromTokens, ParseError, ParseState};

use super::Statement;

/// `"while" "(" <bool> ")" <stmt>`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileLoop {
    pub condition: Expression,
    pub body: Box<Statement>,
}

impl FromTokens for WhileLoop {
    fn parse(state: &mut ParseState) -> Result<Self, ParseError> {
        state.consume(TokenKind::While)?;
        state.consume(TokenKind::OpenParen)?;
        let condition = Expression::parse(state)?;
        state.consume(TokenKind::CloseParen)?;
        let body = Box::new(Statement::parse(state)?);

        Ok(WhileLoop { condition, body })
    }
}

impl Display for WhileLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while ( {} ) {}", self.condition, self.body)
    }
}
