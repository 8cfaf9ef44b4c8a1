use std::fmt::Display;

use crate::lexer::TokenKind;
use crate::parser::{
    ast::{Expression, Loc},
    FromTokens, ParseError, ParseState,
};

/// `<loc> "=" <bool> ";"`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Loc,
    pub value: Expression,
}

impl FromTokens for Assignment {
    fn parse(state: &mut ParseState) -> Result<Self, ParseError> {
        let target = Loc::parse(state)?;
        state.consume(TokenKind::Assign)?;
        let value = Expression::parse(state)?;
        state.consume(TokenKind::Semicolon)?;

        Ok(Assignment { target, value })
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {} ;", self.target, self.value)
    }
}
