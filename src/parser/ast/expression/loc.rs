use std::fmt::Display;

use crate::lexer::TokenKind;
use crate::parser::{FromTokens, ParseError, ParseState};

use super::Expression;

/// `<loc> ::= ID ( "[" <bool> "]" )*`
///
/// A name plus zero or more subscripts; doubles as l-value in assignments and
/// as r-value in expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Loc {
    pub name: String,
    pub indices: Vec<Expression>,
}

impl FromTokens for Loc {
    fn parse(state: &mut ParseState) -> Result<Self, ParseError> {
        let name = state.consume(TokenKind::Id)?.lexeme;

        let mut indices = vec![];
        while state.kind() == &TokenKind::OpenBracket {
            state.next();
            indices.push(Expression::parse(state)?);
            state.consume(TokenKind::CloseBracket)?;
        }

        Ok(Loc { name, indices })
    }
}

impl Display for Loc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for index in &self.indices {
            write!(f, " [ {index} ]")?;
        }

        Ok(())
    }
}
