use std::fmt::Display;

use crate::lexer::{Base, TokenKind};
use crate::parser::{FromTokens, ParseError, ParseState};

/// `<decl> ::= BASIC ID ( "[" NUM "]" )* ";"`
///
/// The dimension list is empty for scalars. Array sizes are positive integer
/// literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub base: Base,
    pub dimensions: Vec<usize>,
    pub name: String,
}

impl FromTokens for Declaration {
    fn parse(state: &mut ParseState) -> Result<Self, ParseError> {
        let token = state.next();
        let base = match token.kind {
            TokenKind::Basic(base) => base,
            _ => return Err(ParseError::unexpected(&token, "a type name")),
        };

        let name = state.consume(TokenKind::Id)?.lexeme;

        let mut dimensions = vec![];
        while state.kind() == &TokenKind::OpenBracket {
            state.next();
            let size = state.consume(TokenKind::Num)?;
            match size.lexeme.parse::<usize>() {
                Ok(value) if value > 0 => dimensions.push(value),
                _ => {
                    return Err(ParseError::UnexpectedToken {
                        found: size.lexeme,
                        expected: "a positive array size".into(),
                        position: size.position,
                    })
                }
            }
            state.consume(TokenKind::CloseBracket)?;
        }

        state.consume(TokenKind::Semicolon)?;

        Ok(Declaration {
            base,
            dimensions,
            name,
        })
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.base, self.name)?;
        for dimension in &self.dimensions {
            write!(f, " [ {dimension} ]")?;
        }
        write!(f, " ;")
    }
}
