use std::fmt::Display;

use crate::lexer::TokenKind;
use crate::parser::{FromTokens, ParseError, ParseState};

use super::Block;

/// `<program> ::= <block>`
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub block: Block,
}

impl FromTokens for Program {
    fn parse(state: &mut ParseState) -> Result<Self, ParseError> {
        let block = Block::parse(state)?;
        state.consume(TokenKind::Eos)?;

        Ok(Program { block })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.block)
    }
}
