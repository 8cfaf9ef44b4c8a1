use std::fmt::Display;

use crate::lexer::TokenKind;
use crate::parser::{FromTokens, ParseError, ParseState};

use super::{Declaration, Statement};

/// `<block> ::= "{" <decls> <stmts> "}"`
///
/// Declarations come first; the statement list runs until the closing brace.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub declarations: Vec<Declaration>,
    pub statements: Vec<Statement>,
}

impl FromTokens for Block {
    fn parse(state: &mut ParseState) -> Result<Self, ParseError> {
        state.consume(TokenKind::OpenBrace)?;

        let mut declarations = vec![];
        while matches!(state.kind(), TokenKind::Basic(_)) {
            declarations.push(Declaration::parse(state)?);
        }

        let mut statements = vec![];
        while !matches!(state.kind(), TokenKind::CloseBrace | TokenKind::Eos) {
            statements.push(Statement::parse(state)?);
        }
        state.consume(TokenKind::CloseBrace)?;

        Ok(Block {
            declarations,
            statements,
        })
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for declaration in &self.declarations {
            write!(f, " {declaration}")?;
        }
        for statement in &self.statements {
            write!(f, " {statement}")?;
        }
        write!(f, " }}")
    }
}
