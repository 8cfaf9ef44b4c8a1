use std::fmt::Display;

use crate::lexer::TokenKind;
use crate::parser::{ast::Expression, FromTokens, ParseError, ParseState};

use super::Statement;

/// `"if" "(" <bool> ")" <stmt> ( "else" <stmt> )?`
///
/// An `else` binds to the nearest unmatched `if`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
}

impl FromTokens for IfStatement {
    fn parse(state: &mut ParseState) -> Result<Self, ParseError> {
        state.consume(TokenKind::If)?;
        state.consume(TokenKind::OpenParen)?;
        let condition = Expression::parse(state)?;
        state.consume(TokenKind::CloseParen)?;

        let then_branch = Box::new(Statement::parse(state)?);

        let else_branch = if state.kind() == &TokenKind::Else {
            state.next();
            Some(Box::new(Statement::parse(state)?))
        } else {
            None
        };

        Ok(IfStatement {
            condition,
            then_branch,
            else_branch,
        })
    }
}

impl Display for IfStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if ( {} ) {}", self.condition, self.then_branch)?;
        if let Some(else_branch) = &self.else_branch {
            write!(f, " else {else_branch}")?;
        }

        Ok(())
    }
}
