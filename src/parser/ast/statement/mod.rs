mod assignment;
mod if_statement;
mod print;
mod rover_action;
mod while_loop;

pub use self::assignment::*;
pub use self::if_statement::*;
pub use self::print::*;
pub use self::rover_action::*;
pub use self::while_loop::*;

use std::fmt::Display;

use crate::lexer::TokenKind;
use crate::parser::{FromTokens, ParseError, ParseState};

use super::Block;

/// `<stmt>`, dispatched on the current token.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Empty,
    Assignment(Assignment),
    If(IfStatement),
    While(WhileLoop),
    Block(Block),
    Print(PrintStatement),
    Rover(RoverAction),
}

impl FromTokens for Statement {
    fn parse(state: &mut ParseState) -> Result<Self, ParseError> {
        match state.kind() {
            TokenKind::Semicolon => {
                state.next();
                Ok(Statement::Empty)
            }
            TokenKind::Id => Assignment::parse(state).map(Statement::Assignment),
            TokenKind::If => IfStatement::parse(state).map(Statement::If),
            TokenKind::While => WhileLoop::parse(state).map(Statement::While),
            TokenKind::OpenBrace => Block::parse(state).map(Statement::Block),
            TokenKind::Print => PrintStatement::parse(state).map(Statement::Print),
            TokenKind::Rover => RoverAction::parse(state).map(Statement::Rover),
            _ => Err(ParseError::unexpected(
                state.peek(),
                "a statement (';', an assignment, 'if', 'while', 'print', 'rover' or a block)",
            )),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Empty => write!(f, ";"),
            Statement::Assignment(assignment) => write!(f, "{assignment}"),
            Statement::If(if_statement) => write!(f, "{if_statement}"),
            Statement::While(while_loop) => write!(f, "{while_loop}"),
            Statement::Block(block) => write!(f, "{block}"),
            Statement::Print(print) => write!(f, "{print}"),
            Statement::Rover(action) => write!(f, "{action}"),
        }
    }
}
