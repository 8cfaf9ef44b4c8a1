mod binary;
mod loc;
mod rover_getter;
mod unary;

pub use self::binary::*;
pub use self::loc::*;
pub use self::rover_getter::*;
pub use self::unary::*;

use std::fmt::Display;

use crate::lexer::TokenKind;
use crate::parser::{FromTokens, ParseError, ParseState};

/// An expression. The grammar's `<bool>`/`<join>`/`<equality>`/`<rel>`/
/// `<expr>`/`<term>`/`<unary>`/`<factor>` chain is encoded by the parse
/// functions below; the continuation productions collapse into
/// left-associative [`BinaryExpression`] nodes, and parentheses collapse into
/// their inner expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    Num(i64),
    Real(f64),
    Str(String),
    Bool(bool),
    Loc(Loc),
    Getter(RoverGetter),
}

impl FromTokens for Expression {
    /// `<bool> ::= <join> ( "||" <join> )*`
    fn parse(state: &mut ParseState) -> Result<Self, ParseError> {
        let mut lhs = Self::parse_join(state)?;

        while state.kind() == &TokenKind::Or {
            state.next();
            let rhs = Self::parse_join(state)?;
            lhs = Self::binary(BinaryOperator::Or, lhs, rhs);
        }

        Ok(lhs)
    }
}

impl Expression {
    fn binary(operator: BinaryOperator, lhs: Expression, rhs: Expression) -> Expression {
        Expression::Binary(BinaryExpression {
            operator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    /// `<join> ::= <equality> ( "&&" <equality> )*`
    fn parse_join(state: &mut ParseState) -> Result<Self, ParseError> {
        let mut lhs = Self::parse_equality(state)?;

        while state.kind() == &TokenKind::And {
            state.next();
            let rhs = Self::parse_equality(state)?;
            lhs = Self::binary(BinaryOperator::And, lhs, rhs);
        }

        Ok(lhs)
    }

    /// `<equality> ::= <rel> ( ( "==" | "!=" ) <rel> )*`
    fn parse_equality(state: &mut ParseState) -> Result<Self, ParseError> {
        let mut lhs = Self::parse_rel(state)?;

        loop {
            let operator = match state.kind() {
                TokenKind::Eq => BinaryOperator::Equal,
                TokenKind::Neq => BinaryOperator::NotEqual,
                _ => break,
            };
            state.next();
            let rhs = Self::parse_rel(state)?;
            lhs = Self::binary(operator, lhs, rhs);
        }

        Ok(lhs)
    }

    /// `<rel> ::= <expr> ( ( "<=" | ">=" | "<" | ">" ) <expr> )?`
    ///
    /// At most one relational operator; `a < b < c` is a syntax error.
    fn parse_rel(state: &mut ParseState) -> Result<Self, ParseError> {
        let lhs = Self::parse_additive(state)?;

        let operator = match state.kind() {
            TokenKind::Le => BinaryOperator::LessEqual,
            TokenKind::Ge => BinaryOperator::GreaterEqual,
            TokenKind::Lt => BinaryOperator::LessThan,
            TokenKind::Gt => BinaryOperator::GreaterThan,
            _ => return Ok(lhs),
        };
        state.next();
        let rhs = Self::parse_additive(state)?;

        Ok(Self::binary(operator, lhs, rhs))
    }

    /// `<expr> ::= <term> ( ( "+" | "-" ) <term> )*`
    fn parse_additive(state: &mut ParseState) -> Result<Self, ParseError> {
        let mut lhs = Self::parse_term(state)?;

        loop {
            let operator = match state.kind() {
                TokenKind::Plus => BinaryOperator::Plus,
                TokenKind::Minus => BinaryOperator::Minus,
                _ => break,
            };
            state.next();
            let rhs = Self::parse_term(state)?;
            lhs = Self::binary(operator, lhs, rhs);
        }

        Ok(lhs)
    }

    /// `<term> ::= <unary> ( ( "*" | "/" ) <unary> )*`
    fn parse_term(state: &mut ParseState) -> Result<Self, ParseError> {
        let mut lhs = Self::parse_unary(state)?;

        loop {
            let operator = match state.kind() {
                TokenKind::Star => BinaryOperator::Times,
                TokenKind::Slash => BinaryOperator::Divide,
                _ => break,
            };
            state.next();
            let rhs = Self::parse_unary(state)?;
            lhs = Self::binary(operator, lhs, rhs);
        }

        Ok(lhs)
    }

    /// `<unary> ::= ( "!" | "-" ) <unary> | <factor>`
    fn parse_unary(state: &mut ParseState) -> Result<Self, ParseError> {
        let operator = match state.kind() {
            TokenKind::Not => UnaryOperator::Not,
            TokenKind::Minus => UnaryOperator::Minus,
            _ => return Self::parse_factor(state),
        };
        state.next();
        let operand = Box::new(Self::parse_unary(state)?);

        Ok(Expression::Unary(UnaryExpression { operator, operand }))
    }

    /// `<factor>`, the leaves of the expression grammar.
    fn parse_factor(state: &mut ParseState) -> Result<Self, ParseError> {
        match state.kind() {
            TokenKind::OpenParen => {
                state.next();
                let inner = Self::parse(state)?;
                state.consume(TokenKind::CloseParen)?;
                Ok(inner)
            }
            TokenKind::Num => {
                let token = state.next();
                let value = token.lexeme.parse::<i64>().map_err(|_| {
                    ParseError::UnexpectedToken {
                        found: token.lexeme.clone(),
                        expected: "an integer literal".into(),
                        position: token.position,
                    }
                })?;
                Ok(Expression::Num(value))
            }
            TokenKind::Real => {
                let token = state.next();
                let value = token.lexeme.parse::<f64>().map_err(|_| {
                    ParseError::UnexpectedToken {
                        found: token.lexeme.clone(),
                        expected: "a real literal".into(),
                        position: token.position,
                    }
                })?;
                Ok(Expression::Real(value))
            }
            TokenKind::Str => {
                let token = state.next();
                let unquoted = token.lexeme[1..token.lexeme.len() - 1].to_owned();
                Ok(Expression::Str(unquoted))
            }
            TokenKind::True => {
                state.next();
                Ok(Expression::Bool(true))
            }
            TokenKind::False => {
                state.next();
                Ok(Expression::Bool(false))
            }
            TokenKind::Id => Loc::parse(state).map(Expression::Loc),
            TokenKind::Rover => RoverGetter::parse(state).map(Expression::Getter),
            _ => Err(ParseError::unexpected(state.peek(), "an expression")),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Binary(binary) => write!(f, "{binary}"),
            Expression::Unary(unary) => write!(f, "{unary}"),
            Expression::Num(value) => write!(f, "{value}"),
            Expression::Real(value) => {
                if value.is_finite() && value.fract() == 0.0 {
                    write!(f, "{value:.1}")
                } else {
                    write!(f, "{value}")
                }
            }
            Expression::Str(value) => write!(f, "\"{value}\""),
            Expression::Bool(value) => write!(f, "{value}"),
            Expression::Loc(loc) => write!(f, "{loc}"),
            Expression::Getter(getter) => write!(f, "{getter}"),
        }
    }
}
