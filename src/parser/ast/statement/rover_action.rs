use std::fmt::Display;

use crate::lexer::{RoverWord, TokenKind};
use crate::parser::{ast::Expression, FromTokens, ParseError, ParseState};
use crate::rover::{Direction, Rotation};

/// `"rover" "." <action> ";"`
///
/// `move` takes a direction and a step-count expression, `turn` a rotation,
/// `change_map` a path expression; everything else is bare.
#[derive(Debug, Clone, PartialEq)]
pub enum RoverAction {
    Scan,
    Drill,
    Shockwave,
    Build,
    Sonar,
    Push,
    Recharge,
    Backflip,
    PrintInventory,
    PrintMap,
    PrintPos,
    PrintOrientation,
    ChangeMap(Expression),
    Move {
        direction: Direction,
        steps: Expression,
    },
    Turn(Rotation),
}

impl FromTokens for RoverAction {
    fn parse(state: &mut ParseState) -> Result<Self, ParseError> {
        state.consume(TokenKind::Rover)?;
        state.consume(TokenKind::Dot)?;

        let token = state.next();
        let word = match token.kind {
            TokenKind::RoverWord(word) => word,
            _ => return Err(ParseError::unexpected(&token, "a rover action")),
        };

        let action = match word {
            RoverWord::Scan => RoverAction::Scan,
            RoverWord::Drill => RoverAction::Drill,
            RoverWord::Shockwave => RoverAction::Shockwave,
            RoverWord::Build => RoverAction::Build,
            RoverWord::Sonar => RoverAction::Sonar,
            RoverWord::Push => RoverAction::Push,
            RoverWord::Recharge => RoverAction::Recharge,
            RoverWord::Backflip => RoverAction::Backflip,
            RoverWord::PrintInventory => RoverAction::PrintInventory,
            RoverWord::PrintMap => RoverAction::PrintMap,
            RoverWord::PrintPos => RoverAction::PrintPos,
            RoverWord::PrintOrientation => RoverAction::PrintOrientation,
            RoverWord::ChangeMap => RoverAction::ChangeMap(Expression::parse(state)?),
            RoverWord::Move => {
                let direction = state.direction()?;
                let steps = Expression::parse(state)?;
                RoverAction::Move { direction, steps }
            }
            RoverWord::Turn => RoverAction::Turn(state.rotation()?),
            // the remaining words are getters and only legal in expressions
            _ => {
                return Err(ParseError::UnexpectedToken {
                    found: token.lexeme,
                    expected: "a rover action".into(),
                    position: token.position,
                })
            }
        };

        state.consume(TokenKind::Semicolon)?;

        Ok(action)
    }
}

impl Display for RoverAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rover . ")?;
        match self {
            RoverAction::Scan => write!(f, "scan")?,
            RoverAction::Drill => write!(f, "drill")?,
            RoverAction::Shockwave => write!(f, "shockwave")?,
            RoverAction::Build => write!(f, "build")?,
            RoverAction::Sonar => write!(f, "sonar")?,
            RoverAction::Push => write!(f, "push")?,
            RoverAction::Recharge => write!(f, "recharge")?,
            RoverAction::Backflip => write!(f, "backflip")?,
            RoverAction::PrintInventory => write!(f, "print_inventory")?,
            RoverAction::PrintMap => write!(f, "print_map")?,
            RoverAction::PrintPos => write!(f, "print_pos")?,
            RoverAction::PrintOrientation => write!(f, "print_orientation")?,
            RoverAction::ChangeMap(path) => write!(f, "change_map {path}")?,
            RoverAction::Move { direction, steps } => write!(f, "move {direction} {steps}")?,
            RoverAction::Turn(rotation) => write!(f, "turn {rotation}")?,
        }
        write!(f, " ;")
    }
}
