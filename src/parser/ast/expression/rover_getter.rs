use std::fmt::Display;

use crate::lexer::{RoverWord, TokenKind};
use crate::parser::{FromTokens, ParseError, ParseState};
use crate::rover::Direction;

/// `"rover" "." <get>` inside a factor.
///
/// All getters produce `int` except `can_move`, which produces `bool`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoverGetter {
    Orientation,
    XPos,
    YPos,
    Gold,
    Silver,
    Copper,
    Iron,
    Power,
    Sonar,
    MaxMove(Direction),
    CanMove(Direction),
}

impl FromTokens for RoverGetter {
    fn parse(state: &mut ParseState) -> Result<Self, ParseError> {
        state.consume(TokenKind::Rover)?;
        state.consume(TokenKind::Dot)?;

        let token = state.next();
        let word = match token.kind {
            TokenKind::RoverWord(word) => word,
            _ => return Err(ParseError::unexpected(&token, "a rover getter")),
        };

        match word {
            RoverWord::Orientation => Ok(RoverGetter::Orientation),
            RoverWord::XPos => Ok(RoverGetter::XPos),
            RoverWord::YPos => Ok(RoverGetter::YPos),
            RoverWord::Gold => Ok(RoverGetter::Gold),
            RoverWord::Silver => Ok(RoverGetter::Silver),
            RoverWord::Copper => Ok(RoverGetter::Copper),
            RoverWord::Iron => Ok(RoverGetter::Iron),
            RoverWord::Power => Ok(RoverGetter::Power),
            RoverWord::Sonar => Ok(RoverGetter::Sonar),
            RoverWord::MaxMove => Ok(RoverGetter::MaxMove(state.direction()?)),
            RoverWord::CanMove => Ok(RoverGetter::CanMove(state.direction()?)),
            // the remaining words are actions and only legal as statements
            _ => Err(ParseError::UnexpectedToken {
                found: token.lexeme,
                expected: "a rover getter".into(),
                position: token.position,
            }),
        }
    }
}

impl Display for RoverGetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rover . ")?;
        match self {
            RoverGetter::Orientation => write!(f, "orientation"),
            RoverGetter::XPos => write!(f, "x_pos"),
            RoverGetter::YPos => write!(f, "y_pos"),
            RoverGetter::Gold => write!(f, "gold"),
            RoverGetter::Silver => write!(f, "silver"),
            RoverGetter::Copper => write!(f, "copper"),
            RoverGetter::Iron => write!(f, "iron"),
            RoverGetter::Power => write!(f, "power"),
            RoverGetter::Sonar => write!(f, "sonar"),
            RoverGetter::MaxMove(direction) => write!(f, "max_move {direction}"),
            RoverGetter::CanMove(direction) => write!(f, "can_move {direction}"),
        }
    }
}
