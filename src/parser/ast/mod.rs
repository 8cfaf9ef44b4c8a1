//! Abstract syntax tree of a RoverScript program.
//!
//! Every node implements [`crate::parser::FromTokens`] to parse itself and
//! [`std::fmt::Display`] to print itself in a canonical, whitespace-separated
//! form that lexes and parses back to a structurally equal tree.

mod block;
mod declaration;
pub mod expression;
mod program;
pub mod statement;

pub use self::block::*;
pub use self::declaration::*;
pub use self::expression::*;
pub use self::program::*;
pub use self::statement::*;

pub use crate::lexer::Base;
