//! # RoverScript
//!
//! A small imperative language for commanding simulated mining rovers. The
//! pipeline is classic: lex the source into tokens, parse them into an AST,
//! type check the AST, and walk it with the interpreter, which drives a rover
//! through the [`rover::RoverHost`] trait.

pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod rover;
pub mod typechecker;

use std::io::Write;

pub use error::ProgramError;

use interpreter::Interpreter;
use lexer::Lexer;
use rover::RoverHost;
use typechecker::Typechecker;

/// Run a complete RoverScript program against the given host.
///
/// `print` statements are written to `output`; rover side effects go through
/// `host`. The first failing phase aborts the run.
pub fn run_program<H, W>(source: &str, host: &mut H, output: &mut W) -> Result<(), ProgramError>
where
    H: RoverHost,
    W: Write,
{
    let tokens = Lexer::new(source).lex()?;
    let program = parser::parse(tokens)?;
    Typechecker::check(&program)?;
    Interpreter::new(host, output).run(&program)?;

    Ok(())
}
