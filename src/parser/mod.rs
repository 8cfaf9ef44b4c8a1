//! # Parser
//!
//! Hand-written recursive descent parser for the RoverScript grammar:
//!
//! ```text
//! program   ::= block
//! block     ::= "{" decl* stmt* "}"
//! decl      ::= BASIC ID ( "[" NUM "]" )* ";"
//! stmt      ::= ";"
//!             | loc "=" bool ";"
//!             | "rover" "." action ";"
//!             | "print" bool ";"
//!             | "if" "(" bool ")" stmt ( "else" stmt )?
//!             | "while" "(" bool ")" stmt
//!             | block
//! loc       ::= ID ( "[" bool "]" )*
//! bool      ::= join ( "||" join )*
//! join      ::= equality ( "&&" equality )*
//! equality  ::= rel ( ( "==" | "!=" ) rel )*
//! rel       ::= expr ( ( "<=" | ">=" | "<" | ">" ) expr )?
//! expr      ::= term ( ( "+" | "-" ) term )*
//! term      ::= unary ( ( "*" | "/" ) unary )*
//! unary     ::= ( "!" | "-" ) unary | factor
//! factor    ::= "(" bool ")" | loc | "rover" "." get
//!             | NUM | REAL | STRING | "true" | "false"
//! ```
//!
//! Every node type parses itself through [`FromTokens`], one function per
//! non-terminal, with a single token of lookahead. Binary chains collapse
//! into left-associative [`ast::BinaryExpression`] nodes while parsing.

pub mod ast;
mod parse_state;

pub use parse_state::*;

use std::{error::Error, fmt::Display};

use crate::lexer::{Position, Token, TokenKind};

use self::ast::Program;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnexpectedToken {
        found: String,
        expected: String,
        position: Position,
    },
    UnexpectedEof {
        expected: String,
    },
}

impl ParseError {
    /// Build the error for a token that does not fit the current production.
    pub fn unexpected(token: &Token, expected: impl Into<String>) -> Self {
        if token.kind == TokenKind::Eos {
            return ParseError::UnexpectedEof {
                expected: expected.into(),
            };
        }

        ParseError::UnexpectedToken {
            found: token.lexeme.clone(),
            expected: expected.into(),
            position: token.position,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                found,
                expected,
                position,
            } => write!(
                f,
                "Unexpected token found: {found}, expected: {expected} (line {}, col {})",
                position.0, position.1
            ),
            ParseError::UnexpectedEof { expected } => {
                write!(f, "hit end of input while expecting {expected}")
            }
        }
    }
}

impl Error for ParseError {}

/// Trait for everything which can be parsed out of the token stream.
pub trait FromTokens: Sized {
    fn parse(state: &mut ParseState) -> Result<Self, ParseError>;
}

/// Parse a complete program out of a lexed token stream.
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    let mut state = ParseState::new(tokens);

    Program::parse(&mut state)
}

#[cfg(test)]
mod tests {
    use super::ast::*;
    use super::*;
    use crate::lexer::Lexer;
    use crate::rover::{Direction, Rotation};

    fn parse_source(source: &str) -> Result<Program, ParseError> {
        parse(Lexer::new(source).lex().expect("lexing failed"))
    }

    fn parse_expression(source: &str) -> Expression {
        let program = parse_source(&format!("{{ x = {source} ; }}")).expect("parsing failed");
        let Statement::Assignment(assignment) = &program.block.statements[0] else {
            panic!("expected an assignment");
        };

        assignment.value.clone()
    }

    fn binary(
        operator: BinaryOperator,
        lhs: Expression,
        rhs: Expression,
    ) -> Expression {
        Expression::Binary(BinaryExpression {
            operator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    #[test]
    fn test_parse_empty_block() {
        let program = parse_source("{ }").unwrap();

        assert_eq!(
            program,
            Program {
                block: Block {
                    declarations: vec![],
                    statements: vec![],
                }
            }
        );
    }

    #[test]
    fn test_parse_declarations() {
        let program = parse_source("{ int x ; double a [ 3 ] [ 4 ] ; }").unwrap();

        assert_eq!(
            program.block.declarations,
            vec![
                Declaration {
                    base: Base::Int,
                    dimensions: vec![],
                    name: "x".into(),
                },
                Declaration {
                    base: Base::Double,
                    dimensions: vec![3, 4],
                    name: "a".into(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_rejects_zero_array_size() {
        assert_eq!(
            parse_source("{ int a [ 0 ] ; }"),
            Err(ParseError::UnexpectedToken {
                found: "0".into(),
                expected: "a positive array size".into(),
                position: (1, 11),
            })
        );
    }

    #[test]
    fn test_parse_declarations_must_precede_statements() {
        let result = parse_source("{ x = 1 ; int x ; }");

        assert!(matches!(result, Err(ParseError::UnexpectedToken { .. })));
    }

    #[test]
    fn test_parse_precedence() {
        // 1 + 2 * 3 groups the multiplication first
        assert_eq!(
            parse_expression("1 + 2 * 3"),
            binary(
                BinaryOperator::Plus,
                Expression::Num(1),
                binary(
                    BinaryOperator::Times,
                    Expression::Num(2),
                    Expression::Num(3)
                ),
            )
        );
    }

    #[test]
    fn test_parse_left_associativity() {
        assert_eq!(
            parse_expression("1 - 2 - 3"),
            binary(
                BinaryOperator::Minus,
                binary(
                    BinaryOperator::Minus,
                    Expression::Num(1),
                    Expression::Num(2)
                ),
                Expression::Num(3),
            )
        );
    }

    #[test]
    fn test_parse_parentheses_override_precedence() {
        assert_eq!(
            parse_expression("( 1 + 2 ) * 3"),
            binary(
                BinaryOperator::Times,
                binary(
                    BinaryOperator::Plus,
                    Expression::Num(1),
                    Expression::Num(2)
                ),
                Expression::Num(3),
            )
        );
    }

    #[test]
    fn test_parse_boolean_chain() {
        // || binds weaker than &&
        assert_eq!(
            parse_expression("true || false && true"),
            binary(
                BinaryOperator::Or,
                Expression::Bool(true),
                binary(
                    BinaryOperator::And,
                    Expression::Bool(false),
                    Expression::Bool(true)
                ),
            )
        );
    }

    #[test]
    fn test_parse_unary_chain() {
        assert_eq!(
            parse_expression("! ! true"),
            Expression::Unary(UnaryExpression {
                operator: UnaryOperator::Not,
                operand: Box::new(Expression::Unary(UnaryExpression {
                    operator: UnaryOperator::Not,
                    operand: Box::new(Expression::Bool(true)),
                })),
            })
        );
    }

    #[test]
    fn test_parse_relational_does_not_chain() {
        let result = parse_source("{ x = 1 < 2 < 3 ; }");

        assert_eq!(
            result,
            Err(ParseError::UnexpectedToken {
                found: "<".into(),
                expected: "';'".into(),
                position: (1, 13),
            })
        );
    }

    #[test]
    fn test_parse_subscripted_assignment() {
        let program = parse_source("{ a [ 0 ] [ i + 1 ] = 5 ; }").unwrap();

        assert_eq!(
            program.block.statements,
            vec![Statement::Assignment(Assignment {
                target: Loc {
                    name: "a".into(),
                    indices: vec![
                        Expression::Num(0),
                        binary(
                            BinaryOperator::Plus,
                            Expression::Loc(Loc {
                                name: "i".into(),
                                indices: vec![],
                            }),
                            Expression::Num(1),
                        ),
                    ],
                },
                value: Expression::Num(5),
            })]
        );
    }

    #[test]
    fn test_parse_dangling_else_binds_to_nearest_if() {
        let program = parse_source("{ if ( true ) if ( false ) ; else ; }").unwrap();

        let Statement::If(outer) = &program.block.statements[0] else {
            panic!("expected an if statement");
        };
        assert!(outer.else_branch.is_none());

        let Statement::If(inner) = outer.then_branch.as_ref() else {
            panic!("expected a nested if statement");
        };
        assert!(inner.else_branch.is_some());
    }

    #[test]
    fn test_parse_while_with_block_body() {
        let program = parse_source("{ while ( true ) { print 1 ; } }").unwrap();

        let Statement::While(while_loop) = &program.block.statements[0] else {
            panic!("expected a while loop");
        };
        assert_eq!(while_loop.condition, Expression::Bool(true));
        assert!(matches!(while_loop.body.as_ref(), Statement::Block(_)));
    }

    #[test]
    fn test_parse_empty_statement() {
        let program = parse_source("{ ; ; }").unwrap();

        assert_eq!(
            program.block.statements,
            vec![Statement::Empty, Statement::Empty]
        );
    }

    #[test]
    fn test_parse_print() {
        let program = parse_source("{ print \"hi there\" ; }").unwrap();

        assert_eq!(
            program.block.statements,
            vec![Statement::Print(PrintStatement {
                value: Expression::Str("hi there".into()),
            })]
        );
    }

    #[test]
    fn test_parse_rover_actions() {
        let program = parse_source(
            "{ rover . scan ; rover . move up 3 ; rover . turn left ; rover . change_map \"maps/map2.txt\" ; }",
        )
        .unwrap();

        assert_eq!(
            program.block.statements,
            vec![
                Statement::Rover(RoverAction::Scan),
                Statement::Rover(RoverAction::Move {
                    direction: Direction::Up,
                    steps: Expression::Num(3),
                }),
                Statement::Rover(RoverAction::Turn(Rotation::Left)),
                Statement::Rover(RoverAction::ChangeMap(Expression::Str(
                    "maps/map2.txt".into()
                ))),
            ]
        );
    }

    #[test]
    fn test_parse_rover_getters() {
        assert_eq!(
            parse_expression("rover . x_pos + rover . max_move up"),
            binary(
                BinaryOperator::Plus,
                Expression::Getter(RoverGetter::XPos),
                Expression::Getter(RoverGetter::MaxMove(Direction::Up)),
            )
        );
    }

    #[test]
    fn test_parse_getter_rejected_as_action() {
        let result = parse_source("{ rover . x_pos ; }");

        assert_eq!(
            result,
            Err(ParseError::UnexpectedToken {
                found: "x_pos".into(),
                expected: "a rover action".into(),
                position: (1, 11),
            })
        );
    }

    #[test]
    fn test_parse_action_rejected_as_getter() {
        let result = parse_source("{ x = rover . drill ; }");

        assert_eq!(
            result,
            Err(ParseError::UnexpectedToken {
                found: "drill".into(),
                expected: "a rover getter".into(),
                position: (1, 15),
            })
        );
    }

    #[test]
    fn test_parse_missing_semicolon() {
        let result = parse_source("{ x = 1 }");

        assert_eq!(
            result,
            Err(ParseError::UnexpectedToken {
                found: "}".into(),
                expected: "';'".into(),
                position: (1, 9),
            })
        );
    }

    #[test]
    fn test_parse_trailing_input_rejected() {
        let result = parse_source("{ } x");

        assert_eq!(
            result,
            Err(ParseError::UnexpectedToken {
                found: "x".into(),
                expected: "end of input".into(),
                position: (1, 5),
            })
        );
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(
            parse_source(""),
            Err(ParseError::UnexpectedEof {
                expected: "'{'".into(),
            })
        );
    }

    #[test]
    fn test_parse_round_trip() {
        let sources = [
            "{ }",
            "{ int x ; x = 1 + 2 * 3 ; }",
            "{ int a [ 3 ] [ 4 ] ; a [ 0 ] [ 1 ] = 5 ; }",
            "{ double d ; d = - 1.5 ; if ( d < 0.0 ) d = 0.0 ; else d = 1.0 ; }",
            "{ bool b ; b = true && ! false || 1 <= 2 ; }",
            "{ string s ; s = \"hello rover\" ; print s ; }",
            "{ int i ; i = 0 ; while ( i < 10 ) { i = i + 1 ; } }",
            "{ rover . move down 2 ; rover . turn right ; print rover . can_move left ; }",
        ];

        for source in sources {
            let program = parse_source(source).unwrap();
            let printed = program.to_string();
            let reparsed = parse_source(&printed)
                .unwrap_or_else(|e| panic!("failed to reparse '{printed}': {e}"));

            assert_eq!(program, reparsed, "round trip failed for '{source}'");
        }
    }
}
