//! # Lexer
//!
//! Turns raw RoverScript source into a token stream. Lexing runs in two
//! passes: a preprocessing scan that strips `//` and `/* */` comments while
//! leaving quoted strings untouched, and a tokenization scan that splits the
//! remaining text on whitespace (a double-quoted string counts as a single
//! lexeme) and classifies every lexeme.

mod token;

pub use token::*;

use std::{collections::HashMap, error::Error, fmt::Display, iter::Peekable, str::Chars};

use once_cell::sync::Lazy;

use crate::rover::Direction;

macro_rules! terminal {
    ($map:ident, $value:expr, $kind:expr) => {
        $map.insert($value, $kind);
    };
}

static TERMINALS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::new();

    terminal!(m, "(", TokenKind::OpenParen);
    terminal!(m, ")", TokenKind::CloseParen);
    terminal!(m, "{", TokenKind::OpenBrace);
    terminal!(m, "}", TokenKind::CloseBrace);
    terminal!(m, "[", TokenKind::OpenBracket);
    terminal!(m, "]", TokenKind::CloseBracket);
    terminal!(m, ";", TokenKind::Semicolon);
    terminal!(m, ".", TokenKind::Dot);
    terminal!(m, "=", TokenKind::Assign);
    terminal!(m, "+", TokenKind::Plus);
    terminal!(m, "-", TokenKind::Minus);
    terminal!(m, "*", TokenKind::Star);
    terminal!(m, "/", TokenKind::Slash);
    terminal!(m, "!", TokenKind::Not);
    terminal!(m, "&&", TokenKind::And);
    terminal!(m, "||", TokenKind::Or);
    terminal!(m, "==", TokenKind::Eq);
    terminal!(m, "!=", TokenKind::Neq);
    terminal!(m, "<", TokenKind::Lt);
    terminal!(m, ">", TokenKind::Gt);
    terminal!(m, "<=", TokenKind::Le);
    terminal!(m, ">=", TokenKind::Ge);
    terminal!(m, "if", TokenKind::If);
    terminal!(m, "else", TokenKind::Else);
    terminal!(m, "while", TokenKind::While);
    terminal!(m, "print", TokenKind::Print);
    terminal!(m, "rover", TokenKind::Rover);
    terminal!(m, "true", TokenKind::True);
    terminal!(m, "false", TokenKind::False);
    terminal!(m, "int", TokenKind::Basic(Base::Int));
    terminal!(m, "double", TokenKind::Basic(Base::Double));
    terminal!(m, "bool", TokenKind::Basic(Base::Bool));
    terminal!(m, "string", TokenKind::Basic(Base::Str));
    terminal!(m, "up", TokenKind::Direction(Direction::Up));
    terminal!(m, "down", TokenKind::Direction(Direction::Down));
    terminal!(m, "left", TokenKind::Direction(Direction::Left));
    terminal!(m, "right", TokenKind::Direction(Direction::Right));
    terminal!(m, "scan", TokenKind::RoverWord(RoverWord::Scan));
    terminal!(m, "drill", TokenKind::RoverWord(RoverWord::Drill));
    terminal!(m, "shockwave", TokenKind::RoverWord(RoverWord::Shockwave));
    terminal!(m, "build", TokenKind::RoverWord(RoverWord::Build));
    terminal!(m, "sonar", TokenKind::RoverWord(RoverWord::Sonar));
    terminal!(m, "push", TokenKind::RoverWord(RoverWord::Push));
    terminal!(m, "recharge", TokenKind::RoverWord(RoverWord::Recharge));
    terminal!(m, "backflip", TokenKind::RoverWord(RoverWord::Backflip));
    terminal!(
        m,
        "print_inventory",
        TokenKind::RoverWord(RoverWord::PrintInventory)
    );
    terminal!(m, "print_map", TokenKind::RoverWord(RoverWord::PrintMap));
    terminal!(m, "print_pos", TokenKind::RoverWord(RoverWord::PrintPos));
    terminal!(
        m,
        "print_orientation",
        TokenKind::RoverWord(RoverWord::PrintOrientation)
    );
    terminal!(m, "change_map", TokenKind::RoverWord(RoverWord::ChangeMap));
    terminal!(m, "move", TokenKind::RoverWord(RoverWord::Move));
    terminal!(m, "turn", TokenKind::RoverWord(RoverWord::Turn));
    terminal!(
        m,
        "orientation",
        TokenKind::RoverWord(RoverWord::Orientation)
    );
    terminal!(m, "x_pos", TokenKind::RoverWord(RoverWord::XPos));
    terminal!(m, "y_pos", TokenKind::RoverWord(RoverWord::YPos));
    terminal!(m, "gold", TokenKind::RoverWord(RoverWord::Gold));
    terminal!(m, "silver", TokenKind::RoverWord(RoverWord::Silver));
    terminal!(m, "copper", TokenKind::RoverWord(RoverWord::Copper));
    terminal!(m, "iron", TokenKind::RoverWord(RoverWord::Iron));
    terminal!(m, "power", TokenKind::RoverWord(RoverWord::Power));
    terminal!(m, "max_move", TokenKind::RoverWord(RoverWord::MaxMove));
    terminal!(m, "can_move", TokenKind::RoverWord(RoverWord::CanMove));

    m
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    UnexpectedToken { lexeme: String, position: Position },
    MalformedNumber { lexeme: String, position: Position },
    UnterminatedString { line: usize },
    UnterminatedComment { line: usize },
}

pub type LexResult<T> = Result<T, LexError>;

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexError::UnexpectedToken { lexeme, position } => write!(
                f,
                "Unexpected token: {lexeme} (line {}, col {})",
                position.0, position.1
            ),
            LexError::MalformedNumber { lexeme, position } => write!(
                f,
                "Malformed numeric literal: {lexeme} (line {}, col {})",
                position.0, position.1
            ),
            LexError::UnterminatedString { line } => {
                write!(f, "Unterminated string starting on line {line}")
            }
            LexError::UnterminatedComment { line } => {
                write!(f, "Unterminated block comment starting on line {line}")
            }
        }
    }
}

impl Error for LexError {}

/// Scanning mode of the preprocessing pass. The three non-base modes are
/// mutually exclusive.
enum Mode {
    Base,
    LineComment,
    BlockComment,
    InString,
}

pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Lex the whole input. The returned stream always ends with an
    /// end-of-stream token.
    pub fn lex(self) -> LexResult<Vec<Token>> {
        let stripped = Self::strip_comments(self.input)?;

        Self::tokenize(&stripped)
    }

    /// Remove both comment forms in a single left-to-right scan. Quoted
    /// strings pass through verbatim, quotes included, and newlines inside
    /// comments are kept so token positions stay aligned with the input.
    fn strip_comments(input: &str) -> LexResult<String> {
        let mut output = String::with_capacity(input.len());
        let mut mode = Mode::Base;
        let mut line = 1;
        let mut opened_on = 1;

        let mut chars = input.chars().peekable();
        while let Some(current) = chars.next() {
            if current == '\n' {
                line += 1;
            }

            match mode {
                Mode::Base => match current {
                    '"' => {
                        mode = Mode::InString;
                        opened_on = line;
                        output.push(current);
                    }
                    '/' if chars.peek() == Some(&'/') => {
                        chars.next();
                        mode = Mode::LineComment;
                    }
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        mode = Mode::BlockComment;
                        opened_on = line;
                    }
                    _ => output.push(current),
                },
                Mode::LineComment => {
                    if current == '\n' {
                        mode = Mode::Base;
                        output.push('\n');
                    }
                }
                Mode::BlockComment => {
                    if current == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        mode = Mode::Base;
                    } else if current == '\n' {
                        output.push('\n');
                    }
                }
                Mode::InString => {
                    output.push(current);
                    if current == '"' {
                        mode = Mode::Base;
                    }
                }
            }
        }

        match mode {
            Mode::InString => Err(LexError::UnterminatedString { line: opened_on }),
            Mode::BlockComment => Err(LexError::UnterminatedComment { line: opened_on }),
            _ => Ok(output),
        }
    }

    fn tokenize(text: &str) -> LexResult<Vec<Token>> {
        let mut tokens = vec![];
        let mut line = 1;
        let mut col = 1;

        let mut chars = text.chars().peekable();
        while let Some(&next) = chars.peek() {
            if next.is_whitespace() {
                chars.next();
                if next == '\n' {
                    line += 1;
                    col = 1;
                } else {
                    col += 1;
                }
                continue;
            }

            let position = (line, col);
            let lexeme = if next == '"' {
                Self::read_string(&mut chars, &mut line, &mut col)?
            } else {
                Self::read_bare(&mut chars, &mut col)
            };

            tokens.push(Self::classify(lexeme, position)?);
        }

        tokens.push(Token::eos((line, col)));

        Ok(tokens)
    }

    /// Read a complete double-quoted string, quotes included. Newlines inside
    /// the string are preserved.
    fn read_string(
        chars: &mut Peekable<Chars>,
        line: &mut usize,
        col: &mut usize,
    ) -> LexResult<String> {
        let opened_on = *line;
        let mut lexeme = String::new();

        // opening quote
        if let Some(quote) = chars.next() {
            lexeme.push(quote);
            *col += 1;
        }

        loop {
            let Some(current) = chars.next() else {
                return Err(LexError::UnterminatedString { line: opened_on });
            };

            lexeme.push(current);
            if current == '\n' {
                *line += 1;
                *col = 1;
            } else {
                *col += 1;
            }

            if current == '"' {
                return Ok(lexeme);
            }
        }
    }

    /// Read a lexeme up to the next whitespace or quote.
    fn read_bare(chars: &mut Peekable<Chars>, col: &mut usize) -> String {
        let mut lexeme = String::new();

        while let Some(&next) = chars.peek() {
            if next.is_whitespace() || next == '"' {
                break;
            }
            lexeme.push(next);
            chars.next();
            *col += 1;
        }

        lexeme
    }

    /// Classify a single lexeme. Order matters: the terminal table wins over
    /// the literal checks, and identifiers are the last resort.
    fn classify(lexeme: String, position: Position) -> LexResult<Token> {
        if let Some(kind) = TERMINALS.get(lexeme.as_str()) {
            return Ok(Token::new(lexeme, kind.clone(), position));
        }

        if Self::has_integer_shape(&lexeme) {
            match lexeme.parse::<i64>() {
                Ok(value) if value.to_string() == lexeme => {
                    return Ok(Token::new(lexeme, TokenKind::Num, position));
                }
                // leading zeros or an explicit '+': fall through to the
                // floating point check
                Ok(_) => {}
                Err(_) => return Err(LexError::MalformedNumber { lexeme, position }),
            }
        }

        if lexeme.parse::<f64>().is_ok() {
            return Ok(Token::new(lexeme, TokenKind::Real, position));
        }

        if lexeme.len() >= 2 && lexeme.starts_with('"') && lexeme.ends_with('"') {
            return Ok(Token::new(lexeme, TokenKind::Str, position));
        }

        if Self::is_identifier(&lexeme) {
            return Ok(Token::new(lexeme, TokenKind::Id, position));
        }

        Err(LexError::UnexpectedToken { lexeme, position })
    }

    /// An optional sign followed by at least one digit.
    fn has_integer_shape(lexeme: &str) -> bool {
        let digits = lexeme
            .strip_prefix(['+', '-'])
            .unwrap_or(lexeme)
            .as_bytes();

        !digits.is_empty() && digits.iter().all(|b| b.is_ascii_digit())
    }

    fn is_identifier(lexeme: &str) -> bool {
        let mut chars = lexeme.chars();

        let Some(first) = chars.next() else {
            return false;
        };

        (first.is_ascii_alphabetic() || first == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .lex()
            .expect("lexing failed")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_lex_empty_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eos]);
    }

    #[test]
    fn test_lex_declaration() {
        assert_eq!(
            kinds("{ int x ; }"),
            vec![
                TokenKind::OpenBrace,
                TokenKind::Basic(Base::Int),
                TokenKind::Id,
                TokenKind::Semicolon,
                TokenKind::CloseBrace,
                TokenKind::Eos,
            ]
        );
    }

    #[test]
    fn test_lex_numbers() {
        assert_eq!(
            kinds("3 -7 2.0 -0.5"),
            vec![
                TokenKind::Num,
                TokenKind::Num,
                TokenKind::Real,
                TokenKind::Real,
                TokenKind::Eos,
            ]
        );
    }

    #[test]
    fn test_lex_leading_zeros_become_real() {
        // fails the integer round-trip but parses as floating
        assert_eq!(kinds("007"), vec![TokenKind::Real, TokenKind::Eos]);
    }

    #[test]
    fn test_lex_overflowing_integer() {
        let result = Lexer::new("99999999999999999999999").lex();

        assert_eq!(
            result,
            Err(LexError::MalformedNumber {
                lexeme: "99999999999999999999999".into(),
                position: (1, 1),
            })
        );
    }

    #[test]
    fn test_lex_string_is_a_single_token() {
        let tokens = Lexer::new("print \"hello rover\" ;").lex().unwrap();

        assert_eq!(
            tokens[1],
            Token::new("\"hello rover\"", TokenKind::Str, (1, 7))
        );
    }

    #[test]
    fn test_lex_line_comment() {
        assert_eq!(
            kinds("x // the rest is gone\n= 1"),
            vec![
                TokenKind::Id,
                TokenKind::Assign,
                TokenKind::Num,
                TokenKind::Eos,
            ]
        );
    }

    #[test]
    fn test_lex_block_comment() {
        assert_eq!(
            kinds("x /* spans\nlines */ = 1"),
            vec![
                TokenKind::Id,
                TokenKind::Assign,
                TokenKind::Num,
                TokenKind::Eos,
            ]
        );
    }

    #[test]
    fn test_lex_comment_markers_inside_string() {
        assert_eq!(
            kinds("\"not // a /* comment\""),
            vec![TokenKind::Str, TokenKind::Eos]
        );
    }

    #[test]
    fn test_lex_unterminated_block_comment() {
        assert_eq!(
            Lexer::new("x = 1 /* oops").lex(),
            Err(LexError::UnterminatedComment { line: 1 })
        );
    }

    #[test]
    fn test_lex_unterminated_string() {
        assert_eq!(
            Lexer::new("print \"oops").lex(),
            Err(LexError::UnterminatedString { line: 1 })
        );
    }

    #[test]
    fn test_lex_rover_words() {
        assert_eq!(
            kinds("rover . move up 3 ;"),
            vec![
                TokenKind::Rover,
                TokenKind::Dot,
                TokenKind::RoverWord(RoverWord::Move),
                TokenKind::Direction(Direction::Up),
                TokenKind::Num,
                TokenKind::Semicolon,
                TokenKind::Eos,
            ]
        );
    }

    #[test]
    fn test_lex_keywords_win_over_identifiers() {
        assert_eq!(
            kinds("while whilst"),
            vec![TokenKind::While, TokenKind::Id, TokenKind::Eos]
        );
    }

    #[test]
    fn test_lex_unexpected_token() {
        assert_eq!(
            Lexer::new("x = @@ ;").lex(),
            Err(LexError::UnexpectedToken {
                lexeme: "@@".into(),
                position: (1, 5),
            })
        );
    }

    #[test]
    fn test_lex_positions() {
        let tokens = Lexer::new("x =\n  1").lex().unwrap();

        let positions = tokens
            .iter()
            .map(|token| token.position)
            .collect::<Vec<_>>();
        assert_eq!(positions, vec![(1, 1), (1, 3), (2, 3), (2, 4)]);
    }
}
