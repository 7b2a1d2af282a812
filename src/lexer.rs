use std::fmt;

use tracing::debug;

use crate::token::{Keyword, Operator, PUNCTUATION, Position, Span, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
    /// String literal with no closing quote before end of input.
    UnterminatedString,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character: {ch:?}")
            }
            Self::UnterminatedString => {
                write!(f, "unterminated string literal")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", position.line, position.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
}

/// Tokenize source text into a lossless token stream.
///
/// Every character of `input` ends up in exactly one token, so
/// concatenating the token texts reproduces the input.
///
/// # Errors
///
/// Returns `LexError` on an unterminated string literal or a
/// character that starts no token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let result = Lexer::new(input).tokenize();
    match &result {
        Ok(tokens) => debug!(tokens = tokens.len(), bytes = input.len(), "tokenized source"),
        Err(err) => debug!(%err, "tokenize failed"),
    }
    result
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            col: 0,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            let start = self.position();

            let kind = match ch {
                '\n' => {
                    self.advance();
                    TokenKind::Newline
                }
                // U+FEFF is whitespace in JavaScript but not in Unicode.
                c if c.is_whitespace() || c == '\u{FEFF}' => {
                    self.advance();
                    TokenKind::Whitespace
                }
                '/' if self.peek_at(1) == Some('/') => {
                    self.advance_while(|c| c != '\n');
                    TokenKind::Comment
                }
                c if c.is_ascii_digit() => {
                    self.advance_while(|c| c.is_ascii_digit());
                    TokenKind::Numeric
                }
                '"' | '\'' => {
                    self.read_string(ch, start)?;
                    TokenKind::String
                }
                c if is_ident_start(c) => {
                    self.advance_while(is_ident_continue);
                    if Keyword::from_word(&self.input[start.offset..self.pos]).is_some() {
                        TokenKind::Keyword
                    } else {
                        TokenKind::Identifier
                    }
                }
                _ => {
                    if let Some(op) = self.match_operator() {
                        // operator spellings are ASCII, one byte per char
                        for _ in 0..op.as_str().len() {
                            self.advance();
                        }
                        TokenKind::Operator
                    } else if PUNCTUATION.contains(&ch) {
                        self.advance();
                        TokenKind::Punctuation
                    } else {
                        return Err(LexError {
                            kind: LexErrorKind::UnexpectedCharacter(ch),
                            position: start,
                        });
                    }
                }
            };

            tokens.push(Token {
                kind,
                text: self.input[start.offset..self.pos].to_string(),
                span: Span::new(start, self.position()),
            });
        }

        Ok(tokens)
    }

    const fn position(&self) -> Position {
        Position::new(self.pos, self.line, self.col)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.col = 0;
            } else {
                self.col += 1;
            }
        }
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    /// Longest operator starting at the cursor.
    fn match_operator(&self) -> Option<Operator> {
        let rest = &self.input[self.pos..];
        rest.get(..2)
            .and_then(Operator::from_spelling)
            .or_else(|| rest.get(..1).and_then(Operator::from_spelling))
    }

    fn read_string(&mut self, quote: char, start: Position) -> Result<(), LexError> {
        self.advance(); // opening quote

        loop {
            match self.peek() {
                None => {
                    return Err(LexError {
                        kind: LexErrorKind::UnterminatedString,
                        position: start,
                    });
                }
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(());
                }
                Some(_) => self.advance(),
            }
        }
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
