//! Lexer and recursive-descent parser for a small JavaScript-like
//! language.
//!
//! The lexer is lossless: every character of the source lands in
//! exactly one token, whitespace and comments included. The parser
//! skips that trivia and builds a tree whose nodes carry the exact
//! source span of the tokens they were built from.
//!
//! # Quick start
//!
//! ## Tokenize and parse
//!
//! ```
//! use minijs::{Expression, Statement, parse, tokenize};
//!
//! let tokens = tokenize("const x = 42;").unwrap();
//! let program = parse(&tokens).unwrap();
//!
//! let Statement::VariableDeclaration(decl) = &program.body[0] else {
//!     panic!("expected a declaration");
//! };
//! assert_eq!(decl.declarations[0].id.name, "x");
//! assert!(matches!(
//!     &decl.declarations[0].init,
//!     Some(Expression::Literal(lit)) if lit.value == "42"
//! ));
//! ```
//!
//! ## Binary expressions
//!
//! Operators are written before their operands by default. Infix
//! notation with conventional precedence is available through
//! [`ParseOptions`].
//!
//! ```
//! use minijs::{Notation, ParseOptions, parse_str, parse_with, print_tree, tokenize};
//!
//! let prefix = parse_str("+ a * b c").unwrap();
//! let tokens = tokenize("a + b * c").unwrap();
//! let infix = parse_with(&tokens, &ParseOptions::new().notation(Notation::Infix)).unwrap();
//!
//! assert!(print_tree(&prefix).contains("BinaryExpression *"));
//! assert!(print_tree(&infix).contains("BinaryExpression *"));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token;

pub use ast::{
    BinaryExpression, BlockStatement, DeclarationKind, Expression, ExpressionStatement,
    FunctionDeclaration, Identifier, Literal, LiteralKind, Program, ReturnStatement, Statement,
    VariableDeclaration, VariableDeclarator,
};
pub use lexer::{LexError, LexErrorKind, tokenize};
pub use parser::{
    MAX_NESTING_DEPTH, Notation, ParseError, ParseErrorKind, ParseOptions, parse, parse_with,
};
pub use printer::print_tree;
pub use token::{Keyword, Operator, Position, Span, Token, TokenKind};

/// Unified error type covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Where in the source the error was detected.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Lex(err) => err.position,
            Self::Parse(err) => err.position,
        }
    }
}

/// Tokenize and parse a source string in one step, using prefix
/// notation.
pub fn parse_str(input: &str) -> Result<Program, Error> {
    parse_str_with(input, &ParseOptions::default())
}

/// Tokenize and parse a source string with explicit options.
pub fn parse_str_with(input: &str, options: &ParseOptions) -> Result<Program, Error> {
    let tokens = tokenize(input)?;
    Ok(parse_with(&tokens, options)?)
}
