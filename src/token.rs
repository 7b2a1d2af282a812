use std::fmt;

use serde::{Deserialize, Serialize};

/// A byte offset plus line/column location in source text.
///
/// Lines are 1-based; columns are 0-based and count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// The position of the first character of any source text.
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 0,
    };

    #[must_use]
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Half-open `[start, end)` source range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `at`.
    #[must_use]
    pub const fn empty(at: Position) -> Self {
        Self { start: at, end: at }
    }

    /// Span running from the start of `self` to the end of `other`.
    #[must_use]
    pub const fn to(self, other: Self) -> Self {
        Self {
            start: self.start,
            end: other.end,
        }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end.offset - self.start.offset
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Returns true if `other` lies entirely within `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Reserved word from [`KEYWORDS`].
    Keyword,
    Identifier,
    /// Run of decimal digits.
    Numeric,
    /// Quoted string, quotes included in the token text.
    String,
    /// Entry of [`OPERATORS`].
    Operator,
    /// One of `( ) { } ; , . [ ]`.
    Punctuation,
    /// A single whitespace character other than `\n`.
    Whitespace,
    /// A single `\n`.
    Newline,
    /// Line comment (`// ...`), without the terminating newline.
    Comment,
}

impl TokenKind {
    /// Whitespace, newlines and comments carry no grammar.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline | Self::Comment)
    }
}

/// A single token with its kind, source text, and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Returns true for a punctuation token spelled `punct`.
    #[must_use]
    pub fn is_punct(&self, punct: &str) -> bool {
        self.kind == TokenKind::Punctuation && self.text == punct
    }

    /// Returns true for an operator token spelled `op`.
    #[must_use]
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }
}

/// Reserved words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Let,
    Const,
    Var,
    If,
    Else,
    While,
    For,
    Function,
    Return,
    Switch,
    Async,
    Await,
}

/// Keyword spellings.
pub const KEYWORDS: &[(&str, Keyword)] = &[
    ("let", Keyword::Let),
    ("const", Keyword::Const),
    ("var", Keyword::Var),
    ("if", Keyword::If),
    ("else", Keyword::Else),
    ("while", Keyword::While),
    ("for", Keyword::For),
    ("function", Keyword::Function),
    ("return", Keyword::Return),
    ("switch", Keyword::Switch),
    ("async", Keyword::Async),
    ("await", Keyword::Await),
];

impl Keyword {
    /// Look up an identifier-shaped word in the keyword table.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(spelling, _)| *spelling == word)
            .map(|&(_, keyword)| keyword)
    }
}

/// Operators known to the lexer, serialized as their spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "*")]
    Star,
    #[serde(rename = "/")]
    Slash,
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "!")]
    Bang,
    #[serde(rename = "?")]
    Question,
    #[serde(rename = ":")]
    Colon,
    #[serde(rename = "&")]
    Ampersand,
    #[serde(rename = "|")]
    Pipe,
    #[serde(rename = "==")]
    EqualEqual,
    #[serde(rename = "!=")]
    BangEqual,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "&&")]
    AndAnd,
    #[serde(rename = "||")]
    OrOr,
    #[serde(rename = "+=")]
    PlusAssign,
    #[serde(rename = "-=")]
    MinusAssign,
    #[serde(rename = "*=")]
    StarAssign,
    #[serde(rename = "/=")]
    SlashAssign,
    #[serde(rename = "%=")]
    PercentAssign,
    #[serde(rename = "++")]
    PlusPlus,
    #[serde(rename = "--")]
    MinusMinus,
}

/// Operator spellings. All are ASCII and at most two characters long.
pub const OPERATORS: &[(&str, Operator)] = &[
    ("+", Operator::Plus),
    ("-", Operator::Minus),
    ("*", Operator::Star),
    ("/", Operator::Slash),
    ("%", Operator::Percent),
    ("=", Operator::Assign),
    ("<", Operator::Less),
    (">", Operator::Greater),
    ("!", Operator::Bang),
    ("?", Operator::Question),
    (":", Operator::Colon),
    ("&", Operator::Ampersand),
    ("|", Operator::Pipe),
    ("==", Operator::EqualEqual),
    ("!=", Operator::BangEqual),
    ("<=", Operator::LessEqual),
    (">=", Operator::GreaterEqual),
    ("&&", Operator::AndAnd),
    ("||", Operator::OrOr),
    ("+=", Operator::PlusAssign),
    ("-=", Operator::MinusAssign),
    ("*=", Operator::StarAssign),
    ("/=", Operator::SlashAssign),
    ("%=", Operator::PercentAssign),
    ("++", Operator::PlusPlus),
    ("--", Operator::MinusMinus),
];

impl Operator {
    /// Look up an exact spelling in the operator table.
    #[must_use]
    pub fn from_spelling(text: &str) -> Option<Self> {
        OPERATORS
            .iter()
            .find(|(spelling, _)| *spelling == text)
            .map(|&(_, op)| op)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        OPERATORS
            .iter()
            .find(|&&(_, op)| op == self)
            .map_or("?", |&(spelling, _)| spelling)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-character punctuation.
pub const PUNCTUATION: &[char] = &['(', ')', '{', '}', ';', ',', '.', '[', ']'];
