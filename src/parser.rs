use std::fmt;

use tracing::{debug, trace};

use crate::ast::{
    BinaryExpression, BlockStatement, DeclarationKind, Expression, ExpressionStatement,
    FunctionDeclaration, Identifier, Literal, LiteralKind, Program, ReturnStatement, Statement,
    VariableDeclaration, VariableDeclarator,
};
use crate::token::{Keyword, Operator, Position, Span, Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A construct required something other than the token found.
    UnexpectedToken { expected: String, found: String },
    /// The token stream ended inside `context`.
    UnexpectedEndOfInput { context: String },
    /// An operator without the operands it needs.
    MissingOperand { operator: String },
    /// Blocks or binary expressions nested more than `limit` levels.
    NestingTooDeep { limit: usize },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found '{found}'")
            }
            Self::UnexpectedEndOfInput { context } => {
                write!(f, "unexpected end of input in {context}")
            }
            Self::MissingOperand { operator } => {
                write!(f, "missing operand for '{operator}'")
            }
            Self::NestingTooDeep { limit } => {
                write!(f, "nesting deeper than {limit} levels")
            }
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", position.line, position.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
}

/// How binary expressions are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    /// `+ a b`: the operator comes first and takes the next two
    /// expressions as operands. No precedence is involved.
    #[default]
    Prefix,
    /// `a + b * c` with conventional precedence. A newline before an
    /// operator ends the expression.
    Infix,
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub notation: Notation,
}

impl ParseOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            notation: Notation::Prefix,
        }
    }

    #[must_use]
    pub const fn notation(mut self, notation: Notation) -> Self {
        self.notation = notation;
        self
    }
}

/// Parse a token stream into a `Program` using prefix notation.
///
/// Whitespace, newline and comment tokens are skipped.
///
/// # Errors
///
/// Returns `ParseError` at the first malformed construct; no partial
/// tree is produced.
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    parse_with(tokens, &ParseOptions::default())
}

/// Parse a token stream with explicit options.
///
/// # Errors
///
/// Returns `ParseError` at the first malformed construct.
pub fn parse_with(tokens: &[Token], options: &ParseOptions) -> Result<Program, ParseError> {
    let result = Parser::new(tokens, *options).parse_program();
    match &result {
        Ok(program) => debug!(
            statements = program.body.len(),
            notation = ?options.notation,
            "parsed program"
        ),
        Err(err) => debug!(%err, "parse failed"),
    }
    result
}

/// Deepest nesting of blocks and binary expressions the parser
/// accepts. Keeps recursion well inside the default thread stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Left and right binding power of an infix operator.
#[derive(Debug, Clone, Copy)]
struct BindingPower {
    left: u8,
    right: u8,
}

impl BindingPower {
    const fn left_assoc(precedence: u8) -> Self {
        Self {
            left: precedence,
            right: precedence + 1,
        }
    }

    const fn right_assoc(precedence: u8) -> Self {
        Self {
            left: precedence + 1,
            right: precedence,
        }
    }
}

/// Infix binding powers, loosest first. Operators without an entry
/// cannot continue an infix expression.
const fn binding_power(op: Operator) -> Option<BindingPower> {
    let bp = match op {
        Operator::Assign
        | Operator::PlusAssign
        | Operator::MinusAssign
        | Operator::StarAssign
        | Operator::SlashAssign
        | Operator::PercentAssign => BindingPower::right_assoc(1),
        Operator::OrOr => BindingPower::left_assoc(3),
        Operator::AndAnd => BindingPower::left_assoc(5),
        Operator::Pipe => BindingPower::left_assoc(7),
        Operator::Ampersand => BindingPower::left_assoc(9),
        Operator::EqualEqual | Operator::BangEqual => BindingPower::left_assoc(11),
        Operator::Less | Operator::Greater | Operator::LessEqual | Operator::GreaterEqual => {
            BindingPower::left_assoc(13)
        }
        Operator::Plus | Operator::Minus => BindingPower::left_assoc(15),
        Operator::Star | Operator::Slash | Operator::Percent => BindingPower::left_assoc(17),
        Operator::Bang
        | Operator::Question
        | Operator::Colon
        | Operator::PlusPlus
        | Operator::MinusMinus => return None,
    };
    Some(bp)
}

struct Parser<'a> {
    tokens: &'a [Token],
    /// Index just past the last consumed token.
    pos: usize,
    /// Last consumed significant token.
    last: Option<&'a Token>,
    options: ParseOptions,
    /// Blocks and binary expressions currently open.
    nesting_depth: usize,
}

impl<'a> Parser<'a> {
    const fn new(tokens: &'a [Token], options: ParseOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            last: None,
            options,
            nesting_depth: 0,
        }
    }

    fn parse_program(mut self) -> Result<Program, ParseError> {
        let first = self.peek();
        let body = self.parse_statements(false)?;
        let span = first.map_or_else(|| Span::empty(Position::START), |t| self.span_from(t));
        Ok(Program { body, span })
    }

    /// Statements up to end of input, or up to `}` inside a block.
    /// Empty statements (`;`) are consumed and dropped.
    fn parse_statements(&mut self, in_block: bool) -> Result<Vec<Statement>, ParseError> {
        let mut body = Vec::new();

        while let Some(token) = self.peek() {
            if in_block && token.is_punct("}") {
                break;
            }
            if token.is_punct(";") {
                self.bump();
                continue;
            }
            let statement = self.parse_statement()?;
            trace!(offset = statement.span().start.offset, "parsed statement");
            body.push(statement);
        }

        Ok(body)
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.end_of_input("statement"));
        };

        match token.kind {
            TokenKind::Keyword => match Keyword::from_word(&token.text) {
                Some(Keyword::Const) => self.parse_variable_declaration(DeclarationKind::Const),
                Some(Keyword::Let) => self.parse_variable_declaration(DeclarationKind::Let),
                Some(Keyword::Var) => self.parse_variable_declaration(DeclarationKind::Var),
                Some(Keyword::Function) => self.parse_function_declaration(),
                Some(Keyword::Return) => self.parse_return_statement(),
                _ => Err(Self::unexpected("statement", token)),
            },
            TokenKind::Punctuation if token.is_punct("{") => {
                Ok(Statement::BlockStatement(self.parse_block()?))
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_variable_declaration(
        &mut self,
        kind: DeclarationKind,
    ) -> Result<Statement, ParseError> {
        let keyword = self.bump_significant("variable declaration")?;

        let mut declarations = vec![self.parse_declarator()?];
        while self.eat_punct(",").is_some() {
            declarations.push(self.parse_declarator()?);
        }
        self.eat_punct(";");

        Ok(Statement::VariableDeclaration(VariableDeclaration {
            kind,
            declarations,
            span: self.span_from(keyword),
        }))
    }

    fn parse_declarator(&mut self) -> Result<VariableDeclarator, ParseError> {
        let id = self.expect_identifier("variable declaration")?;

        let init = if self.eat_operator("=").is_some() {
            Some(self.parse_expression("variable initializer")?)
        } else {
            None
        };

        let span = init.as_ref().map_or(id.span, |expr| id.span.to(expr.span()));
        Ok(VariableDeclarator { id, init, span })
    }

    fn parse_function_declaration(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.bump_significant("function declaration")?;
        let id = self.expect_identifier("function declaration")?;

        self.expect_punct("(", "function declaration")?;
        let mut params = Vec::new();
        if !self.at_punct(")") {
            loop {
                params.push(self.expect_identifier("parameter list")?);
                if self.eat_punct(",").is_none() {
                    break;
                }
            }
        }
        self.expect_punct(")", "parameter list")?;

        match self.peek() {
            Some(token) if token.is_punct("{") => {}
            Some(token) => return Err(Self::unexpected("'{'", token)),
            None => return Err(self.end_of_input("function declaration")),
        }
        let body = self.parse_block()?;

        Ok(Statement::FunctionDeclaration(FunctionDeclaration {
            id,
            params,
            body,
            span: self.span_from(keyword),
        }))
    }

    fn parse_block(&mut self) -> Result<BlockStatement, ParseError> {
        let open = self.expect_punct("{", "block statement")?;
        self.enter_nesting(open)?;
        let body = self.parse_statements(true);
        self.leave_nesting();
        let body = body?;
        self.expect_punct("}", "block statement")?;
        Ok(BlockStatement {
            body,
            span: self.span_from(open),
        })
    }

    fn parse_return_statement(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.bump_significant("return statement")?;

        // `return` followed by a line break returns nothing.
        let argument = match self.peek() {
            None => None,
            Some(_) if self.newline_before_next() => None,
            Some(token) if token.is_punct(";") || token.is_punct("}") => None,
            Some(_) => Some(self.parse_expression("return statement")?),
        };
        self.eat_punct(";");

        Ok(Statement::ReturnStatement(ReturnStatement {
            argument,
            span: self.span_from(keyword),
        }))
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        let Some(first) = self.peek() else {
            return Err(self.end_of_input("statement"));
        };
        let expression = self.parse_expression("expression statement")?;
        self.eat_punct(";");

        Ok(Statement::ExpressionStatement(ExpressionStatement {
            expression,
            span: self.span_from(first),
        }))
    }

    fn parse_expression(&mut self, context: &str) -> Result<Expression, ParseError> {
        if self.peek().is_none() {
            return Err(self.end_of_input(context));
        }
        match self.options.notation {
            Notation::Prefix => self.parse_prefix_expression(),
            Notation::Infix => self.parse_infix_expression(0),
        }
    }

    fn parse_prefix_expression(&mut self) -> Result<Expression, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.end_of_input("expression"));
        };
        if token.kind != TokenKind::Operator {
            return self.parse_primary();
        }

        let operator = Self::operator(token)?;
        self.enter_nesting(token)?;
        self.bump();
        let operands = self.parse_prefix_operands(token);
        self.leave_nesting();
        let (left, right) = operands?;

        Ok(Expression::BinaryExpression(Box::new(BinaryExpression {
            operator,
            left,
            right,
            span: self.span_from(token),
        })))
    }

    fn parse_prefix_operands(
        &mut self,
        operator: &Token,
    ) -> Result<(Expression, Expression), ParseError> {
        let left = self.parse_prefix_operand(operator)?;
        let right = self.parse_prefix_operand(operator)?;
        Ok((left, right))
    }

    fn parse_prefix_operand(&mut self, operator: &Token) -> Result<Expression, ParseError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Operator || is_operand(token) => {
                self.parse_prefix_expression()
            }
            next => Err(self.missing_operand(operator, next)),
        }
    }

    /// Precedence climbing over [`binding_power`].
    fn parse_infix_expression(&mut self, min_bp: u8) -> Result<Expression, ParseError> {
        let depth = self.nesting_depth;
        let result = self.parse_infix_operators(min_bp);
        self.nesting_depth = depth;
        result
    }

    /// Every fold deepens the tree by one level, whether it came from
    /// recursion or from the loop.
    fn parse_infix_operators(&mut self, min_bp: u8) -> Result<Expression, ParseError> {
        let mut left = self.parse_primary()?;

        loop {
            if self.newline_before_next() {
                break;
            }
            let Some(token) = self.peek() else {
                break;
            };
            if token.kind != TokenKind::Operator {
                break;
            }
            let Some(operator) = Operator::from_spelling(&token.text) else {
                break;
            };
            let Some(bp) = binding_power(operator) else {
                break;
            };
            if bp.left < min_bp {
                break;
            }
            self.bump();

            let right = match self.peek() {
                Some(next) if is_operand(next) => {
                    self.enter_nesting(token)?;
                    self.parse_infix_expression(bp.right)?
                }
                next => return Err(self.missing_operand(token, next)),
            };

            let span = left.span().to(right.span());
            left = Expression::BinaryExpression(Box::new(BinaryExpression {
                operator,
                left,
                right,
                span,
            }));
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.end_of_input("expression"));
        };

        let expression = match token.kind {
            TokenKind::Identifier => Expression::Identifier(Identifier {
                name: token.text.clone(),
                span: token.span,
            }),
            TokenKind::Numeric => Expression::Literal(Literal {
                kind: LiteralKind::Numeric,
                value: token.text.clone(),
                raw: token.text.clone(),
                span: token.span,
            }),
            TokenKind::String => Expression::Literal(Literal {
                kind: LiteralKind::String,
                value: unquote(&token.text).to_string(),
                raw: token.text.clone(),
                span: token.span,
            }),
            _ => return Err(Self::unexpected("expression", token)),
        };
        self.bump();

        Ok(expression)
    }

    // -- cursor --

    /// Next significant token, without consuming it.
    fn peek(&self) -> Option<&'a Token> {
        self.tokens[self.pos..].iter().find(|t| !t.kind.is_trivia())
    }

    /// Consume the next significant token and any trivia before it.
    fn bump(&mut self) -> Option<&'a Token> {
        let offset = self.tokens[self.pos..]
            .iter()
            .position(|t| !t.kind.is_trivia())?;
        let token = &self.tokens[self.pos + offset];
        self.pos += offset + 1;
        self.last = Some(token);
        Some(token)
    }

    fn bump_significant(&mut self, context: &str) -> Result<&'a Token, ParseError> {
        self.bump().ok_or_else(|| self.end_of_input(context))
    }

    /// True when a newline sits between the cursor and the next
    /// significant token.
    fn newline_before_next(&self) -> bool {
        self.tokens[self.pos..]
            .iter()
            .take_while(|t| t.kind.is_trivia())
            .any(|t| t.kind == TokenKind::Newline)
    }

    fn at_punct(&self, punct: &str) -> bool {
        self.peek().is_some_and(|t| t.is_punct(punct))
    }

    fn eat_punct(&mut self, punct: &str) -> Option<&'a Token> {
        if self.at_punct(punct) {
            self.bump()
        } else {
            None
        }
    }

    fn eat_operator(&mut self, op: &str) -> Option<&'a Token> {
        if self.peek().is_some_and(|t| t.is_operator(op)) {
            self.bump()
        } else {
            None
        }
    }

    fn expect_punct(&mut self, punct: &str, context: &str) -> Result<&'a Token, ParseError> {
        match self.peek() {
            Some(token) if token.is_punct(punct) => self.bump_significant(context),
            Some(token) => Err(Self::unexpected(&format!("'{punct}'"), token)),
            None => Err(self.end_of_input(context)),
        }
    }

    fn expect_identifier(&mut self, context: &str) -> Result<Identifier, ParseError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                self.bump();
                Ok(Identifier {
                    name: token.text.clone(),
                    span: token.span,
                })
            }
            Some(token) => Err(Self::unexpected("identifier", token)),
            None => Err(self.end_of_input(context)),
        }
    }

    /// Span from the start of `first` to the end of the last consumed
    /// token.
    fn span_from(&self, first: &Token) -> Span {
        self.last.map_or(first.span, |last| first.span.to(last.span))
    }

    // -- errors --

    fn operator(token: &Token) -> Result<Operator, ParseError> {
        Operator::from_spelling(&token.text).ok_or_else(|| Self::unexpected("operator", token))
    }

    fn unexpected(expected: &str, found: &Token) -> ParseError {
        ParseError {
            kind: ParseErrorKind::UnexpectedToken {
                expected: expected.to_string(),
                found: found.text.clone(),
            },
            position: found.span.start,
        }
    }

    /// At the operator when a non-operand follows it, at the last
    /// consumed token when the input ends.
    fn missing_operand(&self, operator: &Token, next: Option<&Token>) -> ParseError {
        let position = match (next, self.last) {
            (Some(_), _) | (None, None) => operator.span.start,
            (None, Some(last)) => last.span.start,
        };
        ParseError {
            kind: ParseErrorKind::MissingOperand {
                operator: operator.text.clone(),
            },
            position,
        }
    }

    fn enter_nesting(&mut self, at: &Token) -> Result<(), ParseError> {
        if self.nesting_depth >= MAX_NESTING_DEPTH {
            return Err(ParseError {
                kind: ParseErrorKind::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                position: at.span.start,
            });
        }
        self.nesting_depth += 1;
        Ok(())
    }

    const fn leave_nesting(&mut self) {
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }

    fn end_of_input(&self, context: &str) -> ParseError {
        ParseError {
            kind: ParseErrorKind::UnexpectedEndOfInput {
                context: context.to_string(),
            },
            position: self.last.map_or(Position::START, |t| t.span.start),
        }
    }
}

/// Tokens that can stand alone as an expression.
const fn is_operand(token: &Token) -> bool {
    matches!(
        token.kind,
        TokenKind::Identifier | TokenKind::Numeric | TokenKind::String
    )
}

/// Text between a string literal's quotes.
fn unquote(raw: &str) -> &str {
    let mut chars = raw.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open @ ('"' | '\'')), Some(close)) if open == close => chars.as_str(),
        _ => raw,
    }
}
