#![allow(dead_code)]

use std::collections::HashSet;

use minijs::{
    Expression, Notation, ParseOptions, Program, Span, Statement, Token, parse, parse_with,
    tokenize,
};

pub fn parse_source(input: &str) -> Program {
    let tokens = tokenize(input).expect("tokenize failed");
    parse(&tokens).unwrap_or_else(|e| panic!("parse failed: {e}\n--- input ---\n{input}"))
}

pub fn parse_infix(input: &str) -> Program {
    let tokens = tokenize(input).expect("tokenize failed");
    parse_with(&tokens, &ParseOptions::new().notation(Notation::Infix))
        .unwrap_or_else(|e| panic!("parse failed: {e}\n--- input ---\n{input}"))
}

/// Concatenated token texts.
pub fn rejoin(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

/// Expression of the single expression statement in `program`.
pub fn only_expression(program: &Program) -> &Expression {
    assert_eq!(program.body.len(), 1, "expected one statement");
    match &program.body[0] {
        Statement::ExpressionStatement(stmt) => &stmt.expression,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

/// Every node's span must start where a significant token starts,
/// end where one ends, and lie inside its parent's span.
pub fn assert_spans_well_formed(program: &Program, tokens: &[Token]) {
    let significant: Vec<_> = tokens.iter().filter(|t| !t.kind.is_trivia()).collect();
    let starts: HashSet<_> = significant.iter().map(|t| t.span.start.offset).collect();
    let ends: HashSet<_> = significant.iter().map(|t| t.span.end.offset).collect();

    let mut edges = Vec::new();
    for statement in &program.body {
        edges.push((program.span, statement.span()));
        statement_edges(statement, &mut edges);
    }

    for (parent, child) in edges {
        assert!(
            parent.contains(child),
            "{parent:?} does not contain {child:?}"
        );
        assert!(
            starts.contains(&child.start.offset),
            "span {child:?} does not start on a token"
        );
        assert!(
            ends.contains(&child.end.offset),
            "span {child:?} does not end on a token"
        );
    }
}

fn statement_edges(statement: &Statement, edges: &mut Vec<(Span, Span)>) {
    let span = statement.span();
    match statement {
        Statement::VariableDeclaration(decl) => {
            for declarator in &decl.declarations {
                edges.push((span, declarator.span));
                edges.push((declarator.span, declarator.id.span));
                if let Some(init) = &declarator.init {
                    edges.push((declarator.span, init.span()));
                    expression_edges(init, edges);
                }
            }
        }
        Statement::FunctionDeclaration(func) => {
            edges.push((span, func.id.span));
            for param in &func.params {
                edges.push((span, param.span));
            }
            edges.push((span, func.body.span));
            for inner in &func.body.body {
                edges.push((func.body.span, inner.span()));
                statement_edges(inner, edges);
            }
        }
        Statement::BlockStatement(block) => {
            for inner in &block.body {
                edges.push((span, inner.span()));
                statement_edges(inner, edges);
            }
        }
        Statement::ReturnStatement(ret) => {
            if let Some(argument) = &ret.argument {
                edges.push((span, argument.span()));
                expression_edges(argument, edges);
            }
        }
        Statement::ExpressionStatement(stmt) => {
            edges.push((span, stmt.expression.span()));
            expression_edges(&stmt.expression, edges);
        }
    }
}

fn expression_edges(expression: &Expression, edges: &mut Vec<(Span, Span)>) {
    if let Expression::BinaryExpression(binary) = expression {
        edges.push((binary.span, binary.left.span()));
        edges.push((binary.span, binary.right.span()));
        expression_edges(&binary.left, edges);
        expression_edges(&binary.right, edges);
    }
}
