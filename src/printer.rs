//! Outline printer for a parsed `Program`.
//!
//! One node per line, children indented two spaces below their
//! parent, each line ending in the node's `line:column` range.

use crate::ast::{Expression, Identifier, Literal, LiteralKind, Program, Statement};
use crate::token::Span;

const INDENT: &str = "  ";

/// Render a `Program` as an indented outline.
///
/// ```text
/// Program 1:0-1:13
///   VariableDeclaration const 1:0-1:13
///     VariableDeclarator 1:6-1:12
///       Identifier x 1:6-1:7
///       Literal 42 1:10-1:12
/// ```
#[must_use]
pub fn print_tree(program: &Program) -> String {
    let mut out = String::new();
    write_line(&mut out, 0, "Program", program.span);
    for statement in &program.body {
        format_statement(&mut out, statement, 1);
    }
    out
}

fn write_line(out: &mut String, depth: usize, label: &str, span: Span) {
    out.push_str(&INDENT.repeat(depth));
    out.push_str(label);
    out.push_str(&format!(
        " {}:{}-{}:{}\n",
        span.start.line, span.start.column, span.end.line, span.end.column
    ));
}

fn format_statement(out: &mut String, statement: &Statement, depth: usize) {
    match statement {
        Statement::VariableDeclaration(decl) => {
            let label = format!("VariableDeclaration {}", decl.kind.as_str());
            write_line(out, depth, &label, decl.span);
            for declarator in &decl.declarations {
                write_line(out, depth + 1, "VariableDeclarator", declarator.span);
                format_identifier(out, &declarator.id, depth + 2);
                if let Some(init) = &declarator.init {
                    format_expression(out, init, depth + 2);
                }
            }
        }
        Statement::FunctionDeclaration(func) => {
            let params: Vec<_> = func.params.iter().map(|p| p.name.as_str()).collect();
            let label = format!(
                "FunctionDeclaration {}({})",
                func.id.name,
                params.join(", ")
            );
            write_line(out, depth, &label, func.span);
            write_line(out, depth + 1, "BlockStatement", func.body.span);
            for inner in &func.body.body {
                format_statement(out, inner, depth + 2);
            }
        }
        Statement::BlockStatement(block) => {
            write_line(out, depth, "BlockStatement", block.span);
            for inner in &block.body {
                format_statement(out, inner, depth + 1);
            }
        }
        Statement::ReturnStatement(ret) => {
            write_line(out, depth, "ReturnStatement", ret.span);
            if let Some(argument) = &ret.argument {
                format_expression(out, argument, depth + 1);
            }
        }
        Statement::ExpressionStatement(stmt) => {
            write_line(out, depth, "ExpressionStatement", stmt.span);
            format_expression(out, &stmt.expression, depth + 1);
        }
    }
}

fn format_expression(out: &mut String, expression: &Expression, depth: usize) {
    match expression {
        Expression::BinaryExpression(binary) => {
            let label = format!("BinaryExpression {}", binary.operator);
            write_line(out, depth, &label, binary.span);
            format_expression(out, &binary.left, depth + 1);
            format_expression(out, &binary.right, depth + 1);
        }
        Expression::Identifier(id) => format_identifier(out, id, depth),
        Expression::Literal(lit) => format_literal(out, lit, depth),
    }
}

fn format_identifier(out: &mut String, id: &Identifier, depth: usize) {
    write_line(out, depth, &format!("Identifier {}", id.name), id.span);
}

fn format_literal(out: &mut String, lit: &Literal, depth: usize) {
    // strings show their quotes so `'1'` and `1` stay distinguishable
    let shown = match lit.kind {
        LiteralKind::Numeric => &lit.value,
        LiteralKind::String => &lit.raw,
    };
    write_line(out, depth, &format!("Literal {shown}"), lit.span);
}
