//! Outline printer tests.

mod common;

use common::{parse_infix, parse_source};
use minijs::print_tree;

#[test]
fn print_trailing_newline() {
    let output = print_tree(&parse_source("x"));
    assert!(output.ends_with('\n'));
    assert_eq!(output.lines().count(), 3);
}

#[test]
fn print_function() {
    let output = print_tree(&parse_source("function add(a, b) { return + a b }"));
    assert_eq!(
        output,
        "\
Program 1:0-1:35
  FunctionDeclaration add(a, b) 1:0-1:35
    BlockStatement 1:19-1:35
      ReturnStatement 1:21-1:33
        BinaryExpression + 1:28-1:33
          Identifier a 1:30-1:31
          Identifier b 1:32-1:33
"
    );
}

#[test]
fn print_nested_indentation() {
    let output = print_tree(&parse_source("{ { x } }"));
    assert!(output.contains("\n  BlockStatement"));
    assert!(output.contains("\n    BlockStatement"));
    assert!(output.contains("\n      ExpressionStatement"));
    assert!(output.contains("\n        Identifier x"));
}

#[test]
fn print_multiple_declarators() {
    let output = print_tree(&parse_source("var a = 1, b"));
    assert_eq!(output.matches("VariableDeclarator").count(), 2);
    assert!(output.contains("VariableDeclaration var"));
}

#[test]
fn print_multiline_positions() {
    let output = print_tree(&parse_source("let a\n\nreturn a"));
    assert!(output.contains("ReturnStatement 3:0-3:8"));
}

#[test]
fn print_infix_tree_matches_prefix_shape() {
    let prefix = print_tree(&parse_source("+ a * b c"));
    let infix = print_tree(&parse_infix("a + b * c"));
    let labels = |out: &str| -> Vec<String> {
        out.lines()
            .map(|line| line.rsplit_once(' ').map_or(line, |(label, _)| label).to_string())
            .collect()
    };
    assert_eq!(labels(&prefix)[2..], labels(&infix)[2..]);
}
