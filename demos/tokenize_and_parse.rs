//! Tokenize a minijs program, parse it, and print the tree.

use minijs::{Statement, TokenKind};

fn main() {
    let input = "\
// sum of two values
const base = 10;
function add(a, b) {
  return + a b
}
add base 5
";

    let tokens = minijs::tokenize(input).expect("tokenize failed");
    let significant = tokens.iter().filter(|t| !t.kind.is_trivia()).count();
    println!("Tokens: {} ({significant} significant)", tokens.len());
    for token in tokens.iter().filter(|t| t.kind != TokenKind::Whitespace) {
        println!("  {:?} {:?} at {}", token.kind, token.text, token.span.start);
    }

    let program = minijs::parse(&tokens).expect("parse failed");

    println!("\nStatements: {}", program.body.len());
    for statement in &program.body {
        let span = statement.span();
        match statement {
            Statement::VariableDeclaration(decl) => {
                println!("  {} declaration at {}", decl.kind.as_str(), span.start);
            }
            Statement::FunctionDeclaration(func) => {
                println!("  function {} at {}", func.id.name, span.start);
            }
            other => println!("  {other:?}"),
        }
    }

    println!("\nOutline:\n{}", minijs::print_tree(&program));
}
