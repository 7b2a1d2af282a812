//! Demonstrate error handling for invalid minijs input.

fn main() {
    // Unterminated string literal
    match minijs::parse_str("const greeting = 'hello\n") {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(minijs::Error::Lex(e)) => {
            println!("Lex error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!(
                "  Location: line {}, column {}",
                e.position.line, e.position.column
            );
        }
        Err(minijs::Error::Parse(e)) => {
            println!("Parse error: {e}");
        }
    }

    println!();

    // Unclosed block
    match minijs::parse_str("function f(a) {\n  return a\n") {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(minijs::Error::Lex(e)) => {
            println!("Lex error: {e}");
        }
        Err(minijs::Error::Parse(e)) => {
            println!("Parse error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!(
                "  Location: line {}, column {}",
                e.position.line, e.position.column
            );
        }
    }

    println!();

    // Operator with a single operand
    if let Err(e) = minijs::parse_str("let x = + 1") {
        println!("Error: {e}");
        println!("  Offset: {}", e.position().offset);
    }
}
