//! Parse the same expression in prefix and infix notation.

use minijs::{Notation, ParseOptions};

fn main() {
    let prefix = minijs::parse_str("= total + price * price rate").expect("prefix parse failed");
    let infix = minijs::parse_str_with(
        "total = price + price * rate",
        &ParseOptions::new().notation(Notation::Infix),
    )
    .expect("infix parse failed");

    println!("Prefix:\n{}", minijs::print_tree(&prefix));
    println!("Infix:\n{}", minijs::print_tree(&infix));

    match serde_json::to_string_pretty(&infix) {
        Ok(json) => println!("Infix as JSON:\n{json}"),
        Err(e) => eprintln!("failed to serialize: {e}"),
    }
}
