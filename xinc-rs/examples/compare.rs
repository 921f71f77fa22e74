//! Example: Check that one XML document is included in another
//!
//! Usage: cargo run --example compare <expected.xml> <actual.xml> [pattern...]

use std::env;
use xml_inclusion::{parse_file, render, CompareConfig, Comparator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <expected.xml> <actual.xml> [pattern...]", args[0]);
        std::process::exit(2);
    }

    let config = CompareConfig {
        ignore_patterns: args[3..].to_vec(),
        skip_text: false,
    };
    let comparator = Comparator::from_config(&config)?;

    eprintln!("Parsing expected: {}", args[1]);
    let expected = parse_file(&args[1])?;

    eprintln!("Parsing actual: {}", args[2]);
    let actual = parse_file(&args[2])?;

    let result = comparator.compare_documents(&expected, &actual);
    println!("{}", render(&result));

    if !result.is_match() {
        std::process::exit(1);
    }
    Ok(())
}
