use std::path::Path;
use std::process;

use scour_common::expr::Expression;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: scour-extract-text <file-path> <expression>");
        eprintln!();
        eprintln!("Runs the text extractor standalone and prints matches as JSON.");
        process::exit(1);
    }

    let path = Path::new(&args[1]);
    let expr = match Expression::compile(&args[2]) {
        Ok(expr) => expr,
        Err(e) => {
            eprintln!("Invalid expression: {e}");
            process::exit(1);
        }
    };

    match scour_extract_text::search(path, &expr) {
        Ok(locations) => match serde_json::to_string_pretty(&locations) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing to JSON: {e}");
                process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Error searching {}: {e}", path.display());
            process::exit(1);
        }
    }
}
