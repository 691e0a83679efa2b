//! Visual Basic lexer CLI
//!
//! Runs the editor lexer over a file and prints what an editor would see.

mod commands;

use commands::{fold_file, init_tracing, lex_file, parse_options};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "lex" | "fold" => {
            let options = match parse_options(&args[2..]) {
                Ok(options) => options,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    eprintln!("Usage: vblex {command} <file> [--dialect=<name>] [--config=<path>]");
                    std::process::exit(1);
                }
            };
            if command == "lex" {
                lex_file(&options);
            } else {
                fold_file(&options);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("vblex {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("vblex - Visual Basic editor lexer");
    println!();
    println!("Usage: vblex <command> <file> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file>     Print every styled span");
    println!("  fold <file>    Print the fold level of every line");
    println!("  help           Show this message");
    println!("  version        Show version information");
    println!();
    println!("Options:");
    println!("  --dialect=<name>   vbnet, vba or vbscript (default: vbnet)");
    println!("  --config=<path>    JSON file with a dialect and keyword lists");
    println!();
    println!("Set RUST_LOG (for example RUST_LOG=vb_lexer=debug) to trace the lexer.");
}
