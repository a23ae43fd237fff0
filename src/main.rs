use ccalc::{evaluate, parse, SymbolTable};
use colored::*;
use rustyline::{error::ReadlineError, Config, DefaultEditor};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const RESULT: (u8, u8, u8) = (0xB4, 0xB4, 0xB4); // Light gray
const CARET: (u8, u8, u8) = (0xFF, 0x14, 0x00); // Bright red
const ERROR: (u8, u8, u8) = (0xDC, 0x64, 0x5A); // Soft red
const MESSAGE: (u8, u8, u8) = (0x78, 0xB4, 0x78); // Soft green

fn main() -> rustyline::Result<()> {
    // RUST_LOG=ccalc=debug surfaces the core's event stream.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::builder().build();
    let mut rl = DefaultEditor::with_config(config)?;

    let history = history_path();
    if let Some(path) = &history {
        let _ = rl.load_history(path);
    }

    let mut env = SymbolTable::new();

    loop {
        let readline = rl.readline("> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;

                if let Some(command) = line.strip_prefix(':') {
                    if run_command(command, &mut env) {
                        break;
                    }
                    continue;
                }

                evaluate_line(line, &mut env);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                println!("{:?}", err);
                break;
            }
        }
    }

    if let Some(path) = &history {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = rl.save_history(path);
    }

    Ok(())
}

/// Runs a `:command` line; returns `true` when the REPL should exit.
fn run_command(command: &str, env: &mut SymbolTable) -> bool {
    match command.trim() {
        "clear" => {
            env.clear();
            print_message("Environment cleared.");
        }
        "quit" | "exit" => return true,
        _ => print_message("Unknown command! Available: :clear, :quit"),
    }
    false
}

fn evaluate_line(line: &str, env: &mut SymbolTable) {
    match parse(line) {
        Ok(expression) => match evaluate(&expression, env) {
            Ok(value) => println!(
                "{}",
                value.to_string().truecolor(RESULT.0, RESULT.1, RESULT.2)
            ),
            Err(err) => println!(
                "{}",
                err.to_string().truecolor(ERROR.0, ERROR.1, ERROR.2)
            ),
        },
        Err(err) => {
            // The prompt is two characters wide, so the caret lines up
            // under the offending character.
            println!(
                "  {}{}",
                " ".repeat(err.offset()),
                "^".truecolor(CARET.0, CARET.1, CARET.2)
            );
            println!(
                "{}",
                err.to_string().truecolor(ERROR.0, ERROR.1, ERROR.2)
            );
        }
    }
}

fn print_message(msg: &str) {
    println!("{}", msg.truecolor(MESSAGE.0, MESSAGE.1, MESSAGE.2));
}

fn history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("ccalc").join("history.txt"))
}
