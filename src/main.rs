use clap::Parser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use sqlvet::diagnostic::Diagnostic;

#[derive(Parser, Debug)]
#[command(name = "sqlvet", about = "Validate a SQL statement without touching a database")]
struct Args {
    /// Validate a single statement and exit instead of starting the REPL.
    #[arg(short = 'c', long = "command")]
    command: Option<String>,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    match args.command {
        Some(sql) => std::process::exit(run_one(&sql)),
        None => repl(),
    }
}

fn run_one(sql: &str) -> i32 {
    match sqlvet::validate(sql) {
        None => {
            println!("ok");
            0
        }
        Some(diag) => {
            print_diagnostic(&diag);
            1
        }
    }
}

fn repl() {
    let mut editor = DefaultEditor::new().expect("failed to initialize the line editor");
    println!("sqlvet - type a SQL statement, or :q to quit");

    loop {
        match editor.readline("sqlvet> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == ":q" || trimmed == ":quit" {
                    break;
                }
                let _ = editor.add_history_entry(trimmed);
                match sqlvet::validate(trimmed) {
                    None => println!("ok"),
                    Some(diag) => print_diagnostic(&diag),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!("readline error: {e}");
                break;
            }
        }
    }
}

fn print_diagnostic(diag: &Diagnostic) {
    eprintln!("error: {diag}");
    if let Some(details) = &diag.details {
        eprintln!("  caused by: {details}");
    }
}
