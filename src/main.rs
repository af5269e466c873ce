use std::process::ExitCode;

use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as ReplResult};

use reckon::{evaluate_string, parse, tokenize};

fn main() -> ExitCode {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = if args.is_empty() {
        run_repl().map_err(|err| err.to_string())
    } else {
        run_line(&args.join(" ")).map(|output| println!("{output}"))
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Logs only when `RUST_LOG` is set, e.g. `RUST_LOG=reckon=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn run_line(line: &str) -> Result<String, String> {
    if let Some(rest) = line.strip_prefix(":tokens") {
        let tokens = tokenize(rest).map_err(|err| err.to_string())?;
        let shown: Vec<String> = tokens.iter().map(|token| token.to_string()).collect();
        return Ok(shown.join(" "));
    }
    if let Some(rest) = line.strip_prefix(":ast") {
        let tokens = tokenize(rest).map_err(|err| err.to_string())?;
        let tree = parse(&tokens).map_err(|err| err.to_string())?;
        return Ok(tree.to_string());
    }
    evaluate_string(line)
        .map(|value| value.to_string())
        .map_err(|err| err.to_string())
}

fn run_repl() -> ReplResult<()> {
    let mut rl = DefaultEditor::new()?;
    #[cfg(feature = "with-file-history")]
    if rl.load_history("history.txt").is_err() {
        println!("No previous history.");
    }
    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str())?;
                match run_line(line.as_str()) {
                    Ok(output) => println!("{output}"),
                    Err(err) => println!("Error: {err}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    #[cfg(feature = "with-file-history")]
    rl.save_history("history.txt")?;
    Ok(())
}
