use comet::Error;
use comet_eval::Evaluator;
use comet_source::Source;
use console::style;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::{fs, process};

/// What to do with a script.
#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Run,
    PrintAst,
}

fn main() {
    comet::init_tracing();

    let mut mode = Mode::Run;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        if arg == "--ast" {
            mode = Mode::PrintAst;
        } else if path.is_none() {
            path = Some(arg);
        } else {
            usage();
        }
    }

    match path {
        Some(path) => run_script(&path, mode),
        None if mode == Mode::Run => {
            if let Err(err) = run_repl() {
                eprintln!("{}", style(format!("error: {}", err)).red());
                process::exit(1);
            }
        }
        None => usage(),
    }
}

fn usage() -> ! {
    eprintln!("usage: comet [--ast] [path]");
    process::exit(2);
}

fn report(source: &str, err: &Error) {
    let source = Source::new(source);
    eprintln!("{}", style(source.render(err)).red());
}

fn run_script(path: &str, mode: Mode) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("{}", style(format!("error: cannot read {}: {}", path, err)).red());
            process::exit(1);
        }
    };

    let result = match mode {
        Mode::Run => comet::interpret(&content).map(|value| value.to_string()),
        Mode::PrintAst => comet::print_ast(&content),
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(err) => {
            report(&content, &err);
            process::exit(1);
        }
    }
}

fn run_repl() -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    // bindings survive from one line to the next
    let mut evaluator = Evaluator::new();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str())?;
                match comet::run(&mut evaluator, &line) {
                    Ok(value) => println!("{}", value),
                    Err(err) => report(&line, &err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
