use clap::{Arg, ArgAction, Command};
use gold::{logging, registry, repl, runner, token};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

fn cli() -> Command {
    Command::new("gold")
        .about("Tokenizer and builtin inspector for the Gold language")
        .arg(
            Arg::new("file")
                .help("The script file to tokenize")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .conflicts_with("file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("builtins")
                .long("builtins")
                .help("List the builtin functions and their signatures")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keywords")
                .long("keywords")
                .help("List the reserved words and the token kinds they map to")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Tracing filter, e.g. 'debug' (defaults to RUST_LOG)"),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    logging::init_tracing(matches.get_one::<String>("log-level").map(String::as_str));

    if matches.get_flag("builtins") {
        for entry in registry().iter() {
            println!("{}", entry);
        }
        return ExitCode::SUCCESS;
    }

    if matches.get_flag("keywords") {
        for (word, kind) in token::keywords() {
            println!("{:<8} {}", word, kind);
        }
        return ExitCode::SUCCESS;
    }

    match matches.get_one::<String>("file") {
        Some(file_path) => run_file(file_path),
        None => {
            repl::start();
            ExitCode::SUCCESS
        }
    }
}

fn run_file(path: &str) -> ExitCode {
    let path = Path::new(path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        return ExitCode::FAILURE;
    }

    match fs::read_to_string(path) {
        Ok(source) => {
            let filename = path.display().to_string();
            if runner::run(&source, Some(&filename)) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::cli;

    #[test]
    fn file_and_interactive_are_exclusive() {
        let result = cli().try_get_matches_from(["gold", "script.gold", "-i"]);
        assert_eq!(
            result.map(|_| ()).map_err(|e| e.kind()),
            Err(clap::error::ErrorKind::ArgumentConflict)
        );
    }

    #[test]
    fn file_alone_is_accepted() {
        let matches = cli()
            .try_get_matches_from(["gold", "script.gold"])
            .expect("file argument parses");
        assert_eq!(
            matches.get_one::<String>("file").map(String::as_str),
            Some("script.gold")
        );
        assert!(!matches.get_flag("interactive"));
    }

    #[test]
    fn command_definition_is_consistent() {
        cli().debug_assert();
    }
}
