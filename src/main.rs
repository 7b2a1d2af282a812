//! CLI tool to tokenize, parse and check minijs source files.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use minijs::{Notation, ParseOptions, Program, Token};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "minijs", version, about = "Tokenize and parse minijs source files")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Parse binary expressions in infix notation with precedence.
    #[arg(long, global = true)]
    infix: bool,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` wins.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the token stream of each file as JSON.
    Tokens {
        /// Print single-line JSON.
        #[arg(long)]
        compact: bool,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the syntax tree of each file.
    Ast {
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Print single-line JSON.
        #[arg(long)]
        compact: bool,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Check that each file parses.
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Tree,
}

/// Anything that fails a single input file.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Source(#[from] minijs::Error),
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let notation = if cli.infix {
        Notation::Infix
    } else {
        Notation::Prefix
    };
    let options = ParseOptions::new().notation(notation);

    let files = match &cli.command {
        Command::Tokens { files, .. } | Command::Ast { files, .. } | Command::Check { files } => {
            files
        }
    };

    let mut had_error = false;

    for path in files {
        let name = path.display();
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{name}: {e}");
                had_error = true;
                continue;
            }
        };
        tracing::debug!(file = %name, bytes = content.len(), "read source");

        match run(&cli.command, &content, &options) {
            Ok(Some(statements)) => eprintln!("{name}: valid ({statements} statement(s))"),
            Ok(None) => {}
            Err(e) => {
                eprintln!("{name}: {e}");
                had_error = true;
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Process one source file. Returns the statement count for `check`.
fn run(
    command: &Command,
    content: &str,
    options: &ParseOptions,
) -> Result<Option<usize>, CliError> {
    match command {
        Command::Tokens { compact, .. } => {
            let tokens: Vec<Token> = minijs::tokenize(content).map_err(minijs::Error::from)?;
            println!("{}", render_json(&tokens, *compact)?);
            Ok(None)
        }
        Command::Ast {
            format, compact, ..
        } => {
            let program = minijs::parse_str_with(content, options)?;
            match format {
                OutputFormat::Json => println!("{}", render_json(&program, *compact)?),
                OutputFormat::Tree => print!("{}", minijs::print_tree(&program)),
            }
            Ok(None)
        }
        Command::Check { .. } => {
            let program: Program = minijs::parse_str_with(content, options)?;
            Ok(Some(program.body.len()))
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "minijs=debug",
        _ => "minijs=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render_json<T: Serialize>(value: &T, compact: bool) -> Result<String, serde_json::Error> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::{Error as _, Serializer};

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("not representable"))
        }
    }

    #[test]
    fn render_json_compact_and_pretty() {
        let tokens = minijs::tokenize("x").expect("tokenize failed");
        let compact = render_json(&tokens, true).expect("render failed");
        let pretty = render_json(&tokens, false).expect("render failed");
        assert_eq!(compact.lines().count(), 1);
        assert!(pretty.lines().count() > 1);
    }

    #[test]
    fn serialization_failure_fails_the_file() {
        let err: CliError = render_json(&Unserializable, true).unwrap_err().into();
        assert!(matches!(err, CliError::Json(_)));
        assert!(err.to_string().contains("not representable"));
    }

    #[test]
    fn check_counts_statements() {
        let command = Command::Check { files: Vec::new() };
        let count = run(&command, "let a\nlet b", &ParseOptions::new()).expect("run failed");
        assert_eq!(count, Some(2));
    }

    #[test]
    fn parse_errors_fail_the_file() {
        let command = Command::Check { files: Vec::new() };
        let err = run(&command, "const ;", &ParseOptions::new()).unwrap_err();
        assert!(matches!(err, CliError::Source(minijs::Error::Parse(_))));
    }
}
