//! ucum-cli - UCUM unit conversions from the command line
//!
//! Usage:
//!   ucum-cli "kg.m/s2"                     # Canonical form
//!   ucum-cli "[in_i]" --to cm --factor 12  # Conversion
//!   ucum-cli --validate "mmol/l"           # Validation only
//!   echo "3 [ft_i] -> m" | ucum-cli        # Pipe mode
//!   ucum-cli -f requests.txt               # File mode
//!   ucum-cli -i                            # Interactive REPL

use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use ucum_core::{Config, Decimal, Engine, EngineError};

#[derive(Parser, Debug)]
#[command(name = "ucum-cli")]
#[command(about = "Canonicalize, validate and convert UCUM unit expressions", long_about = None)]
struct Args {
    /// Unit expression
    expression: Option<String>,

    /// Convert to this unit
    #[arg(short, long, value_name = "UNIT")]
    to: Option<String>,

    /// Amount of the source unit
    #[arg(long, default_value = "1")]
    factor: String,

    /// Molar mass in g/mol, for conversions between mol and g
    #[arg(long, value_name = "G_PER_MOL")]
    mol_mass: Option<String>,

    /// Only validate the expression
    #[arg(long)]
    validate: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Read requests from file, one per line
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Interactive REPL mode
    #[arg(short, long)]
    interactive: bool,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

/// One thing to do
#[derive(Debug, PartialEq)]
struct Request {
    factor: String,
    from: String,
    to: Option<String>,
}

impl Request {
    /// `<expr>` or `[<factor>] <from> -> <to>`
    fn parse_line(line: &str) -> Self {
        let Some((lhs, to)) = line.split_once("->") else {
            return Self {
                factor: "1".to_string(),
                from: line.trim().to_string(),
                to: None,
            };
        };

        let lhs = lhs.trim();
        let (factor, from) = match lhs.split_once(char::is_whitespace) {
            Some((factor, from)) if factor.parse::<Decimal>().is_ok() => (factor, from.trim()),
            _ => ("1", lhs),
        };
        Self {
            factor: factor.to_string(),
            from: from.to_string(),
            to: Some(to.trim().to_string()),
        }
    }
}

/// Result of one request
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Output {
    Canonical {
        input: String,
        factor: Decimal,
        term: String,
    },
    Converted {
        factor: String,
        from: String,
        to: String,
        result: Decimal,
    },
    Valid {
        input: String,
        printed: String,
    },
    Error {
        input: String,
        error: String,
    },
}

impl Output {
    fn is_error(&self) -> bool {
        matches!(self, Output::Error { .. })
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Canonical {
                input,
                factor,
                term,
            } => write!(f, "{input} = {factor} {term}"),
            Output::Converted {
                factor,
                from,
                to,
                result,
            } => write!(f, "{factor} {from} = {result} {to}"),
            Output::Valid { input, .. } => write!(f, "{input}: valid"),
            Output::Error { input, error } => write!(f, "{input}: error: {error}"),
        }
    }
}

/// Flags shared by every request of a run
struct Options {
    validate_only: bool,
    json: bool,
    mol_mass: Option<Decimal>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let engine = Engine::with_config(Config::load());
    let mol_mass = args
        .mol_mass
        .as_deref()
        .map(str::parse::<Decimal>)
        .transpose()
        .context("invalid --mol-mass")?;
    let options = Options {
        validate_only: args.validate,
        json: args.json,
        mol_mass,
    };

    if let Some(expr) = &args.expression {
        // Single expression mode
        let request = Request {
            factor: args.factor.clone(),
            from: expr.clone(),
            to: args.to.clone(),
        };
        let output = process(&engine, &request, &options);
        emit(&output, options.json)?;
        if output.is_error() {
            std::process::exit(1);
        }
    } else if let Some(path) = &args.file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        run_lines(&engine, content.lines(), &options)?;
    } else if args.interactive {
        run_repl(&engine, &options)?;
    } else if !io::stdin().is_terminal() {
        // Pipe mode
        let lines = io::stdin().lock().lines().collect::<io::Result<Vec<_>>>()?;
        run_lines(&engine, lines.iter().map(String::as_str), &options)?;
    } else {
        eprintln!("Usage: ucum-cli <expression> [--to <unit>] [--factor <n>]");
        eprintln!("       ucum-cli -f <file>");
        eprintln!("       ucum-cli -i");
        eprintln!("       echo \"1 [in_i] -> cm\" | ucum-cli");
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn process(engine: &Engine, request: &Request, options: &Options) -> Output {
    let error = |err: EngineError| Output::Error {
        input: request.from.clone(),
        error: err.to_string(),
    };

    if options.validate_only {
        return match engine.print(&request.from) {
            Ok(printed) => Output::Valid {
                input: request.from.clone(),
                printed,
            },
            Err(err) => error(err.into()),
        };
    }

    let factor = match request.factor.parse::<Decimal>() {
        Ok(factor) => factor,
        Err(err) => return error(err.into()),
    };

    match &request.to {
        Some(to) => {
            let result = match &options.mol_mass {
                Some(coefficient) => {
                    engine.convert_with_mol_mass(&factor, &request.from, to, coefficient)
                }
                None => engine.convert(&factor, &request.from, to),
            };
            match result {
                Ok(result) => Output::Converted {
                    factor: request.factor.clone(),
                    from: request.from.clone(),
                    to: to.clone(),
                    result,
                },
                Err(err) => error(err),
            }
        }
        None => match engine.canonicalize_with_factor(&factor, &request.from) {
            Ok(canonical) => Output::Canonical {
                input: request.from.clone(),
                factor: canonical.factor,
                term: canonical.term.to_string(),
            },
            Err(err) => error(err),
        },
    }
}

fn emit(output: &Output, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(output)?);
    } else {
        println!("{output}");
    }
    Ok(())
}

fn run_lines<'a>(
    engine: &Engine,
    lines: impl Iterator<Item = &'a str>,
    options: &Options,
) -> Result<()> {
    for line in lines.map(str::trim).filter(|line| !line.is_empty()) {
        let output = process(engine, &Request::parse_line(line), options);
        emit(&output, options.json)?;
    }
    Ok(())
}

fn run_repl(engine: &Engine, options: &Options) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("ucum - UCUM unit conversions");
    println!("Type an expression, or <factor> <from> -> <to>. Press Ctrl+D to exit.\n");

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            println!();
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "quit" | "exit" => break,
            "help" => {
                print_help();
                continue;
            }
            _ => {}
        }

        let output = process(engine, &Request::parse_line(line), options);
        emit(&output, options.json)?;
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"
Commands:
  help     Show this help
  quit     Exit the REPL

Examples:
  kg.m/s2              Canonical form
  [in_i] -> cm         Conversion
  3 [ft_i] -> m        Conversion with a factor
  37 Cel -> [degF]     Special units
"#
    );
}
