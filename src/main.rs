// omlc: OML tokeniser and parser

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser as ClapParser;
use crossterm::style::Stylize;
use tracing::{info, Level};

use omlc::parser::lexer::Tokeniser;
use omlc::parser::tables::LexicalTables;
use omlc::parser::{parse_file, FrontendError};
use omlc::source::discover_sources;

/// Tokenise and parse OML sources, printing the resulting parse trees.
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// An .oml file, or a directory whose .oml files are processed
    path: PathBuf,

    /// Print the token stream instead of the parse tree
    #[arg(short, long)]
    tokens: bool,

    /// Only report whether each file parsed
    #[arg(short, long, conflicts_with = "tokens")]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let sources = discover_sources(&args.path)?;
    if sources.is_empty() {
        eprintln!(
            "{} no .oml sources found at '{}'",
            "error:".red().bold(),
            args.path.display()
        );
        return Ok(ExitCode::FAILURE);
    }
    info!(count = sources.len(), "processing sources");

    let mut failures = 0;
    for path in &sources {
        let result = if args.tokens {
            print_tokens(path)
        } else {
            print_tree(path, args.quiet)
        };

        if let Err(err) = result {
            failures += 1;
            eprintln!("{} {}: {}", "error:".red().bold(), path.display(), err);
        }
    }

    if failures > 0 {
        eprintln!("{} of {} file(s) failed", failures, sources.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_tree(path: &Path, quiet: bool) -> Result<(), FrontendError> {
    let program = parse_file(path)?;

    if quiet {
        println!("{} {}", "ok".green(), path.display());
    } else {
        println!("{}", path.display().to_string().bold());
        print!("{program}");
    }
    Ok(())
}

fn print_tokens(path: &Path) -> Result<(), FrontendError> {
    let tables = LexicalTables::oml();
    let tokens = Tokeniser::new(&tables).tokenize_file(path)?;

    println!("{}", path.display().to_string().bold());
    for token in &tokens {
        let loc = token.location.unwrap_or_default();
        println!(
            "{:>4}:{:<3} {} {}",
            loc.line, loc.column, token.category, token.lexeme
        );
    }
    Ok(())
}
