//! Command-line front end for the XML inclusion check.
//!
//! Exit status is 0 when the expected document is included in the actual
//! one, 1 when a difference is found and 2 for usage or input errors.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use xml_inclusion::{parse_file, render, CompareConfig, Comparator, Comparison, Document};

/// Check that every element, attribute and text of EXPECTED is present in ACTUAL
#[derive(Parser, Debug)]
#[command(name = "xinc")]
#[command(version)]
#[command(about = "Check that one XML document is structurally included in another", long_about = None)]
struct Cli {
    /// Document whose content must be present
    expected: PathBuf,

    /// Document that may contain additional content
    actual: PathBuf,

    /// Do not compare text content or attribute values (also accepted as -notext)
    #[arg(long)]
    notext: bool,

    /// Ignore elements matching /rooted/paths or //anywhere/paths; takes all remaining arguments
    #[arg(
        short = 'i',
        long = "ignore",
        value_name = "PATTERN",
        num_args = 1..,
        allow_hyphen_values = true
    )]
    ignore: Vec<String>,

    /// Read further ignore patterns from a file, one per line
    #[arg(long, value_name = "FILE")]
    ignore_file: Option<PathBuf>,

    /// Log progress and matching decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Exit status when a difference is found.
const EXIT_DIFFERENCE: u8 = 1;
/// Exit status for unreadable input or malformed patterns.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(result) => {
            println!("{}", render(&result));
            if result.is_match() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_DIFFERENCE)
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Rewrites the legacy single-dash `-notext` flag into its clap spelling.
///
/// Arguments after the first `-i`/`--ignore` are patterns and stay as given.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut in_patterns = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if in_patterns {
                return arg;
            }
            if arg == "-i" || arg == "--ignore" {
                in_patterns = true;
                arg
            } else if arg == "-notext" {
                OsString::from("--notext")
            } else {
                arg
            }
        })
        .collect()
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Parses patterns and both documents, then runs the comparison.
fn run(cli: &Cli) -> Result<Comparison, Box<dyn std::error::Error>> {
    let mut ignore_patterns = cli.ignore.clone();
    if let Some(path) = &cli.ignore_file {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("cannot read ignore file {}: {}", path.display(), e))?;
        ignore_patterns.extend(parse_ignore_lines(&content));
    }

    let config = CompareConfig {
        ignore_patterns,
        skip_text: cli.notext,
    };
    // Malformed patterns abort before any document is read.
    let comparator = Comparator::from_config(&config)?;
    info!(
        patterns = comparator.ignore_set().len(),
        skip_text = comparator.skips_text(),
        "configured"
    );

    let expected = load("expected", &cli.expected)?;
    let actual = load("actual", &cli.actual)?;

    info!("Comparing...");
    Ok(comparator.compare_documents(&expected, &actual))
}

fn load(role: &str, path: &Path) -> Result<Document, Box<dyn std::error::Error>> {
    info!("Parsing {}: {}", role, path.display());
    let doc = parse_file(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(doc)
}

/// Splits an ignore file into patterns, skipping blank lines and `#` comments.
fn parse_ignore_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
