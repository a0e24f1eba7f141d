//! solhl - print contract sources with syntax highlighting

use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use crossterm::tty::IsTty;
use tracing_subscriber::filter::LevelFilter;

use solhl::{render_document, CodeHighlighter, Config, Document, HighlightError, RenderOptions, Result};

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::WARN;

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    file: Option<PathBuf>,
    no_semantic: bool,
    line_numbers: bool,
    width: Option<usize>,
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut raw = env::args().skip(1);
    let mut args = Args::default();

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            "--no-semantic" => args.no_semantic = true,
            "--line-numbers" | "-n" => args.line_numbers = true,
            "--verbose" | "-v" => args.verbose = true,
            "--width" | "-w" => {
                let value = raw
                    .next()
                    .ok_or_else(|| HighlightError::Message("--width needs a value".to_string()))?;
                let width = value
                    .parse()
                    .map_err(|_| HighlightError::Message(format!("invalid width: {value}")))?;
                args.width = Some(width);
            }
            other if other.starts_with('-') => {
                return Err(HighlightError::Message(format!("unknown option: {other}")));
            }
            other => args.file = Some(PathBuf::from(other)),
        }
    }

    setup_logger(args.verbose);

    let Some(path) = args.file else {
        print_usage();
        return Err(HighlightError::Message("no input file".to_string()));
    };

    let config = Config::load()?;
    let mut doc = Document::from_file(&path)?;
    let source = doc.text().to_string();

    let semantic = config.semantic && !args.no_semantic;
    let mut highlighter = CodeHighlighter::new();
    highlighter.highlight(&source, &mut doc, &config.styles, semantic);

    let mut stdout = io::stdout();
    let options = RenderOptions {
        show_line_numbers: config.show_line_numbers || args.line_numbers,
        tab_width: config.tab_width,
        max_cols: args.width,
        color: stdout.is_tty(),
    };
    render_document(&mut stdout, &doc, &config.styles, &options)?;

    Ok(())
}

fn setup_logger(verbose: bool) {
    let mut warnings: Vec<String> = vec![];
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        match env::var("LOG_LEVEL").map(|s| s.trim().to_string()).as_deref() {
            Ok("TRACE" | "trace") => LevelFilter::TRACE,
            Ok("DEBUG" | "debug") => LevelFilter::DEBUG,
            Ok("INFO" | "info") => LevelFilter::INFO,
            Ok("WARN" | "warn") => LevelFilter::WARN,
            Ok(other) => {
                warnings.push(format!("Invalid `LOG_LEVEL` environment variable value: `{other}`"));
                DEFAULT_LOG_LEVEL
            }
            Err(_) => DEFAULT_LOG_LEVEL,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
    log::trace!("Initial logging level set to `{level}`.");

    for warning in warnings.drain(..) {
        log::warn!("{warning}");
    }
}

fn print_usage() {
    println!("solhl {} - syntax highlighting for contract sources", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: solhl [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -h, --help          Show this help message");
    println!("  -V, --version       Show version information");
    println!("  -n, --line-numbers  Prefix lines with their number");
    println!("  -w, --width N       Truncate lines to N columns");
    println!("      --no-semantic   Skip the syntax tree pass (no import highlighting)");
    println!("  -v, --verbose       Debug logging (or set LOG_LEVEL)");
    println!();
    println!("Styles are read from ~/.solhl.toml");
}

fn print_version() {
    println!("solhl {}", env!("CARGO_PKG_VERSION"));
}
