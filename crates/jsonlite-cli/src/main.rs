#![doc = include_str!("../README.md")]
//! JSON-lite CLI tool
//!
//! Disambiguation heuristic:
//!   If arg contains '.' or '/' → file mode
//!   If arg is '-' → stdin (file mode)
//!   Otherwise → subcommand mode
//!
//! Examples:
//!   jsonlite doc.jsonl            - file mode (has '.')
//!   jsonlite ./doc                - file mode (has '/')
//!   jsonlite -                    - stdin
//!   jsonlite tree doc.jsonl       - subcommand with file arg

use std::fmt::Write as _;
use std::io::{self, Read};

use facet::Facet;
use figue as args;
use jsonlite_format::{FormatOptions, format_document, unescape};
use jsonlite_parse::MalformedDocumentError;
use jsonlite_tree::{Document, Value};

// ============================================================================
// Exit codes
// ============================================================================

const EXIT_SUCCESS: i32 = 0;
const EXIT_SYNTAX_ERROR: i32 = 1;
const EXIT_IO_ERROR: i32 = 3;

// ============================================================================
// CLI argument structures
// ============================================================================

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// File mode arguments: `jsonlite <file> [options]`
#[derive(Facet, Debug, Default)]
struct FileArgs {
    /// Input file path (or "-" for stdin)
    #[facet(args::positional)]
    input: String,

    /// Output to file (JSON-lite format)
    #[facet(args::named, args::short = 'o', default)]
    output: Option<String>,

    /// Output as standard JSON to file (or "-" for stdout)
    #[facet(args::named, default)]
    json_out: Option<String>,

    /// Single-line/compact formatting
    #[facet(args::named, default)]
    compact: bool,
}

/// Top-level CLI with optional subcommand
#[derive(Facet, Debug)]
struct Args {
    /// Show version
    #[facet(args::named, args::short = 'V', default)]
    version: bool,

    /// Subcommand to run
    #[facet(args::subcommand, default)]
    command: Option<Command>,
}

/// Available subcommands
#[derive(Facet, Debug)]
#[repr(u8)]
enum Command {
    /// Check a document without printing it
    Check {
        /// Input file
        #[facet(args::positional)]
        file: String,
    },

    /// Show parse tree
    Tree {
        /// Input file
        #[facet(args::positional)]
        file: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[facet(args::positional)]
        shell: String,
    },
}

// ============================================================================
// Main entry point
// ============================================================================

/// Determines if an argument should be treated as a file path.
///
/// Returns true if the argument:
/// - Contains '.' (e.g., doc.jsonl)
/// - Contains '/' (e.g., ./doc, ../path, /absolute/path)
/// - Is exactly '-' (stdin)
fn is_file_arg(arg: &str) -> bool {
    arg == "-" || arg.contains('.') || arg.contains('/')
}

fn main() {
    let raw_args: Vec<String> = std::env::args().skip(1).collect();

    if raw_args.is_empty() {
        print_help();
        std::process::exit(EXIT_SUCCESS);
    }

    if raw_args[0] == "--version" || raw_args[0] == "-V" {
        println!("jsonlite {VERSION}");
        std::process::exit(EXIT_SUCCESS);
    }

    if raw_args[0] == "--help" || raw_args[0] == "-h" {
        print_help();
        std::process::exit(EXIT_SUCCESS);
    }

    let result = if is_file_arg(&raw_args[0]) {
        run_file_mode(&raw_args)
    } else {
        run_subcommand_mode(&raw_args)
    };

    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(e) => {
            match &e {
                CliError::ParseDiagnostic {
                    error,
                    source,
                    filename,
                } => {
                    error.write_report(filename, source, std::io::stderr());
                }
                _ => {
                    eprintln!("error: {e}");
                }
            }
            std::process::exit(e.exit_code());
        }
    }
}

fn print_help() {
    eprintln!("jsonlite {VERSION} - command-line tool for JSON-lite documents\n");
    eprintln!("USAGE:");
    eprintln!("    jsonlite <file> [options]       Format a JSON-lite file");
    eprintln!("    jsonlite <command> [args]       Run a subcommand\n");
    eprintln!("    Files are detected by '.' or '/' in the name, or '-' for stdin.");
    eprintln!("    Bare words (e.g., 'check', 'tree') are subcommands.\n");
    eprintln!("FILE MODE OPTIONS:");
    eprintln!("    -o, --output <FILE>             Output to file (JSON-lite format)");
    eprintln!("        --json-out <FILE>           Output as JSON (use '-' for stdout)");
    eprintln!("        --compact                   Single-line/compact formatting\n");
    eprintln!("SUBCOMMANDS:");
    eprintln!("    check <file>                    Check a document, print nothing");
    eprintln!("    tree <file>                     Show parse tree");
    eprintln!("    completions <shell>             Generate shell completions\n");
    eprintln!("EXAMPLES:");
    eprintln!("    jsonlite doc.jsonl              Format to stdout");
    eprintln!("    jsonlite doc.jsonl --compact    Format on a single line");
    eprintln!("    jsonlite check doc.jsonl        Exit code reports validity");
    eprintln!("    jsonlite completions bash       Generate bash completions");
}

fn run_file_mode(args: &[String]) -> Result<(), CliError> {
    let opts = parse_file_args(args)?;

    if let Some(ref output) = opts.output
        && opts.input != "-"
        && output != "-"
        && is_same_file(&opts.input, output)
    {
        return Err(CliError::Usage(
            "input and output are the same file".into(),
        ));
    }

    let doc = load_document(&opts.input)?;

    if let Some(ref json_path) = opts.json_out {
        let json = document_to_json(&doc);
        let output =
            serde_json::to_string_pretty(&json).map_err(|e| CliError::Io(io::Error::other(e)))?;
        write_output(json_path, &format!("{output}\n"))?;
        return Ok(());
    }

    let format_opts = if opts.compact {
        FormatOptions::default().inline()
    } else {
        FormatOptions::default().multiline()
    };
    let output = format_document(&doc, format_opts);

    match opts.output {
        Some(ref out_path) => write_output(out_path, &output)?,
        None => println!("{output}"),
    }

    Ok(())
}

fn run_subcommand_mode(args: &[String]) -> Result<(), CliError> {
    let parsed = parse_command_args(args)?;

    if parsed.version {
        println!("jsonlite {VERSION}");
        return Ok(());
    }

    match parsed.command {
        Some(Command::Check { file }) => run_check(&file),
        Some(Command::Tree { file }) => run_tree(&file),
        Some(Command::Completions { shell }) => run_completions(&shell),
        None => {
            print_help();
            Ok(())
        }
    }
}

// Bad arguments are usage errors, not panics.

fn parse_file_args(args: &[String]) -> Result<FileArgs, CliError> {
    let args_strs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    figue::from_slice(&args_strs).map_err(|e| CliError::Usage(e.to_string()))
}

fn parse_command_args(args: &[String]) -> Result<Args, CliError> {
    let args_strs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    figue::from_slice(&args_strs).map_err(|e| CliError::Usage(e.to_string()))
}

// ============================================================================
// Error handling
// ============================================================================

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    ParseDiagnostic {
        error: MalformedDocumentError,
        source: String,
        filename: String,
    },
    Usage(String),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Io(_) => EXIT_IO_ERROR,
            CliError::ParseDiagnostic { .. } => EXIT_SYNTAX_ERROR,
            CliError::Usage(_) => EXIT_SYNTAX_ERROR,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{e}"),
            CliError::ParseDiagnostic {
                error, filename, ..
            } => write!(f, "{filename}: {error}"),
            CliError::Usage(e) => write!(f, "{e}"),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

// ============================================================================
// Subcommand implementations
// ============================================================================

fn run_check(file: &str) -> Result<(), CliError> {
    load_document(file)?;
    Ok(())
}

fn run_tree(file: &str) -> Result<(), CliError> {
    let doc = load_document(file)?;
    let mut out = String::new();
    write_tree(&mut out, &doc, 0);
    print!("{out}");
    Ok(())
}

fn run_completions(shell: &str) -> Result<(), CliError> {
    let shell_enum = match shell.to_lowercase().as_str() {
        "bash" => figue::Shell::Bash,
        "zsh" => figue::Shell::Zsh,
        "fish" => figue::Shell::Fish,
        _ => {
            return Err(CliError::Usage(format!(
                "unknown shell '{}', expected: bash, zsh, fish",
                shell
            )));
        }
    };

    let completions = figue::generate_completions::<Args>(shell_enum, "jsonlite");
    print!("{completions}");
    Ok(())
}

// ============================================================================
// I/O helpers
// ============================================================================

fn read_input(file: Option<&str>) -> Result<String, io::Error> {
    match file {
        Some("-") | None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path),
    }
}

fn write_output(path: &str, content: &str) -> Result<(), io::Error> {
    if path == "-" {
        print!("{content}");
        Ok(())
    } else {
        std::fs::write(path, content)
    }
}

fn is_same_file(a: &str, b: &str) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Read and parse a document; parse failures keep the source for diagnostics.
fn load_document(file: &str) -> Result<Document, CliError> {
    let source = read_input(Some(file))?;
    let filename = if file == "-" { "<stdin>" } else { file };

    match jsonlite_parse::parse(&source) {
        Ok(doc) => Ok(doc),
        Err(error) => Err(CliError::ParseDiagnostic {
            error,
            source,
            filename: filename.to_string(),
        }),
    }
}

// ============================================================================
// Tree display
// ============================================================================

fn write_tree(out: &mut String, doc: &Document, indent: usize) {
    let pad = "  ".repeat(indent);
    let _ = writeln!(out, "{pad}Object {{");
    for (key, value) in doc {
        match value {
            Value::String(s) => {
                let _ = writeln!(out, "{pad}  {key:?}: String({s:?})");
            }
            Value::Object(o) if o.is_empty() => {
                let _ = writeln!(out, "{pad}  {key:?}: Object {{}}");
            }
            Value::Object(o) => {
                let _ = writeln!(out, "{pad}  {key:?}:");
                write_tree(out, o, indent + 2);
            }
        }
    }
    let _ = writeln!(out, "{pad}}}");
}

// ============================================================================
// JSON conversion
// ============================================================================

/// Convert to standard JSON, decoding escape sequences in keys and strings.
fn document_to_json(doc: &Document) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    for (key, value) in doc {
        let json = match value {
            Value::String(s) => serde_json::Value::String(unescape(s).into_owned()),
            Value::Object(o) => document_to_json(o),
        };
        obj.insert(unescape(key).into_owned(), json);
    }
    serde_json::Value::Object(obj)
}
