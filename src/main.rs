//! dynjson CLI.
//!
//! Parses a JSON document from a file or stdin and reports the result as a
//! one-line envelope: `{"ok":{...}}` on success, `{"err":{...}}` on failure.

use clap::{Args, Parser, Subcommand};
use dynjson::{deserialize_with, ErrorCode, Limits, ParseOptions, Value};
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dynjson")]
#[command(about = "Parse JSON into a dynamic value tree", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    parse: ParseArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ParseArgs {
    /// Replace structural errors with null instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    /// Maximum array/object nesting depth
    #[arg(long, global = true, value_name = "N")]
    max_depth: Option<u64>,

    /// Disable all resource limits
    #[arg(long, global = true, conflicts_with = "max_depth")]
    unbounded: bool,
}

impl ParseArgs {
    fn options(&self) -> ParseOptions {
        let base = if self.lenient {
            ParseOptions::lenient()
        } else {
            ParseOptions::strict()
        };
        let limits = if self.unbounded {
            Limits::unbounded()
        } else {
            match self.max_depth {
                Some(depth) => Limits::standard().with_max_depth(depth),
                None => Limits::standard(),
            }
        };
        base.with_limits(limits)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,

    /// Parse a document and report the type of its root value
    Check {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Parse a document and look up a dotted path such as `data.items.0.name`
    Get {
        /// Dotted path; numeric segments index arrays
        path: String,

        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let options = cli.parse.options();

    match cli.command {
        Some(Commands::Version) => {
            println!("dynjson v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Some(Commands::Check { file }) => run(file.as_deref(), options, |root| {
            Ok(json!({ "type": root.type_name() }))
        }),
        Some(Commands::Get { path, file }) => run(file.as_deref(), options, |root| {
            root.pointer(&path)
                .map(describe)
                .ok_or_else(|| json!({ "code": 1, "message": format!("path not found: {}", path) }))
        }),
        None => {
            println!("dynjson v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            ExitCode::SUCCESS
        }
    }
}

/// Read, parse, apply `report` to the root and print the envelope.
fn run<F>(file: Option<&Path>, options: ParseOptions, report: F) -> ExitCode
where
    F: FnOnce(&Value) -> Result<serde_json::Value, serde_json::Value>,
{
    let text = match read_input(file) {
        Ok(text) => text,
        Err(e) => {
            println!("{}", json!({ "err": { "code": 2, "message": e.to_string() } }));
            return ExitCode::from(2);
        }
    };

    let outcome = deserialize_with(&text, options)
        .map_err(|e| error_body(&e))
        .and_then(|root| report(&root));

    match outcome {
        Ok(body) => {
            println!("{}", json!({ "ok": body }));
            ExitCode::SUCCESS
        }
        Err(body) => {
            println!("{}", json!({ "err": body }));
            ExitCode::FAILURE
        }
    }
}

fn read_input(file: Option<&Path>) -> std::io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn error_body(err: &ErrorCode) -> serde_json::Value {
    json!({ "code": err.code(), "name": err.name(), "message": err.to_string() })
}

/// Scalars are reported with their value, containers with their size.
fn describe(value: &Value) -> serde_json::Value {
    let type_name = value.type_name();
    match value {
        Value::Null => json!({ "type": type_name, "value": null }),
        Value::Bool(b) => json!({ "type": type_name, "value": b }),
        Value::Integer(n) => json!({ "type": type_name, "value": n }),
        // JSON has no spelling for inf or NaN
        Value::Float(f) if !f.is_finite() => json!({ "type": type_name, "value": f.to_string() }),
        Value::Float(f) => json!({ "type": type_name, "value": f }),
        Value::String(s) => json!({ "type": type_name, "value": s }),
        Value::Array(_) | Value::Object(_) => {
            json!({ "type": type_name, "len": value.child_count() })
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
