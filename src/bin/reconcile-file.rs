//! # Email Record Reconciler
//!
//! A command-line utility that reconciles a JSON file of raw email records
//! and prints the result, using the same engine callers embed.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --features cli --bin reconcile-file -- records.json
//! cargo run --features cli --bin reconcile-file -- records.json --config config.json
//! cargo run --features cli --bin reconcile-file -- records.json --login jane@corp.example
//! ```
//!
//! `records.json` must hold an array of records such as
//! `{"type": "HOME", "address": "jane@home.example", "preferredFlag": "Y"}`.
//! `config.json` holds a `ReconcilerConfig`, e.g.
//! `{"duplicatePolicy": "merge", "allowedTypes": ["HOME", "BUSINESS"]}`.
//!
//! Set `RUST_LOG=debug` to see why individual records were dropped.
//!
//! ## Exit Codes
//!
//! - `0`: The file was reconciled (whatever the preferred status)
//! - `1`: Bad arguments, unreadable files, invalid configuration or a
//!   document that is not an array of records

use email_reconciler::{
    ReconError, Reconciler, ReconcilerBuilder, ReconcilerConfig, Reconciliation,
};
use serde_json::{Map, Value};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

struct Args {
    records: PathBuf,
    config: Option<PathBuf>,
    login: Option<String>,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("reconcile-file");

    let parsed = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("Error: {}", message);
            print_usage(program);
            process::exit(1);
        }
    };

    let reconciler = match load_reconciler(parsed.config.as_deref()) {
        Ok(reconciler) => reconciler,
        Err(message) => {
            eprintln!("❌ {}", message);
            process::exit(1);
        }
    };

    match reconcile_file(&reconciler, &parsed.records) {
        Ok(result) => print_result(&result, parsed.login.as_deref()),
        Err(message) => {
            eprintln!("❌ Reconciliation failed: {}", message);
            process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} <records.json> [--config <config.json>] [--login <candidate>]",
        program
    );
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} records.json", program);
    eprintln!("  {} records.json --login jane@corp.example", program);
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut records = None;
    let mut config = None;
    let mut login = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().ok_or("--config needs a file path")?;
                config = Some(PathBuf::from(value));
            }
            "--login" => {
                let value = iter.next().ok_or("--login needs a candidate address")?;
                login = Some(value.clone());
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option '{}'", flag)),
            path if records.is_none() => records = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument '{}'", extra)),
        }
    }

    Ok(Args {
        records: records.ok_or("missing records file")?,
        config,
        login,
    })
}

fn load_reconciler(config_path: Option<&Path>) -> Result<Reconciler, String> {
    let Some(path) = config_path else {
        return Ok(Reconciler::default());
    };

    let text = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read config '{}': {}", path.display(), e))?;
    let config: ReconcilerConfig = serde_json::from_str(&text)
        .map_err(|e| format!("Invalid config '{}': {}", path.display(), e))?;

    ReconcilerBuilder::from_config(config)
        .build()
        .map_err(|e| e.to_string())
}

fn reconcile_file(reconciler: &Reconciler, path: &Path) -> Result<Reconciliation, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read '{}': {}", path.display(), e))?;

    reconciler.reconcile_json(&text).map_err(|e| match e {
        ReconError::NotASequence { actual } => {
            format!("'{}' must contain an array of records, got {}", path.display(), actual)
        }
        other => other.to_string(),
    })
}

fn render(result: &Reconciliation, login: Option<&str>) -> serde_json::Result<String> {
    let mut output = Map::new();
    output.insert("reconciliation".to_string(), serde_json::to_value(result)?);
    if let Some(candidate) = login {
        output.insert(
            "login".to_string(),
            serde_json::to_value(result.match_login(candidate))?,
        );
    }
    serde_json::to_string_pretty(&Value::Object(output))
}

fn print_result(result: &Reconciliation, login: Option<&str>) {
    match render(result, login) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("❌ Cannot serialize result: {}", e);
            process::exit(1);
        }
    }

    if !result.diagnostics.rejected.is_empty() {
        eprintln!(
            "⚠ {} record(s) dropped during normalization",
            result.diagnostics.rejected_count()
        );
    }
}
