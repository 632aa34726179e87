//! Filekit CLI - Command line interface
//!
//! Thin front end over `PhysicalFileStore`; configuration comes from
//! `filekit.json` (or `--config`) and command line flags.

use clap::{ArgAction, Parser, Subcommand};
use filekit_config::RetryConfig;
use filekit_vfs::{native_store, secure_save, FileStore, PhysicalFileStore, VfsError};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};

mod config;
mod logging;

use crate::config::{load_config, LogConfig};
use crate::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "filekit",
    about = "Read, write, list and delete files",
    version = "0.1.0"
)]
struct Cli {
    /// Configuration file path (default: ./filekit.json if present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value = "compact", global = true)]
    log_format: LogFormat,

    /// Also append logs to this file
    #[arg(long, value_name = "FILE", global = true)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print listings and results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Print file content
    Open { path: PathBuf },
    /// Write content to a file (stdin when CONTENT is omitted)
    Save { path: PathBuf, content: Option<String> },
    /// Append content to a file, creating it if missing
    Append { path: PathBuf, content: Option<String> },
    /// Create an empty file if none exists
    Create { path: PathBuf },
    /// Report whether a file exists (exit status 1 when it doesn't)
    Exists { path: PathBuf },
    /// Delete a file or directory tree
    Delete { path: PathBuf },
    /// List files in a directory
    List {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// List subdirectories of a directory
    ListDirs {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// List everything under a directory, recursively
    ListAll {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Write content and read it back until it matches
    SecureSave { path: PathBuf, content: Option<String> },
}

/// Result of a command as seen by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Negative,
}

fn main() {
    let cli = Cli::parse();

    let store_config = match load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let log_config = LogConfig::from_config(&store_config, cli.verbose);
    if let Err(e) = logging::init(&log_config, cli.log_format, cli.log_file.as_deref()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let store = native_store(store_config.base_dir.as_deref());
    info!(target: "filekit::cli", command = ?cli.command, base = ?store.base(), "start");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(&store, &store_config.retry, cli.command, cli.json, &mut out) {
        Ok(Status::Success) => {}
        Ok(Status::Negative) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Execute one command against `store`, writing its output to `out`.
fn run<W: Write>(
    store: &PhysicalFileStore,
    retry: &RetryConfig,
    command: Command,
    json: bool,
    out: &mut W,
) -> Result<Status, String> {
    match command {
        Command::Open { path } => {
            let content = store.open(&path).map_err(describe)?;
            write!(out, "{}", content).map_err(io_error)?;
        }
        Command::Save { path, content } => {
            let content = content_or_stdin(content)?;
            store.save(&path, &content).map_err(describe)?;
        }
        Command::Append { path, content } => {
            let content = content_or_stdin(content)?;
            store.append(&path, &content).map_err(describe)?;
        }
        Command::Create { path } => {
            let created = store.create(&path).map_err(describe)?;
            debug!(target: "filekit::cli", path = %path.display(), created, "create");
        }
        Command::Exists { path } => {
            let found = store.exists(&path).map_err(describe)?;
            writeln!(out, "{}", found).map_err(io_error)?;
            if !found {
                return Ok(Status::Negative);
            }
        }
        Command::Delete { path } => store.delete(&path).map_err(describe)?,
        Command::List { dir } => print_list(out, &store.list(&dir).map_err(describe)?, json)?,
        Command::ListDirs { dir } => print_list(out, &store.list_dirs(&dir).map_err(describe)?, json)?,
        Command::ListAll { dir } => {
            print_list(out, &store.list_recursive(&dir).map_err(describe)?, json)?
        }
        Command::SecureSave { path, content } => {
            let content = content_or_stdin(content)?;
            let attempt = secure_save(store, &path, &content, retry).map_err(describe)?;
            if json {
                let report = serde_json::json!({ "path": path.display().to_string(), "attempts": attempt });
                writeln!(out, "{}", report).map_err(io_error)?;
            } else {
                writeln!(out, "verified after {} attempt(s)", attempt).map_err(io_error)?;
            }
        }
    }
    Ok(Status::Success)
}

fn print_list<W: Write>(out: &mut W, names: &[String], json: bool) -> Result<(), String> {
    if json {
        let encoded = serde_json::to_string(names).map_err(|e| e.to_string())?;
        writeln!(out, "{}", encoded).map_err(io_error)
    } else {
        names
            .iter()
            .try_for_each(|name| writeln!(out, "{}", name))
            .map_err(io_error)
    }
}

fn content_or_stdin(content: Option<String>) -> Result<String, String> {
    match content {
        Some(content) => Ok(content),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("Cannot read stdin: {}", e))?;
            Ok(buffer)
        }
    }
}

fn describe(err: VfsError) -> String {
    err.to_string()
}

fn io_error(err: io::Error) -> String {
    format!("Cannot write output: {}", err)
}
