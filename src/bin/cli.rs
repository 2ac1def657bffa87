//! jsonkv CLI
//!
//! Command-line interface over a jsonkv store directory.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use jsonkv::ops::SetOp;
use jsonkv::oplog::OpLogReader;
use jsonkv::{Command, Config, Engine, MergePolicy, Reply};
use serde_json::Value;
use tracing_subscriber::{fmt, EnvFilter};

/// jsonkv CLI
#[derive(Parser, Debug)]
#[command(name = "jsonkv")]
#[command(about = "Key-value store over plain JSON documents")]
#[command(version)]
struct Args {
    /// Store directory
    #[arg(short, long, env = "JSONKV_DIR", default_value = "./jsonkv_data")]
    dir: PathBuf,

    /// Write documents on a single line
    #[arg(long)]
    compact: bool,

    /// Leave unreadable documents out of a merge instead of aborting
    #[arg(long)]
    skip_failures: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// Document name
        file: String,

        /// The key to get
        key: String,
    },

    /// Set a key in an existing document
    Set {
        /// Document name
        file: String,

        /// The key to set
        key: String,

        /// The value to set
        value: String,

        /// Parse the value as JSON instead of storing it as a string
        #[arg(long)]
        json: bool,
    },

    /// Remove a key from a document
    Remove {
        /// Document name
        file: String,

        /// The key to remove
        key: String,
    },

    /// Create a document holding an empty object
    Create {
        /// Document name
        file: String,
    },

    /// Delete a document
    Delete {
        /// Document name
        file: String,
    },

    /// Keys present in either document
    Union { a: String, b: String },

    /// Keys present in both documents
    Intersect { a: String, b: String },

    /// Keys present in exactly one document
    Difference { a: String, b: String },

    /// Merge every document into one composite document
    Merge,

    /// Rewrite the seed documents and truncate the log
    Reset,

    /// Print a whole document
    Show {
        /// Document name
        file: String,
    },

    /// List documents
    Ls,

    /// Print the operation log
    Log,
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,jsonkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let policy = if args.skip_failures {
        MergePolicy::SkipFailures
    } else {
        MergePolicy::FailFast
    };

    let config = Config::builder()
        .store_dir(&args.dir)
        .pretty(!args.compact)
        .merge_policy(policy)
        .build();

    let engine = match Engine::open(config) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let command = match into_command(args.command) {
        Ok(Some(command)) => command,
        Ok(None) => return print_log(&engine),
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = engine.execute(command);

    if let Err(e) = engine.close() {
        tracing::warn!("Failed to sync operation log: {}", e);
    }

    match outcome {
        Ok(reply) => {
            print_reply(reply);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Map a subcommand onto a store command; `None` means "print the log"
fn into_command(command: Commands) -> Result<Option<Command>, String> {
    let command = match command {
        Commands::Get { file, key } => Command::Get { file, key },
        Commands::Set {
            file,
            key,
            value,
            json,
        } => {
            let value = if json {
                serde_json::from_str(&value).map_err(|e| format!("Invalid JSON value: {}", e))?
            } else {
                Value::String(value)
            };
            Command::Set { file, key, value }
        }
        Commands::Remove { file, key } => Command::Remove { file, key },
        Commands::Create { file } => Command::Create { file },
        Commands::Delete { file } => Command::Delete { file },
        Commands::Union { a, b } => Command::Keys { op: SetOp::Union, a, b },
        Commands::Intersect { a, b } => Command::Keys { op: SetOp::Intersect, a, b },
        Commands::Difference { a, b } => Command::Keys { op: SetOp::Difference, a, b },
        Commands::Merge => Command::Merge,
        Commands::Reset => Command::Reset,
        Commands::Show { file } => Command::Show { file },
        Commands::Ls => Command::List,
        Commands::Log => return Ok(None),
    };
    Ok(Some(command))
}

fn print_reply(reply: Reply) {
    match reply {
        Reply::Value(value) => println!("{}", jsonkv::storage::display_value(&value)),
        Reply::Document(document) => print_json(&Value::Object(document)),
        Reply::Names(names) => {
            for name in names {
                println!("{}", name);
            }
        }
        Reply::Merged(report) => {
            println!(
                "Merged {} documents into {}",
                report.merged.len(),
                report.output
            );
            for skipped in &report.skipped {
                println!("  skipped {}: {}", skipped.name, skipped.reason);
            }
        }
        Reply::Count(count) => println!("Wrote {} seed documents", count),
        Reply::Done => {}
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => tracing::error!("Failed to render document: {}", e),
    }
}

fn print_log(engine: &Engine) -> ExitCode {
    match OpLogReader::open(engine.oplog().path()) {
        Ok(reader) => {
            for entry in reader.entries() {
                println!("{} {}", entry.timestamp, entry.message);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to read operation log: {}", e);
            ExitCode::FAILURE
        }
    }
}
