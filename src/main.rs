//! Purpose: `chatwire` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Decoded activities are emitted as JSON on stdout, one per input line.
//! Invariants: Non-fatal skip notices and errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
#![allow(clippy::result_large_err)]

use std::io::{self, BufRead};

use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use chatwire::api::{Activity, Error, ErrorKind, WireCodec, to_exit_code};

#[derive(Parser)]
#[command(
    name = "chatwire",
    version,
    about = "Decode and re-encode chat-bot protocol activity payloads"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode JSONL activity payloads from stdin, one JSON result per line
    Decode {
        /// Emit the canonical re-encoded wire form instead of a summary
        #[arg(long)]
        canonical: bool,
    },
    /// Validate JSONL activity payloads from stdin and report counts
    Check,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Decode { canonical } => run_decode(canonical),
        Command::Check => run_check(),
    };
    if let Err(err) = outcome {
        eprintln!("{}", error_json(&err));
        std::process::exit(to_exit_code(err.kind()));
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

fn run_decode(canonical: bool) -> Result<(), Error> {
    let codec = WireCodec::new()?;
    let stdin = io::stdin();
    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line.map_err(stdin_error)?;
        if line.trim().is_empty() {
            continue;
        }
        match codec.decode(&line)? {
            Some(activity) => {
                if canonical {
                    println!("{}", codec.encode(&activity)?);
                } else {
                    println!("{}", summary_json(&activity));
                }
            }
            None => eprintln!("{}", skip_notice_json(index as u64 + 1)),
        }
    }
    Ok(())
}

fn run_check() -> Result<(), Error> {
    let codec = WireCodec::new()?;
    let stdin = io::stdin();
    let mut decoded = 0u64;
    let mut ignored = 0u64;
    let mut failed = 0u64;
    for line in stdin.lock().lines() {
        let line = line.map_err(stdin_error)?;
        if line.trim().is_empty() {
            continue;
        }
        match codec.decode(&line) {
            Ok(Some(_)) => decoded += 1,
            Ok(None) => ignored += 1,
            Err(_) => failed += 1,
        }
    }
    println!(
        "{}",
        json!({"decoded": decoded, "ignored": ignored, "failed": failed})
    );
    if failed > 0 {
        return Err(Error::new(ErrorKind::UnsupportedShape)
            .with_message(format!("{failed} malformed payloads")));
    }
    Ok(())
}

fn stdin_error(err: io::Error) -> Error {
    Error::new(ErrorKind::Internal)
        .with_message("failed to read stdin")
        .with_source(err)
}

fn summary_json(activity: &Activity) -> Value {
    let envelope = activity.envelope();
    let mut summary = json!({
        "type": activity.type_tag(),
        "channelId": activity.channel_id(),
    });
    if let Some(action) = activity.action() {
        summary["action"] = json!(action);
    }
    if let Some(service_url) = &envelope.service_url {
        summary["serviceUrl"] = json!(service_url.as_str());
    }
    if let Activity::Message(message) = activity {
        summary["text"] = json!(message.text);
    }
    summary
}

fn skip_notice_json(line: u64) -> Value {
    json!({
        "notice": {
            "kind": "skip",
            "line": line,
            "message": "payload is not addressed to a recognized channel or variant"
        }
    })
}

fn error_json(err: &Error) -> Value {
    json!({
        "error": {
            "kind": format!("{:?}", err.kind()),
            "message": err.to_string()
        }
    })
}
