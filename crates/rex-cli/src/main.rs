// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use rex_exec::{ActionRecord, ScriptExecuterService, ScriptParam};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rex", version, about = "Ruby script execution service CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a script file.
    RunFile {
        /// Path to the script file.
        #[arg(long)]
        script: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Execute inline script content (written to a temp file first).
    RunScript {
        /// Script source text.
        #[arg(long)]
        content: String,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(clap::Args, Debug)]
struct CommonArgs {
    /// Script parameters as NAME=VALUE, appended positionally in order.
    #[arg(long = "param")]
    params: Vec<String>,

    /// Delimiter splitting output lines into name/value pairs.
    #[arg(long, default_value = "=")]
    delimiter: String,

    /// Interpreter program.
    #[arg(long, default_value = "ruby")]
    interpreter: String,

    /// Kill the script after this many milliseconds (0 = no limit).
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print the result as JSON instead of pretty output.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("rex=debug,rex.process=debug,rex.exec=debug")
    } else {
        EnvFilter::new("rex=info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::RunFile { script, common } => {
            let service = ScriptExecuterService::with_interpreter(common.interpreter.as_str());
            let mut record = ActionRecord::new();
            let result = service
                .execute_script_file(
                    &mut record,
                    script,
                    &common.delimiter,
                    parse_params(&common.params)?,
                    timeout_of(common.timeout_ms),
                )
                .await;
            report(&record, result.and_then(|r| r.exit_code), common.json)
        }
        Commands::RunScript { content, common } => {
            let service = ScriptExecuterService::with_interpreter(common.interpreter.as_str());
            let mut record = ActionRecord::new();
            let result = service
                .execute_script(
                    &mut record,
                    content,
                    &common.delimiter,
                    parse_params(&common.params)?,
                    timeout_of(common.timeout_ms),
                )
                .await;
            report(&record, result.and_then(|r| r.exit_code), common.json)
        }
    }
}

fn timeout_of(ms: Option<u64>) -> Option<Duration> {
    ms.filter(|&ms| ms > 0).map(Duration::from_millis)
}

fn parse_params(raw: &[String]) -> Result<Vec<ScriptParam>> {
    raw.iter()
        .map(|entry| match entry.split_once('=') {
            Some((name, value)) if !name.is_empty() => Ok(ScriptParam::new(name, value)),
            _ => bail!("invalid --param '{entry}', expected NAME=VALUE"),
        })
        .collect()
}

fn report(record: &ActionRecord, exit_code: Option<i32>, as_json: bool) -> Result<()> {
    if as_json {
        let doc = json!({
            "exit_code": exit_code,
            "outputs": record
                .outputs
                .iter()
                .map(|(name, value)| json!({ "name": name, "value": value }))
                .collect::<Vec<_>>(),
            "errors": record.errors,
            "ex_info": record.ex_info,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        for (name, value) in &record.outputs {
            println!("{name} = {value}");
        }
        for info in &record.ex_info {
            println!("# {info}");
        }
        for error in &record.errors {
            eprintln!("error: {error}");
        }
    }

    match exit_status(record, exit_code) {
        0 => Ok(()),
        status => std::process::exit(status),
    }
}

/// Mirror the child's exit code where available; a run with reported
/// errors (timeout, start failure, stderr output) never exits 0.
fn exit_status(record: &ActionRecord, exit_code: Option<i32>) -> i32 {
    match exit_code {
        Some(code) if code != 0 => code,
        Some(_) if record.errors.is_empty() => 0,
        _ => 1,
    }
}
