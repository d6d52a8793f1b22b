//! toolstate CLI - replay harness for stateful mock tool sessions
//!
//! Prints one JSON line per replayed step on stdout; logs go to stderr.

mod script;

use anyhow::Result;
use clap::{Parser, Subcommand};
use script::{demo_responses, demo_script, load_document, Replayer, Script};
use std::path::PathBuf;
use toolstate::{CannedResponses, ConfigBuilder, Domain, SessionConfig};
use tracing::Level;

#[derive(Parser)]
#[command(name = "toolstate")]
#[command(about = "Replay scripted conversations against a stateful mock tool session", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Log level: trace, debug, info, warn, error
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in stateful-world conversation
    Demo,

    /// Replay a JSON or YAML conversation script
    Replay {
        /// Script file
        script: PathBuf,

        /// Canned responses file (JSON or YAML)
        #[arg(short, long)]
        canned: Option<PathBuf>,

        /// Rule group for mock calls, overriding the script
        #[arg(short, long)]
        domain: Option<Domain>,
    },
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

fn run(script: &Script, responder: CannedResponses) -> Result<()> {
    let base = SessionConfig::from_env_with_defaults(SessionConfig::ENV_PREFIX)?;
    let replayer = Replayer::new(script, base, responder)?;
    for output in replayer.replay(script)? {
        println!("{}", serde_json::to_string(&output)?);
    }
    tracing::info!(
        files = replayer.session().lock().file_count(),
        "Replay finished"
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(parse_level(&cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("toolstate {}", toolstate::version());

    match cli.command {
        Commands::Demo => run(&demo_script(), demo_responses()),
        Commands::Replay {
            script,
            canned,
            domain,
        } => {
            let mut parsed: Script = load_document(&script)?;
            if domain.is_some() {
                parsed.domain = domain;
            }
            let responder = match canned {
                Some(path) => load_document(&path)?,
                None => CannedResponses::new(),
            };
            run(&parsed, responder)
        }
    }
}
