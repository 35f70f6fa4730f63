//! Names Demo: scripted session against a guarded name store
//!
//! Wires a name list, its sorted view and a guardian, then runs a script of
//! instructions against them while logging every step.
//!
//! # Usage
//! ```bash
//! # Built-in script
//! RUST_LOG=info cargo run --bin names-demo
//!
//! # Custom script and timings
//! cargo run --bin names-demo -- --script session.txt --debounce-ms 200 --bad-pattern x
//! ```

use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use demos::{
    logging::init_tracing_for_session,
    reports::log_reports,
    session::{DEFAULT_SCRIPT, Session, parse_script},
};
use name_store::{StoreConfig, config, init_store_with_guardian};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "names-demo",
    about = "Scripted session against a name store watched by a guardian",
    long_about = "Adds, removes, sorts and clears names while a guardian removes bad names once the list has been quiet for the debounce period."
)]
struct Args {
    /// Instruction script to run, the built-in script is used when omitted
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Guardian quiet period in milliseconds
    #[arg(long, default_value_t = config::DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    /// Pause between two removals of a clear pass, in milliseconds
    #[arg(long, default_value_t = config::DEFAULT_CLEAR_INTERVAL_MS)]
    clear_interval_ms: u64,

    /// Names containing this pattern are removed by the guardian
    #[arg(long, default_value = config::DEFAULT_BAD_PATTERN)]
    bad_pattern: String,

    /// Keep running after the script for the guardian to settle, in milliseconds
    #[arg(long, default_value_t = 1000)]
    settle_ms: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (script, script_label) = match &args.script {
        Some(path) => (
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read script {}", path.display()))?,
            path.display().to_string(),
        ),
        None => (DEFAULT_SCRIPT.to_string(), "built-in".to_string()),
    };
    let config = StoreConfig::default()
        .with_debounce(Duration::from_millis(args.debounce_ms))
        .with_clear_interval(Duration::from_millis(args.clear_interval_ms))
        .with_bad_pattern(args.bad_pattern);
    init_tracing_for_session(&script_label, &config);

    let instructions = parse_script(&script)?;
    info!(instructions = instructions.len(), "Starting session");

    let (list, view, guardian) = init_store_with_guardian(&config).await?;
    let report_logger = tokio::spawn(log_reports(guardian.reports()));

    let mut session = Session::new(list.clone(), view);
    session.run(&instructions).await?;

    tokio::time::sleep(Duration::from_millis(args.settle_ms)).await;
    info!("final names: {:?}", list.names());

    guardian.shutdown();
    let passes = report_logger.await?;
    info!(passes, "guardian stopped");
    Ok(())
}
