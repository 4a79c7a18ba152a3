//! sysglobalmgr - System Global Settings Configuration Manager
//!
//! One-shot CLI: reads a declarative input document, reconciles the
//! declared global settings against the device, prints a JSON result on
//! stdout.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, error, Level};
use tracing_subscriber::FmtSubscriber;

use bigip_cfgmgr_common::{failure_document, CfgMgrResult, ModuleResult, RestClient};
use bigip_sysglobalmgr::{ModuleInput, SysGlobalMgr};

#[derive(Debug, Parser)]
#[command(name = "sysglobalmgr", about = "Manage BIG-IP system global settings")]
struct Cli {
    /// Path to the declarative input document (YAML or JSON)
    input: PathBuf,

    /// Compute the change set without applying it
    #[arg(long)]
    check: bool,
}

/// Initializes tracing/logging subsystem.
///
/// Logs go to stderr; stdout carries only the result document.
fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn load_input(path: &PathBuf) -> CfgMgrResult<ModuleInput> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| bigip_cfgmgr_common::CfgMgrError::invalid_input(e.to_string()))?;
    serde_yaml::from_str(&text)
        .map_err(|e| bigip_cfgmgr_common::CfgMgrError::invalid_input(e.to_string()))
}

async fn run(input: &ModuleInput, check_mode: bool) -> CfgMgrResult<ModuleResult> {
    let client = Arc::new(RestClient::connect(&input.connection).await?);
    let mgr = SysGlobalMgr::new(client.clone(), input, check_mode);
    let result = mgr.exec().await;
    // Token revocation runs regardless of the outcome.
    client.cleanup_token().await;
    result
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();

    let input = match load_input(&cli.input) {
        Ok(input) => input,
        Err(e) => {
            error!("{}", e);
            println!("{}", failure_document(&e.to_string()));
            return ExitCode::FAILURE;
        }
    };

    let check_mode = cli.check || input.check_mode;
    debug!(check_mode, "Running sysglobalmgr");

    match run(&input, check_mode).await {
        Ok(result) => {
            println!("{}", result.render());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            println!("{}", failure_document(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}
