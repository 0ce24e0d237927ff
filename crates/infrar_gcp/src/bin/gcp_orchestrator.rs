//! Top-level GCP provider orchestrator plugin.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use infrar_engine::{default_root, SubprocessInvoker};
use infrar_gcp::plugins;
use infrar_gcp::runtime;

/// Generates provider-level Terraform configuration for GCP and fans out to
/// category orchestrators.
#[derive(Parser)]
#[command(name = "gcp-orchestrator")]
struct Args {
    /// Override the plugin root used to locate child plugins and templates.
    #[arg(long)]
    plugin_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    runtime::init_tracing();
    let args = Args::parse();

    let root = match args.plugin_root.map(Ok).unwrap_or_else(default_root) {
        Ok(root) => root,
        Err(err) => return runtime::respond_error(format!("failed to resolve plugin root: {err}")),
    };

    let plugin = plugins::gcp_orchestrator(root, Arc::new(SubprocessInvoker::new()));
    runtime::run_plugin(&plugin).await
}
