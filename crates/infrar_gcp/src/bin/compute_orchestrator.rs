//! GCP compute category orchestrator plugin.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use infrar_engine::{default_root, SubprocessInvoker};
use infrar_gcp::plugins;
use infrar_gcp::runtime;

/// Fans the compute capability out to per-service compute plugins.
#[derive(Parser)]
#[command(name = "gcp-compute-orchestrator")]
struct Args {
    /// Override the plugin root used to locate child plugins.
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

    let plugin = plugins::compute_orchestrator(root, Arc::new(SubprocessInvoker::new()));
    runtime::run_plugin(&plugin).await
}
