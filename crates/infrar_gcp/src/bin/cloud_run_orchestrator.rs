//! GCP Cloud Run leaf plugin.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use infrar_engine::default_root;
use infrar_gcp::plugins;
use infrar_gcp::runtime;

/// Generates Terraform for a Cloud Run service.
#[derive(Parser)]
#[command(name = "gcp-cloud-run-orchestrator")]
struct Args {
    /// Override the plugin root used to locate templates.
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

    let plugin = plugins::cloud_run_orchestrator(root);
    runtime::run_plugin(&plugin).await
}
