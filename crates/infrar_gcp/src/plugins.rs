//! Plugin definitions for the GCP branch of the hierarchy.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use infrar_engine::{
    CapabilityTable, Leaf, LeafSpec, PluginInvoker, PluginLayout, SelfArtifact, SelfRender, Tier,
    TierSpec,
};
use infrar_proto::{MAIN_TF, TFVARS, VARIABLES_TF};
use infrar_template::TemplateDir;

/// Top-level GCP provider orchestrator.
///
/// Fans requested capabilities out to category orchestrators under
/// `services/` and renders the provider-level configuration itself:
/// `provider.tf` plus `variables.tf` and `terraform.tfvars` fragments that
/// lead the merged artifacts.
pub fn gcp_orchestrator(root: impl Into<PathBuf>, invoker: Arc<dyn PluginInvoker>) -> Tier {
    let root = root.into();
    let spec = TierSpec {
        name: "gcp",
        table: CapabilityTable::new(&[("storage", "storage"), ("compute", "compute")]),
        self_renders: vec![
            SelfRender {
                artifact: SelfArtifact::Standalone("provider.tf"),
                template: "provider-block.tf.tmpl",
            },
            SelfRender {
                artifact: SelfArtifact::VariablesPrefix,
                template: "variables.tf.tmpl",
            },
            SelfRender {
                artifact: SelfArtifact::ValuesPrefix,
                template: "tfvars.tmpl",
            },
        ],
    };

    Tier::new(
        spec,
        PluginLayout::new(root.clone()).with_children_dir("services"),
        invoker,
    )
    .with_templates(TemplateDir::new(root.join("terraform-config")))
    .with_provider("gcp")
}

/// Storage category orchestrator: routes the `storage` capability to the
/// Cloud Storage leaf. Renders nothing itself.
pub fn storage_orchestrator(root: impl Into<PathBuf>, invoker: Arc<dyn PluginInvoker>) -> Tier {
    category_orchestrator("storage", &[("storage", "cloud-storage")], root, invoker)
}

/// Compute category orchestrator: routes the `compute` capability to the
/// Cloud Run leaf. Renders nothing itself.
pub fn compute_orchestrator(root: impl Into<PathBuf>, invoker: Arc<dyn PluginInvoker>) -> Tier {
    category_orchestrator("compute", &[("compute", "cloud-run")], root, invoker)
}

fn category_orchestrator(
    name: &'static str,
    table: &[(&str, &str)],
    root: impl Into<PathBuf>,
    invoker: Arc<dyn PluginInvoker>,
) -> Tier {
    let spec = TierSpec {
        name,
        table: CapabilityTable::new(table),
        self_renders: Vec::new(),
    };
    Tier::new(spec, PluginLayout::new(root), invoker).with_provider("gcp")
}

/// Cloud Storage leaf.
pub fn cloud_storage_orchestrator(root: impl AsRef<Path>) -> Leaf {
    let spec = LeafSpec {
        service: "cloud-storage",
        required_apis: &["storage.googleapis.com"],
        raw_files: &[(MAIN_TF, "main.tf"), (VARIABLES_TF, "variables.tf")],
        rendered_files: &[(TFVARS, "tfvars.tmpl")],
    };
    Leaf::new(spec, TemplateDir::new(root.as_ref().join("terraform"))).with_provider("gcp")
}

/// Cloud Run leaf.
pub fn cloud_run_orchestrator(root: impl AsRef<Path>) -> Leaf {
    let spec = LeafSpec {
        service: "cloud-run",
        required_apis: &["run.googleapis.com"],
        raw_files: &[(MAIN_TF, "main.tf"), (VARIABLES_TF, "variables.tf")],
        rendered_files: &[(TFVARS, "tfvars.tmpl")],
    };
    Leaf::new(spec, TemplateDir::new(root.as_ref().join("terraform"))).with_provider("gcp")
}
