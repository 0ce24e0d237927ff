//! Integration tests for the GCP plugin set against the shipped templates.

use std::path::PathBuf;
use std::sync::Arc;

use infrar_engine::{MockInvoker, Plugin};
use infrar_gcp::plugins;
use infrar_gcp::runtime::dispatch;
use infrar_proto::{Request, Response, MAIN_TF, TFVARS, VARIABLES_TF};

fn templates_root(plugin: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("templates")
        .join(plugin)
}

fn generate_request(capabilities: &[&str]) -> Request {
    let payload = serde_json::json!({
        "command": "generate",
        "capabilities": capabilities,
        "context": {
            "project_name": "Demo App",
            "environment": "dev",
            "region": "us-central1"
        },
        "credentials": {
            "gcp": {"project_id": "demo-123"}
        }
    });
    Request::from_json(&payload.to_string()).unwrap()
}

fn child_response(service: &str, main: &str) -> Response {
    let mut resp = Response::ok();
    resp.files.insert(MAIN_TF.to_string(), main.to_string());
    resp.metadata.services_included.push(service.to_string());
    resp
}

#[tokio::test]
async fn test_cloud_run_leaf_generates_artifact_set() {
    let leaf = plugins::cloud_run_orchestrator(templates_root("cloud-run"));
    let resp = leaf.generate(&generate_request(&["compute"])).await.unwrap();

    assert!(resp.success);
    assert!(resp.files[MAIN_TF].contains("google_cloud_run_v2_service"));
    assert!(resp.files[VARIABLES_TF].contains("variable \"service_name\""));
    assert_eq!(
        resp.files[TFVARS],
        concat!(
            "service_name    = \"demo-app\"\n",
            "container_image = \"gcr.io/cloudrun/hello\"\n",
            "min_instances   = 0\n",
            "max_instances   = 10\n",
        ),
    );
    assert_eq!(resp.metadata.services_included, vec!["cloud-run"]);
    assert_eq!(resp.metadata.required_apis, vec!["run.googleapis.com"]);
}

#[tokio::test]
async fn test_cloud_run_leaf_honors_parameters() {
    let mut request = generate_request(&["compute"]);
    request
        .parameters
        .insert("container_image".to_string(), serde_json::json!("gcr.io/demo/api:v2"));
    request
        .parameters
        .insert("max_instances".to_string(), serde_json::json!(3));

    let leaf = plugins::cloud_run_orchestrator(templates_root("cloud-run"));
    let resp = leaf.generate(&request).await.unwrap();

    let tfvars = &resp.files[TFVARS];
    assert!(tfvars.contains("container_image = \"gcr.io/demo/api:v2\""));
    assert!(tfvars.contains("max_instances   = 3"));
}

#[tokio::test]
async fn test_cloud_storage_leaf_generates_artifact_set() {
    let leaf = plugins::cloud_storage_orchestrator(templates_root("cloud-storage"));
    let resp = leaf.generate(&generate_request(&["storage"])).await.unwrap();

    assert!(resp.success);
    assert!(resp.files[MAIN_TF].contains("google_storage_bucket"));
    assert!(resp.files[TFVARS].contains("bucket_suffix     = \"demo-app\""));
    assert_eq!(resp.metadata.services_included, vec!["cloud-storage"]);
    assert_eq!(resp.metadata.required_apis, vec!["storage.googleapis.com"]);
}

#[tokio::test]
async fn test_leaf_missing_templates_is_fatal() {
    let leaf = plugins::cloud_run_orchestrator(templates_root("nonexistent"));
    assert!(leaf.generate(&generate_request(&["compute"])).await.is_err());

    // Through dispatch the failure becomes a wire error and exit 1.
    let input = generate_request(&["compute"]).to_json().unwrap();
    let (resp, code) = dispatch(&leaf, &input).await;
    assert!(!resp.success);
    assert_eq!(code, 1);
    assert!(resp.error.contains("main.tf"));
}

#[tokio::test]
async fn test_provider_tier_merges_two_categories() {
    let invoker = MockInvoker::new()
        .with_response("storage", child_response("cloud-storage", "resource storage {}"))
        .with_response("compute", child_response("cloud-run", "resource compute {}"));

    let tier = plugins::gcp_orchestrator(templates_root("gcp"), Arc::new(invoker));
    let resp = tier.generate(&generate_request(&["storage", "compute"])).await.unwrap();

    assert!(resp.success);
    assert!(resp.metadata.warnings.is_empty());

    let main = &resp.files[MAIN_TF];
    assert!(
        main == "resource storage {}\n\nresource compute {}"
            || main == "resource compute {}\n\nresource storage {}",
        "unexpected merge: {main:?}",
    );

    // Provider-level artifacts rendered by the tier itself.
    assert!(resp.files["provider.tf"].contains("provider \"google\""));
    assert!(resp.files["provider.tf"].contains("project     = \"demo-app\""));
    assert!(resp.files[VARIABLES_TF].starts_with("variable \"project_id\""));

    // Credentials resolved through the nested map form.
    let tfvars = &resp.files[TFVARS];
    assert!(tfvars.starts_with("project_id  = \"demo-123\""));
    assert!(tfvars.contains("region      = \"us-central1\""));

    let mut services = resp.metadata.services_included.clone();
    services.sort_unstable();
    assert_eq!(services, vec!["cloud-run", "cloud-storage"]);
}

#[tokio::test]
async fn test_provider_tier_degrades_when_category_is_missing() {
    let invoker = MockInvoker::new()
        .with_response("storage", child_response("cloud-storage", "resource storage {}"));

    let tier = plugins::gcp_orchestrator(templates_root("gcp"), Arc::new(invoker));
    let resp = tier.generate(&generate_request(&["storage", "compute"])).await.unwrap();

    assert!(resp.success);
    assert_eq!(resp.files[MAIN_TF], "resource storage {}");
    assert_eq!(resp.metadata.warnings.len(), 1);
    assert!(resp.metadata.warnings[0].contains("compute"));
}

#[tokio::test]
async fn test_category_tier_routes_to_service_leaf() {
    let invoker = MockInvoker::new()
        .with_response("cloud-run", child_response("cloud-run", "resource run {}"));

    let tier = plugins::compute_orchestrator("/plugins/services/compute", Arc::new(invoker.clone()));
    let resp = tier.generate(&generate_request(&["compute"])).await.unwrap();

    assert!(resp.success);
    assert_eq!(resp.files[MAIN_TF], "resource run {}");
    assert_eq!(resp.metadata.services_included, vec!["cloud-run"]);

    // The category resolves its child directly under its own root.
    let invoked = invoker.invocations();
    assert_eq!(invoked.len(), 1);
    assert!(invoked[0].ends_with("cloud-run/orchestrator/orchestrate"));
}

#[tokio::test]
async fn test_unknown_command_is_rejected() {
    let leaf = plugins::cloud_run_orchestrator(templates_root("cloud-run"));
    let (resp, code) = dispatch(&leaf, r#"{"command":"validate"}"#).await;

    assert!(!resp.success);
    assert_eq!(code, 1);
    assert!(resp.error.contains("unknown command"));
    assert!(resp.files.is_empty());
}

#[tokio::test]
async fn test_malformed_input_is_rejected() {
    let leaf = plugins::cloud_run_orchestrator(templates_root("cloud-run"));
    let (resp, code) = dispatch(&leaf, "not json at all").await;

    assert!(!resp.success);
    assert_eq!(code, 1);
    assert!(resp.error.contains("failed to parse input"));
}
