//! Response side of the plugin wire contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ProtoError, ProtoResult};

/// Primary definition artifact.
pub const MAIN_TF: &str = "main.tf";
/// Variable-declaration artifact.
pub const VARIABLES_TF: &str = "variables.tf";
/// Variable-value artifact.
pub const TFVARS: &str = "terraform.tfvars";

/// The unit of result produced exactly once per plugin invocation.
///
/// A caller never splices into a child's response; it builds a new response
/// by aggregating child fragments and metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    /// Artifact name to full rendered content. A key is present only when
    /// its content is non-empty.
    #[serde(default)]
    pub files: BTreeMap<String, String>,
    #[serde(default)]
    pub metadata: ResponseMetadata,
    /// Populated only when `success` is false; omitted from the wire form
    /// when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl Response {
    /// A successful response with no artifacts yet.
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    /// A failed response carrying only an error message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            ..Default::default()
        }
    }

    /// Decode a response from its JSON wire form.
    pub fn from_json(input: &str) -> ProtoResult<Self> {
        serde_json::from_str(input).map_err(ProtoError::Decode)
    }

    /// Encode this response to its JSON wire form.
    pub fn to_json(&self) -> ProtoResult<String> {
        serde_json::to_string(self).map_err(ProtoError::Encode)
    }
}

/// Aggregation bookkeeping carried alongside the artifacts.
///
/// All three lists are ordered and append-only during a merge; duplicates
/// are preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub services_included: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub required_apis: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response_serializes_empty_collections() {
        let json = Response::ok().to_json().unwrap();
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains(r#""files":{}"#));
        assert!(json.contains(r#""services_included":[]"#));
        // An empty error is absent from the wire form.
        assert!(!json.contains("error"));
    }

    #[test]
    fn test_failure_response_carries_error() {
        let json = Response::failure("unknown command: validate").to_json().unwrap();
        assert!(json.contains(r#""success":false"#));
        assert!(json.contains(r#""error":"unknown command: validate""#));
    }

    #[test]
    fn test_round_trip_preserves_all_fields() {
        let mut resp = Response::ok();
        resp.files.insert(MAIN_TF.to_string(), "resource {}".to_string());
        resp.metadata.services_included.push("cloud-run".to_string());
        resp.metadata.services_included.push("cloud-run".to_string());
        resp.metadata.warnings.push("compute orchestrator not found".to_string());
        resp.metadata.required_apis.push("run.googleapis.com".to_string());

        let decoded = Response::from_json(&resp.to_json().unwrap()).unwrap();
        assert_eq!(resp, decoded);
    }

    #[test]
    fn test_round_trip_empty_vs_absent() {
        // Absent error decodes to the empty string, which re-encodes as
        // absent; the round trip is stable.
        let resp = Response::from_json(r#"{"success":true}"#).unwrap();
        assert_eq!(resp.error, "");
        assert!(resp.files.is_empty());
        assert_eq!(resp.metadata, ResponseMetadata::default());

        let decoded = Response::from_json(&resp.to_json().unwrap()).unwrap();
        assert_eq!(resp, decoded);
    }

    #[test]
    fn test_decode_tolerates_missing_metadata_lists() {
        let resp = Response::from_json(r#"{"success":true,"metadata":{"warnings":["w"]}}"#).unwrap();
        assert_eq!(resp.metadata.warnings, vec!["w"]);
        assert!(resp.metadata.services_included.is_empty());
        assert!(resp.metadata.required_apis.is_empty());
    }
}
