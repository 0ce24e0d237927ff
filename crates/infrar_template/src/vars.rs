//! Derived template variables.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::debug;

use infrar_proto::Request;

/// Credential bag keys used for best-effort project identification.
///
/// Extraction order is a contract: the JSON-encoded document field is tried
/// first, then the nested map; the first hit wins and no hit leaves the
/// identifier empty.
#[derive(Debug, Clone)]
pub struct CredentialKeys {
    /// Field holding a JSON-encoded credential document.
    pub document_field: &'static str,
    /// Field holding a nested credential map.
    pub nested_field: &'static str,
    /// Identifier key inside either form.
    pub id_key: &'static str,
}

impl Default for CredentialKeys {
    fn default() -> Self {
        Self {
            document_field: "gcp_service_account_json",
            nested_field: "gcp",
            id_key: "project_id",
        }
    }
}

/// The variable set every render sees, addressed by dotted path.
#[derive(Debug, Clone)]
pub struct TemplateVars {
    root: Map<String, Value>,
}

impl TemplateVars {
    /// Derive the variable set for one render from a request.
    ///
    /// `variables` is seeded with the request region, then overlaid with
    /// every caller parameter; parameter keys win on collision.
    pub fn from_request(request: &Request, provider: &str, keys: &CredentialKeys) -> Self {
        let mut variables = Map::new();
        variables.insert(
            "region".to_string(),
            Value::String(request.context.region.clone()),
        );
        for (key, value) in &request.parameters {
            variables.insert(key.clone(), value.clone());
        }

        let project_id = extract_project_id(&request.credentials, keys).unwrap_or_default();
        debug!("Derived template variables (project_id: {:?})", project_id);

        let mut metadata = Map::new();
        metadata.insert("project_id".to_string(), Value::String(project_id));

        let mut root = Map::new();
        root.insert(
            "project_name".to_string(),
            Value::String(request.context.project_name.clone()),
        );
        root.insert(
            "environment".to_string(),
            Value::String(request.context.environment.clone()),
        );
        root.insert(
            "region".to_string(),
            Value::String(request.context.region.clone()),
        );
        root.insert("provider".to_string(), Value::String(provider.to_string()));
        root.insert("variables".to_string(), Value::Object(variables));
        root.insert("metadata".to_string(), Value::Object(metadata));

        Self { root }
    }

    /// Build a variable set from explicit entries.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            root: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Resolve a dotted lookup path.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

/// Best-effort project identifier extraction from a credential bag.
///
/// Tries, in order: a field containing a JSON-encoded credential document
/// with the identifier key, then a nested map with the same key.
pub fn extract_project_id(
    credentials: &HashMap<String, Value>,
    keys: &CredentialKeys,
) -> Option<String> {
    if let Some(Value::String(document)) = credentials.get(keys.document_field) {
        if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(document) {
            if let Some(Value::String(id)) = fields.get(keys.id_key) {
                return Some(id.clone());
            }
        }
    }

    if let Some(Value::Object(nested)) = credentials.get(keys.nested_field) {
        if let Some(Value::String(id)) = nested.get(keys.id_key) {
            return Some(id.clone());
        }
    }

    None
}
