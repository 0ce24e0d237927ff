//! Request side of the plugin wire contract.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProtoError, ProtoResult};

/// The only command with defined behavior.
pub const COMMAND_GENERATE: &str = "generate";

/// The unit of work passed to every plugin tier.
///
/// A request is immutable once received: a tier forwards the same value,
/// unmodified, to every child it invokes, so no child observes another
/// child's view of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Operation selector; anything other than `"generate"` is rejected.
    #[serde(default)]
    pub command: String,
    /// Requested capability tags. Duplicates are allowed and collapse at the
    /// resolved child, not here.
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Project identity carried on every request.
    #[serde(default)]
    pub context: Context,
    /// Provider credential bag. Opaque to everything except credential
    /// extraction during template rendering.
    #[serde(default)]
    pub credentials: HashMap<String, Value>,
    /// Caller overrides merged into template variables.
    #[serde(default)]
    pub parameters: HashMap<String, Value>,
}

impl Request {
    /// Check whether this request selects the generate operation.
    pub fn is_generate(&self) -> bool {
        self.command == COMMAND_GENERATE
    }

    /// Decode a request from its JSON wire form.
    pub fn from_json(input: &str) -> ProtoResult<Self> {
        serde_json::from_str(input).map_err(ProtoError::Decode)
    }

    /// Encode this request to its JSON wire form.
    pub fn to_json(&self) -> ProtoResult<String> {
        serde_json::to_string(self).map_err(ProtoError::Encode)
    }
}

/// Project-level identity shared by every tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}
