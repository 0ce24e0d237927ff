//! # infrar_template
//!
//! Template rendering substrate for infrar plugins.
//!
//! A template is free-form text containing `{{ … }}` substitution
//! directives. Each directive names a variable by dotted path and may pipe
//! it through helper transforms:
//!
//! ```text
//! project = {{ metadata.project_id | quote }}
//! region  = {{ variables.region | default:"us-central1" | quote }}
//! name    = {{ project_name | sanitize | quote }}
//! ```
//!
//! The variable set is derived from the request (see [`TemplateVars`]):
//! project identity, a `variables` map seeded with the region and overlaid
//! with caller parameters, and a best-effort `metadata.project_id` pulled
//! from the credential bag.

pub mod dir;
pub mod engine;
pub mod error;
pub mod vars;

pub use dir::TemplateDir;
pub use engine::TemplateEngine;
pub use error::{TemplateError, TemplateResult};
pub use vars::{extract_project_id, CredentialKeys, TemplateVars};
