//! Artifact fragment merging.

use tracing::warn;

use infrar_proto::{Response, MAIN_TF, TFVARS, VARIABLES_TF};

/// Accumulates child fragments, tier-rendered fragments and warnings, then
/// folds them into one merged response.
///
/// Merge rules:
/// - for each well-known artifact name, non-empty fragments are joined with
///   a blank-line separator in the order children were iterated; the key is
///   omitted entirely when nothing produced it;
/// - fragments the tier rendered itself for `variables.tf` and
///   `terraform.tfvars` are placed ahead of every child fragment; other
///   tier-rendered artifacts are standalone keys;
/// - `services_included` and `required_apis` concatenate in iteration
///   order, duplicates preserved;
/// - warnings accumulate in the order encountered. A successfully returning
///   child's own warning list is not re-propagated; only structural
///   failures and declared child failures surface here.
#[derive(Debug, Default)]
pub struct ArtifactMerge {
    main: Vec<String>,
    variables: Vec<String>,
    values: Vec<String>,
    self_variables: Vec<String>,
    self_values: Vec<String>,
    standalone: Vec<(String, String)>,
    services: Vec<String>,
    apis: Vec<String>,
    warnings: Vec<String>,
}

impl ArtifactMerge {
    /// Create an empty merge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in a successful child response: collect its well-known artifact
    /// fragments and concatenate its metadata.
    pub fn absorb_child(&mut self, response: &Response) {
        for (fragments, name) in [
            (&mut self.main, MAIN_TF),
            (&mut self.variables, VARIABLES_TF),
            (&mut self.values, TFVARS),
        ] {
            if let Some(fragment) = response.files.get(name) {
                if !fragment.is_empty() {
                    fragments.push(fragment.clone());
                }
            }
        }

        self.services
            .extend(response.metadata.services_included.iter().cloned());
        self.apis
            .extend(response.metadata.required_apis.iter().cloned());
    }

    /// Add a tier-rendered `variables.tf` fragment, placed ahead of child
    /// fragments.
    pub fn push_self_variables(&mut self, fragment: String) {
        if !fragment.is_empty() {
            self.self_variables.push(fragment);
        }
    }

    /// Add a tier-rendered `terraform.tfvars` fragment, placed ahead of
    /// child fragments.
    pub fn push_self_values(&mut self, fragment: String) {
        if !fragment.is_empty() {
            self.self_values.push(fragment);
        }
    }

    /// Add a standalone tier-rendered artifact under its own key.
    pub fn insert_standalone(&mut self, name: impl Into<String>, content: String) {
        if !content.is_empty() {
            self.standalone.push((name.into(), content));
        }
    }

    /// Record a warning in encounter order.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.warnings.push(message);
    }

    /// Apply the join rules and produce the merged response.
    pub fn finish(self) -> Response {
        let mut response = Response::ok();

        let mut variables = self.self_variables;
        variables.extend(self.variables);
        let mut values = self.self_values;
        values.extend(self.values);

        for (name, fragments) in [
            (MAIN_TF, self.main),
            (VARIABLES_TF, variables),
            (TFVARS, values),
        ] {
            if !fragments.is_empty() {
                response.files.insert(name.to_string(), fragments.join("\n\n"));
            }
        }

        for (name, content) in self.standalone {
            response.files.insert(name, content);
        }

        response.metadata.services_included = self.services;
        response.metadata.required_apis = self.apis;
        response.metadata.warnings = self.warnings;
        response
    }
}
