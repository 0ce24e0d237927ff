//! Plugin tier composition.
//!
//! A [`Tier`] is a non-leaf plugin: it resolves capabilities to children,
//! invokes each child with the unmodified request, merges the results and
//! adds any artifacts it renders itself. Child failures of every kind
//! degrade into warnings; a tier always produces a successful response.
//!
//! A [`Leaf`] has no children. It emits its artifact set straight from its
//! template directory, and any local failure is fatal to the invocation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use infrar_proto::{Request, Response, TFVARS, VARIABLES_TF};
use infrar_template::{CredentialKeys, TemplateDir, TemplateEngine, TemplateVars};

use crate::aggregate::ArtifactMerge;
use crate::error::{EngineError, EngineResult};
use crate::invoker::{InvokeError, PluginInvoker};
use crate::layout::PluginLayout;
use crate::resolver::CapabilityTable;

/// A generator unit: one request in, one response out.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Handle one generate request.
    ///
    /// An `Err` is a fatal local failure; the caller reports it as a
    /// `success=false` response and a non-zero exit.
    async fn generate(&self, request: &Request) -> EngineResult<Response>;
}

/// Placement of a tier-rendered artifact in the merged output.
#[derive(Debug, Clone, Copy)]
pub enum SelfArtifact {
    /// A standalone artifact key owned by this tier.
    Standalone(&'static str),
    /// A `variables.tf` fragment placed ahead of all child fragments.
    VariablesPrefix,
    /// A `terraform.tfvars` fragment placed ahead of all child fragments.
    ValuesPrefix,
}

impl SelfArtifact {
    /// Artifact name used in warnings and as the standalone key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Standalone(name) => name,
            Self::VariablesPrefix => VARIABLES_TF,
            Self::ValuesPrefix => TFVARS,
        }
    }
}

/// One artifact a tier renders itself.
#[derive(Debug, Clone)]
pub struct SelfRender {
    pub artifact: SelfArtifact,
    /// Template file name within the tier's template directory.
    pub template: &'static str,
}

/// Static configuration of a non-leaf tier.
#[derive(Debug, Clone)]
pub struct TierSpec {
    /// Tier name used in logs.
    pub name: &'static str,
    /// Capability to child mapping.
    pub table: CapabilityTable,
    /// Artifacts this tier renders itself.
    pub self_renders: Vec<SelfRender>,
}

/// A non-leaf plugin tier.
pub struct Tier {
    spec: TierSpec,
    layout: PluginLayout,
    invoker: Arc<dyn PluginInvoker>,
    templates: Option<TemplateDir>,
    engine: TemplateEngine,
    provider: &'static str,
    credential_keys: CredentialKeys,
}

impl Tier {
    /// Create a tier with no template directory.
    pub fn new(spec: TierSpec, layout: PluginLayout, invoker: Arc<dyn PluginInvoker>) -> Self {
        Self {
            spec,
            layout,
            invoker,
            templates: None,
            engine: TemplateEngine::new(),
            provider: "",
            credential_keys: CredentialKeys::default(),
        }
    }

    /// Set the directory this tier renders its own templates from.
    pub fn with_templates(mut self, templates: TemplateDir) -> Self {
        self.templates = Some(templates);
        self
    }

    /// Set the provider name exposed to templates.
    pub fn with_provider(mut self, provider: &'static str) -> Self {
        self.provider = provider;
        self
    }

    fn render_self(&self, render: &SelfRender, request: &Request) -> EngineResult<String> {
        let templates = self.templates.as_ref().ok_or_else(|| {
            EngineError::Config(format!(
                "tier {} has no template directory configured",
                self.spec.name
            ))
        })?;
        let vars = TemplateVars::from_request(request, self.provider, &self.credential_keys);
        Ok(self.engine.render_file(templates, render.template, &vars)?)
    }
}

#[async_trait]
impl Plugin for Tier {
    async fn generate(&self, request: &Request) -> EngineResult<Response> {
        let mut merge = ArtifactMerge::new();
        let resolution = self.spec.table.resolve(&request.capabilities);
        info!(
            "Tier {} resolved {} capabilities to {} children",
            self.spec.name,
            request.capabilities.len(),
            resolution.len(),
        );

        // Children run one at a time; every child sees the same request.
        for (child, capabilities) in resolution.children() {
            debug!("Child {} handles capabilities {:?}", child, capabilities);
            let executable = self.layout.child_executable(child);
            match self.invoker.invoke(&executable, request).await {
                Ok(response) if response.success => {
                    info!("Child {} contributed {} artifacts", child, response.files.len());
                    merge.absorb_child(&response);
                }
                Ok(response) => {
                    merge.warn(format!("{} failed: {}", child, response.error));
                }
                Err(InvokeError::Unavailable(_)) => {
                    merge.warn(format!("{} orchestrator not found", child));
                }
                Err(err) => {
                    merge.warn(format!("Failed to call {} orchestrator: {}", child, err));
                }
            }
        }

        for render in &self.spec.self_renders {
            match self.render_self(render, request) {
                Ok(content) => match render.artifact {
                    SelfArtifact::Standalone(name) => merge.insert_standalone(name, content),
                    SelfArtifact::VariablesPrefix => merge.push_self_variables(content),
                    SelfArtifact::ValuesPrefix => merge.push_self_values(content),
                },
                Err(err) => {
                    merge.warn(format!(
                        "Failed to generate {}: {}",
                        render.artifact.name(),
                        err
                    ));
                }
            }
        }

        Ok(merge.finish())
    }
}

/// Static configuration of a leaf plugin.
#[derive(Debug, Clone)]
pub struct LeafSpec {
    /// Service identifier reported in `services_included`.
    pub service: &'static str,
    /// APIs the generated configuration requires.
    pub required_apis: &'static [&'static str],
    /// `(artifact name, template file)` pairs emitted verbatim.
    pub raw_files: &'static [(&'static str, &'static str)],
    /// `(artifact name, template file)` pairs rendered through the engine.
    pub rendered_files: &'static [(&'static str, &'static str)],
}

/// A leaf plugin: no children, fatal local failures.
pub struct Leaf {
    spec: LeafSpec,
    templates: TemplateDir,
    engine: TemplateEngine,
    provider: &'static str,
    credential_keys: CredentialKeys,
}

impl Leaf {
    /// Create a leaf reading from the given template directory.
    pub fn new(spec: LeafSpec, templates: TemplateDir) -> Self {
        Self {
            spec,
            templates,
            engine: TemplateEngine::new(),
            provider: "",
            credential_keys: CredentialKeys::default(),
        }
    }

    /// Set the provider name exposed to templates.
    pub fn with_provider(mut self, provider: &'static str) -> Self {
        self.provider = provider;
        self
    }
}

#[async_trait]
impl Plugin for Leaf {
    async fn generate(&self, request: &Request) -> EngineResult<Response> {
        let mut response = Response::ok();
        response.metadata.services_included.push(self.spec.service.to_string());
        response
            .metadata
            .required_apis
            .extend(self.spec.required_apis.iter().map(|api| api.to_string()));

        for (name, file) in self.spec.raw_files {
            let content = self.templates.load(file)?;
            if !content.is_empty() {
                response.files.insert(name.to_string(), content);
            }
        }

        let vars = TemplateVars::from_request(request, self.provider, &self.credential_keys);
        for (name, file) in self.spec.rendered_files {
            let content = self.engine.render_file(&self.templates, file, &vars)?;
            if !content.is_empty() {
                response.files.insert(name.to_string(), content);
            }
        }

        info!(
            "Leaf {} generated {} artifacts",
            self.spec.service,
            response.files.len(),
        );
        Ok(response)
    }
}
