//! On-disk template resolution.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{TemplateError, TemplateResult};

/// Resolves template names to source text within a fixed directory.
///
/// Each plugin addresses its templates by a fixed relative path convention
/// (`terraform-config/` at the provider tier, `terraform/` at the leaves);
/// the directory is passed in explicitly so tests can point it at a scratch
/// layout.
#[derive(Debug, Clone)]
pub struct TemplateDir {
    base: PathBuf,
}

impl TemplateDir {
    /// Create a resolver rooted at the given directory.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// The directory this resolver reads from.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Full path for a template name.
    pub fn path(&self, name: &str) -> PathBuf {
        self.base.join(name)
    }

    /// Load a template's source text.
    pub fn load(&self, name: &str) -> TemplateResult<String> {
        let path = self.path(name);
        debug!("Loading template {:?}", path);
        fs::read_to_string(&path).map_err(|source| TemplateError::Read { path, source })
    }
}
