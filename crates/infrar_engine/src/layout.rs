//! Sibling-executable convention for locating child plugins.

use std::path::{Path, PathBuf};

/// Resolves child plugin identifiers to executable paths.
///
/// Deployed plugins live in a directory tree next to their parent: each
/// child is an `orchestrate` binary under `<child>/orchestrator/`, with an
/// optional intermediate directory between the root and the child (the
/// provider tier keeps its categories under `services/`). The root is
/// passed in explicitly so tests can point it at a scratch layout.
#[derive(Debug, Clone)]
pub struct PluginLayout {
    root: PathBuf,
    children_dir: Option<String>,
}

impl PluginLayout {
    /// Create a layout with children directly under the root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            children_dir: None,
        }
    }

    /// Place children under an intermediate directory.
    pub fn with_children_dir(mut self, dir: impl Into<String>) -> Self {
        self.children_dir = Some(dir.into());
        self
    }

    /// The plugin root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Executable path for a resolved child identifier.
    pub fn child_executable(&self, child: &str) -> PathBuf {
        let mut path = self.root.clone();
        if let Some(dir) = &self.children_dir {
            path.push(dir);
        }
        path.push(child);
        path.push("orchestrator");
        path.push("orchestrate");
        path
    }
}

/// Plugin root derived from the running binary: the parent of the directory
/// containing the executable.
pub fn default_root() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
