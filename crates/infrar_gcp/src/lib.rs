//! # infrar_gcp
//!
//! The GCP plugin set: a top-level provider orchestrator, category
//! orchestrators for storage and compute, and per-service leaves for Cloud
//! Storage and Cloud Run. Every binary speaks the same wire contract: a
//! JSON request on stdin, a JSON response on stdout, exit 0 on success.
//!
//! Deployed plugins are laid out as sibling directory trees
//! (`services/<category>/orchestrator/orchestrate`, with leaves nested one
//! level deeper); each binary resolves its children and templates relative
//! to its own location unless `--plugin-root` overrides it.

pub mod plugins;
pub mod runtime;
