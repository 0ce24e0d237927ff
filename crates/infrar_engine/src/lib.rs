//! # infrar_engine
//!
//! The plugin invocation and artifact-merge engine.
//!
//! A generation request fans out through a shallow hierarchy of plugins:
//! a tier resolves its requested capabilities to child plugins
//! ([`CapabilityTable`]), invokes each child as an isolated subprocess over
//! a JSON stdin/stdout exchange ([`PluginInvoker`]), merges the returned
//! artifact fragments and metadata under fixed ordering rules
//! ([`ArtifactMerge`]), and adds any artifacts it renders itself. Child
//! failures degrade into warnings; a tier always returns a response.
//!
//! [`Tier`] and [`Leaf`] compose these pieces into the two plugin roles the
//! hierarchy knows about.

pub mod aggregate;
pub mod error;
pub mod invoker;
pub mod layout;
pub mod mock;
pub mod resolver;
pub mod tier;

pub use aggregate::ArtifactMerge;
pub use error::{EngineError, EngineResult};
pub use invoker::{InvokeError, PluginInvoker, SubprocessInvoker};
pub use layout::{default_root, PluginLayout};
pub use mock::MockInvoker;
pub use resolver::{CapabilityTable, Resolution};
pub use tier::{Leaf, LeafSpec, Plugin, SelfArtifact, SelfRender, Tier, TierSpec};
