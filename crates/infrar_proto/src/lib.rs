//! # infrar_proto
//!
//! Shared request/response schema for the infrar plugin protocol.
//!
//! Every plugin in the hierarchy, from the top-level provider orchestrator
//! down to the per-service leaves, exchanges the same two structures: a
//! [`Request`] delivered as JSON on the child's standard input and a
//! [`Response`] read back as JSON from its standard output. Field names are
//! part of the wire contract and must not change; absent optional fields
//! decode to their zero value.

pub mod error;
pub mod request;
pub mod response;

pub use error::{ProtoError, ProtoResult};
pub use request::{Context, Request, COMMAND_GENERATE};
pub use response::{Response, ResponseMetadata, MAIN_TF, TFVARS, VARIABLES_TF};
