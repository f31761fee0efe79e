//! CloudFormation template handling.
//!
//! ARCHITECTURE
//! ============
//! Raw template text flows through three stages:
//! - `tags` loads YAML, turning short-form intrinsic tags (`!Ref`, `!Sub`, ...)
//!   into single-entry mappings so downstream code only sees plain values.
//! - `registry` knows which resource types can be drawn.
//! - `extract` walks `Resources` and derives the node set and `Ref` edges.
//!
//! Nothing here evaluates intrinsic functions. Tags are captured structurally
//! and only `Ref` is ever interpreted, by the extractor.

pub mod extract;
pub mod registry;
pub mod tags;

pub use extract::{Edge, Node, ResourceGraph, extract};
pub use registry::ResourceRegistry;
pub use tags::load_template;

// =============================================================================
// ERRORS
// =============================================================================

/// Failure to turn template text into a resource graph.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The text is not loadable YAML (syntax error or unknown tag).
    #[error("Invalid YAML format: {0}")]
    Format(String),
    /// The YAML loaded but does not have the shape of a template.
    #[error("Error parsing CloudFormation template: {0}")]
    Parse(String),
}

impl From<serde_yaml::Error> for TemplateError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Format(err.to_string())
    }
}
