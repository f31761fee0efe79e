//! Architecture diagram rendering.
//!
//! ARCHITECTURE
//! ============
//! A [`ResourceGraph`](crate::cfn::ResourceGraph) is emitted as Graphviz DOT
//! (`style`), laid out and drawn by the external `dot` binary (`render`), and
//! returned as SVG whose icon references point back at this service (`icons`).
//! `label` shortens resource identifiers for display.

pub mod icons;
pub mod label;
pub mod render;
pub mod style;

pub use render::{RenderError, Renderer};
pub use style::{DiagramStyle, Direction};
