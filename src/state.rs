//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds only configuration built once at startup: the resource registry and
//! the renderer (style, engine path, icon root). Nothing in it is mutated
//! while serving, so requests never contend on it.

use std::sync::Arc;

use crate::cfn::ResourceRegistry;
use crate::config::ServerConfig;
use crate::diagram::{DiagramStyle, RenderError, Renderer};

/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ResourceRegistry>,
    pub renderer: Arc<Renderer>,
}

impl AppState {
    #[must_use]
    pub fn new(registry: ResourceRegistry, renderer: Renderer) -> Self {
        Self { registry: Arc::new(registry), renderer: Arc::new(renderer) }
    }

    /// Build state from server config with the AWS registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the icon directory cannot be resolved.
    pub fn from_config(config: &ServerConfig) -> Result<Self, RenderError> {
        let renderer = Renderer::new(
            DiagramStyle::new(config.direction),
            config.graphviz_dot.clone(),
            &config.icon_dir,
            &config.public_base_url,
        )?;
        Ok(Self::new(ResourceRegistry::aws(), renderer))
    }
}
