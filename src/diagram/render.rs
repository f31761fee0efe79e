//! Graphviz invocation and SVG post-processing.
//!
//! DESIGN
//! ======
//! Each render gets its own `tempfile::TempDir` holding the DOT input and the
//! SVG output. The directory is removed after the engine returns, on success
//! and on every error path, so concurrent requests never share a working path.
//! Creating and removing it are blocking filesystem calls and run on the
//! blocking pool; if the request future is dropped mid-render the guard still
//! removes it on drop.
//!
//! Graphviz embeds the icon paths it was given verbatim. Before the SVG leaves
//! the service every such path under the icon root is rewritten to
//! `<public base>/icons/<file name>`, which the icon route serves.
//!
//! ERROR HANDLING
//! ==============
//! Failures are reported once, never retried. A missing engine binary is kept
//! distinct from an engine that ran and failed.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use regex::{Captures, Regex};
use tokio::process::Command;

use crate::cfn::ResourceGraph;

use super::style::{DiagramStyle, dot_source};

/// Name prefix of per-render working directories under the system temp dir.
pub const WORKDIR_PREFIX: &str = "cfn-diagram-";
const DOT_FILE: &str = "architecture.dot";
const SVG_FILE: &str = "architecture.svg";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Diagram rendering failed: layout engine '{engine}' unavailable: {source}")]
    EngineUnavailable {
        engine: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Diagram rendering failed: layout engine exited with {status}: {stderr}")]
    EngineFailed { status: String, stderr: String },
    #[error("Diagram rendering failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Diagram rendering failed: engine produced invalid UTF-8 output")]
    InvalidOutput,
    #[error("Diagram rendering failed: invalid icon directory pattern: {0}")]
    IconPattern(#[from] regex::Error),
}

// =============================================================================
// ICON URL REWRITING
// =============================================================================

/// Rewrites local icon paths embedded in SVG into service URLs.
#[derive(Debug, Clone)]
pub struct IconUrlRewriter {
    pattern: Regex,
    icon_base_url: String,
}

impl IconUrlRewriter {
    /// # Errors
    ///
    /// Returns [`RenderError::IconPattern`] if the escaped root cannot compile.
    pub fn new(icon_root: &Path, public_base_url: &str) -> Result<Self, RenderError> {
        let root = icon_root.to_string_lossy();
        let root = regex::escape(root.trim_end_matches('/'));
        let pattern = Regex::new(&format!(r#"(?P<attr>(?:xlink:)?href)="(?P<path>{root}/[^"]+)""#))?;
        let icon_base_url = format!("{}/icons", public_base_url.trim_end_matches('/'));
        Ok(Self { pattern, icon_base_url })
    }

    /// Replace every embedded icon path with its URL, keeping the file name.
    #[must_use]
    pub fn rewrite<'a>(&self, svg: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(svg, |caps: &Captures<'_>| {
            let path = &caps["path"];
            let file_name = path.rsplit('/').next().unwrap_or(path);
            format!(r#"{}="{}/{file_name}""#, &caps["attr"], self.icon_base_url)
        })
    }
}

// =============================================================================
// RENDERER
// =============================================================================

/// Turns a [`ResourceGraph`] into a self-contained SVG document.
#[derive(Debug, Clone)]
pub struct Renderer {
    style: DiagramStyle,
    engine: String,
    icon_root: PathBuf,
    rewriter: IconUrlRewriter,
}

impl Renderer {
    /// `icon_root` is made absolute so Graphviz resolves it from its temp cwd.
    ///
    /// # Errors
    ///
    /// Returns an error if the icon root cannot be made absolute.
    pub fn new(
        style: DiagramStyle,
        engine: impl Into<String>,
        icon_root: &Path,
        public_base_url: &str,
    ) -> Result<Self, RenderError> {
        let icon_root = std::path::absolute(icon_root)?;
        let rewriter = IconUrlRewriter::new(&icon_root, public_base_url)?;
        Ok(Self { style, engine: engine.into(), icon_root, rewriter })
    }

    #[must_use]
    pub fn icon_root(&self) -> &Path {
        &self.icon_root
    }

    /// Render `graph` to SVG with icon references rewritten to URLs.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the working directory cannot be used, the
    /// engine cannot be started, or the engine exits unsuccessfully.
    pub async fn render(&self, graph: &ResourceGraph) -> Result<String, RenderError> {
        let workdir = blocking(|| tempfile::Builder::new().prefix(WORKDIR_PREFIX).tempdir()).await?;
        let rendered = self.render_in(workdir.path(), graph).await;

        let path = workdir.path().to_path_buf();
        if let Err(e) = blocking(move || workdir.close()).await {
            tracing::warn!(workdir = %path.display(), error = %e, "failed to remove render working directory");
        }

        let svg = self.rewriter.rewrite(&rendered?).into_owned();
        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            bytes = svg.len(),
            "diagram rendered"
        );
        Ok(svg)
    }

    async fn render_in(&self, workdir: &Path, graph: &ResourceGraph) -> Result<String, RenderError> {
        let dot_path = workdir.join(DOT_FILE);
        let svg_path = workdir.join(SVG_FILE);

        tokio::fs::write(&dot_path, dot_source(graph, &self.style, &self.icon_root)).await?;

        let output = Command::new(&self.engine)
            .arg("-Tsvg")
            .arg("-o")
            .arg(&svg_path)
            .arg(&dot_path)
            .current_dir(workdir)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| RenderError::EngineUnavailable { engine: self.engine.clone(), source })?;

        if !output.status.success() {
            return Err(RenderError::EngineFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        if !output.stderr.is_empty() {
            tracing::debug!(stderr = %String::from_utf8_lossy(&output.stderr).trim(), "layout engine warnings");
        }

        let bytes = tokio::fs::read(&svg_path).await?;
        String::from_utf8(bytes).map_err(|_| RenderError::InvalidOutput)
    }
}

/// Run a blocking filesystem call off the async worker threads.
async fn blocking<T, F>(f: F) -> Result<T, RenderError>
where
    T: Send + 'static,
    F: FnOnce() -> std::io::Result<T> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(f).await.map_err(std::io::Error::other)?;
    Ok(result?)
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
