//! Diagram generation route.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use super::error::ApiError;
use crate::cfn;
use crate::state::AppState;

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

#[derive(Debug, Deserialize)]
pub struct GenerateDiagramBody {
    #[serde(default)]
    pub yaml: Option<String>,
}

/// `POST /generate-diagram`: render a CloudFormation template as SVG.
pub async fn generate_diagram(
    State(state): State<AppState>,
    body: Result<Json<GenerateDiagramBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
    let yaml = body
        .yaml
        .filter(|yaml| !yaml.is_empty())
        .ok_or(ApiError::MissingYaml)?;

    let template = cfn::load_template(&yaml)?;
    let graph = cfn::extract(&template, &state.registry)?;
    let svg = state.renderer.render(&graph).await?;

    tracing::info!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        bytes = svg.len(),
        "diagram generated"
    );
    Ok(([(CONTENT_TYPE, SVG_CONTENT_TYPE)], svg).into_response())
}

#[cfg(test)]
#[path = "diagram_test.rs"]
mod tests;
