//! Icon asset route.
//!
//! Rendered SVGs load their icons over HTTP from here instead of from the
//! server's disk. The route is stateless apart from the icon root. Once the
//! file is found, `ServeFile` handles content type, HEAD, ranges and
//! conditional requests.

use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::diagram::icons;
use crate::state::AppState;

/// `GET /icons/{filename}` and `GET /icons/aws/{filename}`: serve one icon.
pub async fn serve_icon(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    request: Request,
) -> Response {
    let Some(path) = icons::find_icon(state.renderer.icon_root(), &filename).await else {
        tracing::debug!(%filename, "icon not found");
        return (StatusCode::NOT_FOUND, "Icon not found").into_response();
    };

    match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => {
            if response.status() == StatusCode::NOT_FOUND {
                tracing::error!(path = %path.display(), "icon vanished before it could be served");
                return (StatusCode::NOT_FOUND, format!("Icon not found: {filename}")).into_response();
            }
            response.into_response()
        }
        Err(never) => match never {},
    }
}
