use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use super::*;
use crate::cfn::ResourceRegistry;
use crate::diagram::{DiagramStyle, Renderer};
use crate::test_support::{TINY_PNG, icon_tree};

fn state_with_icons(root: &std::path::Path) -> AppState {
    let renderer = Renderer::new(DiagramStyle::default(), "dot", root, "http://localhost:5001").unwrap();
    AppState::new(ResourceRegistry::aws(), renderer)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

async fn body_text(response: axum::response::Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn healthz_is_ok() {
    let root = icon_tree();
    let response = app(state_with_icons(root.path())).oneshot(get("/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn icon_is_served_with_content_type() {
    let root = icon_tree();
    let response = app(state_with_icons(root.path()))
        .oneshot(get("/icons/lambda.png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/png");
    assert_eq!(body_bytes(response).await, TINY_PNG);
}

#[tokio::test]
async fn content_type_follows_file_extension() {
    let root = icon_tree();
    std::fs::write(root.path().join("compute/batch.webp"), b"webp").unwrap();
    let response = app(state_with_icons(root.path()))
        .oneshot(get("/icons/batch.webp"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/webp");
}

#[tokio::test]
async fn icon_range_request_is_partial() {
    let root = icon_tree();
    let request = Request::builder()
        .uri("/icons/lambda.png")
        .header("range", "bytes=0-7")
        .body(Body::empty())
        .unwrap();
    let response = app(state_with_icons(root.path())).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(body_bytes(response).await, &TINY_PNG[..8]);
}

#[tokio::test]
async fn icon_head_request_has_no_body() {
    let root = icon_tree();
    let request = Request::builder()
        .method("HEAD")
        .uri("/icons/lambda.png")
        .body(Body::empty())
        .unwrap();
    let response = app(state_with_icons(root.path())).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-length"], TINY_PNG.len().to_string().as_str());
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn aws_prefixed_icon_path_is_an_alias() {
    let root = icon_tree();
    let response = app(state_with_icons(root.path()))
        .oneshot(get("/icons/aws/lambda.png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_icon_is_not_found() {
    let root = icon_tree();
    let response = app(state_with_icons(root.path()))
        .oneshot(get("/icons/missing.png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "Icon not found");
}

#[tokio::test]
async fn encoded_traversal_is_not_found() {
    let root = icon_tree();
    let response = app(state_with_icons(root.path()))
        .oneshot(get("/icons/..%2Fcompute%2Flambda.png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let root = icon_tree();
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/generate-diagram")
        .header("origin", "http://editor.example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app(state_with_icons(root.path())).oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
