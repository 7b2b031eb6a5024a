#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use base64::Engine;
use http_body_util::BodyExt;
use image::{ImageFormat, Rgb, RgbImage};
use tower::ServiceExt;

use tryon_fit::app_state::AppState;
use tryon_fit::db::{InMemoryStore, Store};
use tryon_fit::routes;
use tryon_fit::services::generation::{GenerationGateway, ImageGenerator, PlaceholderGenerator};

/// Router backed by an in-memory store and a small placeholder generator.
pub fn build_test_app() -> Router {
    build_test_app_with(PlaceholderGenerator::with_size(64, 96))
}

pub fn build_test_app_with(generator: impl ImageGenerator + 'static) -> Router {
    let store: Arc<dyn Store> = Arc::new(InMemoryStore::new());
    let state = AppState::new(store, GenerationGateway::new(generator));
    routes::router(state, 25 * 1024 * 1024)
}

/// Solid-colour PNG, base64 encoded.
pub fn png_base64(width: u32, height: u32, color: [u8; 3]) -> String {
    let image = RgbImage::from_pixel(width, height, Rgb(color));
    let mut buffer = std::io::Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png).unwrap();
    base64::engine::general_purpose::STANDARD.encode(buffer.into_inner())
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_form(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a status and return the JSON body.
pub async fn expect_json(response: Response, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
