//! HTTP surface: `GET /{format}/{size}?url=<source>`

use crate::error::{TransformError, TransformResult};
use crate::pipeline::Pipeline;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Build the service router
pub fn router(pipeline: Pipeline) -> Router {
    Router::new()
        .route("/:format/:size", get(transform))
        .with_state(pipeline)
        .layer(TraceLayer::new_for_http())
}

/// Extractor rejections are answered with the same JSON error body as
/// pipeline failures.
async fn transform(
    State(pipeline): State<Pipeline>,
    path: Result<Path<(String, String)>, PathRejection>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> TransformResult<Response> {
    let Path((format, size)) = path.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "Rejected path");
        TransformError::InvalidParams(rejection.body_text())
    })?;
    let Query(pairs) = query.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "Rejected query string");
        TransformError::InvalidParams(rejection.body_text())
    })?;

    let size: u32 = size.parse().map_err(|_| {
        debug!(size = %size, "Rejected non-numeric size");
        TransformError::InvalidParams(format!("size {size:?} is not a positive integer"))
    })?;

    let output = pipeline.run(&format, size, source_url(&pairs)).await?;

    Ok(([(header::CONTENT_TYPE, output.content_type)], output.bytes).into_response())
}

/// First `url` value in the query; repeats are ignored.
fn source_url(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.as_str())
}
