//! On-demand image transformation service
//!
//! Fetches a remote image, resizes it to an allow-listed width with
//! Lanczos3 and re-encodes it as JPEG or WebP:
//!
//! ```text
//! GET /{jpeg|webp}/{150|300|500|800|1024|1200|2048}?url=<absolute source URL>
//! ```
//!
//! Requests are independent; nothing is cached or shared between them
//! apart from the HTTP connection pool.

pub mod error;
pub mod pipeline;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{TransformError, TransformResult};
pub use pipeline::{Pipeline, Stage};
pub use routes::router;

use std::future::Future;
use tokio::net::TcpListener;

/// Serve the router on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish.
pub async fn serve<F>(listener: TcpListener, pipeline: Pipeline, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(pipeline))
        .with_graceful_shutdown(shutdown)
        .await
}
