//! Local origin server and fixtures shared by the pipeline and route tests

use crate::pipeline::Pipeline;
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use image::{DynamicImage, ImageFormat, RgbImage};
use imgxform_core::config::FetchConfig;
use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 600x400 RGB gradient
fn photo() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(600, 400, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
}

fn encoded(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

pub(crate) struct Origin {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl Origin {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn count_hits(State(hits): State<Arc<AtomicUsize>>, req: Request, next: Next) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    next.run(req).await
}

/// Serve the fixtures on an ephemeral port.
///
/// `/photo.png` and `/photo.jpg` are typed correctly, `/untyped.jpg` has
/// no image type, `/mislabeled.png` is PNG bytes declared as JPEG and
/// `/page.html` is not an image at all. `/thin.png` is a 1x40000 strip.
pub(crate) async fn spawn_origin() -> Origin {
    let png = encoded(&photo(), ImageFormat::Png);
    let jpeg = encoded(&photo(), ImageFormat::Jpeg);
    let thin = encoded(
        &DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 40_000, image::Rgb([90, 120, 150]))),
        ImageFormat::Png,
    );
    let hits = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route("/photo.png", {
            let png = png.clone();
            get(|| async move { ([(header::CONTENT_TYPE, "image/png")], png) })
        })
        .route("/photo.jpg", {
            let jpeg = jpeg.clone();
            get(|| async move { ([(header::CONTENT_TYPE, "image/jpeg")], jpeg) })
        })
        .route("/untyped.jpg", get(|| async move { jpeg }))
        .route(
            "/mislabeled.png",
            get(|| async move { ([(header::CONTENT_TYPE, "image/jpeg")], png) }),
        )
        .route(
            "/page.html",
            get(|| async { ([(header::CONTENT_TYPE, "text/html")], "<html></html>") }),
        )
        .route(
            "/thin.png",
            get(|| async move { ([(header::CONTENT_TYPE, "image/png")], thin) }),
        )
        .route("/missing.jpg", get(|| async { StatusCode::NOT_FOUND }))
        .layer(middleware::from_fn_with_state(hits.clone(), count_hits));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Origin { addr, hits }
}

pub(crate) fn pipeline() -> Pipeline {
    pipeline_with_cap(FetchConfig::default().max_body_bytes)
}

pub(crate) fn pipeline_with_cap(max_body_bytes: u64) -> Pipeline {
    Pipeline::from_config(&FetchConfig {
        timeout_secs: 5,
        max_body_bytes,
        ..FetchConfig::default()
    })
    .unwrap()
}
