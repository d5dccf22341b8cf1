//! Transformation pipeline
//!
//! ```text
//! Validating → Fetching → Decoding → Resampling → Encoding → Done
//! ```
//!
//! Any stage can end the run with its own error, which is returned unchanged.
//! No stage is retried or re-entered. The fetch is the only await on I/O;
//! each codec stage runs on the blocking pool so a large decode never stalls
//! the async workers.

use crate::error::{TransformError, TransformResult};
use imgxform_core::config::FetchConfig;
use imgxform_core::validation::TransformRequest;
use imgxform_fetch::{FetchError, Fetcher};
use imgxform_image::{decode, encode, resample, EncodedOutput, ImageError};
use imgxform_telemetry::Timer;
use std::fmt;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Pipeline states, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Validating,
    Fetching,
    Decoding,
    Resampling,
    Encoding,
    Done,
}

impl Stage {
    /// Stable lowercase name, used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Validating => "validating",
            Stage::Fetching => "fetching",
            Stage::Decoding => "decoding",
            Stage::Resampling => "resampling",
            Stage::Encoding => "encoding",
            Stage::Done => "done",
        }
    }

    /// The stage that follows this one, if any
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Validating => Some(Stage::Fetching),
            Stage::Fetching => Some(Stage::Decoding),
            Stage::Decoding => Some(Stage::Resampling),
            Stage::Resampling => Some(Stage::Encoding),
            Stage::Encoding => Some(Stage::Done),
            Stage::Done => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs transformations. Holds no per-request state; clone freely.
#[derive(Debug, Clone)]
pub struct Pipeline {
    fetcher: Fetcher,
}

impl Pipeline {
    /// Create a pipeline around an existing fetcher
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// Build the fetcher from configuration
    pub fn from_config(config: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Self::new(Fetcher::new(config)?))
    }

    /// Validate raw parameters and run every stage.
    ///
    /// The outcome is logged once, with the failing stage on error.
    #[instrument(
        name = "transform",
        skip(self, url),
        fields(request_id = %Uuid::new_v4(), url = url.unwrap_or_default())
    )]
    pub async fn run(
        &self,
        format: &str,
        size: u32,
        url: Option<&str>,
    ) -> TransformResult<EncodedOutput> {
        let result = match TransformRequest::new(format, size, url) {
            Ok(request) => self.execute(request).await,
            Err(e) => Err(e.into()),
        };

        match &result {
            Ok(output) => info!(
                content_type = output.content_type,
                bytes = output.bytes.len(),
                "Transform completed"
            ),
            Err(e) => warn!(
                stage = %e.stage(),
                code = %e.code(),
                error = %e,
                "Transform failed"
            ),
        }

        result
    }

    /// Run every stage after validation for an already validated request.
    pub async fn execute(&self, request: TransformRequest) -> TransformResult<EncodedOutput> {
        let timer = Timer::start(Stage::Fetching.as_str());
        let resource = self.fetcher.fetch(request.source_url()).await?;
        timer.stop();

        let grid = run_blocking(Stage::Decoding, move || {
            decode(&resource.bytes, resource.content_type.as_deref())
        })
        .await?;

        let width = request.width();
        let grid = run_blocking(Stage::Resampling, move || resample(grid, width)).await?;

        let format = request.format();
        run_blocking(Stage::Encoding, move || encode(&grid, format)).await
    }
}

/// Run one codec stage on the blocking pool and time it.
async fn run_blocking<T, F>(stage: Stage, work: F) -> TransformResult<T>
where
    F: FnOnce() -> Result<T, ImageError> + Send + 'static,
    T: Send + 'static,
{
    let timer = Timer::start(stage.as_str());

    let result = tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| TransformError::Worker {
            stage,
            message: e.to_string(),
        })?;

    timer.stop();
    result.map_err(TransformError::from)
}
