//! Origin fetcher for imgxform
//!
//! Retrieves the source image for a transformation with one bounded GET:
//!
//! - **URL check first**: anything that is not an absolute http(s) URL is
//!   rejected before a connection is opened
//! - **Collapsed failures**: a non-2xx status and a network failure are the
//!   same outcome to callers
//! - **Timeouts**: overall and connect timeouts from configuration
//! - **Body cap**: oversized bodies are refused by `Content-Length` or cut off
//!   while streaming
//!
//! # Example
//!
//! ```rust,no_run
//! use imgxform_core::config::FetchConfig;
//! use imgxform_fetch::Fetcher;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = Fetcher::new(&FetchConfig::default())?;
//!     let resource = fetcher.fetch("https://example.com/photo.png").await?;
//!     println!("{} bytes of {:?}", resource.bytes.len(), resource.content_type);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;

pub use client::{parse_source_url, FetchedResource, Fetcher};
pub use error::{FetchError, FetchResult};
