//! Core types shared by every imgxform crate
//!
//! - **Validation**: the fixed format and width allow-lists, and the
//!   [`TransformRequest`](validation::TransformRequest) that can only be built
//!   from values on those lists
//! - **Error handling**: caller-visible error codes with HTTP status mapping
//! - **Configuration**: TOML-based configuration with environment overrides
//!
//! # Example
//!
//! ```rust
//! use imgxform_core::validation::{validate, OutputFormat};
//!
//! let (format, width) = validate("webp", 800).unwrap();
//! assert_eq!(format, OutputFormat::Webp);
//! assert_eq!(width.get(), 800);
//!
//! assert!(validate("webp", 600).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, ErrorReport, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, FetchConfig, LoggingConfig, ServerConfig};
    pub use crate::error::{Error, ErrorCode, ErrorReport, Result, ResultExt};
    pub use crate::validation::{validate, OutputFormat, TargetWidth, TransformRequest};
}
