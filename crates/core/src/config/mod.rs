//! Configuration loading and schema definitions
//!
//! Lookup order: an explicit path, then `imgxform.toml`, then
//! `.config/imgxform.toml`, then built-in defaults. `IMGXFORM_*` environment
//! variables are applied on top of whichever source won.

mod loader;
mod schema;

pub use loader::{Config, ENV_BIND, ENV_FETCH_TIMEOUT_SECS, ENV_LOG_LEVEL, ENV_MAX_BODY_BYTES};
pub use schema::*;
