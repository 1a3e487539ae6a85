//! Configuration loading and schema definitions
//!
//! Settings come from an optional `sitetrack.toml`; every field has a
//! default so an absent or partial file is valid.

mod loader;
mod schema;

pub use loader::{find_config_file, Config};
pub use schema::*;
