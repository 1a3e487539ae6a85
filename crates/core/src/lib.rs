//! Core utilities for the SiteTrack tools
//!
//! This crate provides the local, non-network concerns shared by the
//! command-line front end:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with serde defaults
//! - **Credential storage**: the bearer token persisted between invocations
//!
//! # Example
//!
//! ```rust,no_run
//! use sitetrack_core::{config::Config, credentials::CredentialStore};
//!
//! let config = Config::load(None)?;
//! let store = match &config.schema.session.credentials_path {
//!     Some(path) => CredentialStore::at(path),
//!     None => CredentialStore::default_location()?,
//! };
//!
//! if store.load()?.is_none() {
//!     eprintln!("Not logged in");
//! }
//! # Ok::<(), sitetrack_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod credentials;
pub mod error;

pub use error::{Error, ErrorCategory, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::credentials::CredentialStore;
    pub use crate::error::{exit_codes, Error, ErrorCategory, ErrorCode, Result, ResultExt};
}
