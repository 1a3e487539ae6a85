//! Typed API client for the SiteTrack backend
//!
//! This crate provides a small HTTP client for the sites backend:
//!
//! - **Environment-based configuration**: base URL, environment and optional timeout
//! - **Explicit credentials**: every authenticated call takes a [`Credentials`]
//!   value; nothing is read from global state
//! - **Typed endpoints**: auth, projects and sites (including analytics)
//! - **Request correlation**: each request carries a unique `X-Request-ID`
//!
//! Requests are single attempts. There is no retry layer.
//!
//! # Example
//!
//! ```rust,no_run
//! use sitetrack_api_client::{SiteTrackClient, ClientConfig};
//! use sitetrack_api_client::endpoints::auth::AccountRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SiteTrackClient::with_config(ClientConfig::development())?;
//!
//!     let credentials = client
//!         .auth()
//!         .login(&AccountRequest::new("ana", "secret"))
//!         .await?;
//!
//!     let sites = client.sites().list(&credentials, Some(1)).await?;
//!     println!("Got {} sites", sites.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod endpoints;
pub mod error;

pub use client::SiteTrackClient;
pub use config::{ClientConfig, Environment};
pub use credentials::Credentials;
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::SiteTrackClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::credentials::Credentials;
    pub use crate::endpoints::auth::AccountRequest;
    pub use crate::endpoints::sites::{NewSite, SiteDetails, SiteMetrics, SiteRecord};
    pub use crate::endpoints::{AuthApi, ProjectsApi, SitesApi};
    pub use crate::error::{ApiError, ApiResult};
}
