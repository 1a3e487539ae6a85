//! Boundary editing session for SiteTrack
//!
//! Tracks one user's draw → stage → submit workflow for site boundaries on a
//! map view, and the set of persisted boundaries currently rendered:
//!
//! - **Staging**: a freshly drawn ring is encoded to WKT and held as the
//!   single pending polygon
//! - **Submission**: the pending polygon is sent to a [`SiteStore`]; at most
//!   one submission is in flight at a time
//! - **Loading**: persisted sites are fetched, decoded and rendered; sites
//!   with malformed geometry are skipped, not fatal
//!
//! # Example
//!
//! ```rust,no_run
//! use sitetrack_api_client::{ClientConfig, Credentials, SiteTrackClient};
//! use sitetrack_api_client::endpoints::sites::SiteMetrics;
//! use sitetrack_geo::Ring;
//! use sitetrack_session::BoundarySession;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SiteTrackClient::with_config(ClientConfig::development())?;
//!     let session = BoundarySession::new(client);
//!     let credentials = Credentials::bearer("token");
//!
//!     session.on_shape_drawn(Ring::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]))?;
//!     let saved = session
//!         .submit_pending(Some(&credentials), 1, SiteMetrics::new(100.0, 80.0))
//!         .await?;
//!     println!("Saved site {}", saved.id);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod boundary;
mod error;
mod session;
mod store;

pub use boundary::{LoadSummary, PendingPolygon, SiteBoundary, SkippedBoundary};
pub use error::{SessionError, SessionErrorCode, SessionResult};
pub use session::{BoundarySession, SessionState};
pub use store::SiteStore;
