//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a specific set of backend endpoints.
//!
//! | Module | Backend routes | Description |
//! |--------|----------------|-------------|
//! | `auth` | `/register`, `/login` | Account creation and token issue |
//! | `projects` | `/projects` | Project list and creation |
//! | `sites` | `/sites`, `/sites/<id>` | Site boundaries, metrics and analytics |

pub mod auth;
pub mod projects;
pub mod sites;

pub use auth::AuthApi;
pub use projects::ProjectsApi;
pub use sites::SitesApi;
