//! CLI command implementations

pub mod auth;
pub mod projects;
pub mod sites;
pub mod wkt;
