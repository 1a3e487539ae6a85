//! CLI utilities for SiteTrack tools
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting
//! - Progress spinners for network calls
//! - Status messages

#![warn(missing_docs)]

pub mod output;
pub mod progress;
