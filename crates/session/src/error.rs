//! Error types for the boundary editing session

use sitetrack_api_client::ApiError;
use sitetrack_geo::GeoError;
use thiserror::Error;

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by [`BoundarySession`](crate::BoundarySession) operations.
///
/// None of these are retried automatically, and none leave the session in a
/// different state than before the failed call (a failed submit returns to
/// `Drawn` with the pending polygon intact).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Submit called with no pending polygon
    #[error("No polygon drawn to save")]
    NothingToSubmit,

    /// A submit is already in flight
    #[error("A polygon is already being saved")]
    SubmissionInProgress,

    /// No credentials were supplied for a network operation
    #[error("No authentication token. Please log in.")]
    MissingCredentials,

    /// The persistence collaborator rejected or failed the request
    #[error("{message}")]
    CollaboratorFailure {
        /// HTTP status of a backend rejection, if there was one
        status: Option<u16>,
        /// Collaborator's message, verbatim
        message: String,
    },

    /// The drawn ring could not be encoded
    #[error(transparent)]
    Geometry(#[from] GeoError),
}

/// Error code for integration with sitetrack-core error handling.
/// Range: 11xxx for session errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorCode {
    /// Nothing staged
    NothingToSubmit = 11001,
    /// Re-entrant submit
    SubmissionInProgress = 11002,
    /// No credentials
    MissingCredentials = 11003,
    /// Backend or transport failure
    CollaboratorFailure = 11004,
    /// Ring encoding failure
    Geometry = 11005,
}

impl SessionError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SessionErrorCode {
        match self {
            Self::NothingToSubmit => SessionErrorCode::NothingToSubmit,
            Self::SubmissionInProgress => SessionErrorCode::SubmissionInProgress,
            Self::MissingCredentials => SessionErrorCode::MissingCredentials,
            Self::CollaboratorFailure { .. } => SessionErrorCode::CollaboratorFailure,
            Self::Geometry(_) => SessionErrorCode::Geometry,
        }
    }

    /// Wrap a collaborator failure, keeping its status and user-facing message
    pub fn collaborator(err: &ApiError) -> Self {
        Self::CollaboratorFailure {
            status: err.status(),
            message: err.user_message(),
        }
    }

    /// Returns true if the backend rejected the credentials
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::MissingCredentials => true,
            Self::CollaboratorFailure { status, .. } => matches!(status, Some(401 | 403)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaborator_message_is_verbatim() {
        let api = ApiError::api_response(404, r#"{"detail":"Project ID 9 does not exist"}"#);
        let err = SessionError::collaborator(&api);
        assert_eq!(err.to_string(), "Project ID 9 does not exist");
        assert_eq!(
            err,
            SessionError::CollaboratorFailure {
                status: Some(404),
                message: "Project ID 9 does not exist".into(),
            }
        );
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_geometry_error_wraps_codec() {
        let err: SessionError = GeoError::EmptyRing.into();
        assert_eq!(err.code(), SessionErrorCode::Geometry);
        assert_eq!(err.to_string(), GeoError::EmptyRing.to_string());
    }

    #[test]
    fn test_codes() {
        assert_eq!(SessionError::SubmissionInProgress.code() as u32, 11002);
        assert!(SessionError::MissingCredentials.is_unauthorized());
    }

    #[test]
    fn test_rejected_token_is_unauthorized() {
        let err = SessionError::collaborator(&ApiError::api_response(401, "expired"));
        assert!(err.is_unauthorized());
        assert!(!SessionError::NothingToSubmit.is_unauthorized());
    }
}
