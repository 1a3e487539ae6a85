//! Map command failures onto process exit codes

use sitetrack_api_client::ApiError;
use sitetrack_core::error::exit_codes;
use sitetrack_geo::GeoError;
use sitetrack_session::SessionError;

/// Exit code for a failed command
pub fn code_for(err: &anyhow::Error) -> u8 {
    let code = if let Some(e) = err.downcast_ref::<sitetrack_core::Error>() {
        e.exit_code()
    } else if let Some(e) = err.downcast_ref::<ApiError>() {
        api_code(e)
    } else if let Some(e) = err.downcast_ref::<SessionError>() {
        match e {
            e if e.is_unauthorized() => exit_codes::AUTH_ERROR,
            SessionError::MissingCredentials | SessionError::CollaboratorFailure { .. } => {
                exit_codes::API_ERROR
            }
            SessionError::Geometry(_) => exit_codes::VALIDATION_ERROR,
            SessionError::NothingToSubmit | SessionError::SubmissionInProgress => {
                exit_codes::FAILURE
            }
        }
    } else if err.downcast_ref::<GeoError>().is_some() {
        exit_codes::VALIDATION_ERROR
    } else {
        exit_codes::FAILURE
    };

    u8::try_from(code).unwrap_or(1)
}

fn api_code(err: &ApiError) -> i32 {
    match err {
        e if e.is_unauthorized() => exit_codes::AUTH_ERROR,
        ApiError::InvalidRequest(_) => exit_codes::VALIDATION_ERROR,
        ApiError::Config(_) => exit_codes::CONFIG_ERROR,
        _ => exit_codes::API_ERROR,
    }
}
