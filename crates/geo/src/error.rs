//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur while decoding or encoding WKT polygons.
///
/// All variants are locally recoverable: the caller decides whether to skip
/// the offending geometry or abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoError {
    /// The `POLYGON((...))` group could not be located
    #[error("Malformed WKT envelope: {0}")]
    MalformedEnvelope(String),

    /// A coordinate pair did not contain exactly two finite numbers
    #[error("Malformed coordinate: {0}")]
    MalformedCoordinate(String),

    /// Attempted to encode a ring with no coordinates
    #[error("Cannot encode an empty ring")]
    EmptyRing,
}

/// Error code for integration with sitetrack-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Envelope not found
    MalformedEnvelope = 10001,
    /// Coordinate pair unparseable
    MalformedCoordinate = 10002,
    /// Ring without coordinates
    EmptyRing = 10003,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::MalformedEnvelope(_) => GeoErrorCode::MalformedEnvelope,
            GeoError::MalformedCoordinate(_) => GeoErrorCode::MalformedCoordinate,
            GeoError::EmptyRing => GeoErrorCode::EmptyRing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(GeoError::EmptyRing.code() as u32, 10003);
        assert_eq!(
            GeoError::MalformedEnvelope("x".into()).code(),
            GeoErrorCode::MalformedEnvelope
        );
    }

    #[test]
    fn test_error_display() {
        let err = GeoError::MalformedCoordinate("x y".into());
        assert_eq!(err.to_string(), "Malformed coordinate: x y");
    }
}
