//! Site boundaries and the staged polygon

use serde::Serialize;
use sitetrack_api_client::endpoints::sites::{SiteMetrics, SiteRecord};
use sitetrack_geo::{decode, GeoError, Ring};

/// A drawn ring awaiting submission, with its encoded WKT.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingPolygon {
    ring: Ring,
    wkt: String,
}

impl PendingPolygon {
    pub(crate) fn new(ring: Ring, wkt: String) -> Self {
        Self { ring, wkt }
    }

    /// The ring as drawn
    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// The ring encoded as a WKT polygon
    pub fn wkt(&self) -> &str {
        &self.wkt
    }
}

/// A persisted site boundary, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteBoundary {
    /// Backend-assigned identifier
    pub id: i64,
    /// Owning project
    pub project_id: i64,
    /// Decoded outer ring
    pub ring: Ring,
    /// WKT as stored by the backend
    pub wkt: String,
    /// Site metrics, when present and parseable
    pub metrics: Option<SiteMetrics>,
}

impl SiteBoundary {
    /// Decode a backend record.
    pub fn from_record(record: SiteRecord) -> Result<Self, GeoError> {
        let ring = decode(&record.geometry)?;
        let metrics = record.parsed_metrics();
        Ok(Self {
            id: record.id,
            project_id: record.project_id,
            ring,
            wkt: record.geometry,
            metrics,
        })
    }
}

/// A site left out of the rendered set because its geometry did not decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBoundary {
    /// Site identifier
    pub id: i64,
    /// Why decoding failed
    pub error: GeoError,
}

/// Outcome of a bulk load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Number of boundaries now rendered
    pub rendered: usize,
    /// Sites excluded from the rendered set
    pub skipped: Vec<SkippedBoundary>,
}

impl LoadSummary {
    /// Returns true if every site decoded
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(geometry: &str, metrics: Option<&str>) -> SiteRecord {
        SiteRecord {
            id: 4,
            project_id: 2,
            geometry: geometry.to_string(),
            metrics: metrics.map(String::from),
        }
    }

    #[test]
    fn test_from_record() {
        let boundary = SiteBoundary::from_record(record(
            "POLYGON((0 0,1 1,1 0,0 0))",
            Some(r#"{"carbon": 100}"#),
        ))
        .unwrap();

        assert_eq!(boundary.id, 4);
        assert_eq!(boundary.project_id, 2);
        assert_eq!(boundary.ring.len(), 4);
        assert_eq!(boundary.metrics.unwrap().carbon, Some(100.0));
    }

    #[test]
    fn test_from_record_malformed_geometry() {
        let err = SiteBoundary::from_record(record("POINT(1 2)", None)).unwrap_err();
        assert!(matches!(err, GeoError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_from_record_unparseable_metrics() {
        let boundary =
            SiteBoundary::from_record(record("POLYGON((0 0))", Some("not json"))).unwrap();
        assert!(boundary.metrics.is_none());
    }
}
