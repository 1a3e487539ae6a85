//! Site endpoints
//!
//! Sites carry their boundary as a WKT `POLYGON((...))` string and their
//! metrics as a JSON-encoded string:
//! - List sites (optionally for one project)
//! - Create a site from a drawn boundary
//! - Get a site with its analytics time series

use crate::client::SiteTrackClient;
use crate::credentials::Credentials;
use crate::error::ApiResult;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Sites API interface
#[derive(Clone)]
pub struct SitesApi {
    client: SiteTrackClient,
}

impl SitesApi {
    /// Create a new sites API interface
    pub(crate) fn new(client: SiteTrackClient) -> Self {
        Self { client }
    }

    /// List site boundaries
    ///
    /// GET /sites?project=<id>
    pub async fn list(
        &self,
        credentials: &Credentials,
        project_id: Option<i64>,
    ) -> ApiResult<Vec<SiteRecord>> {
        self.client
            .get(&list_path(project_id), Some(credentials))
            .await
    }

    /// Persist a new site boundary
    ///
    /// POST /sites
    pub async fn create(&self, credentials: &Credentials, site: &NewSite) -> ApiResult<SiteRecord> {
        self.client.post("sites", site, Some(credentials)).await
    }

    /// Get a site with its analytics
    ///
    /// GET /sites/<id>
    pub async fn details(&self, credentials: &Credentials, id: i64) -> ApiResult<SiteDetails> {
        self.client
            .get(&format!("sites/{id}"), Some(credentials))
            .await
    }
}

fn list_path(project_id: Option<i64>) -> String {
    match project_id {
        Some(id) => format!("sites?project={id}"),
        None => "sites".to_string(),
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Environmental metrics attached to a site
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteMetrics {
    /// Carbon stock estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbon: Option<f64>,
    /// Biodiversity index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biodiversity: Option<f64>,
}

impl SiteMetrics {
    /// Create metrics with both values set
    pub fn new(carbon: f64, biodiversity: f64) -> Self {
        Self {
            carbon: Some(carbon),
            biodiversity: Some(biodiversity),
        }
    }

    /// Set the carbon value
    #[must_use]
    pub fn with_carbon(mut self, carbon: f64) -> Self {
        self.carbon = Some(carbon);
        self
    }

    /// Set the biodiversity value
    #[must_use]
    pub fn with_biodiversity(mut self, biodiversity: f64) -> Self {
        self.biodiversity = Some(biodiversity);
        self
    }

    /// Encode as the JSON string the backend stores
    pub fn to_wire(&self) -> ApiResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a stored metrics string; anything unparseable yields `None`
    pub fn from_wire(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Create site request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSite {
    /// Owning project
    pub project_id: i64,
    /// Boundary as a WKT polygon string
    pub geometry: String,
    /// JSON-encoded [`SiteMetrics`]
    pub metrics: String,
}

impl NewSite {
    /// Build a create request from an encoded boundary and typed metrics
    pub fn new(project_id: i64, geometry: impl Into<String>, metrics: &SiteMetrics) -> ApiResult<Self> {
        Ok(Self {
            project_id,
            geometry: geometry.into(),
            metrics: metrics.to_wire()?,
        })
    }
}

/// A persisted site as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// Backend-assigned identifier
    pub id: i64,
    /// Owning project
    pub project_id: i64,
    /// Boundary as a WKT polygon string
    pub geometry: String,
    /// JSON-encoded metrics, possibly absent
    #[serde(default)]
    pub metrics: Option<String>,
}

impl SiteRecord {
    /// Typed metrics, if present and parseable
    #[must_use]
    pub fn parsed_metrics(&self) -> Option<SiteMetrics> {
        self.metrics.as_deref().and_then(SiteMetrics::from_wire)
    }
}

/// One point of a site's analytics time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsPoint {
    /// Observation date as sent by the backend
    pub date: String,
    /// Carbon level
    pub carbon: f64,
    /// Biodiversity index
    pub biodiversity: f64,
}

impl AnalyticsPoint {
    /// Parse the date, accepting `YYYY-MM-DD` or an RFC 3339 timestamp
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(&self.date)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }
}

/// Site details response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteDetails {
    /// The site itself
    pub site: SiteRecord,
    /// Time series, oldest first as sent by the backend
    #[serde(default)]
    pub analytics: Vec<AnalyticsPoint>,
}

/// Min / max / mean of one metric across a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSummary {
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
}

impl MetricSummary {
    fn from_values(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }

        (count > 0).then(|| Self {
            min,
            max,
            mean: sum / count as f64,
        })
    }
}

impl SiteDetails {
    /// Analytics sorted by date; unparseable dates keep their relative order at the end
    #[must_use]
    pub fn chronological(&self) -> Vec<&AnalyticsPoint> {
        let mut points: Vec<&AnalyticsPoint> = self.analytics.iter().collect();
        points.sort_by_key(|p| p.parsed_date().map_or((1, NaiveDate::MIN), |d| (0, d)));
        points
    }

    /// Most recent analytics point
    #[must_use]
    pub fn latest(&self) -> Option<&AnalyticsPoint> {
        self.analytics
            .iter()
            .filter_map(|p| p.parsed_date().map(|d| (d, p)))
            .max_by_key(|(d, _)| *d)
            .map(|(_, p)| p)
            .or_else(|| self.analytics.last())
    }

    /// Carbon summary across the series
    #[must_use]
    pub fn carbon_summary(&self) -> Option<MetricSummary> {
        MetricSummary::from_values(self.analytics.iter().map(|p| p.carbon))
    }

    /// Biodiversity summary across the series
    #[must_use]
    pub fn biodiversity_summary(&self) -> Option<MetricSummary> {
        MetricSummary::from_values(self.analytics.iter().map(|p| p.biodiversity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, carbon: f64, biodiversity: f64) -> AnalyticsPoint {
        AnalyticsPoint {
            date: date.to_string(),
            carbon,
            biodiversity,
        }
    }

    #[test]
    fn test_list_path() {
        assert_eq!(list_path(Some(4)), "sites?project=4");
        assert_eq!(list_path(None), "sites");
    }

    #[test]
    fn test_metrics_wire_format() {
        let metrics = SiteMetrics::new(100.0, 80.0);
        assert_eq!(metrics.to_wire().unwrap(), r#"{"carbon":100.0,"biodiversity":80.0}"#);

        let carbon_only = SiteMetrics::default().with_carbon(100.0);
        assert_eq!(carbon_only.to_wire().unwrap(), r#"{"carbon":100.0}"#);
    }

    #[test]
    fn test_metrics_from_wire_is_lenient() {
        let parsed = SiteMetrics::from_wire(r#"{"carbon": 100, "biodiversity": 80}"#).unwrap();
        assert_eq!(parsed, SiteMetrics::new(100.0, 80.0));
        assert!(SiteMetrics::from_wire("high carbon").is_none());
    }

    #[test]
    fn test_new_site_serialize() {
        let site = NewSite::new(1, "POLYGON((0 0, 1 0, 1 1, 0 0))", &SiteMetrics::new(100.0, 80.0))
            .unwrap();
        let json = serde_json::to_value(&site).unwrap();
        assert_eq!(json["project_id"], 1);
        assert_eq!(json["geometry"], "POLYGON((0 0, 1 0, 1 1, 0 0))");
        assert_eq!(json["metrics"], r#"{"carbon":100.0,"biodiversity":80.0}"#);
    }

    #[test]
    fn test_site_record_deserialize() {
        let json = r#"{
            "id": 12,
            "project_id": 1,
            "geometry": "POLYGON((0 0,1 1,1 0,0 0))",
            "metrics": "{\"carbon\": 100, \"biodiversity\": 80}"
        }"#;

        let site: SiteRecord = serde_json::from_str(json).unwrap();
        assert_eq!(site.id, 12);
        assert_eq!(site.parsed_metrics().unwrap().carbon, Some(100.0));
    }

    #[test]
    fn test_site_record_without_metrics() {
        let json = r#"{"id": 1, "project_id": 1, "geometry": "POLYGON((0 0))", "metrics": null}"#;
        let site: SiteRecord = serde_json::from_str(json).unwrap();
        assert!(site.parsed_metrics().is_none());
    }

    #[test]
    fn test_analytics_dates() {
        assert_eq!(
            point("2024-03-01", 0.0, 0.0).parsed_date(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(
            point("2024-03-01T10:00:00Z", 0.0, 0.0).parsed_date(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert!(point("March", 0.0, 0.0).parsed_date().is_none());
    }

    #[test]
    fn test_details_summaries() {
        let details = SiteDetails {
            site: SiteRecord {
                id: 1,
                project_id: 1,
                geometry: "POLYGON((0 0))".into(),
                metrics: None,
            },
            analytics: vec![
                point("2024-02-01", 120.0, 70.0),
                point("2024-01-01", 100.0, 80.0),
                point("2024-03-01", 140.0, 60.0),
            ],
        };

        assert_eq!(details.latest().unwrap().date, "2024-03-01");

        let order: Vec<&str> = details.chronological().iter().map(|p| p.date.as_str()).collect();
        assert_eq!(order, vec!["2024-01-01", "2024-02-01", "2024-03-01"]);

        let carbon = details.carbon_summary().unwrap();
        assert_eq!(carbon.min, 100.0);
        assert_eq!(carbon.max, 140.0);
        assert_eq!(carbon.mean, 120.0);

        let bio = details.biodiversity_summary().unwrap();
        assert_eq!(bio.mean, 70.0);
    }

    #[test]
    fn test_details_empty_analytics() {
        let json = r#"{"site": {"id": 1, "project_id": 1, "geometry": "POLYGON((0 0))"}}"#;
        let details: SiteDetails = serde_json::from_str(json).unwrap();
        assert!(details.latest().is_none());
        assert!(details.carbon_summary().is_none());
    }
}
