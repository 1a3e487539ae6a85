//! Geometry utilities for SiteTrack site boundaries.
//!
//! This crate provides:
//! - WKT `POLYGON((...))` decoding into a [`Ring`] and encoding back
//! - Ring measures (haversine perimeter, geodesic area)
//! - GeoJSON rendering of decoded boundaries
//!
//! # Example
//!
//! ```
//! use sitetrack_geo::{decode, encode, Coordinate, Ring};
//!
//! let ring = decode("POLYGON((0 0, 1 1, 1 0, 0 0))").unwrap();
//! assert_eq!(ring.len(), 4);
//! assert_eq!(ring.first(), Some(&Coordinate::new(0.0, 0.0)));
//!
//! let drawn = Ring::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
//! assert_eq!(encode(&drawn).unwrap(), "POLYGON((0 0, 1 0, 1 1, 0 0))");
//! ```

mod error;
mod features;
mod measure;
mod wkt;

pub use error::{GeoError, GeoErrorCode, Result};
pub use features::{polygon_geometry, site_feature, SiteFeatures};
pub use geojson::{Feature, FeatureCollection, Geometry};
pub use measure::{
    geodesic_area_m2, haversine_distance_meters, perimeter_meters, EARTH_RADIUS_M,
};
pub use wkt::{decode, encode};

/// A geographic coordinate in WKT axis order: longitude first, then latitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `longitude` - Longitude in degrees (-180 to 180)
    /// * `latitude` - Latitude in degrees (-90 to 90)
    #[inline]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Returns true if both components are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite()
    }

    /// Returns true if the coordinate lies within the WGS84 degree ranges.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.longitude.to_radians(), self.latitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lng, lat): (f64, f64)) -> Self {
        Self::new(lng, lat)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.longitude, coord.latitude]
    }
}

/// One polygon boundary with no holes.
///
/// The ring is stored exactly as produced (drawn or decoded); closure and
/// minimum length are not enforced here.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Ring(Vec<Coordinate>);

impl Ring {
    /// Creates a ring from an ordered coordinate sequence.
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self(coordinates)
    }

    /// Number of coordinates in the ring.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the ring has no coordinates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First coordinate, if any.
    pub fn first(&self) -> Option<&Coordinate> {
        self.0.first()
    }

    /// Returns true if the first and last coordinates are equal.
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => self.0.len() > 1 && first == last,
            _ => false,
        }
    }

    /// Borrow the coordinates.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.0
    }

    /// Iterate over the coordinates.
    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.0.iter()
    }

    /// Consume the ring and return its coordinates.
    pub fn into_inner(self) -> Vec<Coordinate> {
        self.0
    }
}

impl From<Vec<Coordinate>> for Ring {
    fn from(coordinates: Vec<Coordinate>) -> Self {
        Self(coordinates)
    }
}

impl From<Vec<(f64, f64)>> for Ring {
    fn from(pairs: Vec<(f64, f64)>) -> Self {
        Self(pairs.into_iter().map(Coordinate::from).collect())
    }
}

impl FromIterator<Coordinate> for Ring {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Ring {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
