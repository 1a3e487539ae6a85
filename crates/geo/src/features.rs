//! GeoJSON rendering of decoded site boundaries.
//!
//! Produces the `FeatureCollection` of `Polygon` features consumed by the map
//! layer: one feature per site, with the site id in `properties.id`.

use crate::Ring;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

/// Polygon geometry with the ring as its only (outer) ring.
pub fn polygon_geometry(ring: &Ring) -> Geometry {
    let exterior = ring
        .iter()
        .map(|c| vec![c.longitude, c.latitude])
        .collect();
    Geometry::new(Value::Polygon(vec![exterior]))
}

/// Feature for one site boundary
pub fn site_feature(id: i64, ring: &Ring) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), JsonValue::from(id));

    Feature {
        bbox: None,
        geometry: Some(polygon_geometry(ring)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Building a [`FeatureCollection`] from decoded sites
pub trait SiteFeatures {
    /// Build a collection from `(site id, ring)` pairs, in order.
    fn from_sites<'a, I>(sites: I) -> Self
    where
        I: IntoIterator<Item = (i64, &'a Ring)>;
}

impl SiteFeatures for FeatureCollection {
    fn from_sites<'a, I>(sites: I) -> Self
    where
        I: IntoIterator<Item = (i64, &'a Ring)>,
    {
        sites
            .into_iter()
            .map(|(id, ring)| site_feature(id, ring))
            .collect()
    }
}
