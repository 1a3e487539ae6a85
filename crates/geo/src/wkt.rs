//! WKT polygon codec.
//!
//! Supports the single-ring subset produced and accepted by the sites API:
//! `POLYGON((lng lat, lng lat, ..., lng lat))`. Inner rings are not supported.

use crate::{Coordinate, GeoError, Result, Ring};
use once_cell::sync::Lazy;
use regex::Regex;

/// Outer-ring group: the `POLYGON` keyword, then everything between the first
/// `((` and the next `))`. Case-insensitive, whitespace tolerant.
static ENVELOPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)POLYGON\s*\(\s*\((.*?)\)\s*\)").expect("envelope pattern is valid")
});

/// Decode a WKT polygon string into its outer ring.
///
/// Coordinates are returned in the order encountered, longitude first. The
/// ring is not checked for closure or self-intersection, and a single pair is
/// accepted.
///
/// # Errors
/// * [`GeoError::MalformedEnvelope`] if no `POLYGON((...))` group is found
/// * [`GeoError::MalformedCoordinate`] if a pair is not exactly two finite numbers
///
/// # Example
/// ```
/// use sitetrack_geo::{decode, Coordinate};
///
/// let ring = decode("POLYGON((0 0, 1 1, 1 0, 0 0))").unwrap();
/// assert_eq!(ring.coordinates()[1], Coordinate::new(1.0, 1.0));
///
/// assert!(decode("not a polygon").is_err());
/// ```
pub fn decode(wkt: &str) -> Result<Ring> {
    let group = ENVELOPE
        .captures(wkt)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| GeoError::MalformedEnvelope(truncate(wkt)))?;

    group.as_str().split(',').map(parse_pair).collect()
}

/// Encode a ring as a WKT polygon string.
///
/// The first coordinate is always repeated at the end, even when the ring is
/// already closed, so a closed ring gains a duplicated closing vertex.
///
/// # Errors
/// * [`GeoError::EmptyRing`] if the ring has no coordinates
/// * [`GeoError::MalformedCoordinate`] if a coordinate is NaN or infinite
///
/// # Example
/// ```
/// use sitetrack_geo::{encode, Ring};
///
/// let ring = Ring::from(vec![(1.5, 2.5), (3.0, 4.0), (1.5, 2.5)]);
/// assert_eq!(
///     encode(&ring).unwrap(),
///     "POLYGON((1.5 2.5, 3 4, 1.5 2.5, 1.5 2.5))"
/// );
/// ```
pub fn encode(ring: &Ring) -> Result<String> {
    let first = ring.first().ok_or(GeoError::EmptyRing)?;

    let mut pairs = Vec::with_capacity(ring.len() + 1);
    for coord in ring {
        if !coord.is_finite() {
            return Err(GeoError::MalformedCoordinate(format_pair(coord)));
        }
        pairs.push(format_pair(coord));
    }
    pairs.push(format_pair(first));

    Ok(format!("POLYGON(({}))", pairs.join(", ")))
}

/// Parse one `lng lat` piece of the captured group.
fn parse_pair(piece: &str) -> Result<Coordinate> {
    let trimmed = piece.trim();
    let tokens: Vec<&str> = trimmed.split(' ').collect();

    let [lng, lat] = tokens.as_slice() else {
        return Err(GeoError::MalformedCoordinate(format!(
            "expected 2 values, got {}: '{trimmed}'",
            tokens.len()
        )));
    };

    Ok(Coordinate::new(parse_number(lng)?, parse_number(lat)?))
}

fn parse_number(token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| GeoError::MalformedCoordinate(format!("not a number: '{token}'")))
}

fn format_pair(coord: &Coordinate) -> String {
    format!("{} {}", coord.longitude, coord.latitude)
}

/// Keep error messages bounded for very large inputs.
fn truncate(wkt: &str) -> String {
    const MAX: usize = 64;
    match wkt.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &wkt[..idx]),
        None => wkt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pairs(ring: &Ring) -> Vec<(f64, f64)> {
        ring.iter().map(|c| (c.longitude, c.latitude)).collect()
    }

    #[test]
    fn test_decode_square() {
        let ring = decode("POLYGON((0 0, 1 1, 1 0, 0 0))").unwrap();
        assert_eq!(
            pairs(&ring),
            vec![(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]
        );
    }

    #[test]
    fn test_decode_postgis_output() {
        // ST_AsText emits no space after commas
        let ring = decode("POLYGON((-74.006 40.7128,-73.9 40.8,-74 40.75,-74.006 40.7128))")
            .unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.coordinates()[0], Coordinate::new(-74.006, 40.7128));
    }

    #[test]
    fn test_decode_is_case_and_whitespace_tolerant() {
        let ring = decode("  polygon ( (10 20, 30 40) )  ").unwrap();
        assert_eq!(pairs(&ring), vec![(10.0, 20.0), (30.0, 40.0)]);
    }

    #[test]
    fn test_decode_keeps_axis_order() {
        let ring = decode("POLYGON((13.405 52.52))").unwrap();
        assert_eq!(ring.coordinates()[0].longitude, 13.405);
        assert_eq!(ring.coordinates()[0].latitude, 52.52);
    }

    #[test]
    fn test_decode_accepts_degenerate_rings() {
        assert_eq!(decode("POLYGON((5 5))").unwrap().len(), 1);
        assert!(!decode("POLYGON((0 0, 1 0, 1 1))").unwrap().is_closed());
    }

    #[test]
    fn test_decode_missing_envelope() {
        assert!(matches!(
            decode("not a polygon"),
            Err(GeoError::MalformedEnvelope(_))
        ));
        assert!(matches!(
            decode("POINT(1 2)"),
            Err(GeoError::MalformedEnvelope(_))
        ));
        assert!(matches!(
            decode("POLYGON((0 0, 1 1"),
            Err(GeoError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_decode_non_numeric_coordinate() {
        assert!(matches!(
            decode("POLYGON((0 0, x y))"),
            Err(GeoError::MalformedCoordinate(_))
        ));
    }

    #[test]
    fn test_decode_wrong_token_count() {
        assert!(matches!(
            decode("POLYGON((0 0 0, 1 1 1))"),
            Err(GeoError::MalformedCoordinate(_))
        ));
        assert!(matches!(
            decode("POLYGON((0, 1 1))"),
            Err(GeoError::MalformedCoordinate(_))
        ));
        // double spaces split into an empty token
        assert!(matches!(
            decode("POLYGON((0  0))"),
            Err(GeoError::MalformedCoordinate(_))
        ));
        assert!(matches!(
            decode("POLYGON(())"),
            Err(GeoError::MalformedCoordinate(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_finite() {
        assert!(matches!(
            decode("POLYGON((NaN 0))"),
            Err(GeoError::MalformedCoordinate(_))
        ));
        assert!(matches!(
            decode("POLYGON((inf 0))"),
            Err(GeoError::MalformedCoordinate(_))
        ));
    }

    #[test]
    fn test_decode_rejects_inner_rings() {
        let wkt = "POLYGON((0 0, 10 0, 10 10, 0 0),(2 2, 3 2, 3 3, 2 2))";
        assert!(matches!(decode(wkt), Err(GeoError::MalformedCoordinate(_))));
    }

    #[test]
    fn test_encode_empty_ring() {
        assert_eq!(encode(&Ring::default()), Err(GeoError::EmptyRing));
    }

    #[test]
    fn test_encode_duplicates_closing_vertex() {
        let ring = Ring::from(vec![(1.5, 2.5), (3.0, 4.0), (1.5, 2.5)]);
        assert_eq!(
            encode(&ring).unwrap(),
            "POLYGON((1.5 2.5, 3 4, 1.5 2.5, 1.5 2.5))"
        );
    }

    #[test]
    fn test_encode_closes_open_ring() {
        let ring = Ring::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert_eq!(encode(&ring).unwrap(), "POLYGON((0 0, 1 0, 1 1, 0 0))");
    }

    #[test]
    fn test_encode_single_coordinate() {
        let ring = Ring::from(vec![(7.25, -3.5)]);
        assert_eq!(encode(&ring).unwrap(), "POLYGON((7.25 -3.5, 7.25 -3.5))");
    }

    #[test]
    fn test_encode_keeps_full_precision() {
        let ring = Ring::from(vec![(0.1 + 0.2, 77.123456789012)]);
        assert_eq!(
            encode(&ring).unwrap(),
            "POLYGON((0.30000000000000004 77.123456789012, 0.30000000000000004 77.123456789012))"
        );
    }

    #[test]
    fn test_encode_rejects_non_finite() {
        let ring = Ring::from(vec![(0.0, 0.0), (f64::INFINITY, 1.0)]);
        assert!(matches!(
            encode(&ring),
            Err(GeoError::MalformedCoordinate(_))
        ));
    }

    #[test]
    fn test_round_trip_appends_first_coordinate() {
        let ring = Ring::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let decoded = decode(&encode(&ring).unwrap()).unwrap();

        let mut expected = pairs(&ring);
        expected.push((0.0, 0.0));
        assert_eq!(pairs(&decoded), expected);
    }

    #[test]
    fn test_truncate_long_input() {
        let long = "x".repeat(200);
        let err = decode(&long).unwrap_err();
        assert!(err.to_string().ends_with("..."));
    }

    proptest! {
        #[test]
        fn prop_round_trip_is_ring_plus_first(
            raw in prop::collection::vec((-180.0f64..180.0, -90.0f64..90.0), 1..32)
        ) {
            let ring = Ring::from(raw.clone());
            let decoded = decode(&encode(&ring).unwrap()).unwrap();

            let mut expected = raw.clone();
            expected.push(raw[0]);
            prop_assert_eq!(pairs(&decoded), expected);
        }
    }
}
