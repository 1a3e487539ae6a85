//! Ring measures on a spherical Earth.
//!
//! Perimeter uses the haversine great-circle distance. Area uses the
//! spherical-excess approximation (the same one the drawing toolbar shows
//! while a polygon is being drawn), accurate enough for site-sized polygons.

use crate::{Coordinate, Ring};

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two coordinates in meters.
///
/// # Example
/// ```
/// use sitetrack_geo::{haversine_distance_meters, Coordinate};
///
/// let berlin = Coordinate::new(13.4050, 52.5200);
/// let paris = Coordinate::new(2.3522, 48.8566);
///
/// let distance = haversine_distance_meters(&berlin, &paris);
/// assert!((distance - 878_000.0).abs() < 10_000.0);
/// ```
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lon1, lat1) = from.to_radians();
    let (lon2, lat2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Perimeter of the ring in meters, including the closing edge.
///
/// Works the same for open and closed rings: on a closed ring the closing
/// edge has zero length.
pub fn perimeter_meters(ring: &Ring) -> f64 {
    edges(ring)
        .map(|(a, b)| haversine_distance_meters(a, b))
        .sum()
}

/// Unsigned geodesic area of the ring in square meters.
///
/// Returns 0 for rings with fewer than three coordinates.
pub fn geodesic_area_m2(ring: &Ring) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }

    let sum: f64 = edges(ring)
        .map(|(a, b)| {
            let (lon1, lat1) = a.to_radians();
            let (lon2, lat2) = b.to_radians();
            (lon2 - lon1) * (2.0 + lat1.sin() + lat2.sin())
        })
        .sum();

    (sum * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0).abs()
}

/// Consecutive coordinate pairs, wrapping from the last back to the first.
fn edges(ring: &Ring) -> impl Iterator<Item = (&Coordinate, &Coordinate)> {
    let coords = ring.coordinates();
    let n = coords.len();
    (0..n).map(move |i| (&coords[i], &coords[(i + 1) % n]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Ring {
        Ring::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn test_haversine_same_point() {
        let coord = Coordinate::new(13.4050, 52.5200);
        assert!(haversine_distance_meters(&coord, &coord).abs() < 0.001);
    }

    #[test]
    fn test_haversine_one_degree_at_equator() {
        let d = haversine_distance_meters(&Coordinate::new(0.0, 0.0), &Coordinate::new(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 50.0);
    }

    #[test]
    fn test_perimeter_unit_square() {
        let p = perimeter_meters(&unit_square());
        assert!((p - 444_760.0).abs() < 2_000.0, "perimeter was {p}");
    }

    #[test]
    fn test_perimeter_ignores_closure() {
        let open = unit_square();
        let mut closed = open.clone().into_inner();
        closed.push(Coordinate::new(0.0, 0.0));
        let closed = Ring::from(closed);

        assert!((perimeter_meters(&open) - perimeter_meters(&closed)).abs() < 1e-6);
    }

    #[test]
    fn test_area_unit_square() {
        let area = geodesic_area_m2(&unit_square());
        let expected = 1.2363e10;
        assert!((area - expected).abs() / expected < 0.01, "area was {area}");
    }

    #[test]
    fn test_area_is_orientation_independent() {
        let ccw = unit_square();
        let cw: Ring = ccw.iter().rev().copied().collect();
        assert!((geodesic_area_m2(&ccw) - geodesic_area_m2(&cw)).abs() < 1.0);
    }

    #[test]
    fn test_area_degenerate() {
        assert_eq!(geodesic_area_m2(&Ring::default()), 0.0);
        assert_eq!(geodesic_area_m2(&Ring::from(vec![(0.0, 0.0), (1.0, 1.0)])), 0.0);
        assert_eq!(perimeter_meters(&Ring::default()), 0.0);
    }
}
