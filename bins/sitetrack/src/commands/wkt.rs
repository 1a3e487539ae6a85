//! Offline codec commands

use crate::context::OutputFormat;
use anyhow::Result;
use serde::Serialize;
use sitetrack_cli::output::{format_area, format_count, format_distance, Status};
use sitetrack_geo::{
    decode as decode_wkt, encode as encode_ring, geodesic_area_m2, perimeter_meters, GeoError,
    polygon_geometry, Ring,
};

/// Parse a `lon lat, lon lat, ...` list with the same rules as WKT decoding
pub fn parse_coords(text: &str) -> Result<Ring, GeoError> {
    if text.contains(['(', ')']) {
        return Err(GeoError::MalformedCoordinate(text.trim().to_string()));
    }
    decode_wkt(&format!("POLYGON(({}))", text.trim()))
}

#[derive(Serialize)]
struct RingReport<'a> {
    coordinates: Vec<[f64; 2]>,
    closed: bool,
    perimeter_m: f64,
    area_m2: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    wkt: Option<&'a str>,
}

impl<'a> RingReport<'a> {
    fn new(ring: &Ring, wkt: Option<&'a str>) -> Self {
        Self {
            coordinates: ring.iter().map(|c| [c.longitude, c.latitude]).collect(),
            closed: ring.is_closed(),
            perimeter_m: perimeter_meters(ring),
            area_m2: geodesic_area_m2(ring),
            wkt,
        }
    }
}

/// `wkt decode <WKT>`
pub fn decode(text: &str, format: OutputFormat) -> Result<()> {
    let ring = decode_wkt(text)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&RingReport::new(&ring, None))?);
        }
        OutputFormat::GeoJson => {
            println!(
                "{}",
                serde_json::to_string_pretty(&polygon_geometry(&ring))?
            );
        }
        OutputFormat::Text => {
            for coordinate in &ring {
                println!("{} {}", coordinate.longitude, coordinate.latitude);
            }
            print_measures(&ring);
        }
    }
    Ok(())
}

/// `wkt encode <coords>`
pub fn encode(coords: &str, format: OutputFormat) -> Result<()> {
    let ring = parse_coords(coords)?;
    let wkt = encode_ring(&ring)?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&RingReport::new(&ring, Some(&wkt)))?
            );
        }
        OutputFormat::GeoJson => {
            println!(
                "{}",
                serde_json::to_string_pretty(&polygon_geometry(&ring))?
            );
        }
        OutputFormat::Text => println!("{wkt}"),
    }
    Ok(())
}

/// Vertex count, closure, perimeter and area
pub fn print_measures(ring: &Ring) {
    let vertices = format_count(ring.len(), "vertex", "vertices");
    let closure = if ring.is_closed() { "closed" } else { "open" };
    println!();
    Status::field("Ring", &format!("{vertices}, {closure}"));
    Status::field("Perimeter", &format_distance(perimeter_meters(ring)));
    Status::field("Area", &format_area(geodesic_area_m2(ring)));
}
