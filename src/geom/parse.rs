use crate::error::QuadkeyError;
use geo_types::Geometry;
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

fn geometry_error(msg: impl ToString) -> QuadkeyError {
    QuadkeyError::GeometryParseError(msg.to_string())
}

/// Parses a geometry cell, picking GeoJSON when it opens with `{` and WKT otherwise.
///
/// Blank input is rejected up front so empty CSV cells report a clear error
/// instead of a WKT tokenizer message.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, QuadkeyError> {
    match s.trim() {
        "" => Err(geometry_error("empty geometry")),
        json if json.starts_with('{') => parse_geojson(json),
        text => parse_wkt(text),
    }
}

/// Parses a GeoJSON geometry or single feature.
///
/// Feature collections are rejected: one cell maps to one geometry.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, QuadkeyError> {
    let geometry = match GeoJson::from_str(s).map_err(geometry_error)? {
        GeoJson::Geometry(geometry) => geometry,
        GeoJson::Feature(feature) => feature
            .geometry
            .ok_or_else(|| geometry_error("Feature has no geometry"))?,
        GeoJson::FeatureCollection(collection) => {
            return Err(geometry_error(format!(
                "expected a single geometry, got a FeatureCollection of {}",
                collection.features.len()
            )));
        }
    };

    Geometry::try_from(geometry).map_err(geometry_error)
}

pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, QuadkeyError> {
    let wkt = Wkt::<f64>::from_str(s).map_err(geometry_error)?;
    Geometry::try_from(wkt).map_err(|_| geometry_error("Failed to convert WKT to geometry"))
}
