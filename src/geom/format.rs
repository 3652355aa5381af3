use geo_types::Polygon;
use wkt::ToWkt;

/// Output format for tile boundary geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON geometry object
    GeoJson,
}

impl GeometryFormat {
    /// Renders `polygon` in this format.
    pub fn format_polygon(self, polygon: &Polygon<f64>) -> String {
        match self {
            GeometryFormat::Wkt => polygon.wkt_string(),
            GeometryFormat::GeoJson => geojson::Geometry::from(polygon).to_string(),
        }
    }
}
