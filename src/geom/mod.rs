mod format;
mod parse;

pub use format::GeometryFormat;
pub use parse::{parse_geojson, parse_geometry, parse_wkt};
