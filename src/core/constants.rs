/// WGS-84 equatorial radius in meters
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Southern latitude limit where the Mercator projection stays finite
pub const MIN_LATITUDE: f64 = -85.05112878;

/// Northern latitude limit where the Mercator projection stays finite
pub const MAX_LATITUDE: f64 = 85.05112878;

pub const MIN_LONGITUDE: f64 = -180.0;

pub const MAX_LONGITUDE: f64 = 180.0;

/// Maximum level of detail
pub const MAX_LEVEL: u8 = 23;

/// Tile edge length in pixels
pub const TILE_SIZE: i64 = 256;

/// Meters per inch, used to turn ground resolution into a map scale
pub(crate) const METERS_PER_INCH: f64 = 0.0254;
