use crate::core::constants::{
    EARTH_RADIUS, MAX_LATITUDE, MAX_LEVEL, MAX_LONGITUDE, METERS_PER_INCH, MIN_LATITUDE,
    MIN_LONGITUDE, TILE_SIZE,
};
use crate::error::QuadkeyError;
use std::f64::consts::PI;

/// Clamps `n` into `[min_value, max_value]`.
pub fn clip(n: f64, min_value: f64, max_value: f64) -> f64 {
    n.max(min_value).min(max_value)
}

/// Returns `level` unchanged if it is a supported level of detail (0-23).
pub fn validate_level(level: u8) -> Result<u8, QuadkeyError> {
    if level > MAX_LEVEL {
        return Err(QuadkeyError::InvalidLevel(level));
    }
    Ok(level)
}

/// Width and height of the whole map in pixels at `level`.
///
/// Computed in 64 bits so level 23 yields exactly 2^31. Levels above
/// [`MAX_LEVEL`] are the caller's responsibility; use [`checked_map_size`]
/// when the level comes from untrusted input.
///
/// # Example
/// ```
/// use quadkey_rs::map_size;
///
/// assert_eq!(map_size(1), 512);
/// assert_eq!(map_size(23), 1 << 31);
/// ```
pub fn map_size(level: u8) -> u64 {
    (TILE_SIZE as u64) << level
}

/// Like [`map_size`], but rejects levels outside 0-23.
pub fn checked_map_size(level: u8) -> Result<u64, QuadkeyError> {
    validate_level(level).map(map_size)
}

/// Ground resolution in meters per pixel at `latitude` and `level`.
///
/// Latitude is clamped to the projection limits first.
pub fn ground_resolution(latitude: f64, level: u8) -> f64 {
    let latitude = clip(latitude, MIN_LATITUDE, MAX_LATITUDE);
    (latitude * PI / 180.0).cos() * 2.0 * PI * EARTH_RADIUS / map_size(level) as f64
}

/// Map scale, expressed as the denominator N of the ratio 1 : N.
pub fn map_scale(latitude: f64, level: u8, screen_dpi: u32) -> f64 {
    ground_resolution(latitude, level) * f64::from(screen_dpi) / METERS_PER_INCH
}

/// Projects a WGS-84 point to pixel XY at `level`.
///
/// Latitude and longitude are clamped to their valid ranges, the point is
/// projected with spherical Mercator, rounded to the nearest pixel and then
/// clamped to `[0, map_size - 1]`.
///
/// # Example
/// ```
/// use quadkey_rs::lat_long_to_pixel_xy;
///
/// assert_eq!(lat_long_to_pixel_xy(0.0, 0.0, 1), (256, 256));
/// // out-of-range input is clamped, never NaN
/// assert_eq!(lat_long_to_pixel_xy(90.0, 200.0, 1), (511, 0));
/// ```
pub fn lat_long_to_pixel_xy(latitude: f64, longitude: f64, level: u8) -> (i64, i64) {
    let latitude = clip(latitude, MIN_LATITUDE, MAX_LATITUDE);
    let longitude = clip(longitude, MIN_LONGITUDE, MAX_LONGITUDE);

    let x = (longitude + 180.0) / 360.0;
    let sin_latitude = (latitude * PI / 180.0).sin();
    let y = 0.5 - ((1.0 + sin_latitude) / (1.0 - sin_latitude)).ln() / (4.0 * PI);

    let size = map_size(level) as f64;
    let pixel_x = clip(x * size + 0.5, 0.0, size - 1.0) as i64;
    let pixel_y = clip(y * size + 0.5, 0.0, size - 1.0) as i64;

    (pixel_x, pixel_y)
}

/// Converts pixel XY at `level` back to WGS-84 `(latitude, longitude)`.
///
/// Pixel inputs are clamped to the map first. This is the inverse of
/// [`lat_long_to_pixel_xy`] up to pixel quantization.
pub fn pixel_xy_to_lat_long(pixel_x: i64, pixel_y: i64, level: u8) -> (f64, f64) {
    let size = map_size(level) as f64;
    let x = (clip(pixel_x as f64, 0.0, size - 1.0) / size) - 0.5;
    let y = 0.5 - (clip(pixel_y as f64, 0.0, size - 1.0) / size);

    centered_xy_to_lat_long(x, y)
}

/// Inverse Mercator for map coordinates centred on the origin, where
/// `x` and `y` lie in `[-0.5, 0.5]` and `y` grows northward.
pub(crate) fn centered_xy_to_lat_long(x: f64, y: f64) -> (f64, f64) {
    let latitude = 90.0 - 360.0 * (-y * 2.0 * PI).exp().atan() / PI;
    let longitude = 360.0 * x;

    (latitude, longitude)
}
