use crate::core::constants::MAX_LEVEL;
use crate::core::projection::lat_long_to_pixel_xy;
use crate::core::tile::pixel_xy_to_tile_xy;
use crate::error::QuadkeyError;

/// Encodes tile XY at `level` as a quadkey string.
///
/// The quadkey has one digit per level, coarsest level first. Each digit
/// interleaves one bit of each tile coordinate:
///
/// | Bit of `tile_x` | Bit of `tile_y` | Digit |
/// |-----------------|-----------------|-------|
/// | 0               | 0               | `0`   |
/// | 1               | 0               | `1`   |
/// | 0               | 1               | `2`   |
/// | 1               | 1               | `3`   |
///
/// The output length always equals `level`.
///
/// # Example
/// ```
/// use quadkey_rs::tile_xy_to_quadkey;
///
/// assert_eq!(tile_xy_to_quadkey(3, 5, 3), "213");
/// assert_eq!(tile_xy_to_quadkey(0, 0, 0), "");
/// ```
pub fn tile_xy_to_quadkey(tile_x: i64, tile_y: i64, level: u8) -> String {
    let mut quadkey = String::with_capacity(level as usize);
    for i in (1..=level).rev() {
        // bits above i64's width are zero for any representable tile
        let mask = 1_i64.checked_shl(u32::from(i - 1)).unwrap_or(0);
        let mut digit = b'0';
        if tile_x & mask != 0 {
            digit += 1;
        }
        if tile_y & mask != 0 {
            digit += 2;
        }
        quadkey.push(char::from(digit));
    }
    quadkey
}

/// Decodes a quadkey into `(tile_x, tile_y, level)`.
///
/// # Process
///
/// 1. The level is the number of digits in the quadkey
/// 2. Each digit at position `p` sets bit `level - p - 1` of the tile
///    coordinates: `1` sets it in X, `2` in Y, `3` in both, `0` in neither
///
/// An empty quadkey is valid and decodes to `(0, 0, 0)`.
///
/// # Example
/// ```
/// use quadkey_rs::{QuadkeyError, quadkey_to_tile_xy};
///
/// assert_eq!(quadkey_to_tile_xy("213"), Ok((3, 5, 3)));
/// assert_eq!(
///     quadkey_to_tile_xy("12x3"),
///     Err(QuadkeyError::InvalidQuadkeyChar { ch: 'x', position: 2 })
/// );
/// ```
///
/// # Errors
///
/// - [`QuadkeyError::QuadkeyTooLong`] - More than [`MAX_LEVEL`] digits
/// - [`QuadkeyError::InvalidQuadkeyChar`] - A character outside `'0'..='3'`,
///   reported with its 0-based position. No partial result is returned.
pub fn quadkey_to_tile_xy(quadkey: &str) -> Result<(i64, i64, u8), QuadkeyError> {
    let len = quadkey.chars().count();
    if len > MAX_LEVEL as usize {
        return Err(QuadkeyError::QuadkeyTooLong(len));
    }

    let mut tile_x = 0_i64;
    let mut tile_y = 0_i64;
    for (position, ch) in quadkey.chars().enumerate() {
        let mask = 1_i64 << (len - position - 1);
        match ch {
            '0' => {}
            '1' => tile_x |= mask,
            '2' => tile_y |= mask,
            '3' => {
                tile_x |= mask;
                tile_y |= mask;
            }
            _ => return Err(QuadkeyError::InvalidQuadkeyChar { ch, position }),
        }
    }

    Ok((tile_x, tile_y, len as u8))
}

/// Returns the quadkey of the tile containing a WGS-84 point at `level`.
///
/// # Example
/// ```
/// use quadkey_rs::lat_long_to_quadkey;
///
/// let quadkey = lat_long_to_quadkey(47.61, -122.33, 12);
/// assert_eq!(quadkey.len(), 12);
/// ```
pub fn lat_long_to_quadkey(latitude: f64, longitude: f64, level: u8) -> String {
    let (pixel_x, pixel_y) = lat_long_to_pixel_xy(latitude, longitude, level);
    let (tile_x, tile_y) = pixel_xy_to_tile_xy(pixel_x, pixel_y);
    tile_xy_to_quadkey(tile_x, tile_y, level)
}
