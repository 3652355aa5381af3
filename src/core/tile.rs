use crate::core::constants::TILE_SIZE;

/// Converts pixel XY into the XY of the tile containing that pixel.
pub fn pixel_xy_to_tile_xy(pixel_x: i64, pixel_y: i64) -> (i64, i64) {
    (pixel_x.div_euclid(TILE_SIZE), pixel_y.div_euclid(TILE_SIZE))
}

/// Converts tile XY into the pixel XY of the tile's upper-left corner.
pub fn tile_xy_to_pixel_xy(tile_x: i64, tile_y: i64) -> (i64, i64) {
    (tile_x * TILE_SIZE, tile_y * TILE_SIZE)
}

/// Number of tiles along one edge of the map at `level`.
pub fn tiles_per_side(level: u8) -> i64 {
    1_i64 << level
}
