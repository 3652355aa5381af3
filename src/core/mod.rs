pub mod constants;
pub mod projection;
pub mod tile;

pub use constants::{
    EARTH_RADIUS, MAX_LATITUDE, MAX_LEVEL, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE, TILE_SIZE,
};
pub use projection::{
    checked_map_size, clip, ground_resolution, lat_long_to_pixel_xy, map_scale, map_size,
    pixel_xy_to_lat_long, validate_level,
};
pub use tile::{pixel_xy_to_tile_xy, tile_xy_to_pixel_xy, tiles_per_side};
