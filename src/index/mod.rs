mod quadkey;

pub use quadkey::{lat_long_to_quadkey, quadkey_to_tile_xy, tile_xy_to_quadkey};
