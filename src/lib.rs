//! # quadkey-rs
//!
//! Converts WGS-84 coordinates to the quadkey tile addressing scheme used by
//! Web Mercator tiled maps, and back.
//!
//! The conversion chain is
//! `(latitude, longitude, level) -> pixel XY -> tile XY -> quadkey`, and
//! every step is exposed as a pure function:
//!
//! ```
//! use quadkey_rs::{
//!     lat_long_to_pixel_xy, pixel_xy_to_tile_xy, quadkey_to_tile_xy, tile_xy_to_quadkey,
//! };
//!
//! # fn main() -> Result<(), quadkey_rs::QuadkeyError> {
//! let (px, py) = lat_long_to_pixel_xy(47.61, -122.33, 12);
//! let (tx, ty) = pixel_xy_to_tile_xy(px, py);
//! let quadkey = tile_xy_to_quadkey(tx, ty, 12);
//!
//! assert_eq!(quadkey_to_tile_xy(&quadkey)?, (tx, ty, 12));
//! # Ok(())
//! # }
//! ```
//!
//! There are three higher-level entry points.
//!
//! ### 1. `QuadkeyTile` - Single Tile Operations
//!
//! ```
//! use quadkey_rs::QuadkeyTile;
//!
//! # fn main() -> Result<(), quadkey_rs::QuadkeyError> {
//! let tile = QuadkeyTile::from_wgs84(&(-122.33, 47.61), 12)?;
//! println!("{}", tile.quadkey);
//! let polygon = tile.to_polygon();
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `TileGrid` - Tiles Covering an Extent
//!
//! ```
//! use quadkey_rs::TileGrid;
//!
//! # fn main() -> Result<(), quadkey_rs::QuadkeyError> {
//! let grid = TileGrid::builder()
//!     .level(10)
//!     .extent(13.0, 52.3, 13.8, 52.7)
//!     .build()?;
//!
//! if let Some(tile) = grid.get_tile_at(&(13.405, 52.52)) {
//!     println!("{}", tile.quadkey);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToQuadkey` - CSV File Conversion
//!
//! ```no_run
//! use quadkey_rs::{CsvQuadkeyConfig, CsvToQuadkey, GeometryFormat};
//!
//! let config = CsvQuadkeyConfig::from_coords("lon", "lat", 16)
//!     .with_tile_geometry(GeometryFormat::Wkt);
//!
//! "input.csv".to_quadkey_csv("output.csv", &config).unwrap();
//! ```
//!

pub mod api;
pub mod coord;
pub mod core;
pub mod error;
pub mod geom;
pub mod index;

pub use api::{
    CoordinateSource, CsvQuadkeyConfig, CsvToQuadkey, MAX_GRID_TILES, QuadkeyTile, TileGrid,
    TileGridBuilder, csv_to_quadkey_csv, lat_longs_to_quadkeys, lat_longs_to_tiles,
    quadkeys_to_tiles,
};
pub use coord::Coordinate;
pub use crate::core::{
    EARTH_RADIUS, MAX_LATITUDE, MAX_LEVEL, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE, TILE_SIZE,
    checked_map_size, clip, ground_resolution, lat_long_to_pixel_xy, map_scale, map_size,
    pixel_xy_to_lat_long, pixel_xy_to_tile_xy, tile_xy_to_pixel_xy, tiles_per_side,
    validate_level,
};
pub use error::QuadkeyError;
pub use geom::{GeometryFormat, parse_geojson, parse_geometry, parse_wkt};
pub use index::{lat_long_to_quadkey, quadkey_to_tile_xy, tile_xy_to_quadkey};

pub use geo_types;
