pub mod batch;
pub mod quadkey_csv;
pub mod tile;
pub mod tile_grid;

pub use batch::{lat_longs_to_quadkeys, lat_longs_to_tiles, quadkeys_to_tiles};
pub use quadkey_csv::{CoordinateSource, CsvQuadkeyConfig, CsvToQuadkey, csv_to_quadkey_csv};
pub use tile::QuadkeyTile;
pub use tile_grid::{MAX_GRID_TILES, TileGrid, TileGridBuilder};
