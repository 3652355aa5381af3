use crate::api::tile::QuadkeyTile;
use crate::coord::Coordinate;
use crate::core::projection::{lat_long_to_pixel_xy, validate_level};
use crate::core::tile::pixel_xy_to_tile_xy;
use crate::error::QuadkeyError;
use geo_types::{Polygon, Rect};
use geojson::{Feature, FeatureCollection, JsonObject};
use rayon::prelude::*;

/// Largest number of tiles a single [`TileGrid`] will hold (the whole world at level 11).
pub const MAX_GRID_TILES: u64 = 1 << 22;

/// Every tile at one level that intersects a WGS84 extent, in row-major order.
///
/// # Example
///
/// ```
/// use quadkey_rs::TileGrid;
///
/// # fn main() -> Result<(), quadkey_rs::QuadkeyError> {
/// let grid = TileGrid::builder()
///     .level(12)
///     .extent(-0.2, 51.45, -0.05, 51.55)
///     .build()?;
///
/// if let Some(tile) = grid.get_tile_at(&(-0.1278, 51.5074)) {
///     println!("{}", tile.quadkey);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TileGrid {
    tiles: Vec<QuadkeyTile>,
    level: u8,
    min_x: i64,
    min_y: i64,
    width: i64,
}

impl TileGrid {
    pub fn builder() -> TileGridBuilder {
        TileGridBuilder::new()
    }

    /// Tiles covering `[min_lon, max_lon] x [min_lat, max_lat]` at `level`.
    ///
    /// Corners may be given in any order; coordinates are clamped onto the map.
    ///
    /// # Errors
    ///
    /// Returns [`QuadkeyError::TooManyTiles`] when the extent covers more than
    /// [`MAX_GRID_TILES`] tiles at `level`.
    pub fn from_extent(
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
        level: u8,
    ) -> Result<Self, QuadkeyError> {
        let level = validate_level(level)?;

        let corner = |lon: f64, lat: f64| {
            let (pixel_x, pixel_y) = lat_long_to_pixel_xy(lat, lon, level);
            pixel_xy_to_tile_xy(pixel_x, pixel_y)
        };
        let (ax, ay) = corner(min_lon, max_lat);
        let (bx, by) = corner(max_lon, min_lat);

        let (min_x, max_x) = (ax.min(bx), ax.max(bx));
        let (min_y, max_y) = (ay.min(by), ay.max(by));
        let width = max_x - min_x + 1;
        let height = max_y - min_y + 1;

        let count = width.checked_mul(height).map_or(u64::MAX, |count| count as u64);
        if count > MAX_GRID_TILES {
            return Err(QuadkeyError::TooManyTiles { count });
        }

        let mut tiles = Vec::with_capacity(count as usize);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                tiles.push(QuadkeyTile::new(x, y, level));
            }
        }

        Ok(Self {
            tiles,
            level,
            min_x,
            min_y,
            width,
        })
    }

    /// Tiles covering a `(lon, lat)` rectangle.
    pub fn from_rect(rect: &Rect<f64>, level: u8) -> Result<Self, QuadkeyError> {
        Self::from_extent(
            rect.min().x,
            rect.min().y,
            rect.max().x,
            rect.max().y,
            level,
        )
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[QuadkeyTile] {
        &self.tiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuadkeyTile> {
        self.tiles.iter()
    }

    /// Returns the grid tile containing the coordinate, if it is in the grid.
    pub fn get_tile_at(&self, coord: &impl Coordinate) -> Option<&QuadkeyTile> {
        let (pixel_x, pixel_y) = lat_long_to_pixel_xy(coord.y(), coord.x(), self.level);
        let (x, y) = pixel_xy_to_tile_xy(pixel_x, pixel_y);
        let (dx, dy) = (x - self.min_x, y - self.min_y);
        if dx < 0 || dy < 0 || dx >= self.width {
            return None;
        }
        self.tiles.get((dy * self.width + dx) as usize)
    }

    pub fn to_polygons(&self) -> Vec<Polygon<f64>> {
        self.tiles.par_iter().map(|tile| tile.to_polygon()).collect()
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<&QuadkeyTile>
    where
        F: Fn(&QuadkeyTile) -> bool,
    {
        self.tiles.iter().filter(|tile| predicate(tile)).collect()
    }

    /// Serializes the grid as a GeoJSON FeatureCollection of tile outlines.
    ///
    /// Each feature carries `quadkey`, `x`, `y` and `level` properties.
    pub fn to_geojson(&self) -> Result<String, QuadkeyError> {
        let features: Vec<Feature> = self
            .tiles
            .par_iter()
            .map(|tile| {
                let mut properties = JsonObject::new();
                properties.insert("quadkey".to_string(), tile.quadkey.clone().into());
                properties.insert("x".to_string(), tile.x.into());
                properties.insert("y".to_string(), tile.y.into());
                properties.insert("level".to_string(), tile.level.into());
                Feature {
                    bbox: None,
                    geometry: Some(geojson::Geometry::from(&tile.to_polygon())),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        let collection = FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        };
        serde_json::to_string(&collection).map_err(|e| QuadkeyError::IoError(e.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct TileGridBuilder {
    level: Option<u8>,
    extent: Option<(f64, f64, f64, f64)>,
}

impl TileGridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    pub fn extent(mut self, min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        self.extent = Some((min_lon, min_lat, max_lon, max_lat));
        self
    }

    pub fn rect(mut self, rect: &Rect<f64>) -> Self {
        self.extent = Some((rect.min().x, rect.min().y, rect.max().x, rect.max().y));
        self
    }

    pub fn build(self) -> Result<TileGrid, QuadkeyError> {
        let level = self.level.ok_or(QuadkeyError::MissingField("level"))?;
        let (min_lon, min_lat, max_lon, max_lat) =
            self.extent.ok_or(QuadkeyError::MissingField("extent"))?;

        TileGrid::from_extent(min_lon, min_lat, max_lon, max_lat, level)
    }
}
