use crate::coord::Coordinate;
use crate::core::constants::{MAX_LEVEL, TILE_SIZE};
use crate::core::projection::{
    centered_xy_to_lat_long, ground_resolution, lat_long_to_pixel_xy, pixel_xy_to_lat_long,
    validate_level,
};
use crate::core::tile::{pixel_xy_to_tile_xy, tile_xy_to_pixel_xy, tiles_per_side};
use crate::error::QuadkeyError;
use crate::index::{quadkey_to_tile_xy, tile_xy_to_quadkey};
use geo::Centroid;
use geo_types::{Geometry, LineString, Point, Polygon, Rect, coord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A single map tile, addressed both by its quadkey and by tile XY.
///
/// # Example
///
/// ```
/// use quadkey_rs::QuadkeyTile;
///
/// # fn main() -> Result<(), quadkey_rs::QuadkeyError> {
/// // Create from WGS84 (lon, lat)
/// let tile = QuadkeyTile::from_wgs84(&(-122.33, 47.61), 12)?;
/// println!("Quadkey: {}", tile.quadkey);
/// println!("Tile: ({}, {})", tile.x, tile.y);
///
/// // Tile outline for GIS work
/// let polygon = tile.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuadkeyTile {
    /// Quadkey string, one digit per level
    pub quadkey: String,
    /// Tile column, 0 at the antimeridian
    pub x: i64,
    /// Tile row, 0 at the northern edge
    pub y: i64,
    /// Level of detail (0-23)
    pub level: u8,
}

impl QuadkeyTile {
    pub(crate) fn new(x: i64, y: i64, level: u8) -> Self {
        Self {
            quadkey: tile_xy_to_quadkey(x, y, level),
            x,
            y,
            level,
        }
    }

    /// Create the tile containing a WGS84 (lon/lat) coordinate.
    ///
    /// Out-of-range coordinates are clamped onto the map.
    ///
    /// # Example
    /// ```
    /// use quadkey_rs::QuadkeyTile;
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), quadkey_rs::QuadkeyError> {
    /// // From tuple
    /// let tile = QuadkeyTile::from_wgs84(&(13.405, 52.52), 10)?;
    /// // From Point
    /// let same = QuadkeyTile::from_wgs84(&Point::new(13.405, 52.52), 10)?;
    /// assert_eq!(tile, same);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_wgs84(coord: &impl Coordinate, level: u8) -> Result<Self, QuadkeyError> {
        Self::from_lat_long(coord.y(), coord.x(), level)
    }

    /// Create the tile containing `(latitude, longitude)`.
    pub fn from_lat_long(latitude: f64, longitude: f64, level: u8) -> Result<Self, QuadkeyError> {
        let level = validate_level(level)?;
        let (pixel_x, pixel_y) = lat_long_to_pixel_xy(latitude, longitude, level);
        let (x, y) = pixel_xy_to_tile_xy(pixel_x, pixel_y);
        Ok(Self::new(x, y, level))
    }

    /// Create a tile from its quadkey.
    ///
    /// # Example
    /// ```
    /// use quadkey_rs::QuadkeyTile;
    ///
    /// # fn main() -> Result<(), quadkey_rs::QuadkeyError> {
    /// let tile = QuadkeyTile::from_quadkey("213")?;
    /// assert_eq!((tile.x, tile.y, tile.level), (3, 5, 3));
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_quadkey(quadkey: &str) -> Result<Self, QuadkeyError> {
        let (x, y, level) = quadkey_to_tile_xy(quadkey)?;
        Ok(Self {
            quadkey: quadkey.to_string(),
            x,
            y,
            level,
        })
    }

    /// Create a tile from tile XY, checking that it lies on the map.
    pub fn from_tile_xy(x: i64, y: i64, level: u8) -> Result<Self, QuadkeyError> {
        let level = validate_level(level)?;
        let side = tiles_per_side(level);
        if !(0..side).contains(&x) || !(0..side).contains(&y) {
            return Err(QuadkeyError::TileOutOfRange { x, y, level });
        }
        Ok(Self::new(x, y, level))
    }

    /// Create the tiles along a WGS84 LineString.
    ///
    /// Each segment is sampled in pixel space every half tile, and every
    /// distinct tile hit is returned in the order it is first reached.
    pub fn from_line_string(line: &LineString<f64>, level: u8) -> Result<Vec<Self>, QuadkeyError> {
        let level = validate_level(level)?;
        let pixels: Vec<(i64, i64)> = line
            .coords()
            .map(|c| lat_long_to_pixel_xy(c.y, c.x, level))
            .collect();
        let step_size = (TILE_SIZE / 2) as f64;

        let mut seen: HashSet<(i64, i64)> = HashSet::with_capacity(pixels.len());
        let mut tiles: Vec<QuadkeyTile> = Vec::with_capacity(pixels.len());
        let mut visit = |pixel_x: i64, pixel_y: i64| {
            let (x, y) = pixel_xy_to_tile_xy(pixel_x, pixel_y);
            if seen.insert((x, y)) {
                tiles.push(Self::new(x, y, level));
            }
        };

        if let [(x, y)] = pixels.as_slice() {
            visit(*x, *y);
        }

        for window in pixels.windows(2) {
            let (x0, y0) = window[0];
            let (x1, y1) = window[1];
            let dx = (x1 - x0) as f64;
            let dy = (y1 - y0) as f64;
            let steps = ((dx * dx + dy * dy).sqrt() / step_size).ceil() as i64;

            for i in 0..=steps {
                let t = if steps == 0 {
                    0.0
                } else {
                    i as f64 / steps as f64
                };
                visit(
                    (x0 as f64 + t * dx).round() as i64,
                    (y0 as f64 + t * dy).round() as i64,
                );
            }
        }

        Ok(tiles)
    }

    /// Create tiles from an arbitrary WGS84 `geo_types::Geometry`.
    ///
    /// Points map to their tile, polygons to the tile of their centroid,
    /// lines to every tile they cross, and collections recurse.
    pub fn from_geometry(geom: Geometry<f64>, level: u8) -> Result<Vec<Self>, QuadkeyError> {
        match geom {
            Geometry::Point(pt) => Ok(vec![Self::from_wgs84(&pt, level)?]),
            Geometry::MultiPoint(mp) => mp
                .0
                .iter()
                .map(|pt| Self::from_wgs84(pt, level))
                .collect(),
            Geometry::Line(line) => {
                Self::from_line_string(&LineString::from(vec![line.start, line.end]), level)
            }
            Geometry::LineString(line) => Self::from_line_string(&line, level),
            Geometry::MultiLineString(mls) => {
                let mut all_tiles = Vec::new();
                for line in &mls.0 {
                    all_tiles.extend(Self::from_line_string(line, level)?);
                }
                Ok(all_tiles)
            }
            Geometry::Polygon(poly) => match poly.centroid() {
                Some(centroid) => Ok(vec![Self::from_wgs84(&centroid, level)?]),
                None => Ok(vec![]),
            },
            Geometry::MultiPolygon(mp) => {
                let mut tiles = Vec::new();
                for poly in &mp.0 {
                    if let Some(centroid) = poly.centroid() {
                        tiles.push(Self::from_wgs84(&centroid, level)?);
                    }
                }
                Ok(tiles)
            }
            Geometry::GeometryCollection(gc) => {
                let mut all_tiles = Vec::new();
                for g in gc.0 {
                    all_tiles.extend(Self::from_geometry(g, level)?);
                }
                Ok(all_tiles)
            }
            _ => Err(QuadkeyError::GeometryParseError(
                "Unsupported geometry type".to_string(),
            )),
        }
    }

    /// Returns the tile one level coarser, or `None` at level 0.
    pub fn parent(&self) -> Option<Self> {
        if self.level == 0 {
            return None;
        }
        let mut quadkey = self.quadkey.clone();
        quadkey.pop();
        Some(Self {
            quadkey,
            x: self.x >> 1,
            y: self.y >> 1,
            level: self.level - 1,
        })
    }

    /// Returns the four tiles one level finer, in quadkey digit order.
    pub fn children(&self) -> Result<[Self; 4], QuadkeyError> {
        if self.level >= MAX_LEVEL {
            return Err(QuadkeyError::InvalidLevel(self.level + 1));
        }
        let child = |digit: u8| {
            let mut quadkey = self.quadkey.clone();
            quadkey.push(char::from(b'0' + digit));
            Self {
                quadkey,
                x: (self.x << 1) | i64::from(digit & 1),
                y: (self.y << 1) | i64::from(digit >> 1),
                level: self.level + 1,
            }
        };
        Ok([child(0), child(1), child(2), child(3)])
    }

    /// Returns true if the coordinate falls in this tile.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        let (pixel_x, pixel_y) = lat_long_to_pixel_xy(coord.y(), coord.x(), self.level);
        pixel_xy_to_tile_xy(pixel_x, pixel_y) == (self.x, self.y)
    }

    /// WGS84 extent of the tile, from the north-west to the south-east corner.
    pub fn bounds(&self) -> Rect<f64> {
        let side = tiles_per_side(self.level) as f64;
        let corner = |x: i64, y: i64| {
            let (lat, lon) = centered_xy_to_lat_long(x as f64 / side - 0.5, 0.5 - y as f64 / side);
            coord! { x: lon, y: lat }
        };
        Rect::new(corner(self.x, self.y), corner(self.x + 1, self.y + 1))
    }

    /// Converts this tile to its outline polygon in WGS84.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds().to_polygon()
    }

    /// Center of the tile in WGS84 as a `(lon, lat)` point.
    pub fn center(&self) -> Point<f64> {
        let (pixel_x, pixel_y) = tile_xy_to_pixel_xy(self.x, self.y);
        let half = TILE_SIZE / 2;
        let (lat, lon) = pixel_xy_to_lat_long(pixel_x + half, pixel_y + half, self.level);
        Point::new(lon, lat)
    }

    /// Ground resolution in meters per pixel at the tile's center.
    pub fn ground_resolution(&self) -> f64 {
        ground_resolution(self.center().y(), self.level)
    }
}

impl fmt::Display for QuadkeyTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.quadkey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use geo_types::{point, polygon};

    #[test]
    fn test_from_wgs84_tuple() -> Result<(), QuadkeyError> {
        let tile = QuadkeyTile::from_wgs84(&(0.0, 0.0), 3)?;

        assert_eq!(tile.quadkey, "300");
        assert_eq!((tile.x, tile.y, tile.level), (4, 4, 3));
        Ok(())
    }

    #[test]
    fn test_from_wgs84_point_matches_tuple() -> Result<(), QuadkeyError> {
        let from_tuple = QuadkeyTile::from_wgs84(&(-2.248, 53.481), 15)?;
        let from_point = QuadkeyTile::from_wgs84(&point! { x: -2.248, y: 53.481 }, 15)?;
        assert_eq!(from_tuple, from_point);
        Ok(())
    }

    #[test]
    fn test_from_wgs84_invalid_level() {
        let result = QuadkeyTile::from_wgs84(&(0.0, 0.0), 24);
        assert!(matches!(result, Err(QuadkeyError::InvalidLevel(24))));
    }

    #[test]
    fn test_from_quadkey_roundtrip() -> Result<(), QuadkeyError> {
        let tile = QuadkeyTile::from_wgs84(&(151.2093, -33.8688), 17)?;
        let restored = QuadkeyTile::from_quadkey(&tile.quadkey)?;
        assert_eq!(tile, restored);
        Ok(())
    }

    #[test]
    fn test_from_quadkey_invalid() {
        assert_eq!(
            QuadkeyTile::from_quadkey("12x3"),
            Err(QuadkeyError::InvalidQuadkeyChar {
                ch: 'x',
                position: 2
            })
        );
    }

    #[test]
    fn test_from_tile_xy_bounds() -> Result<(), QuadkeyError> {
        assert_eq!(QuadkeyTile::from_tile_xy(3, 5, 3)?.quadkey, "213");
        assert!(matches!(
            QuadkeyTile::from_tile_xy(8, 0, 3),
            Err(QuadkeyError::TileOutOfRange { x: 8, y: 0, level: 3 })
        ));
        assert!(QuadkeyTile::from_tile_xy(0, -1, 3).is_err());
        Ok(())
    }

    #[test]
    fn test_from_line_string_crosses_tiles() -> Result<(), QuadkeyError> {
        let line = LineString::from(vec![(-170.0, 0.0), (170.0, 0.0)]);
        let tiles = QuadkeyTile::from_line_string(&line, 3)?;

        // every column of the row just south of the equator
        assert_eq!(tiles.len(), 8);
        assert!(tiles.iter().all(|t| t.y == 4));
        assert_eq!(tiles[0].x, 0);
        assert_eq!(tiles[7].x, 7);
        Ok(())
    }

    #[test]
    fn test_from_line_string_single_point() -> Result<(), QuadkeyError> {
        let line = LineString::from(vec![(0.0, 0.0)]);
        let tiles = QuadkeyTile::from_line_string(&line, 3)?;
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].quadkey, "300");
        Ok(())
    }

    #[test]
    fn test_from_geometry() -> Result<(), QuadkeyError> {
        let point = Geometry::Point(point! { x: 0.0, y: 0.0 });
        assert_eq!(QuadkeyTile::from_geometry(point, 3)?[0].quadkey, "300");

        let square = Geometry::Polygon(polygon![
            (x: 10.0, y: 10.0),
            (x: 12.0, y: 10.0),
            (x: 12.0, y: 12.0),
            (x: 10.0, y: 12.0),
            (x: 10.0, y: 10.0),
        ]);
        let tiles = QuadkeyTile::from_geometry(square, 10)?;
        assert_eq!(tiles, vec![QuadkeyTile::from_wgs84(&(11.0, 11.0), 10)?]);

        let collection = Geometry::GeometryCollection(geo_types::GeometryCollection(vec![
            Geometry::Point(point! { x: 0.0, y: 0.0 }),
            Geometry::Point(point! { x: -100.0, y: 40.0 }),
        ]));
        assert_eq!(QuadkeyTile::from_geometry(collection, 5)?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_parent_and_children() -> Result<(), QuadkeyError> {
        let tile = QuadkeyTile::from_quadkey("213")?;

        let parent = tile.parent();
        assert_eq!(parent, Some(QuadkeyTile::from_quadkey("21")?));

        let children = tile.children()?;
        for (digit, child) in children.iter().enumerate() {
            assert_eq!(child.quadkey, format!("213{}", digit));
            assert_eq!(*child, QuadkeyTile::from_quadkey(&child.quadkey)?);
            assert_eq!(child.parent().as_ref(), Some(&tile));
        }
        Ok(())
    }

    #[test]
    fn test_root_has_no_parent() -> Result<(), QuadkeyError> {
        let root = QuadkeyTile::from_quadkey("")?;
        assert_eq!(root.parent(), None);
        assert_eq!(root.children()?.len(), 4);
        Ok(())
    }

    #[test]
    fn test_children_at_max_level() -> Result<(), QuadkeyError> {
        let tile = QuadkeyTile::from_wgs84(&(10.0, 10.0), MAX_LEVEL)?;
        assert_eq!(tile.children(), Err(QuadkeyError::InvalidLevel(24)));
        Ok(())
    }

    #[test]
    fn test_bounds_of_root() -> Result<(), QuadkeyError> {
        let bounds = QuadkeyTile::from_quadkey("")?.bounds();
        assert_abs_diff_eq!(bounds.min().x, -180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.max().x, 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.max().y, 85.0511287798, epsilon = 1e-8);
        assert_abs_diff_eq!(bounds.min().y, -85.0511287798, epsilon = 1e-8);
        Ok(())
    }

    #[test]
    fn test_center_and_contains() -> Result<(), QuadkeyError> {
        let tile = QuadkeyTile::from_wgs84(&(2.3522, 48.8566), 14)?;
        let center = tile.center();

        assert!(tile.contains(&center));
        assert!(tile.contains(&(2.3522, 48.8566)));
        assert!(!tile.contains(&(-2.3522, 48.8566)));

        let polygon = tile.to_polygon();
        assert_eq!(polygon.exterior().coords().count(), 5);
        Ok(())
    }

    #[test]
    fn test_ground_resolution_halves_per_level() -> Result<(), QuadkeyError> {
        let coarse = QuadkeyTile::from_wgs84(&(0.0, 0.0), 4)?;
        let fine = QuadkeyTile::from_wgs84(&(0.0, 0.0), 5)?;
        assert!(fine.ground_resolution() < coarse.ground_resolution());
        Ok(())
    }

    #[test]
    fn test_serde_roundtrip() -> Result<(), QuadkeyError> {
        let tile = QuadkeyTile::from_quadkey("0231")?;
        let json =
            serde_json::to_string(&tile).map_err(|e| QuadkeyError::IoError(e.to_string()))?;
        assert!(json.contains("\"quadkey\":\"0231\""));
        let back: QuadkeyTile =
            serde_json::from_str(&json).map_err(|e| QuadkeyError::IoError(e.to_string()))?;
        assert_eq!(back, tile);
        Ok(())
    }

    #[test]
    fn test_display() -> Result<(), QuadkeyError> {
        assert_eq!(QuadkeyTile::from_quadkey("1302")?.to_string(), "1302");
        Ok(())
    }
}
