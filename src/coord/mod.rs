use crate::core::constants::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
use crate::core::projection::clip;
use geo_types::{Coord, Point};

/// Trait for types that can provide WGS-84 x/y coordinates.
///
/// Implemented for `(f64, f64)` tuples, `geo_types::Point<f64>` and
/// `geo_types::Coord<f64>`. Like GeoJSON and WKT, `x` is the longitude
/// and `y` the latitude.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;

    /// Returns `(latitude, longitude)` clamped to the projectable range.
    fn clamped_lat_long(&self) -> (f64, f64) {
        (
            clip(self.y(), MIN_LATITUDE, MAX_LATITUDE),
            clip(self.x(), MIN_LONGITUDE, MAX_LONGITUDE),
        )
    }
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

impl Coordinate for Coord<f64> {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (100.0, 20.0);
        assert_eq!(tuple.x(), 100.0);
        assert_eq!(tuple.y(), 20.0);
    }

    #[test]
    fn test_coordinate_trait_point() {
        let point = Point::new(100.0, 20.0);
        assert_eq!(Coordinate::x(&point), 100.0);
        assert_eq!(Coordinate::y(&point), 20.0);
    }

    #[test]
    fn test_coordinate_trait_coord() {
        let c = coord! { x: -3.5, y: 40.25 };
        assert_eq!(Coordinate::x(&c), -3.5);
        assert_eq!(Coordinate::y(&c), 40.25);
    }

    #[test]
    fn test_clamped_lat_long() {
        assert_eq!((200.0, 90.0).clamped_lat_long(), (MAX_LATITUDE, 180.0));
        assert_eq!((-2.5, 53.4).clamped_lat_long(), (53.4, -2.5));
    }
}
