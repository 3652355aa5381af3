use crate::api::tile::QuadkeyTile;
use crate::coord::Coordinate;
use crate::core::projection::validate_level;
use crate::error::QuadkeyError;
use crate::index::lat_long_to_quadkey;
use rayon::prelude::*;

/// Converts many WGS84 (lon/lat) coordinates to quadkeys in parallel.
///
/// Output order matches input order.
///
/// # Example
/// ```
/// use quadkey_rs::lat_longs_to_quadkeys;
///
/// # fn main() -> Result<(), quadkey_rs::QuadkeyError> {
/// let keys = lat_longs_to_quadkeys(&[(0.0, 0.0), (-122.33, 47.61)], 3)?;
/// assert_eq!(keys[0], "300");
/// # Ok(())
/// # }
/// ```
pub fn lat_longs_to_quadkeys<C>(coords: &[C], level: u8) -> Result<Vec<String>, QuadkeyError>
where
    C: Coordinate + Sync,
{
    let level = validate_level(level)?;
    Ok(coords
        .par_iter()
        .map(|c| lat_long_to_quadkey(c.y(), c.x(), level))
        .collect())
}

/// Converts many WGS84 (lon/lat) coordinates to tiles in parallel.
pub fn lat_longs_to_tiles<C>(coords: &[C], level: u8) -> Result<Vec<QuadkeyTile>, QuadkeyError>
where
    C: Coordinate + Sync,
{
    coords
        .par_iter()
        .map(|c| QuadkeyTile::from_wgs84(c, level))
        .collect()
}

/// Decodes many quadkeys in parallel, failing on the first invalid one.
pub fn quadkeys_to_tiles<S>(quadkeys: &[S]) -> Result<Vec<QuadkeyTile>, QuadkeyError>
where
    S: AsRef<str> + Sync,
{
    quadkeys
        .par_iter()
        .map(|q| QuadkeyTile::from_quadkey(q.as_ref()))
        .collect()
}
