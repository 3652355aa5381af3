use crate::api::tile::QuadkeyTile;
use crate::core::projection::validate_level;
use crate::error::QuadkeyError;
use crate::geom::{GeometryFormat, parse_geometry};
use log::{debug, warn};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

/// For the type of geometry source in the file
enum SourceIndices {
    Geometry(usize),
    Coordinates { lon_idx: usize, lat_idx: usize },
}

/// Specifies how to extract location data from CSV rows.
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry
    GeometryColumn(String),
    /// Separate longitude and latitude columns
    CoordinateColumns {
        lon_column: String,
        lat_column: String,
    },
}

/// Configuration for CSV to quadkey conversion.
#[derive(Debug, Clone)]
pub struct CsvQuadkeyConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub level: u8,
    pub include_tile_xy: bool,
    pub include_tile_geometry: Option<GeometryFormat>,
}

impl CsvQuadkeyConfig {
    /// Create config for a CSV with a WGS84 geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use quadkey_rs::CsvQuadkeyConfig;
    ///
    /// let config = CsvQuadkeyConfig::new("geometry", 12);
    /// ```
    pub fn new(geometry_column: impl Into<String>, level: u8) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            level,
            include_tile_xy: false,
            include_tile_geometry: None,
        }
    }

    /// Create config for a CSV with separate longitude/latitude columns.
    ///
    /// # Example
    /// ```
    /// use quadkey_rs::{CsvQuadkeyConfig, GeometryFormat};
    ///
    /// let config = CsvQuadkeyConfig::from_coords("Longitude", "Latitude", 16)
    ///     .with_tile_xy()
    ///     .with_tile_geometry(GeometryFormat::Wkt);
    /// ```
    pub fn from_coords(
        lon_column: impl Into<String>,
        lat_column: impl Into<String>,
        level: u8,
    ) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lon_column: lon_column.into(),
                lat_column: lat_column.into(),
            },
            exclude_columns: Vec::new(),
            level,
            include_tile_xy: false,
            include_tile_geometry: None,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    /// Include `tile_x` and `tile_y` columns in output.
    pub fn with_tile_xy(mut self) -> Self {
        self.include_tile_xy = true;
        self
    }

    /// Include the tile outline polygon in output.
    pub fn with_tile_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_tile_geometry = Some(format);
        self
    }
}

pub trait CsvToQuadkey {
    fn to_quadkey_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvQuadkeyConfig,
    ) -> Result<usize, QuadkeyError>;
}

impl<P: AsRef<Path>> CsvToQuadkey for P {
    fn to_quadkey_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvQuadkeyConfig,
    ) -> Result<usize, QuadkeyError> {
        csv_to_quadkey_csv(self, output_path, config)
    }
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, QuadkeyError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| QuadkeyError::CsvError(format!("Column '{}' not found", name)))
}

fn parse_coordinate(record: &csv::StringRecord, idx: usize) -> Result<f64, QuadkeyError> {
    let field = record
        .get(idx)
        .ok_or_else(|| QuadkeyError::CsvError(format!("Missing column at index {}", idx)))?
        .trim();
    field
        .parse()
        .map_err(|_| QuadkeyError::InvalidCoordinate(format!("'{}'", field)))
}

/// Converts a CSV file with WGS84 geometry or coordinate columns to a CSV
/// file with a leading `quadkey` column.
///
/// Rows are streamed. A row whose geometry maps to several tiles (a line,
/// a multipoint) is written once per tile. Returns the number of rows written.
///
/// # Example with geometry column (WKT or GeoJSON)
///
/// ```no_run
/// use quadkey_rs::{csv_to_quadkey_csv, CsvQuadkeyConfig};
///
/// let config = CsvQuadkeyConfig::new("Geo Shape", 14)
///     .exclude(vec!["Geo Point".into()]);
///
/// csv_to_quadkey_csv("input.csv", "output.csv", &config).unwrap();
/// ```
///
/// # Example with coordinate columns
///
/// ```no_run
/// use quadkey_rs::{csv_to_quadkey_csv, CsvQuadkeyConfig};
///
/// let config = CsvQuadkeyConfig::from_coords("lon", "lat", 18).with_tile_xy();
///
/// csv_to_quadkey_csv("stops.csv", "stops_quadkeys.csv", &config).unwrap();
/// ```
pub fn csv_to_quadkey_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvQuadkeyConfig,
) -> Result<usize, QuadkeyError> {
    let level = validate_level(config.level)?;
    debug!(
        "Converting {} -> {} at level {}",
        csv_path.as_ref().display(),
        output_path.as_ref().display(),
        level
    );

    let file = File::open(csv_path).map_err(|e| QuadkeyError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| QuadkeyError::CsvError(e.to_string()))?
        .clone();

    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = find_column(&headers, col)?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lon_column,
            lat_column,
        } => {
            let lon_idx = find_column(&headers, lon_column)?;
            let lat_idx = find_column(&headers, lat_column)?;
            (
                SourceIndices::Coordinates { lon_idx, lat_idx },
                HashSet::from([lon_idx, lat_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        match headers.iter().position(|h| h == col_name) {
            Some(idx) => {
                exclude_indices.insert(idx);
            }
            None => warn!("Excluded column '{}' not found, ignoring", col_name),
        }
    }

    let out_file = File::create(output_path).map_err(|e| QuadkeyError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["quadkey"];
    if config.include_tile_xy {
        header_row.extend(["tile_x", "tile_y"]);
    }
    if config.include_tile_geometry.is_some() {
        header_row.push("tile_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| QuadkeyError::CsvError(e.to_string()))?;

    let mut rows_written = 0;
    for (row_number, result) in reader.records().enumerate() {
        let record = result.map_err(|e| QuadkeyError::CsvError(e.to_string()))?;

        let tiles = match &source_indices {
            SourceIndices::Geometry(idx) => {
                let geom_str = record.get(*idx).ok_or_else(|| {
                    QuadkeyError::CsvError(format!("Missing geometry column at index {}", idx))
                })?;
                QuadkeyTile::from_geometry(parse_geometry(geom_str)?, level)?
            }
            SourceIndices::Coordinates { lon_idx, lat_idx } => {
                let lon = parse_coordinate(&record, *lon_idx)?;
                let lat = parse_coordinate(&record, *lat_idx)?;
                vec![QuadkeyTile::from_lat_long(lat, lon, level)?]
            }
        };

        if tiles.is_empty() {
            warn!("Row {} produced no tiles, skipping", row_number + 1);
        }

        for tile in tiles {
            let mut row: Vec<String> = vec![tile.quadkey.clone()];

            if config.include_tile_xy {
                row.push(tile.x.to_string());
                row.push(tile.y.to_string());
            }

            if let Some(format) = config.include_tile_geometry {
                row.push(format.format_polygon(&tile.to_polygon()));
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer
                .write_record(&row)
                .map_err(|e| QuadkeyError::CsvError(e.to_string()))?;
            rows_written += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| QuadkeyError::IoError(e.to_string()))?;

    debug!("Wrote {} rows", rows_written);
    Ok(rows_written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::lat_long_to_quadkey;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_input(path: &Path, lines: &[&str]) -> Result<(), QuadkeyError> {
        let mut file = File::create(path).map_err(|e| QuadkeyError::IoError(e.to_string()))?;
        for line in lines {
            writeln!(file, "{}", line).map_err(|e| QuadkeyError::IoError(e.to_string()))?;
        }
        Ok(())
    }

    fn read_output(path: &Path) -> Result<Vec<Vec<String>>, QuadkeyError> {
        let mut reader =
            csv::Reader::from_path(path).map_err(|e| QuadkeyError::CsvError(e.to_string()))?;
        let mut rows: Vec<Vec<String>> = vec![
            reader
                .headers()
                .map_err(|e| QuadkeyError::CsvError(e.to_string()))?
                .iter()
                .map(String::from)
                .collect(),
        ];
        for record in reader.records() {
            let record = record.map_err(|e| QuadkeyError::CsvError(e.to_string()))?;
            rows.push(record.iter().map(String::from).collect());
        }
        Ok(rows)
    }

    #[test]
    fn test_csv_from_coords() -> Result<(), QuadkeyError> {
        let dir = tempdir().map_err(|e| QuadkeyError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("stops.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &[
                "StopCode,Name,Longitude,Latitude",
                "ABC123,Temple Meads,-2.58302,51.44827",
                "DEF456,Null Island,0.0,0.0",
            ],
        )?;

        let config = CsvQuadkeyConfig::from_coords("Longitude", "Latitude", 12).with_tile_xy();
        let written = csv_to_quadkey_csv(&csv_path, &output_path, &config)?;
        assert_eq!(written, 2);

        let rows = read_output(&output_path)?;
        assert_eq!(rows[0], vec!["quadkey", "tile_x", "tile_y", "StopCode", "Name"]);
        assert_eq!(rows[1][0], lat_long_to_quadkey(51.44827, -2.58302, 12));
        assert_eq!(rows[1][3], "ABC123");
        assert_eq!(rows[2][0], "300000000000");
        assert_eq!(rows[2][1], "2048");
        assert_eq!(rows[2][2], "2048");
        Ok(())
    }

    #[test]
    fn test_csv_geometry_column_geojson() -> Result<(), QuadkeyError> {
        let dir = tempdir().map_err(|e| QuadkeyError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("assets.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &[
                "ASSET_ID,TYPE,geometry",
                "CDT123,Pipe,\"{\"\"type\"\":\"\"Point\"\",\"\"coordinates\"\":[-0.1,51.5]}\"",
            ],
        )?;

        let config = CsvQuadkeyConfig::new("geometry", 10);
        config_roundtrip(&csv_path, &output_path, &config, 1)?;

        let rows = read_output(&output_path)?;
        assert_eq!(rows[0], vec!["quadkey", "ASSET_ID", "TYPE"]);
        assert_eq!(rows[1][0], lat_long_to_quadkey(51.5, -0.1, 10));
        Ok(())
    }

    #[test]
    fn test_csv_linestring_expands_rows() -> Result<(), QuadkeyError> {
        let dir = tempdir().map_err(|e| QuadkeyError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("lines.csv");
        let output_path = dir.path().join("output.csv");

        write_input(&csv_path, &["id,geometry", "1,\"LINESTRING(-170 0, 170 0)\""])?;

        let config = CsvQuadkeyConfig::new("geometry", 3).with_tile_geometry(GeometryFormat::Wkt);
        config_roundtrip(&csv_path, &output_path, &config, 8)?;

        let rows = read_output(&output_path)?;
        assert_eq!(rows[0], vec!["quadkey", "tile_geometry", "id"]);
        assert!(rows[1][1].starts_with("POLYGON"));
        assert!(rows[1..].iter().all(|r| r[2] == "1"));
        // tile (4, 4) lies between the two vertices
        assert!(rows[1..].iter().any(|r| r[0] == "300"));
        Ok(())
    }

    #[test]
    fn test_csv_exclude_columns() -> Result<(), QuadkeyError> {
        let dir = tempdir().map_err(|e| QuadkeyError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("in.csv");
        let output_path = dir.path().join("out.csv");

        write_input(&csv_path, &["id,note,lon,lat", "7,drop me,10.0,20.0"])?;

        let config = CsvQuadkeyConfig::from_coords("lon", "lat", 5)
            .exclude(vec!["note".into(), "missing".into()]);
        config_roundtrip(&csv_path, &output_path, &config, 1)?;

        let rows = read_output(&output_path)?;
        assert_eq!(rows[0], vec!["quadkey", "id"]);
        Ok(())
    }

    #[test]
    fn test_csv_invalid_level() {
        let config = CsvQuadkeyConfig::from_coords("lon", "lat", 24);
        let result = csv_to_quadkey_csv("does-not-matter.csv", "out.csv", &config);
        assert_eq!(result, Err(QuadkeyError::InvalidLevel(24)));
    }

    #[test]
    fn test_csv_missing_column() -> Result<(), QuadkeyError> {
        let dir = tempdir().map_err(|e| QuadkeyError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("in.csv");
        write_input(&csv_path, &["id,x,y", "1,2,3"])?;

        let config = CsvQuadkeyConfig::from_coords("lon", "lat", 5);
        let result = csv_path.to_quadkey_csv(dir.path().join("out.csv"), &config);
        assert!(matches!(result, Err(QuadkeyError::CsvError(_))));
        Ok(())
    }

    #[test]
    fn test_csv_bad_coordinate() -> Result<(), QuadkeyError> {
        let dir = tempdir().map_err(|e| QuadkeyError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("in.csv");
        write_input(&csv_path, &["lon,lat", "abc,3"])?;

        let config = CsvQuadkeyConfig::from_coords("lon", "lat", 5);
        let result = csv_to_quadkey_csv(&csv_path, dir.path().join("out.csv"), &config);
        assert_eq!(
            result,
            Err(QuadkeyError::InvalidCoordinate("'abc'".to_string()))
        );
        Ok(())
    }

    fn config_roundtrip(
        input: &Path,
        output: &Path,
        config: &CsvQuadkeyConfig,
        expected_rows: usize,
    ) -> Result<(), QuadkeyError> {
        let written = input.to_quadkey_csv(output, config)?;
        assert_eq!(written, expected_rows);
        assert!(output.exists());
        Ok(())
    }
}
