/// Error type for quadkey-rs operations.
#[derive(Debug, Clone, PartialEq)]
pub enum QuadkeyError {
    /// A quadkey contained a character outside `'0'..='3'`.
    InvalidQuadkeyChar { ch: char, position: usize },
    /// The quadkey has more digits than the deepest supported level.
    QuadkeyTooLong(usize),
    /// The level of detail is outside the valid range (0-23).
    InvalidLevel(u8),
    /// Tile coordinates fall outside the grid for their level.
    TileOutOfRange { x: i64, y: i64, level: u8 },
    /// A tile grid would hold more tiles than the grid cap allows.
    TooManyTiles { count: u64 },
    /// A numeric coordinate field could not be parsed.
    InvalidCoordinate(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
    /// A builder was finished without a required field.
    MissingField(&'static str),
    /// File I/O or serialization error.
    IoError(String),
    /// CSV parsing or reading error.
    CsvError(String),
}

impl std::fmt::Display for QuadkeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuadkeyError::InvalidQuadkeyChar { ch, position } => {
                write!(f, "Invalid quadkey character '{}' at position {}", ch, position)
            }
            QuadkeyError::QuadkeyTooLong(len) => write!(f, "Quadkey too long: {} digits", len),
            QuadkeyError::InvalidLevel(l) => write!(f, "Invalid level of detail: {}", l),
            QuadkeyError::TileOutOfRange { x, y, level } => {
                write!(f, "Tile ({}, {}) out of range for level {}", x, y, level)
            }
            QuadkeyError::TooManyTiles { count } => {
                write!(f, "Tile grid too large: {} tiles", count)
            }
            QuadkeyError::InvalidCoordinate(msg) => write!(f, "Invalid coordinate: {}", msg),
            QuadkeyError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
            QuadkeyError::MissingField(name) => write!(f, "Missing field: {}", name),
            QuadkeyError::IoError(msg) => write!(f, "IO error: {}", msg),
            QuadkeyError::CsvError(msg) => write!(f, "CSV error: {}", msg),
        }
    }
}

impl std::error::Error for QuadkeyError {}
