use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{LevelFilter, info};
use quadkey_rs::{
    CsvQuadkeyConfig, CsvToQuadkey, GeometryFormat, MAX_LEVEL, QuadkeyError, QuadkeyTile,
    lat_long_to_pixel_xy, pixel_xy_to_lat_long, tile_xy_to_pixel_xy,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "quadkey",
    version,
    about = "Convert between WGS84 coordinates and quadkey tile addresses",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a latitude/longitude as a quadkey
    Encode(EncodeArgs),
    /// Decode a quadkey into tile XY and its north-west corner
    Decode(DecodeArgs),
    /// Add a quadkey column to a CSV file
    Csv(CsvArgs),
}

#[derive(Args, Debug)]
#[command(allow_negative_numbers = true)]
struct EncodeArgs {
    /// Latitude in degrees
    latitude: f64,
    /// Longitude in degrees
    longitude: f64,
    /// Level of detail
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=MAX_LEVEL as i64))]
    level: u8,
}

#[derive(Args, Debug)]
struct DecodeArgs {
    quadkey: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TileGeometry {
    Wkt,
    Geojson,
}

impl From<TileGeometry> for GeometryFormat {
    fn from(value: TileGeometry) -> Self {
        match value {
            TileGeometry::Wkt => GeometryFormat::Wkt,
            TileGeometry::Geojson => GeometryFormat::GeoJson,
        }
    }
}

#[derive(Args, Debug)]
struct CsvArgs {
    input: PathBuf,
    output: PathBuf,
    /// Level of detail
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=MAX_LEVEL as i64))]
    level: u8,
    /// Column holding WKT or GeoJSON geometry
    #[arg(long, conflicts_with_all = ["lon", "lat"], required_unless_present_all = ["lon", "lat"])]
    geometry: Option<String>,
    /// Longitude column
    #[arg(long, requires = "lat")]
    lon: Option<String>,
    /// Latitude column
    #[arg(long, requires = "lon")]
    lat: Option<String>,
    /// Columns to drop from the output
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,
    /// Append the tile outline in this format
    #[arg(long, value_enum)]
    tile_geometry: Option<TileGeometry>,
    /// Append tile_x and tile_y columns
    #[arg(long)]
    tile_xy: bool,
}

impl CsvArgs {
    fn to_config(&self) -> Result<CsvQuadkeyConfig, QuadkeyError> {
        let mut config = match (&self.geometry, &self.lon, &self.lat) {
            (Some(geometry), _, _) => CsvQuadkeyConfig::new(geometry, self.level),
            (None, Some(lon), Some(lat)) => CsvQuadkeyConfig::from_coords(lon, lat, self.level),
            _ => return Err(QuadkeyError::MissingField("--geometry or --lon/--lat")),
        };
        config = config.exclude(self.exclude.clone());
        if self.tile_xy {
            config = config.with_tile_xy();
        }
        if let Some(format) = self.tile_geometry {
            config = config.with_tile_geometry(format.into());
        }
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<String, QuadkeyError> {
    match &cli.command {
        Commands::Encode(args) => {
            let (pixel_x, pixel_y) =
                lat_long_to_pixel_xy(args.latitude, args.longitude, args.level);
            let tile = QuadkeyTile::from_lat_long(args.latitude, args.longitude, args.level)?;
            Ok(format!(
                "Quadkey: {}\nPixel: ({}, {})\nTile: ({}, {})\nLevel: {}",
                tile.quadkey, pixel_x, pixel_y, tile.x, tile.y, tile.level
            ))
        }
        Commands::Decode(args) => {
            let tile = QuadkeyTile::from_quadkey(&args.quadkey)?;
            let (pixel_x, pixel_y) = tile_xy_to_pixel_xy(tile.x, tile.y);
            let (lat, lon) = pixel_xy_to_lat_long(pixel_x, pixel_y, tile.level);
            Ok(format!(
                "Tile: ({}, {})\nLevel: {}\nNorth-west corner: ({}, {})",
                tile.x, tile.y, tile.level, lat, lon
            ))
        }
        Commands::Csv(args) => {
            let config = args.to_config()?;
            let rows = args.input.to_quadkey_csv(&args.output, &config)?;
            info!("Wrote {} rows to {}", rows, args.output.display());
            Ok(format!("{} rows written", rows))
        }
    }
}

fn main() -> Result<(), QuadkeyError> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    println!("{}", run(&cli)?);
    Ok(())
}
