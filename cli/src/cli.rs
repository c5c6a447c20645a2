use std::path::PathBuf;

/// Boundary catalog and registrant placement CLI
#[derive(clap::Parser, Debug)]
#[command(name = "geoplace-cli", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Resolve and summarize the units of a boundary file
    Catalog(CatalogArgs),

    /// Place registrants inside their units and write the markers
    Place(PlaceArgs),
}

#[derive(clap::Args, Debug)]
pub struct CatalogArgs {
    /// Boundary polygons (GeoJSON FeatureCollection)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub boundaries: PathBuf,

    /// Map configuration (JSON); built-in defaults when omitted
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain JSON array of markers
    #[default]
    Json,
    /// GeoJSON FeatureCollection of points
    Geojson,
}

#[derive(clap::Args, Debug)]
pub struct PlaceArgs {
    /// Boundary polygons (GeoJSON FeatureCollection)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub boundaries: PathBuf,

    /// Registrant records (JSON array)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub registrants: PathBuf,

    /// Map configuration (JSON); built-in defaults when omitted
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Seed for stable marker positions, overriding the configuration
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file, defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}
