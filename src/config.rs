//! Configuration management for the vector tile server.
//!
//! This module provides a flexible configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `VTILE_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use vtile_server::config::{Cli, Command};
//!
//! match Cli::parse().command {
//!     Command::Serve(config) => println!("Listening on {}", config.bind_address()),
//!     Command::Check(config) => println!("Checking {}", config.points.display()),
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `VTILE_HOST` - Server bind address (default: 0.0.0.0)
//! - `VTILE_PORT` - Server port (default: 8080)
//! - `VTILE_POINTS` - Path to the CSV point file (required)
//! - `VTILE_LAT_COLUMN` - Latitude column header (default: Latitude)
//! - `VTILE_LNG_COLUMN` - Longitude column header (default: Longitude)
//! - `VTILE_LAYER_NAME` - Name of the MVT layer (default: points)
//! - `VTILE_EXTENT` - MVT layer extent (default: 4096)
//! - `VTILE_CACHE_MAX_AGE` - HTTP cache max-age seconds (default: 3600)
//! - `VTILE_CORS_ORIGINS` - Comma-separated allowed origins (default: any)
//! - `VTILE_STRICT_BOUNDS` - Reject tiles outside the zoom's grid (default: false)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::points::{CsvColumns, DEFAULT_LAT_COLUMN, DEFAULT_LNG_COLUMN};
use crate::tile::{TileOptions, DEFAULT_LAYER_NAME, MAX_EXTENT, MVT_EXTENT};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default HTTP cache max-age in seconds (1 hour).
pub const DEFAULT_CACHE_MAX_AGE: u32 = 3600;

// =============================================================================
// CLI Arguments
// =============================================================================

/// vtile-server - Serve a CSV point data set as Mapbox Vector Tiles.
#[derive(Parser, Debug, Clone)]
#[command(name = "vtile-server")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the tile server.
    Serve(ServeConfig),

    /// Load a point file and report what would be served.
    Check(CheckConfig),
}

/// Coordinate column selection shared by both commands.
#[derive(Args, Debug, Clone)]
pub struct ColumnArgs {
    /// Header of the latitude column.
    #[arg(long, default_value = DEFAULT_LAT_COLUMN, env = "VTILE_LAT_COLUMN")]
    pub lat_column: String,

    /// Header of the longitude column.
    #[arg(long, default_value = DEFAULT_LNG_COLUMN, env = "VTILE_LNG_COLUMN")]
    pub lng_column: String,
}

impl ColumnArgs {
    pub fn csv_columns(&self) -> CsvColumns {
        CsvColumns::new(&self.lat_column, &self.lng_column)
    }

    fn validate(&self) -> Result<(), String> {
        if self.lat_column.trim().is_empty() || self.lng_column.trim().is_empty() {
            return Err("Column names must not be empty".to_string());
        }
        if self.lat_column == self.lng_column {
            return Err(format!(
                "Latitude and longitude columns must differ (both are '{}')",
                self.lat_column
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Serve Command
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "VTILE_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "VTILE_PORT")]
    pub port: u16,

    // =========================================================================
    // Point Source
    // =========================================================================
    /// CSV file holding the points to serve.
    #[arg(long, env = "VTILE_POINTS")]
    pub points: PathBuf,

    #[command(flatten)]
    pub columns: ColumnArgs,

    // =========================================================================
    // Tile Configuration
    // =========================================================================
    /// Name of the single layer in every tile.
    #[arg(long, default_value = DEFAULT_LAYER_NAME, env = "VTILE_LAYER_NAME")]
    pub layer_name: String,

    /// Layer extent in tile units (1 to 2147483647).
    #[arg(long, default_value_t = MVT_EXTENT, env = "VTILE_EXTENT")]
    pub extent: u32,

    /// Reject tile addresses outside the 2^z by 2^z grid with 400.
    #[arg(long, default_value_t = false, env = "VTILE_STRICT_BOUNDS")]
    pub strict_bounds: bool,

    /// HTTP Cache-Control max-age in seconds.
    #[arg(long, default_value_t = DEFAULT_CACHE_MAX_AGE, env = "VTILE_CACHE_MAX_AGE")]
    pub cache_max_age: u32,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "VTILE_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.points.as_os_str().is_empty() {
            return Err("Point file is required. Set --points or VTILE_POINTS".to_string());
        }

        self.columns.validate()?;

        if self.layer_name.is_empty() {
            return Err("layer_name must not be empty".to_string());
        }

        if self.extent == 0 || self.extent > MAX_EXTENT {
            return Err(format!("extent must be between 1 and {}", MAX_EXTENT));
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Tile encoding options derived from the command line.
    pub fn tile_options(&self) -> TileOptions {
        TileOptions::default()
            .with_layer_name(self.layer_name.clone())
            .with_extent(self.extent)
    }
}

// =============================================================================
// Check Command
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct CheckConfig {
    /// CSV file holding the points to check.
    #[arg(long, env = "VTILE_POINTS")]
    pub points: PathBuf,

    #[command(flatten)]
    pub columns: ColumnArgs,

    /// Render one tile, given as z/x/y, and report its contents.
    #[arg(long)]
    pub tile: Option<String>,

    /// Enable verbose logging.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl CheckConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.points.as_os_str().is_empty() {
            return Err("Point file is required. Set --points or VTILE_POINTS".to_string());
        }
        self.columns.validate()
    }
}

// =============================================================================
// Tests
// =============================================================================
