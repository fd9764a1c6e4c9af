//! vtile-server - A vector tile server for point data sets.
//!
//! This binary loads the point file and starts the HTTP server.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vtile_server::{
    config::{CheckConfig, Cli, Command, ServeConfig},
    points::load_points,
    server::{create_router, RouterConfig},
    tile::{TileId, TileService},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Serve(config) => run_serve(config).await,
        Command::Check(config) => run_check(config),
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Configuration:");
    info!("  Points: {}", config.points.display());
    info!(
        "  Columns: lat={}, lng={}",
        config.columns.lat_column, config.columns.lng_column
    );
    info!(
        "  Layer: '{}' (extent {})",
        config.layer_name, config.extent
    );
    if config.strict_bounds {
        info!("  Bounds: strict (out-of-grid tiles rejected)");
    }

    let points = match load_points(&config.points, &config.columns.csv_columns()) {
        Ok(points) => points,
        Err(e) => {
            error!("Failed to load points: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if points.is_empty() {
        warn!(
            "No usable points in {}, every tile will be empty",
            config.points.display()
        );
    }

    let tile_service = TileService::with_options(points, config.tile_options())
        .with_strict_bounds(config.strict_bounds);

    let router = create_router(tile_service, build_router_config(&config));

    let addr = config.bind_address();

    info!("");
    info!("  Server listening on: http://{}", addr);
    info!("    curl http://{}/health", addr);
    info!("    curl http://{}/tiles/0/0/0", addr);
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "vtile_server=debug,tower_http=debug"
    } else {
        "vtile_server=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application ServeConfig.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    let mut router_config = RouterConfig::new()
        .with_cache_max_age(config.cache_max_age)
        .with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}

// =============================================================================
// Check Command
// =============================================================================

fn run_check(config: CheckConfig) -> ExitCode {
    if config.verbose {
        init_logging(true);
    }

    println!("vtile-server Point File Check");
    println!("═════════════════════════════");
    println!();

    if let Err(e) = config.validate() {
        println!("✗ Configuration: {}", e);
        return ExitCode::FAILURE;
    }

    let points = match load_points(&config.points, &config.columns.csv_columns()) {
        Ok(points) => {
            println!("✓ Loaded {}", config.points.display());
            points
        }
        Err(e) => {
            println!("✗ {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("  Points: {}", points.len());
    match points.extent() {
        Some((sw, ne)) => {
            println!("  Longitude: {:.6} .. {:.6}", sw.lng, ne.lng);
            println!("  Latitude:  {:.6} .. {:.6}", sw.lat, ne.lat);
        }
        None => println!("  (no usable points)"),
    }

    if let Some(ref tile_path) = config.tile {
        println!();

        let tile = match TileId::from_path(tile_path) {
            Ok(tile) => tile,
            Err(e) => {
                println!("✗ Tile: {}", e);
                return ExitCode::FAILURE;
            }
        };

        let service = TileService::new(points);
        match service.get_tile(tile) {
            Ok(response) => {
                println!("✓ Tile {}", tile);
                if !tile.is_valid() {
                    println!("  (outside the grid at zoom {})", tile.z);
                }
                println!("  Points: {}", response.point_count);
                println!("  Size:   {} bytes", response.data.len());
            }
            Err(e) => {
                println!("✗ Tile {}: {}", tile, e);
                return ExitCode::FAILURE;
            }
        }
    }

    println!();
    println!("═════════════════════════════");
    println!("✓ All checks passed!");

    ExitCode::SUCCESS
}
