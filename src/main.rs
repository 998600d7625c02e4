mod catalog;
mod config;
mod globe;
mod track;
mod web;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::globe::{build_frame, GlobeOrientation, Orthographic};
use crate::track::{make_ground_track, GeoPoint, TrackParams};

#[derive(Parser)]
#[command(name = "sat-globe")]
#[command(about = "Satellite ground tracks on an orthographic globe")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the globe API
    Serve {
        #[arg(short, long, default_value = "sat-globe.yaml")]
        config: String,
    },
    /// Load the data files and report what was found
    Validate {
        #[arg(short, long, default_value = "sat-globe.yaml")]
        config: String,
    },
    /// Print a ground track as JSON
    Track {
        #[arg(short, long, allow_hyphen_values = true)]
        inclination: f64,
        #[arg(short, long, default_value_t = 300)]
        points: usize,
        #[arg(short, long, default_value_t = 1)]
        orbits: u32,
    },
    /// Print which satellites are visible with the globe centred on a point
    Visible {
        #[arg(short, long, default_value = "sat-globe.yaml")]
        config: String,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(&config),
        Commands::Validate { config } => validate(&config),
        Commands::Track {
            inclination,
            points,
            orbits,
        } => track(inclination, points, orbits),
        Commands::Visible { config, lon, lat } => visible(&config, lon, lat),
    }
}

fn load(path: &str) -> Result<(Config, Catalog), ExitCode> {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config {}: {}", path, e);
            return Err(ExitCode::FAILURE);
        }
    };

    match Catalog::load(&config.data.satellites, &config.data.launch_sites, &config.track) {
        Ok(catalog) => Ok((config, catalog)),
        Err(e) => {
            eprintln!("Error loading data: {}", e);
            Err(ExitCode::FAILURE)
        }
    }
}

fn serve(path: &str) -> ExitCode {
    let (config, catalog) = match load(path) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config, catalog)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn validate(path: &str) -> ExitCode {
    let (config, catalog) = match load(path) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    println!(
        "Catalog is valid ({} satellites, {} launch sites, {} located launches)",
        catalog.satellites().len(),
        catalog.launch_sites().len(),
        catalog.launches().len()
    );
    match catalog.year_extent() {
        Some((first, last)) => println!("  launch years: {}-{}", first, last),
        None => println!("  launch years: none"),
    }
    println!(
        "  tracks: {} points over {} orbit(s)",
        config.track.num_points + 1,
        config.track.num_orbits
    );
    for (country, sats) in catalog.satellites_by_operator() {
        println!("  {}: {}", country, sats.len());
    }
    ExitCode::SUCCESS
}

fn track(inclination: f64, points: usize, orbits: u32) -> ExitCode {
    let params = match TrackParams::new(points, orbits) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Invalid track parameters: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let track = make_ground_track(inclination, &params);
    match serde_json::to_string(&track) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn visible(path: &str, lon: f64, lat: f64) -> ExitCode {
    let (config, catalog) = match load(path) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let mut projection = Orthographic::fit_size(config.globe.width, config.globe.height);
    let orientation = GlobeOrientation {
        center: GeoPoint::new(lon, lat),
        scale: projection.scale(),
    };
    orientation.apply(&mut projection);

    let frame = build_frame(&projection, catalog.satellites(), config.globe.horizon_margin);
    let visible: Vec<_> = frame.iter().filter(|d| d.placement.is_visible()).collect();

    println!(
        "{} of {} satellites visible from ({}, {})",
        visible.len(),
        frame.len(),
        lon,
        lat
    );
    for dot in visible {
        let [x, y] = dot.placement.translate();
        println!("  {} @ ({:.1}, {:.1})", dot.name, x, y);
    }
    ExitCode::SUCCESS
}
