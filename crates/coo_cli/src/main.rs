use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use coo_core::{
    Aberration, CooConfig, CooError, LogConfig, LoggingGuard, RelStateRequest, TransformConfig,
    get_frame_transform, get_rel_state, init_logging, lat_lon_alt_to_xyz, resolve_epoch,
    xyz_to_lat_lon_alt, xyz_to_lat_lon_rad,
};
use coo_engine::{Engine, EngineConfig};

#[derive(Parser)]
#[command(name = "coo", about = "Planetary coordinate transforms")]
struct Cli {
    /// Kernel to load (NAIF text kernel, or .json segment file); repeatable
    #[arg(long = "kernel", global = true)]
    kernels: Vec<PathBuf>,
    /// JSON config with `engine` and `transform` sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Latitude, longitude and radius of a point about the origin
    #[command(name = "xyz2latlonrad", allow_negative_numbers = true)]
    XyzToLatLonRad {
        /// X in meters
        x: f64,
        /// Y in meters
        y: f64,
        /// Z in meters
        z: f64,
    },
    /// Planetographic latitude, longitude and altitude above a body
    #[command(name = "xyz2latlonalt", allow_negative_numbers = true)]
    XyzToLatLonAlt {
        /// Body name, e.g. MARS
        planet: String,
        x: f64,
        y: f64,
        z: f64,
    },
    /// Cartesian position of a planetographic point
    #[command(name = "latlonalt2xyz", allow_negative_numbers = true)]
    LatLonAltToXyz {
        planet: String,
        /// Latitude in degrees
        lat: f64,
        /// Longitude in degrees, in the body's planetographic sense
        lon: f64,
        /// Altitude in meters
        alt: f64,
    },
    /// Target position and target-aligned basis
    RelState {
        #[arg(long)]
        target: String,
        /// Body fixing the basis' roll about the target direction
        #[arg(long)]
        support: String,
        #[arg(long)]
        observer: String,
        /// Observer time, e.g. "2026-12-03 08:15:00" (UTC) or "... TDB"
        #[arg(long)]
        time: String,
        #[arg(long, default_value = "J2000")]
        frame: String,
        /// Override the configured aberration correction (NONE or LT)
        #[arg(long)]
        aberration: Option<Aberration>,
    },
    /// Rotation between two frames at a time
    FrameTransform {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        time: String,
    },
    /// TDB seconds past J2000 for a timestamp
    Epoch {
        time: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let _log = start_logging(cli.verbose);
    let config = load_config(cli.config.as_deref(), cli.kernels);
    let mut engine = load_engine(config.engine);

    match cli.command {
        Commands::XyzToLatLonRad { x, y, z } => {
            let r = xyz_to_lat_lon_rad(&mut engine, x, y, z).unwrap_or_else(|e| fail(&e));
            println!("Latitude:  {:.9} deg", r.lat_deg);
            println!("Longitude: {:.9} deg", r.lon_deg);
            println!("Radius:    {:.3} m", r.radius_m);
        }

        Commands::XyzToLatLonAlt { planet, x, y, z } => {
            let p = xyz_to_lat_lon_alt(&mut engine, &planet, x, y, z).unwrap_or_else(|e| fail(&e));
            println!("Latitude:  {:.9} deg", p.lat_deg);
            println!("Longitude: {:.9} deg", p.lon_deg);
            println!("Altitude:  {:.3} m", p.alt_m);
        }

        Commands::LatLonAltToXyz {
            planet,
            lat,
            lon,
            alt,
        } => {
            let xyz =
                lat_lon_alt_to_xyz(&mut engine, &planet, lat, lon, alt).unwrap_or_else(|e| fail(&e));
            println!("X: {:.3} m", xyz[0]);
            println!("Y: {:.3} m", xyz[1]);
            println!("Z: {:.3} m", xyz[2]);
        }

        Commands::RelState {
            target,
            support,
            observer,
            time,
            frame,
            aberration,
        } => {
            let transform = TransformConfig {
                aberration: aberration.unwrap_or(config.transform.aberration),
                ..config.transform
            };
            let request = RelStateRequest {
                target: &target,
                support: &support,
                observer: &observer,
                observer_time: &time,
                output_frame: &frame,
            };
            let state =
                get_rel_state(&mut engine, &request, &transform).unwrap_or_else(|e| fail(&e));
            let p = state.position_m;
            println!("Position ({frame}, m): [{:.3}, {:.3}, {:.3}]", p[0], p[1], p[2]);
            print_matrix("Rotation (rows = basis vectors)", &state.rotation.to_row_major());
        }

        Commands::FrameTransform { from, to, time } => {
            let m = get_frame_transform(&mut engine, &from, &to, &time).unwrap_or_else(|e| fail(&e));
            print_matrix(&format!("{from} -> {to}"), &m.to_row_major());
        }

        Commands::Epoch { time } => {
            let epoch = resolve_epoch(&mut engine, &time).unwrap_or_else(|e| fail(&e));
            println!("TDB seconds past J2000: {:.6}", epoch.as_tdb_seconds());
            println!("JD TDB: {:.9}", epoch.as_jd_tdb());
        }
    }
}

fn start_logging(verbose: u8) -> Option<LoggingGuard> {
    let config = LogConfig {
        console: true,
        file: None,
        console_level: verbose.saturating_add(1).min(coo_core::logging::MAX_LEVEL),
        file_level: 0,
    };
    init_logging(&config)
        .map_err(|e| eprintln!("Logging disabled: {e}"))
        .ok()
}

/// `--kernel` paths are appended to any listed in the config file.
fn load_config(path: Option<&Path>, kernels: Vec<PathBuf>) -> CooConfig {
    let mut config = match path {
        Some(path) => CooConfig::from_json_file(path).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }),
        None => CooConfig::default(),
    };
    config.engine.kernel_paths.extend(kernels);
    config
}

fn load_engine(config: EngineConfig) -> Engine {
    if config.kernel_paths.is_empty() {
        return Engine::default();
    }
    Engine::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to load engine: {e}");
        std::process::exit(1);
    })
}

fn fail(err: &CooError) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(1);
}

fn print_matrix(title: &str, m: &[f64; 9]) {
    println!("{title}:");
    for row in m.chunks_exact(3) {
        println!("  [{:>15.12}, {:>15.12}, {:>15.12}]", row[0], row[1], row[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_coordinates_parse() {
        let cli = Cli::try_parse_from(["coo", "xyz2latlonrad", "-1.5", "0", "2e6"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::XyzToLatLonRad { x, .. } if x == -1.5
        ));
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "coo",
            "rel-state",
            "--target",
            "MARS",
            "--support",
            "SUN",
            "--observer",
            "EARTH",
            "--time",
            "2026-12-03 08:15:00",
            "--aberration",
            "LT",
            "--kernel",
            "a.tls",
            "--kernel",
            "b.tpc",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.kernels.len(), 2);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::RelState {
                frame, aberration, ..
            } => {
                assert_eq!(frame, "J2000");
                assert_eq!(aberration, Some(Aberration::LightTime));
            }
            _ => panic!("expected rel-state"),
        }
    }

    #[test]
    fn kernels_extend_config() {
        let config = load_config(None, vec![PathBuf::from("x.tpc")]);
        assert_eq!(config.engine.kernel_paths, vec![PathBuf::from("x.tpc")]);
        assert_eq!(config.transform, TransformConfig::default());
    }
}
