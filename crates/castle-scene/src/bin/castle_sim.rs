//! Headless castle scene driver
//!
//! Runs the simulation without a window and logs what the broom does.
//!
//! # Usage
//!
//! ```bash
//! # Run 100 ticks with the stock scene
//! castle_sim
//!
//! # Load a scene file and run for 5 simulated seconds
//! castle_sim --config scene.json --ticks 150 --dt 0.0333
//!
//! # Print the broom's flight loop as a JSON polyline
//! castle_sim --path 0.01
//! ```

use std::path::PathBuf;
use std::process;

use castle_core::Result;
use castle_geometry::tessellate::{curve_to_polyline, polyline_length};
use castle_scene::{ObjectKind, SceneConfig, SimulationState};
use log::{error, info};

fn print_usage() {
    eprintln!(
        r#"Castle scene simulator

USAGE:
    castle_sim [OPTIONS]

OPTIONS:
    --config <file>   Scene configuration (JSON); defaults to the stock scene
    --ticks <n>       Number of simulation ticks to run (default 100)
    --dt <seconds>    Time step per tick (default: window refresh interval)
    --path <tol>      Print the broom loop as a JSON polyline and exit
    --help            Show this help message

Logging is controlled with RUST_LOG (default: info).
"#
    );
}

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    ticks: usize,
    dt: Option<f64>,
    path_tolerance: Option<f64>,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> T {
    match value.map(|v| v.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("Error: {} requires a valid value\n", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        ticks: 100,
        ..Options::default()
    };
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            "--config" => options.config = Some(PathBuf::from(parse_value::<String>(arg, iter.next()))),
            "--ticks" => options.ticks = parse_value(arg, iter.next()),
            "--dt" => options.dt = Some(parse_value(arg, iter.next())),
            "--path" => options.path_tolerance = Some(parse_value(arg, iter.next())),
            other => {
                eprintln!("Error: unknown argument '{}'\n", other);
                print_usage();
                process::exit(1);
            }
        }
    }
    options
}

fn print_path(config: &SceneConfig, tolerance: f64) -> Result<()> {
    let state = SimulationState::new(config.clone(), 0.0)?;
    let origin = config.broom.position;
    let points: Vec<_> = curve_to_polyline(state.spline(), tolerance)
        .into_iter()
        .map(|p| origin + p)
        .collect();
    info!(
        "broom loop: {} points, length {:.3}",
        points.len(),
        polyline_length(&points)
    );
    println!("{}", serde_json::to_string_pretty(&points)?);
    Ok(())
}

fn run(options: &Options) -> Result<()> {
    let config = match &options.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };

    if let Some(tolerance) = options.path_tolerance {
        return print_path(&config, tolerance);
    }

    let dt = options.dt.unwrap_or_else(|| config.tick_seconds());
    let mut state = SimulationState::new(config, 0.0)?;
    info!("running {} ticks of {:.4}s", options.ticks, dt);

    for tick in 1..=options.ticks {
        let now = tick as f64 * dt;
        state.update(now);
        let broom = state.object(ObjectKind::Broom).placement;
        info!(
            "t={:8.3} broom at ({:7.3}, {:7.3}, {:7.3}) heading ({:6.3}, {:6.3}, {:6.3})",
            now,
            broom.position.x,
            broom.position.y,
            broom.position.z,
            broom.direction.x,
            broom.direction.y,
            broom.direction.z
        );
    }

    let frame = state.render_frame();
    let visible: Vec<&str> = frame.items.iter().map(|item| item.kind.name()).collect();
    info!("final frame: {} visible objects: {}", visible.len(), visible.join(", "));
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    if let Err(e) = run(&options) {
        error!("{}", e);
        process::exit(1);
    }
}
