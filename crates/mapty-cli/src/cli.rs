use clap::{Parser, Subcommand, ValueEnum};
use mapty_core::{Coords, WorkoutKind};
use std::path::PathBuf;

/// Mapty - Map your workouts
#[derive(Parser, Debug)]
#[command(name = "mapty")]
#[command(about = "Log running and cycling workouts on a map", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./mapty.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON file the workouts are stored in
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Map zoom level (1-20)
    #[arg(long, global = true, value_parser = parse_zoom_arg)]
    pub zoom: Option<u8>,

    /// Your current position as "lat,lng"
    #[arg(long, global = true, value_parser = parse_coords_arg, allow_hyphen_values = true)]
    pub home: Option<Coords>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a new workout at a point on the map
    Add(AddArgs),

    /// List workouts in the order they were logged
    List,

    /// Change the values of a logged workout
    Edit(EditArgs),

    /// Show one workout and center the map on it
    Show(ShowArgs),

    /// Print the stored collection as JSON
    Export,

    /// Delete all stored workouts
    Reset(ResetArgs),

    /// Show effective configuration and where each value comes from
    Config,
}

/// Workout type selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Running,
    Cycling,
}

impl From<KindArg> for WorkoutKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Running => WorkoutKind::Running,
            KindArg::Cycling => WorkoutKind::Cycling,
        }
    }
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Workout type
    #[arg(long, value_enum, default_value = "running")]
    pub kind: KindArg,

    /// Where the workout happened, as "lat,lng"
    #[arg(long, value_parser = parse_coords_arg, allow_hyphen_values = true)]
    pub at: Coords,

    /// Distance in km
    #[arg(long, allow_hyphen_values = true)]
    pub distance: f64,

    /// Duration in minutes
    #[arg(long, allow_hyphen_values = true)]
    pub duration: f64,

    /// Cadence in steps per minute (running)
    #[arg(long, allow_hyphen_values = true)]
    pub cadence: Option<f64>,

    /// Elevation gain in meters (cycling)
    #[arg(long, allow_hyphen_values = true)]
    pub elevation: Option<f64>,
}

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Workout id
    pub id: String,

    /// Switch the workout type
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,

    /// Distance in km
    #[arg(long, allow_hyphen_values = true)]
    pub distance: Option<f64>,

    /// Duration in minutes
    #[arg(long, allow_hyphen_values = true)]
    pub duration: Option<f64>,

    /// Cadence in steps per minute (running)
    #[arg(long, allow_hyphen_values = true)]
    pub cadence: Option<f64>,

    /// Elevation gain in meters (cycling)
    #[arg(long, allow_hyphen_values = true)]
    pub elevation: Option<f64>,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Workout id
    pub id: String,
}

#[derive(Parser, Debug)]
pub struct ResetArgs {
    /// Confirm deletion of every stored workout
    #[arg(long)]
    pub yes: bool,
}

fn parse_coords_arg(s: &str) -> Result<Coords, String> {
    s.parse::<Coords>().map_err(|e| e.to_string())
}

fn parse_zoom_arg(s: &str) -> Result<u8, String> {
    mapty_core::config::parse_zoom(s).map_err(|e| e.to_string())
}
