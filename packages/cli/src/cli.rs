//! Command line interface for wanderwave.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Location-aware generative music sessions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream a session to the output device
    Play(PlayCommand),

    /// Print the prompts a session would push, without connecting
    Prompts(PromptsCommand),

    /// List audio output devices
    Devices,
}

/// Where the listener is. Either a city name or a coordinate pair.
#[derive(Args, Debug, Clone, Default)]
pub struct LocationArgs {
    /// City name, resolved through the open geocoding service
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub city: Option<String>,

    /// Latitude in decimal degrees
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PreferenceArgs {
    /// Starting tempo in BPM (60-180); defaults to the configured tempo
    #[arg(short, long)]
    pub tempo: Option<u32>,

    /// Preferred genre, e.g. "deep house"
    #[arg(short, long)]
    pub genre: Option<String>,

    /// Desired experience, e.g. "late night drive"
    #[arg(short, long)]
    pub experience: Option<String>,
}

#[derive(Args, Debug)]
pub struct PlayCommand {
    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub preferences: PreferenceArgs,

    /// Output device name (see `devices`)
    #[arg(short, long)]
    pub device: Option<String>,
}

#[derive(Args, Debug)]
pub struct PromptsCommand {
    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub preferences: PreferenceArgs,

    /// Local hour to compose for (0-23); defaults to now
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
    pub hour: Option<u32>,
}
