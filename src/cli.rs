#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::Parser;

use crate::domain::weather::{Coordinates, WeatherCategory};

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone)]
#[command(
    name = "weather-overlay",
    version,
    about = "Animated weather particle overlay for the terminal"
)]
pub struct Cli {
    /// Weather to show instead of detecting it (e.g. clear, snow, light-snow, thunderstorm)
    #[arg(long, value_parser = parse_weather)]
    pub weather: Option<WeatherCategory>,

    /// Latitude used for weather detection (requires --lon)
    #[arg(long)]
    pub lat: Option<f64>,

    /// Longitude used for weather detection (requires --lat)
    #[arg(long)]
    pub lon: Option<f64>,

    /// Target FPS (15..60)
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u8).range(15..=60))]
    pub fps: u8,

    /// Disable particle animation
    #[arg(long)]
    pub no_animation: bool,

    /// Disable storm lightning flashes
    #[arg(long)]
    pub no_flash: bool,

    /// Seed for a reproducible animation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the forecast endpoint used for detection
    #[arg(long)]
    pub forecast_url: Option<String>,

    /// Override the geo-IP endpoint used when no coordinates are given
    #[arg(long)]
    pub geoip_url: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn parse_weather(value: &str) -> Result<WeatherCategory, String> {
    Ok(WeatherCategory::from_label(value))
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lon) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}
