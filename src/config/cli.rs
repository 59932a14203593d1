use crate::adapters::transport_rest::DEFAULT_TRANSPORT_URL;
use crate::config::{
    default_name_fragments, DEFAULT_DISTANCE, DEFAULT_LANGUAGE, DEFAULT_NOMINATIM_URL,
    DEFAULT_RESULTS, DEFAULT_STYLE_URL, DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::map_view::{DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::domain::model::Position;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{MapError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "mobility-map")]
#[command(about = "Reverse-geocode a point and list the transit stops around it")]
pub struct CliConfig {
    /// Path to a TOML configuration file (replaces the service options below)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Latitude of the selected position (default: map center)
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the selected position (default: map center)
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Open the sidebar for this stop id once stops are loaded
    #[arg(long)]
    pub stop: Option<String>,

    /// Print the map state as JSON
    #[arg(long)]
    pub json: bool,

    /// Read positions and commands from stdin
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(long, default_value = DEFAULT_STYLE_URL)]
    pub style_url: String,

    #[arg(long, default_value = DEFAULT_NOMINATIM_URL)]
    pub nominatim_url: String,

    #[arg(long, default_value = DEFAULT_TRANSPORT_URL)]
    pub transport_url: String,

    /// Maximum number of stops
    #[arg(long, default_value_t = DEFAULT_RESULTS)]
    pub results: usize,

    /// Search radius in meters
    #[arg(long, default_value_t = DEFAULT_DISTANCE)]
    pub distance: usize,

    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    /// Fragments removed from stop names, separated by ';'
    #[arg(
        long = "strip-name",
        value_delimiter = ';',
        default_values_t = default_name_fragments()
    )]
    pub name_fragments: Vec<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// The position given with `--lat/--lon`, if any.
    pub fn position(&self) -> Result<Option<Position>> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Some(Position::new(lat, lon))),
            (None, None) => Ok(None),
            (Some(_), None) => Err(MapError::MissingConfigError {
                field: "lon".to_string(),
            }),
            (None, Some(_)) => Err(MapError::MissingConfigError {
                field: "lat".to_string(),
            }),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_style_url("style_url", &self.style_url)?;
        validation::validate_url("nominatim_url", &self.nominatim_url)?;
        validation::validate_url("transport_url", &self.transport_url)?;
        validation::validate_positive_number("results", self.results, 1)?;
        validation::validate_positive_number("distance", self.distance, 1)?;
        validation::validate_non_empty_string("language", &self.language)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;

        if let Some(position) = self.position()? {
            validation::validate_coordinates("position", position.latitude, position.longitude)?;
        }
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn style_url(&self) -> &str {
        &self.style_url
    }

    fn nominatim_url(&self) -> &str {
        &self.nominatim_url
    }

    fn transport_url(&self) -> &str {
        &self.transport_url
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn results(&self) -> usize {
        self.results
    }

    fn distance(&self) -> usize {
        self.distance
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn map_center(&self) -> Position {
        DEFAULT_CENTER
    }

    fn zoom(&self) -> f64 {
        DEFAULT_ZOOM
    }

    fn name_fragments(&self) -> &[String] {
        &self.name_fragments
    }
}
