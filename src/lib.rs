pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{NominatimClient, TransportRestClient};
pub use app::{MobilityMap, OutputFormat};
pub use crate::core::{map_view::MapView, session::MapSession};
pub use utils::error::{MapError, Result};
