#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_STYLE_URL: &str = "/styles.json";
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.codingmobility.net";
pub const DEFAULT_LANGUAGE: &str = "de";
pub const DEFAULT_RESULTS: usize = 30;
pub const DEFAULT_DISTANCE: usize = 1000;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

pub fn default_name_fragments() -> Vec<String> {
    crate::core::stops::DEFAULT_NAME_FRAGMENTS
        .iter()
        .map(|fragment| fragment.to_string())
        .collect()
}
