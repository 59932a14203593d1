use crate::adapters::transport_rest::DEFAULT_TRANSPORT_URL;
use crate::config::{
    default_name_fragments, DEFAULT_DISTANCE, DEFAULT_LANGUAGE, DEFAULT_RESULTS,
    DEFAULT_STYLE_URL, DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::map_view::{DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::domain::model::Position;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{MapError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub map: MapConfig,
    pub geocoding: GeocodingConfig,
    #[serde(default)]
    pub transit: TransitConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_style_url")]
    pub style_url: String,
    #[serde(default = "default_center_latitude")]
    pub center_latitude: f64,
    #[serde(default = "default_center_longitude")]
    pub center_longitude: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitConfig {
    #[serde(default = "default_transport_url")]
    pub url: String,
    #[serde(default = "default_results")]
    pub results: usize,
    /// Search radius in meters
    #[serde(default = "default_distance")]
    pub distance: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_name_fragments")]
    pub strip_from_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_style_url() -> String {
    DEFAULT_STYLE_URL.to_string()
}

fn default_center_latitude() -> f64 {
    DEFAULT_CENTER.latitude
}

fn default_center_longitude() -> f64 {
    DEFAULT_CENTER.longitude
}

fn default_zoom() -> f64 {
    DEFAULT_ZOOM
}

fn default_transport_url() -> String {
    DEFAULT_TRANSPORT_URL.to_string()
}

fn default_results() -> usize {
    DEFAULT_RESULTS
}

fn default_distance() -> usize {
    DEFAULT_DISTANCE
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            style_url: default_style_url(),
            center_latitude: default_center_latitude(),
            center_longitude: default_center_longitude(),
            zoom: default_zoom(),
        }
    }
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            url: default_transport_url(),
            results: default_results(),
            distance: default_distance(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            strip_from_names: default_name_fragments(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MapError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MapError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NOMINATIM_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MapError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_style_url("map.style_url", &self.map.style_url)?;
        validation::validate_coordinates("map.center", self.map.center_latitude, self.map.center_longitude)?;
        validation::validate_range("map.zoom", self.map.zoom, 0.0, 24.0)?;

        let geocoding_url = validation::validate_required_field("geocoding.url", &self.geocoding.url)?;
        validation::validate_url("geocoding.url", geocoding_url)?;

        validation::validate_url("transit.url", &self.transit.url)?;
        validation::validate_positive_number("transit.results", self.transit.results, 1)?;
        validation::validate_positive_number("transit.distance", self.transit.distance, 1)?;

        validation::validate_non_empty_string("display.language", &self.display.language)?;
        validation::validate_range("http.timeout_seconds", self.http.timeout_seconds, 1, 300)?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn style_url(&self) -> &str {
        &self.map.style_url
    }

    fn nominatim_url(&self) -> &str {
        self.geocoding.url.as_deref().unwrap_or_default()
    }

    fn transport_url(&self) -> &str {
        &self.transit.url
    }

    fn language(&self) -> &str {
        &self.display.language
    }

    fn results(&self) -> usize {
        self.transit.results
    }

    fn distance(&self) -> usize {
        self.transit.distance
    }

    fn timeout_seconds(&self) -> u64 {
        self.http.timeout_seconds
    }

    fn map_center(&self) -> Position {
        Position::new(self.map.center_latitude, self.map.center_longitude)
    }

    fn zoom(&self) -> f64 {
        self.map.zoom
    }

    fn name_fragments(&self) -> &[String] {
        &self.display.strip_from_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[geocoding]
url = "https://nominatim.example.org"
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.nominatim_url(), "https://nominatim.example.org");
        assert_eq!(config.transport_url(), DEFAULT_TRANSPORT_URL);
        assert_eq!(config.results(), 30);
        assert_eq!(config.distance(), 1000);
        assert_eq!(config.language(), "de");
        assert_eq!(config.map_center(), DEFAULT_CENTER);
        assert_eq!(config.name_fragments(), default_name_fragments().as_slice());
    }

    #[test]
    fn test_missing_geocoding_url_fails_validation() {
        let config = TomlConfig::from_toml_str("[geocoding]\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(MapError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_missing_geocoding_section_fails_parsing() {
        let result = TomlConfig::from_toml_str("[transit]\nresults = 10\n");
        assert!(matches!(
            result,
            Err(MapError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[map]
style_url = "https://tiles.example.org/style.json"
center_latitude = 52.52
center_longitude = 13.405
zoom = 12

[geocoding]
url = "https://nominatim.example.org"

[transit]
url = "https://transport.example.org"
results = 10
distance = 500

[display]
language = "en"
strip_from_names = [", Berlin", "Berlin "]

[http]
timeout_seconds = 3
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.map_center(), Position::new(52.52, 13.405));
        assert_eq!(config.zoom(), 12.0);
        assert_eq!(config.results(), 10);
        assert_eq!(config.distance(), 500);
        assert_eq!(config.language(), "en");
        assert_eq!(config.timeout_seconds(), 3);
        assert_eq!(config.name_fragments().len(), 2);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MOBILITY_MAP_TEST_NOMINATIM", "https://geo.example.org");
        let config = TomlConfig::from_toml_str(
            r#"
[geocoding]
url = "${MOBILITY_MAP_TEST_NOMINATIM}"
"#,
        )
        .unwrap();
        assert_eq!(config.nominatim_url(), "https://geo.example.org");

        let unresolved = TomlConfig::from_toml_str(
            r#"
[geocoding]
url = "${MOBILITY_MAP_TEST_UNSET_VARIABLE}"
"#,
        )
        .unwrap();
        assert_eq!(unresolved.nominatim_url(), "${MOBILITY_MAP_TEST_UNSET_VARIABLE}");
        assert!(unresolved.validate().is_err());
    }
}
