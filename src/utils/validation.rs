use crate::utils::error::{MapError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(MapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MapError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(MapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Style documents may also be served relative to the embedding page
/// (e.g. `/styles.json`), so only emptiness and absolute schemes are checked.
pub fn validate_style_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.starts_with('/') {
        return Ok(());
    }
    validate_url(field_name, url_str)
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(MapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| MapError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN fails both comparisons, so check containment instead of exclusion
    if !(value >= min && value <= max) {
        return Err(MapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_coordinates(field_prefix: &str, latitude: f64, longitude: f64) -> Result<()> {
    validate_range(&format!("{}.latitude", field_prefix), latitude, -90.0, 90.0)?;
    validate_range(&format!("{}.longitude", field_prefix), longitude, -180.0, 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("nominatim_url", "https://example.com").is_ok());
        assert!(validate_url("nominatim_url", "http://example.com").is_ok());
        assert!(validate_url("nominatim_url", "").is_err());
        assert!(validate_url("nominatim_url", "invalid-url").is_err());
        assert!(validate_url("nominatim_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_style_url_accepts_relative_path() {
        assert!(validate_style_url("style_url", "/styles.json").is_ok());
        assert!(validate_style_url("style_url", "https://tiles.example.com/style.json").is_ok());
        assert!(validate_style_url("style_url", "styles.json").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("results", 30, 1).is_ok());
        assert!(validate_positive_number("results", 0, 1).is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates("position", 50.115161, 8.683737).is_ok());
        assert!(validate_coordinates("position", 91.0, 8.0).is_err());
        assert!(validate_coordinates("position", 50.0, -180.5).is_err());
        assert!(validate_coordinates("position", f64::NAN, 8.0).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("de".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("language", &present).unwrap(), "de");
        assert!(matches!(
            validate_required_field("language", &missing),
            Err(MapError::MissingConfigError { .. })
        ));
    }
}
