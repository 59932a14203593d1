use crate::domain::model::Position;
use crate::domain::ports::ConfigProvider;
use serde::Serialize;

/// Frankfurt am Main, Hauptwache.
pub const DEFAULT_CENTER: Position = Position {
    latitude: 50.115161,
    longitude: 8.683737,
};

pub const DEFAULT_ZOOM: f64 = 13.0;

pub const ATTRIBUTION: &str = "© OpenStreetMap Mitwirkende, © MapTiler";

/// Viewport the map starts with. Once loaded, its center becomes the
/// first selected position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub style_url: String,
    pub center: Position,
    pub zoom: f64,
    pub attribution: &'static str,
}

impl MapView {
    pub fn new(style_url: &str) -> Self {
        Self {
            style_url: style_url.to_string(),
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            attribution: ATTRIBUTION,
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            style_url: config.style_url().to_string(),
            center: config.map_center(),
            zoom: config.zoom(),
            attribution: ATTRIBUTION,
        }
    }
}
