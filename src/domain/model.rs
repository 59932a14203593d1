use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate picked on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Transit mode, spelled the way transport.rest spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Product {
    Bus,
    Ferry,
    National,
    NationalExpress,
    Regional,
    RegionalExpress,
    Suburban,
    Subway,
    Taxi,
    Tram,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Bus => "bus",
            Product::Ferry => "ferry",
            Product::National => "national",
            Product::NationalExpress => "nationalExpress",
            Product::Regional => "regional",
            Product::RegionalExpress => "regionalExpress",
            Product::Suburban => "suburban",
            Product::Subway => "subway",
            Product::Taxi => "taxi",
            Product::Tram => "tram",
            Product::Unknown => "unknown",
        }
    }

    pub fn is_rail(&self) -> bool {
        matches!(
            self,
            Product::National
                | Product::NationalExpress
                | Product::Regional
                | Product::RegionalExpress
        )
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product flags of a stop. Flags missing from the response are `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Products {
    pub bus: bool,
    pub ferry: bool,
    pub national: bool,
    pub national_express: bool,
    pub regional: bool,
    pub regional_express: bool,
    pub suburban: bool,
    pub subway: bool,
    pub taxi: bool,
    pub tram: bool,
}

impl Products {
    pub fn has(&self, product: Product) -> bool {
        match product {
            Product::Bus => self.bus,
            Product::Ferry => self.ferry,
            Product::National => self.national,
            Product::NationalExpress => self.national_express,
            Product::Regional => self.regional,
            Product::RegionalExpress => self.regional_express,
            Product::Suburban => self.suburban,
            Product::Subway => self.subway,
            Product::Taxi => self.taxi,
            Product::Tram => self.tram,
            Product::Unknown => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Location> for Position {
    fn from(location: Location) -> Self {
        Position::new(location.latitude, location.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub name: String,
    #[serde(default)]
    pub product: Product,
}

/// The station a platform stop belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A stop as returned by the transport API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub location: Location,
    pub name: String,
    #[serde(default)]
    pub products: Products,
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<StationRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingState {
    #[default]
    Init,
    Loading,
    Loaded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SelectedObject {
    Stop { id: String },
}

/// A circled product icon drawn on the map for one stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopMarker {
    pub stop_id: String,
    pub position: Position,
    pub product: Product,
}
