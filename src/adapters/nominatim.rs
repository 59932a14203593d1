use crate::domain::model::Position;
use crate::domain::ports::{ConfigProvider, ReverseGeocoder};
use crate::utils::error::{MapError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Parts of a Nominatim `address` object used for display.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NominatimAddress {
    pub road: Option<String>,
    pub house_number: Option<String>,
    pub suburb: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: Option<NominatimAddress>,
}

/// "Berger Straße 12 (Bornheim)". Missing or empty parts are skipped.
pub fn format_address(address: &NominatimAddress) -> Option<String> {
    let non_empty = |part: &Option<String>| {
        part.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let parts: Vec<String> = [
        non_empty(&address.road),
        non_empty(&address.house_number),
        non_empty(&address.suburb).map(|suburb| format!("({})", suburb)),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
    language: String,
}

impl NominatimClient {
    pub fn new(base_url: &str, language: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mobility-map/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            config.nominatim_url(),
            config.language(),
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    pub fn reverse_url(&self, position: Position) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/reverse", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("lat", &position.latitude.to_string())
            .append_pair("lon", &position.longitude.to_string())
            .append_pair("format", "jsonv2")
            .append_pair("accept-language", &self.language)
            .append_pair("layer", "address");
        Ok(url)
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn reverse(&self, position: Position) -> Result<Option<String>> {
        let url = self.reverse_url(position)?;
        tracing::debug!("Reverse geocoding {} via {}", position, url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(MapError::HttpStatusError {
                service: "nominatim".to_string(),
                status: response.status().as_u16(),
            });
        }

        let body: ReverseResponse = response.json().await?;
        Ok(body.address.as_ref().and_then(format_address))
    }
}
