use crate::core::stops::parse_stops;
use crate::domain::model::{Position, Stop};
use crate::domain::ports::{ConfigProvider, StopsProvider};
use crate::utils::error::{MapError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TRANSPORT_URL: &str = "https://v6.db.transport.rest";

/// Client for the `locations/nearby` endpoint of a transport.rest instance.
#[derive(Debug, Clone)]
pub struct TransportRestClient {
    client: Client,
    base_url: String,
    results: usize,
    distance: usize,
    language: String,
    name_fragments: Vec<String>,
}

impl TransportRestClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mobility-map/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            results: 30,
            distance: 1000,
            language: "de".to_string(),
            name_fragments: Vec::new(),
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Ok(
            Self::new(config.transport_url(), Duration::from_secs(config.timeout_seconds()))?
                .with_results(config.results())
                .with_distance(config.distance())
                .with_language(config.language())
                .with_name_fragments(config.name_fragments().to_vec()),
        )
    }

    pub fn with_results(mut self, results: usize) -> Self {
        self.results = results;
        self
    }

    /// Search radius in meters.
    pub fn with_distance(mut self, distance: usize) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn with_name_fragments(mut self, fragments: Vec<String>) -> Self {
        self.name_fragments = fragments;
        self
    }

    pub fn nearby_url(&self, position: Position) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/locations/nearby", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("latitude", &position.latitude.to_string())
            .append_pair("longitude", &position.longitude.to_string())
            .append_pair("results", &self.results.to_string())
            .append_pair("distance", &self.distance.to_string())
            .append_pair("linesOfStops", "true")
            .append_pair("language", &self.language);
        Ok(url)
    }
}

#[async_trait]
impl StopsProvider for TransportRestClient {
    async fn nearby(&self, position: Position) -> Result<Vec<Stop>> {
        let url = self.nearby_url(position)?;
        tracing::debug!("Fetching stops near {} via {}", position, url);

        let response = self.client.get(url).send().await?;
        tracing::debug!("transport.rest response status: {}", response.status());

        if !response.status().is_success() {
            return Err(MapError::HttpStatusError {
                service: "transport.rest".to_string(),
                status: response.status().as_u16(),
            });
        }

        // 逐筆解析，單一筆格式錯誤不影響其他站點
        let items: Vec<serde_json::Value> = response.json().await?;
        let mut raw = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<Stop>(item) {
                Ok(stop) => raw.push(stop),
                Err(e) => tracing::warn!("Skipping malformed stop: {}", e),
            }
        }

        let stops = parse_stops(raw, self.name_fragments.as_slice());
        tracing::debug!("Parsed {} stops near {}", stops.len(), position);
        Ok(stops)
    }
}
