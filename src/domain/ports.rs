use crate::domain::model::{Position, Stop};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn style_url(&self) -> &str;
    fn nominatim_url(&self) -> &str;
    fn transport_url(&self) -> &str;
    fn language(&self) -> &str;
    fn results(&self) -> usize;
    fn distance(&self) -> usize;
    fn timeout_seconds(&self) -> u64;
    fn map_center(&self) -> Position;
    fn zoom(&self) -> f64;
    /// City fragments removed from stop names, e.g. `", Frankfurt a.M."`.
    fn name_fragments(&self) -> &[String];
}

/// Source of stops around a position.
#[async_trait]
pub trait StopsProvider: Send + Sync {
    async fn nearby(&self, position: Position) -> Result<Vec<Stop>>;
}

/// Turns a position into a display address. `Ok(None)` means the service
/// answered but had no usable address.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, position: Position) -> Result<Option<String>>;
}
