pub mod icon;
pub mod map_view;
pub mod markers;
pub mod session;
pub mod stops;

pub use crate::domain::model::{Line, Position, Product, Stop};
pub use crate::domain::ports::{ConfigProvider, ReverseGeocoder, StopsProvider};
pub use crate::utils::error::Result;
