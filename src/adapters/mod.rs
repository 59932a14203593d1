// Adapters layer: concrete clients for the external services.

pub mod nominatim;
pub mod transport_rest;

pub use nominatim::NominatimClient;
pub use transport_rest::TransportRestClient;
