// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod google_places_client;
pub mod normalize;
pub mod photo_proxy;
pub mod search_proxy;

pub use google_places_client::GooglePlacesClient;
pub use photo_proxy::{PhotoPayload, PhotoProxy};
pub use search_proxy::SearchProxy;
