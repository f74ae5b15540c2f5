// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components and shared extractor settings

pub mod health;
pub mod photo;
pub mod search;

pub use health::config as health_config;
pub use photo::config as photo_config;
pub use search::config as search_config;

use crate::errors::PlacesError;
use actix_web::{web, HttpResponse};

/// Malformed query strings are reported like every other bad request
pub(crate) fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| PlacesError::BadRequest(format!("Invalid query: {}", err)).into())
}

/// Malformed JSON bodies are reported like every other bad request
pub(crate) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| PlacesError::BadRequest(format!("Invalid body: {}", err)).into())
}

/// Fallback for verbs an endpoint does not serve
pub(crate) async fn method_not_allowed() -> Result<HttpResponse, PlacesError> {
    Err(PlacesError::MethodNotAllowed)
}
