// src/services/search_proxy.rs
// DOCUMENTATION: Business logic for place searches
// PURPOSE: Validate a search, issue exactly one upstream call, normalize the result

use crate::config::{Config, UpstreamApiVersion};
use crate::errors::PlacesError;
use crate::models::{PlaceRecord, SearchParams};
use crate::services::google_places_client::{GooglePlacesClient, NearbyRequest};
use crate::services::normalize::{normalize_legacy, normalize_v1};
use validator::Validate;

/// Search proxy
/// DOCUMENTATION: Stateless; one instance serves every request concurrently
#[derive(Clone)]
pub struct SearchProxy {
    client: GooglePlacesClient,
    default_radius: u32,
    default_query: String,
    place_type: String,
    max_result_count: u32,
}

impl SearchProxy {
    pub fn new(client: GooglePlacesClient, config: &Config) -> Self {
        Self {
            client,
            default_radius: config.default_radius,
            default_query: config.default_query.clone(),
            place_type: config.place_type.clone(),
            max_result_count: config.max_result_count,
        }
    }

    /// Search places around a point
    /// DOCUMENTATION: Order of checks: lat/lng present, parameters in range,
    /// credential configured. Only then is the upstream contacted, once.
    pub async fn search(&self, params: SearchParams) -> Result<Vec<PlaceRecord>, PlacesError> {
        let request = self.build_request(&params)?;
        self.client.api_key()?;

        let records = match self.client.api_version() {
            UpstreamApiVersion::Legacy => {
                let response = self.client.legacy_nearby_search(&request).await?;
                normalize_legacy(response.results)
            }
            UpstreamApiVersion::V1 => {
                let response = self.client.v1_search(&request).await?;
                normalize_v1(response.places, request.open_now)
            }
        };

        log::info!(
            "Search at ({}, {}) radius={} returned {} places",
            request.latitude,
            request.longitude,
            request.radius,
            records.len()
        );

        Ok(records)
    }

    fn build_request(&self, params: &SearchParams) -> Result<NearbyRequest, PlacesError> {
        let (latitude, longitude) = match (params.lat, params.lng) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => {
                return Err(PlacesError::BadRequest(
                    "Missing lat or lng parameters".to_string(),
                ))
            }
        };

        if let Err(e) = params.validate() {
            return Err(PlacesError::BadRequest(format!("Invalid parameters: {}", e)));
        }

        let explicit = params.explicit_query();

        Ok(NearbyRequest {
            latitude,
            longitude,
            radius: params.radius.unwrap_or(self.default_radius),
            place_type: self.place_type.clone(),
            keyword: explicit.unwrap_or(&self.default_query).to_string(),
            explicit_keyword: explicit.is_some(),
            open_now: params.open_now.unwrap_or(false),
            max_result_count: self.max_result_count,
        })
    }
}
