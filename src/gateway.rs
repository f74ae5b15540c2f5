// src/gateway.rs
// DOCUMENTATION: Client-side access to the search proxy
// PURPOSE: One round trip per call, returning the proxy's records unchanged

use crate::models::{PhotoIdentifier, PlaceRecord, SearchParams};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Failures a caller of the gateway can display
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The proxy answered with an error status; `message` is its `error` field
    #[error("{message}")]
    Server { status: u16, message: String },
}

/// Error body produced by the proxies
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    message: Option<String>,
}

/// Gateway to a running nearby-eats server
/// DOCUMENTATION: No retry, caching or deduplication
pub struct SearchGateway {
    client: Client,
    base_url: Url,
}

impl SearchGateway {
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| GatewayError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(path)
            .map_err(|e| GatewayError::InvalidBaseUrl(e.to_string()))
    }

    /// Search restaurants around a point
    /// DOCUMENTATION: POSTs the canonical JSON body; a non-success status becomes
    /// GatewayError::Server carrying the proxy's error message
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<PlaceRecord>, GatewayError> {
        let response = self
            .client
            .post(self.endpoint("api/search")?)
            .json(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(ErrorBody {
                    error,
                    message: Some(detail),
                }) => format!("{}: {}", error, detail),
                Ok(ErrorBody { error, .. }) => error,
                Err(_) => format!("Search failed with HTTP {}", status.as_u16()),
            };
            log::warn!("Search proxy returned {}: {}", status, message);
            return Err(GatewayError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Vec<PlaceRecord>>().await?)
    }

    /// Photo proxy URL for an identifier taken from a PlaceRecord
    pub fn photo_url(&self, identifier: &str, max_width: u32) -> Result<Url, GatewayError> {
        let mut url = self.endpoint("api/photo")?;
        {
            let mut pairs = url.query_pairs_mut();
            match PhotoIdentifier::classify(identifier) {
                PhotoIdentifier::Reference(reference) => pairs.append_pair("reference", &reference),
                PhotoIdentifier::Resource(name) => pairs.append_pair("uri", &name),
            };
            pairs.append_pair("maxWidth", &max_width.to_string());
        }
        Ok(url)
    }

    /// Whether the server answers its health check
    pub async fn is_healthy(&self) -> bool {
        match self.endpoint("health") {
            Ok(url) => match self.client.get(url).send().await {
                Ok(resp) => resp.status().is_success(),
                Err(_) => false,
            },
            Err(_) => false,
        }
    }
}
