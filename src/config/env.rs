// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;
use std::fmt;
use std::str::FromStr;

/// Which generation of the upstream places API the proxies talk to
/// DOCUMENTATION: Selected by configuration, never by sniffing response shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpstreamApiVersion {
    /// Nearby Search JSON API with status-in-body and photo_reference tokens
    #[default]
    Legacy,
    /// places.googleapis.com/v1 with resource-name photo identifiers
    V1,
}

impl FromStr for UpstreamApiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(UpstreamApiVersion::Legacy),
            "v1" | "new" => Ok(UpstreamApiVersion::V1),
            other => Err(format!("Unknown PLACES_API_VERSION: {}", other)),
        }
    }
}

impl fmt::Display for UpstreamApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamApiVersion::Legacy => write!(f, "legacy"),
            UpstreamApiVersion::V1 => write!(f, "v1"),
        }
    }
}

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 3001)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Places API key; None when not configured
    pub places_api_key: Option<String>,

    /// Upstream API generation used for searches
    pub api_version: UpstreamApiVersion,

    /// Base URL of the legacy Places web service
    pub legacy_base_url: String,

    /// Base URL of the v1 Places API
    pub v1_base_url: String,

    /// Search radius in meters when the caller omits one
    pub default_radius: u32,

    /// Keyword / text query when the caller omits one
    pub default_query: String,

    /// Place type every search is restricted to
    pub place_type: String,

    /// Photo width in pixels when the caller omits maxWidth
    pub default_max_width: u32,

    /// maxResultCount sent to the v1 API
    pub max_result_count: u32,

    /// Timeout for every outbound request, in seconds
    pub upstream_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_address: "127.0.0.1".to_string(),
            server_port: 3001,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            places_api_key: None,
            api_version: UpstreamApiVersion::Legacy,
            legacy_base_url: "https://maps.googleapis.com/maps/api/place".to_string(),
            v1_base_url: "https://places.googleapis.com/v1".to_string(),
            default_radius: 5000,
            default_query: "restaurants".to_string(),
            place_type: "restaurant".to_string(),
            default_max_width: 400,
            max_result_count: 20,
            upstream_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let defaults = Config::default();

        let api_version = match env::var("PLACES_API_VERSION") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.api_version,
        };

        Ok(Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or(defaults.server_address),

            server_port: parse_or("SERVER_PORT", defaults.server_port),

            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),

            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),

            places_api_key: non_empty(env::var("GOOGLE_PLACES_API_KEY").ok())
                .or_else(|| non_empty(env::var("REACT_APP_GOOGLE_MAPS_API_KEY").ok())),

            api_version,

            legacy_base_url: env::var("PLACES_LEGACY_BASE_URL")
                .unwrap_or(defaults.legacy_base_url),

            v1_base_url: env::var("PLACES_V1_BASE_URL").unwrap_or(defaults.v1_base_url),

            default_radius: parse_or("DEFAULT_SEARCH_RADIUS", defaults.default_radius),

            default_query: env::var("DEFAULT_SEARCH_QUERY").unwrap_or(defaults.default_query),

            place_type: env::var("DEFAULT_PLACE_TYPE").unwrap_or(defaults.place_type),

            default_max_width: parse_or("DEFAULT_PHOTO_MAX_WIDTH", defaults.default_max_width),

            max_result_count: parse_or("MAX_RESULT_COUNT", defaults.max_result_count),

            upstream_timeout_secs: parse_or("UPSTREAM_TIMEOUT_SECS", defaults.upstream_timeout_secs),
        })
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.default_radius == 0 {
            return Err("DEFAULT_SEARCH_RADIUS must be greater than 0".to_string());
        }

        if self.default_max_width == 0 {
            return Err("DEFAULT_PHOTO_MAX_WIDTH must be greater than 0".to_string());
        }

        if self.upstream_timeout_secs == 0 {
            return Err("UPSTREAM_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(())
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
