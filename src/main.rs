// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config and upstream client, start HTTP server

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use nearby_eats::config::Config;
use nearby_eats::handlers;
use nearby_eats::services::{GooglePlacesClient, PhotoProxy, SearchProxy};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = match Config::from_env().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            format!("{},actix_web=info", config.log_level)
        } else {
            "info,actix_web=info".to_string()
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    log::info!("Starting nearby-eats proxy...");
    log::info!("Environment: {}", config.environment);
    log::info!("Places API version: {}", config.api_version);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    if config.places_api_key.is_none() {
        log::warn!("Places API key missing: /api/search and /api/photo will answer 500");
    }

    // 4. Build the upstream client shared by both proxies
    let client = match GooglePlacesClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to create Places API client: {}", e);
            std::process::exit(1);
        }
    };

    let search_proxy = web::Data::new(SearchProxy::new(client.clone(), &config));
    let photo_proxy = web::Data::new(PhotoProxy::new(client, &config));

    // 5. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);

    HttpServer::new(move || {
        App::new()
            // Application state (stateless proxies)
            .app_data(search_proxy.clone())
            .app_data(photo_proxy.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::search_config)
            .configure(handlers::photo_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
