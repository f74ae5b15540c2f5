// src/bin/nearby.rs
// Terminal client: search restaurants around a point through a running server
//
// Usage: nearby <lat> <lng> [query] [radius-meters]
// Server URL comes from NEARBY_EATS_URL (default http://localhost:3001)

use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use nearby_eats::display::summary_line;
use nearby_eats::gateway::SearchGateway;
use nearby_eats::models::SearchParams;
use std::env;

// --- ANSI colors ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

fn parse_args(args: &[String]) -> Result<SearchParams> {
    if args.len() < 2 {
        bail!("usage: nearby <lat> <lng> [query] [radius-meters]");
    }

    let lat: f64 = args[0]
        .parse()
        .with_context(|| format!("invalid latitude: {}", args[0]))?;
    let lng: f64 = args[1]
        .parse()
        .with_context(|| format!("invalid longitude: {}", args[1]))?;

    let radius = match args.get(3) {
        Some(raw) => Some(
            raw.parse::<u32>()
                .with_context(|| format!("invalid radius: {}", raw))?,
        ),
        None => None,
    };

    Ok(SearchParams {
        query: args.get(2).cloned(),
        radius,
        ..SearchParams::new(lat, lng)
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let params = parse_args(&args)?;
    let base_url =
        env::var("NEARBY_EATS_URL").unwrap_or_else(|_| "http://localhost:3001".to_string());

    let gateway = SearchGateway::new(&base_url)?;

    println!("\n{}🔍 Checking service status...{}", CYAN, RESET);
    if !gateway.is_healthy().await {
        println!("{}❌ Service unavailable at {}.{}", RED, base_url, RESET);
        println!("{}Please ensure nearby-eats is running (cargo run){}", YELLOW, RESET);
        std::process::exit(1);
    }

    let origin = (params.lat.unwrap_or_default(), params.lng.unwrap_or_default());
    let places = match gateway.search(&params).await {
        Ok(places) => places,
        Err(e) => {
            println!("{}❌ Search failed: {}{}", RED, e, RESET);
            std::process::exit(1);
        }
    };

    println!(
        "{}{}🍽️  {} places near {:.4}, {:.4}{}\n",
        BOLD,
        GREEN,
        places.len(),
        origin.0,
        origin.1,
        RESET
    );

    for place in &places {
        println!("{}", summary_line(place, origin));
        println!("    {}", place.address);
        if let Some(photo) = &place.photo {
            println!("    📷 {}", gateway.photo_url(photo, 400)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let params = parse_args(&args(&["40.7", "-74.0", "pizza", "800"])).unwrap();
        assert_eq!(params.lat, Some(40.7));
        assert_eq!(params.lng, Some(-74.0));
        assert_eq!(params.query.as_deref(), Some("pizza"));
        assert_eq!(params.radius, Some(800));

        let params = parse_args(&args(&["1", "2"])).unwrap();
        assert!(params.query.is_none());
        assert!(params.radius.is_none());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["1"])).is_err());
        assert!(parse_args(&args(&["north", "2"])).is_err());
        assert!(parse_args(&args(&["1", "2", "pizza", "far"])).is_err());
    }
}
