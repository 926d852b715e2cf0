//! Command implementations for the Safety Router CLI.
//!
//! Each subcommand exercises one backend endpoint, or the bundled hotspot
//! dataset, without a browser.

use clap::Subcommand;
use sr_core::cluster::ClusterId;
use sr_core::geo::LatLng;

pub mod hotspots;
pub mod query;

#[derive(Subcommand)]
pub enum Command {
    /// Score the routes in a JSON file ({"routes": [[[lat, lng], ...]], "distances": [...]})
    Score {
        /// Path to a score-routes request body
        #[arg(short = 'r', long)]
        routes: String,
    },

    /// Fetch one cluster's accidents and summarize them
    Cluster {
        /// Cluster identifier, numeric or text
        #[arg(long, value_parser = parse_cluster_id)]
        id: ClusterId,
    },

    /// Fetch the accidents inside a bounding box and summarize them
    #[command(name = "box")]
    BoundingBox {
        /// First corner as "lat,lng"
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        p1: LatLng,

        /// Opposite corner as "lat,lng"
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        p2: LatLng,
    },

    /// Validate a hotspot CSV and print its size and severity range
    Hotspots {
        #[arg(long, default_value = "fixtures/accident_hotspots.csv")]
        csv: String,
    },
}

pub async fn run(command: Command, api_url: &str) -> anyhow::Result<()> {
    match command {
        Command::Score { routes } => query::run_score(api_url, &routes).await,
        Command::Cluster { id } => query::run_cluster(api_url, &id).await,
        Command::BoundingBox { p1, p2 } => query::run_box(api_url, p1, p2).await,
        Command::Hotspots { csv } => hotspots::run_hotspots(&csv),
    }
}

/// Parse `"lat,lng"`, e.g. `"33.749,-84.388"`.
pub fn parse_lat_lng(raw: &str) -> Result<LatLng, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lng\", got \"{}\"", raw))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude \"{}\"", lat.trim()))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude \"{}\"", lng.trim()))?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(format!("coordinate out of range: {},{}", lat, lng));
    }
    Ok(LatLng::new(lat, lng))
}

/// Numeric ids are sent as JSON numbers, anything else as a string.
pub fn parse_cluster_id(raw: &str) -> Result<ClusterId, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("cluster id is empty".to_string());
    }
    Ok(match raw.parse::<i64>() {
        Ok(n) => ClusterId::Number(n),
        Err(_) => ClusterId::Text(raw.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lat_lng_parses_with_spaces() {
        let p = parse_lat_lng(" 33.749, -84.388 ").unwrap();
        assert_eq!(p, LatLng::new(33.749, -84.388));
    }

    #[test]
    fn lat_lng_rejects_bad_input() {
        assert!(parse_lat_lng("33.749").is_err());
        assert!(parse_lat_lng("north,-84.3").is_err());
        assert!(parse_lat_lng("95.0,-84.3").is_err());
    }

    #[test]
    fn cluster_ids_keep_numbers_numeric() {
        assert_eq!(parse_cluster_id("42"), Ok(ClusterId::Number(42)));
        assert_eq!(
            parse_cluster_id("I-75-north"),
            Ok(ClusterId::Text("I-75-north".to_string()))
        );
        assert!(parse_cluster_id("  ").is_err());
    }
}
