//! Backend round trips: route scores, cluster accidents and box accidents.

use anyhow::Context;
use log::info;
use sr_core::accident::AccidentRecord;
use sr_core::backend::{HttpBackend, ScoringBackend};
use sr_core::cluster::ClusterId;
use sr_core::geo::LatLng;
use sr_core::summary::{compute_summary, Summary};
use sr_core::wire::ScoreRoutesRequest;

/// Read a `/score-routes` body from `path`.
pub fn read_score_request(path: &str) -> anyhow::Result<ScoreRoutesRequest> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let request: ScoreRoutesRequest =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path))?;
    if request.routes.len() != request.distances.len() {
        anyhow::bail!(
            "{} has {} routes but {} distances",
            path,
            request.routes.len(),
            request.distances.len()
        );
    }
    Ok(request)
}

pub async fn run_score(api_url: &str, routes_path: &str) -> anyhow::Result<()> {
    let request = read_score_request(routes_path)?;
    let backend = HttpBackend::new(api_url);
    info!(
        "Scoring {} routes against {}",
        request.routes.len(),
        backend.base_url()
    );

    let response = backend
        .score_routes(&request)
        .await
        .context("scoring routes")?;
    for (idx, (score, accidents)) in response
        .scores
        .iter()
        .zip(response.accidents.iter())
        .enumerate()
    {
        println!("{}", route_line(idx, *score, request.distances[idx], accidents));
    }
    Ok(())
}

pub async fn run_cluster(api_url: &str, id: &ClusterId) -> anyhow::Result<()> {
    let backend = HttpBackend::new(api_url);
    info!("Fetching accidents for cluster {}", id);
    let accidents = backend
        .cluster_accidents(id)
        .await
        .with_context(|| format!("fetching cluster {}", id))?;
    println!("Cluster {}: {}", id, summary_line(&compute_summary(&accidents)));
    Ok(())
}

pub async fn run_box(api_url: &str, p1: LatLng, p2: LatLng) -> anyhow::Result<()> {
    let backend = HttpBackend::new(api_url);
    info!("Fetching accidents between {} and {}", p1.label(), p2.label());
    let accidents = backend
        .accidents_in_box(p1, p2)
        .await
        .context("fetching accidents in box")?;
    println!("Box: {}", summary_line(&compute_summary(&accidents)));
    Ok(())
}

fn route_line(idx: usize, score: Option<f64>, miles: f64, accidents: &[AccidentRecord]) -> String {
    let score = match score {
        Some(s) => format!("{:.2}", s),
        None => "n/a".to_string(),
    };
    format!(
        "Route {}: score {}, {:.2} miles, {}",
        idx + 1,
        score,
        miles,
        summary_line(&compute_summary(accidents))
    )
}

fn summary_line(summary: &Summary) -> String {
    format!(
        "{} accidents, {} rainy, {} at night, avg severity {}",
        summary.count,
        summary.rainy_percent(),
        summary.nighttime_percent(),
        summary.severity_label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_summary_line() {
        assert_eq!(
            summary_line(&Summary::default()),
            "0 accidents, 0% rainy, 0% at night, avg severity 0.00"
        );
    }

    #[test]
    fn unscored_route_says_so() {
        let line = route_line(1, None, 250.4, &[]);
        assert!(line.starts_with("Route 2: score n/a, 250.40 miles"));
    }

    #[test]
    fn score_request_is_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"routes": [[[33.749, -84.388], [32.0809, -81.0912]]], "distances": [250.4]}}"#
        )
        .unwrap();
        let request = read_score_request(file.path().to_str().unwrap()).unwrap();
        assert_eq!(request.routes[0].len(), 2);
        assert_eq!(request.distances, vec![250.4]);
    }

    #[test]
    fn mismatched_distances_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"routes": [[[33.7, -84.3]]], "distances": []}}"#).unwrap();
        let err = read_score_request(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("1 routes but 0 distances"));
    }
}
