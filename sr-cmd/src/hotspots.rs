//! Offline check of a hotspot CSV before it is bundled into the app.

use anyhow::Context;
use sr_core::cluster::{load_clusters, severity_extent, AccidentCluster};

pub fn run_hotspots(path: &str) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    println!("{}", hotspot_report(&raw).with_context(|| format!("validating {}", path))?);
    Ok(())
}

/// Count, severity extent and any clusters with unusable coordinates.
pub fn hotspot_report(csv_data: &str) -> anyhow::Result<String> {
    let clusters = load_clusters(csv_data)?;
    let invalid: Vec<&AccidentCluster> = clusters
        .iter()
        .filter(|c| !c.centroid().is_finite() || !c.avg_severity.is_finite())
        .collect();
    if let Some(first) = invalid.first() {
        anyhow::bail!(
            "{} clusters have non-finite values, first is cluster {}",
            invalid.len(),
            first.cluster_id
        );
    }

    let mut report = format!("{} clusters", clusters.len());
    if let Some((lo, hi)) = severity_extent(&clusters) {
        report.push_str(&format!(", average severity {:.2} to {:.2}", lo, hi));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "cluster_id,avg_severity,centroid_latitude,centroid_longitude\n";

    #[test]
    fn report_lists_count_and_extent() {
        let csv = format!("{}12,2.31,33.755,-84.39\n7,3.05,32.0835,-81.0998\n", HEADER);
        assert_eq!(
            hotspot_report(&csv).unwrap(),
            "2 clusters, average severity 2.31 to 3.05"
        );
    }

    #[test]
    fn header_only_file_is_valid_and_empty() {
        assert_eq!(hotspot_report(HEADER).unwrap(), "0 clusters");
    }

    #[test]
    fn non_numeric_rows_fail() {
        let csv = format!("{}12,severe,33.755,-84.39\n", HEADER);
        assert!(hotspot_report(&csv).is_err());
    }

    #[test]
    fn nan_coordinates_fail() {
        let csv = format!("{}12,2.5,NaN,-84.39\n", HEADER);
        let err = hotspot_report(&csv).unwrap_err();
        assert!(err.to_string().contains("cluster 12"));
    }
}
