use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geo::LatLng;

/// Identifier of an accident cluster as understood by the backend.
///
/// The bundled dataset uses integers, but the backend accepts either form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClusterId {
    Number(i64),
    Text(String),
}

impl From<i64> for ClusterId {
    fn from(value: i64) -> Self {
        ClusterId::Number(value)
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterId::Number(n) => write!(f, "{}", n),
            ClusterId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A pre-computed hotspot of historical accidents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentCluster {
    pub cluster_id: i64,
    pub avg_severity: f64,
    pub centroid_latitude: f64,
    pub centroid_longitude: f64,
}

impl AccidentCluster {
    pub fn id(&self) -> ClusterId {
        ClusterId::Number(self.cluster_id)
    }

    pub fn centroid(&self) -> LatLng {
        LatLng::new(self.centroid_latitude, self.centroid_longitude)
    }
}

/// Parse the bundled hotspot CSV
/// (`cluster_id,avg_severity,centroid_latitude,centroid_longitude`).
pub fn load_clusters(csv_data: &str) -> Result<Vec<AccidentCluster>, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes());
    let clusters = rdr.deserialize().collect::<Result<Vec<AccidentCluster>, _>>()?;
    Ok(clusters)
}

/// `(min, max)` of average severity over all clusters.
pub fn severity_extent(clusters: &[AccidentCluster]) -> Option<(f64, f64)> {
    clusters
        .iter()
        .map(|c| c.avg_severity)
        .filter(|s| s.is_finite())
        .fold(None, |acc, s| match acc {
            None => Some((s, s)),
            Some((lo, hi)) => Some((lo.min(s), hi.max(s))),
        })
}
