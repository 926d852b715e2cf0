use std::env;
use std::fs;
use std::path::Path;

const HOTSPOTS_HEADER: &str = "cluster_id,avg_severity,centroid_latitude,centroid_longitude\n";

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest = Path::new(&out_dir).join("accident_hotspots.csv");

    // Copy accident_hotspots.csv to OUT_DIR for include_str. Without the
    // fixture the app still builds and simply draws no clusters.
    let src = Path::new("../fixtures/accident_hotspots.csv");
    if src.exists() {
        report_malformed_rows(src);
        fs::copy(src, &dest).unwrap();
    } else {
        println!("cargo:warning=fixtures/accident_hotspots.csv not found, bundling no clusters");
        fs::write(&dest, HOTSPOTS_HEADER).unwrap();
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../fixtures/accident_hotspots.csv");
}

/// Rows the app would reject at startup are flagged while building instead.
fn report_malformed_rows(src: &Path) {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(src)
        .expect("Failed to open accident_hotspots.csv");

    for (idx, record) in rdr.records().enumerate() {
        let line = idx + 2;
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                println!("cargo:warning=accident_hotspots.csv line {}: {}", line, err);
                continue;
            }
        };
        let numeric = (1..4).all(|col| {
            record
                .get(col)
                .map(|v| v.trim().parse::<f64>().is_ok())
                .unwrap_or(false)
        });
        if record.len() != 4 || !numeric {
            println!("cargo:warning=accident_hotspots.csv line {} is malformed", line);
        }
    }
}
