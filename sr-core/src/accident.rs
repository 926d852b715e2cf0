/// Accident rows returned by the backend and their decoding into named fields.
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Column positions in the backend's `accidents_table` rows.
pub mod column {
    pub const ID: usize = 0;
    pub const SEVERITY: usize = 1;
    pub const START_TIME: usize = 2;
    pub const STREET: usize = 6;
    pub const CITY: usize = 8;
    pub const STATE: usize = 10;
    pub const TEMPERATURE_F: usize = 16;
    pub const VISIBILITY_MI: usize = 20;
    pub const PRECIPITATION_IN: usize = 21;
    pub const WEATHER_CONDITION: usize = 22;
    pub const SUNRISE_SUNSET: usize = 36;
    pub const CLUSTER: usize = 44;
}

/// Shortest row that still carries every field the summaries and charts read.
pub const MIN_ROW_LENGTH: usize = column::SUNRISE_SUNSET + 1;

/// Precipitation (inches) above which an accident counts as rainy.
pub const RAIN_THRESHOLD_IN: f64 = 0.01;

/// Timestamp layouts the backend has been seen to emit, tried in order after RFC 2822.
const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("accident row has {found} columns, expected at least {expected}")]
    TooShort { expected: usize, found: usize },
}

/// One historical accident near a route or inside a cluster.
///
/// The backend sends rows positionally; they are decoded once here so the
/// rest of the app reads fields by name. Missing or null columns become `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Value>")]
pub struct AccidentRecord {
    pub id: Option<String>,
    /// Severity ranking from 1 (minor) to 4 (most severe).
    pub severity: Option<u8>,
    pub start_time: Option<NaiveDateTime>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub temperature_f: Option<f64>,
    pub visibility_mi: Option<f64>,
    pub precipitation_in: Option<f64>,
    pub weather_condition: Option<String>,
    /// Sunrise/sunset flag: `Some(true)` when the accident happened during the day.
    pub is_daytime: Option<bool>,
    pub cluster: Option<i64>,
}

impl AccidentRecord {
    pub fn is_rainy(&self) -> bool {
        self.precipitation_in
            .map(|p| p > RAIN_THRESHOLD_IN)
            .unwrap_or(false)
    }

    /// Anything not positively marked as daytime counts as nighttime.
    pub fn is_nighttime(&self) -> bool {
        self.is_daytime != Some(true)
    }
}

impl TryFrom<Vec<Value>> for AccidentRecord {
    type Error = RecordError;

    fn try_from(row: Vec<Value>) -> Result<Self, Self::Error> {
        if row.len() < MIN_ROW_LENGTH {
            return Err(RecordError::TooShort {
                expected: MIN_ROW_LENGTH,
                found: row.len(),
            });
        }
        Ok(AccidentRecord {
            id: text(&row, column::ID),
            severity: number(&row, column::SEVERITY)
                .filter(|s| (0.0..=f64::from(u8::MAX)).contains(s))
                .map(|s| s.round() as u8),
            start_time: text(&row, column::START_TIME).and_then(|s| parse_timestamp(&s)),
            street: text(&row, column::STREET),
            city: text(&row, column::CITY),
            state: text(&row, column::STATE),
            temperature_f: number(&row, column::TEMPERATURE_F),
            visibility_mi: number(&row, column::VISIBILITY_MI),
            precipitation_in: number(&row, column::PRECIPITATION_IN),
            weather_condition: text(&row, column::WEATHER_CONDITION),
            is_daytime: flag(&row, column::SUNRISE_SUNSET),
            cluster: number(&row, column::CLUSTER).map(|c| c as i64),
        })
    }
}

/// Parse a backend timestamp.
///
/// Flask serializes datetimes as RFC 2822 (`Tue, 08 Mar 2016 06:49:27 GMT`);
/// ISO-like layouts and bare dates are accepted as well.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.naive_utc());
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn text(row: &[Value], idx: usize) -> Option<String> {
    match row.get(idx)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(row: &[Value], idx: usize) -> Option<f64> {
    match row.get(idx)? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn flag(row: &[Value], idx: usize) -> Option<bool> {
    match row.get(idx)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim() {
            "Day" | "true" | "True" => Some(true),
            "Night" | "false" | "False" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
