use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One decoded current-conditions response.
///
/// Every field is required: a body missing any of them fails to decode
/// instead of producing a partially filled snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(rename = "coord")]
    pub coordinates: Coordinates,
    #[serde(rename = "weather")]
    pub conditions: Vec<Condition>,
    pub base: String,
    #[serde(rename = "main")]
    pub measurements: Measurements,
    pub visibility: i32,
    pub wind: Wind,
    pub clouds: Clouds,
    /// Observation time, epoch seconds.
    #[serde(rename = "dt")]
    pub timestamp: i64,
    #[serde(rename = "sys")]
    pub sun: Sun,
    /// Shift from UTC in seconds.
    #[serde(rename = "timezone")]
    pub timezone_offset: i32,
    #[serde(rename = "id")]
    pub location_id: i64,
    #[serde(rename = "name")]
    pub location_name: String,
    #[serde(rename = "cod")]
    pub response_code: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(rename = "lat")]
    pub latitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: i32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Temperatures are in Kelvin, the provider's default unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    #[serde(rename = "temp")]
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i32,
    pub humidity: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    #[serde(rename = "deg")]
    pub direction_degrees: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clouds {
    #[serde(rename = "all")]
    pub cover_percent: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sun {
    #[serde(rename = "type")]
    pub kind: i32,
    pub id: i32,
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

impl WeatherSnapshot {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    /// Values reported for each cycle. No unit conversion is applied.
    pub fn metrics(&self) -> WeatherMetrics {
        WeatherMetrics {
            temperature_k: self.measurements.temperature,
            humidity_pct: self.measurements.humidity,
            wind_speed_mps: self.wind.speed,
            description: self.conditions.first().map(|c| c.description.clone()),
        }
    }
}

/// The four values logged per successful cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherMetrics {
    pub temperature_k: f64,
    pub humidity_pct: i32,
    pub wind_speed_mps: f64,
    pub description: Option<String>,
}

impl fmt::Display for WeatherMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Temperature: {}K, Humidity: {}%, Wind Speed: {} m/s, Weather: {}",
            self.temperature_k,
            self.humidity_pct,
            self.wind_speed_mps,
            self.description.as_deref().unwrap_or("null"),
        )
    }
}
