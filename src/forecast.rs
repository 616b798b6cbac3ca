//! Points, hourly forecasts, and the arrival-time forecast lookup.
//!
//! All simulated times are seconds elapsed since the routing start.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RouterError};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Geographic coordinates in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// One hour's instantaneous conditions.
///
/// The four required fields are optional so that incomplete upstream data
/// can be represented and rejected by the scorer instead of at decode time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Forecast timestamp as delivered by the provider (ISO-8601).
    pub time: String,
    /// Air temperature in °C.
    pub air_temperature: Option<f64>,
    /// Relative humidity in %.
    pub relative_humidity: Option<f64>,
    /// Wind speed in m/s.
    pub wind_speed: Option<f64>,
    /// Cloud cover in %.
    pub cloud_area_fraction: Option<f64>,
    /// Precipitation over the next hour in mm.
    #[serde(default)]
    pub precipitation_amount: Option<f64>,
    #[serde(default)]
    pub symbol_code: Option<String>,
}

impl ForecastEntry {
    pub fn new(
        time: impl Into<String>,
        air_temperature: f64,
        relative_humidity: f64,
        wind_speed: f64,
        cloud_area_fraction: f64,
    ) -> Self {
        Self {
            time: time.into(),
            air_temperature: Some(air_temperature),
            relative_humidity: Some(relative_humidity),
            wind_speed: Some(wind_speed),
            cloud_area_fraction: Some(cloud_area_fraction),
            precipitation_amount: None,
            symbol_code: None,
        }
    }

    pub fn with_precipitation(mut self, millimeters: f64) -> Self {
        self.precipitation_amount = Some(millimeters);
        self
    }

    pub fn with_symbol(mut self, symbol_code: impl Into<String>) -> Self {
        self.symbol_code = Some(symbol_code.into());
        self
    }
}

/// Hourly forecast entries, index 0 being the hour of the routing start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    entries: Vec<ForecastEntry>,
}

impl ForecastSeries {
    pub fn new(entries: Vec<ForecastEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ForecastEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for the hour closest to `offset_secs`, clamped to the last entry.
    pub fn entry_at(&self, offset_secs: f64) -> Option<&ForecastEntry> {
        let last = self.entries.len().checked_sub(1)?;
        let hour = hour_index(offset_secs);
        self.entries.get(hour.min(last))
    }
}

impl From<Vec<ForecastEntry>> for ForecastSeries {
    fn from(entries: Vec<ForecastEntry>) -> Self {
        Self::new(entries)
    }
}

/// A location to visit, carrying its fetched forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub coordinates: Coordinates,
    pub name: Option<String>,
    pub forecast: ForecastSeries,
}

impl Point {
    pub fn new(coordinates: Coordinates, forecast: ForecastSeries) -> Self {
        Self {
            coordinates,
            name: None,
            forecast,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Forecast entry applicable when arriving at `node` after `arrival_secs`.
///
/// Offsets past the end of the series return the last entry. An empty series
/// is a data-integrity failure, not a clamping case.
pub fn forecast_at(point: &Point, node: usize, arrival_secs: f64) -> Result<&ForecastEntry> {
    point
        .forecast
        .entry_at(arrival_secs)
        .ok_or(RouterError::EmptyForecast { node })
}

fn hour_index(offset_secs: f64) -> usize {
    let hour = (offset_secs / SECONDS_PER_HOUR).round();
    if hour.is_nan() || hour < 0.0 {
        0
    } else {
        hour as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(hours: usize) -> ForecastSeries {
        (0..hours)
            .map(|h| ForecastEntry::new(format!("2024-06-01T{:02}:00:00Z", h), 15.0 + h as f64, 60.0, 2.0, 20.0))
            .collect::<Vec<_>>()
            .into()
    }

    fn point(hours: usize) -> Point {
        Point::new(Coordinates::new(10.7437, 59.9101), series(hours))
    }

    #[test]
    fn test_lookup_rounds_to_nearest_hour() {
        let p = point(6);
        assert_eq!(forecast_at(&p, 0, 0.0).unwrap().time, "2024-06-01T00:00:00Z");
        assert_eq!(forecast_at(&p, 0, 1799.0).unwrap().time, "2024-06-01T00:00:00Z");
        assert_eq!(forecast_at(&p, 0, 1800.0).unwrap().time, "2024-06-01T01:00:00Z");
        assert_eq!(forecast_at(&p, 0, 7200.0).unwrap().time, "2024-06-01T02:00:00Z");
    }

    #[test]
    fn test_lookup_clamps_to_last_entry() {
        let p = point(3);
        let entry = forecast_at(&p, 0, 100.0 * 3600.0).unwrap();
        assert_eq!(entry.time, "2024-06-01T02:00:00Z");
    }

    #[test]
    fn test_lookup_negative_offset_uses_first_hour() {
        let p = point(3);
        assert_eq!(forecast_at(&p, 0, -5000.0).unwrap().time, "2024-06-01T00:00:00Z");
    }

    #[test]
    fn test_empty_series_is_error() {
        let p = point(0);
        let err = forecast_at(&p, 4, 0.0).unwrap_err();
        assert!(matches!(err, RouterError::EmptyForecast { node: 4 }));
    }
}
