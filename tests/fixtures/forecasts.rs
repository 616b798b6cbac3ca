//! Forecast builders.

use weather_router::forecast::{ForecastEntry, ForecastSeries, Point};
use weather_router::graph::TravelMatrices;

use super::oslo_locations::Location;

/// ISO timestamp `hour` hours after 2024-06-01T00:00Z.
pub fn hour_stamp(hour: usize) -> String {
    format!("2024-06-{:02}T{:02}:00:00Z", 1 + hour / 24, hour % 24)
}

/// Apparent temperature 22 °C, dry, 20 % cloud, dead calm: scores 0.3
/// (only the calm-wind penalty).
pub fn comfortable_hour(hour: usize) -> ForecastEntry {
    ForecastEntry::new(hour_stamp(hour), 26.0, 0.0, 0.0, 20.0)
        .with_precipitation(0.0)
        .with_symbol("clearsky_day")
}

/// Cold, wet, overcast and windy.
pub fn miserable_hour(hour: usize) -> ForecastEntry {
    ForecastEntry::new(hour_stamp(hour), 2.0, 95.0, 14.0, 100.0)
        .with_precipitation(6.0)
        .with_symbol("heavyrain")
}

pub fn series_of(hours: usize, entry: fn(usize) -> ForecastEntry) -> ForecastSeries {
    ForecastSeries::new((0..hours).map(entry).collect())
}

/// Series built hour by hour from a per-hour choice.
pub fn series_from(hours: &[fn(usize) -> ForecastEntry]) -> ForecastSeries {
    ForecastSeries::new(hours.iter().enumerate().map(|(h, entry)| entry(h)).collect())
}

pub fn point_at(location: &Location, forecast: ForecastSeries) -> Point {
    Point::new(location.coordinates(), forecast).named(location.name)
}

/// Symmetric matrices from a duration table; `None` off the diagonal means
/// unreachable. Distances are duration * 10 m.
pub fn matrices_from(durations: &[&[Option<f64>]]) -> TravelMatrices {
    let durations: Vec<Vec<Option<f64>>> = durations.iter().map(|row| row.to_vec()).collect();
    let distances = durations
        .iter()
        .map(|row| row.iter().map(|d| d.map(|secs| secs * 10.0)).collect())
        .collect();
    TravelMatrices::new(durations, distances)
}
