//! Weather discomfort scoring.
//!
//! Each component maps to 0-10 through hand-tuned piecewise-linear bands;
//! the final score is their weighted sum, so it also lies in 0-10. Lower is
//! more comfortable.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, RouterError};
use crate::forecast::ForecastEntry;

const TEMPERATURE_WEIGHT: f64 = 0.4;
const PRECIPITATION_WEIGHT: f64 = 0.3;
const CLOUD_WEIGHT: f64 = 0.15;
const WIND_WEIGHT: f64 = 0.15;

const MS_TO_KMH: f64 = 3.6;

/// Score attached to a forecast entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherScore {
    pub final_score: f64,
    pub symbol_code: Option<String>,
}

/// Per-component scores alongside the apparent temperature they came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub apparent_temperature: f64,
    pub temperature: f64,
    pub precipitation: f64,
    pub cloud: f64,
    pub wind: f64,
}

impl ScoreBreakdown {
    pub fn final_score(&self) -> f64 {
        self.temperature * TEMPERATURE_WEIGHT
            + self.precipitation * PRECIPITATION_WEIGHT
            + self.cloud * CLOUD_WEIGHT
            + self.wind * WIND_WEIGHT
    }
}

/// Score a single forecast entry.
///
/// Fails with `IncompleteWeatherData` when temperature, humidity, wind speed
/// or cloud cover is missing. Missing precipitation counts as 0 mm; a missing
/// symbol code only logs a warning.
pub fn score_entry(entry: &ForecastEntry) -> Result<WeatherScore> {
    let breakdown = score_breakdown(entry)?;
    if entry.symbol_code.is_none() {
        warn!(time = %entry.time, "forecast entry has no symbol code");
    }

    Ok(WeatherScore {
        final_score: breakdown.final_score(),
        symbol_code: entry.symbol_code.clone(),
    })
}

pub fn score_breakdown(entry: &ForecastEntry) -> Result<ScoreBreakdown> {
    let temperature = required(entry.air_temperature, "air_temperature")?;
    let humidity = required(entry.relative_humidity, "relative_humidity")?;
    let wind_speed = required(entry.wind_speed, "wind_speed")?;
    let cloud_cover = required(entry.cloud_area_fraction, "cloud_area_fraction")?;
    let precipitation = entry.precipitation_amount.unwrap_or(0.0);

    let apparent = apparent_temperature(temperature, humidity, wind_speed);

    Ok(ScoreBreakdown {
        apparent_temperature: apparent,
        temperature: temperature_score(apparent),
        precipitation: precipitation_score(precipitation),
        cloud: cloud_score(cloud_cover),
        wind: wind_score(wind_speed * MS_TO_KMH),
    })
}

fn required(value: Option<f64>, field: &'static str) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(RouterError::IncompleteWeatherData { field }),
    }
}

/// Apparent temperature in °C from air temperature (°C), relative humidity
/// (%) and wind speed (m/s).
pub fn apparent_temperature(temperature: f64, humidity: f64, wind_speed: f64) -> f64 {
    let vapor_pressure =
        (humidity / 100.0) * 6.105 * ((17.27 * temperature) / (237.7 + temperature)).exp();
    temperature + 0.33 * vapor_pressure - 0.7 * wind_speed - 4.0
}

/// Comfortable between 20 and 26 °C, saturating outside 10-36 °C.
pub fn temperature_score(apparent: f64) -> f64 {
    if (20.0..=26.0).contains(&apparent) {
        0.0
    } else if (10.0..20.0).contains(&apparent) {
        20.0 - apparent
    } else if apparent > 26.0 && apparent <= 36.0 {
        apparent - 26.0
    } else {
        10.0
    }
}

/// Next-hour precipitation in mm.
pub fn precipitation_score(millimeters: f64) -> f64 {
    if millimeters == 0.0 {
        0.0
    } else if millimeters > 0.0 && millimeters <= 0.5 {
        // 0.1 mm scores 3, 0.5 mm scores 5; smaller amounts score like 0.1 mm
        let p = millimeters.max(0.1);
        3.0 + (p - 0.1) * (5.0 - 3.0) / (0.5 - 0.1)
    } else if millimeters > 0.5 {
        (5.0 + (millimeters - 0.5).floor()).min(10.0)
    } else {
        3.0
    }
}

/// Cloud cover in %. Mostly clear skies score best; both cloudless and
/// overcast skies are penalized.
pub fn cloud_score(cover: f64) -> f64 {
    if (10.0..=35.0).contains(&cover) {
        0.0
    } else if (0.0..10.0).contains(&cover) {
        3.0 - (2.0 * cover / 9.0)
    } else if (36.0..=50.0).contains(&cover) {
        1.0 + (cover - 36.0) * (4.0 / 14.0)
    } else if cover > 50.0 && cover <= 100.0 {
        5.0 + (cover - 50.0) * 0.1
    } else if cover > 100.0 {
        10.0
    } else {
        3.0
    }
}

/// Wind speed in km/h. Dead calm scores 2, worse than a light breeze.
pub fn wind_score(kmh: f64) -> f64 {
    if kmh == 0.0 {
        2.0
    } else if (1.0..=9.0).contains(&kmh) {
        0.0
    } else if (10.0..=30.0).contains(&kmh) {
        1.0 + (kmh - 10.0) * 0.2
    } else if kmh > 30.0 && kmh <= 40.0 {
        5.0 + (kmh - 30.0) * 0.5
    } else if kmh > 40.0 {
        10.0
    } else {
        1.0
    }
}
