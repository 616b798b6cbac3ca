//! MET Norway locationforecast adapter.

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, RouterError};
use crate::forecast::{Coordinates, ForecastEntry, ForecastSeries};
use crate::traits::ForecastProvider;

#[derive(Debug, Clone)]
pub struct MetNoConfig {
    pub base_url: String,
    /// MET Norway rejects requests without an identifying User-Agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for MetNoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.met.no/weatherapi/locationforecast/2.0".to_string(),
            user_agent: concat!("weather-router/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetNoClient {
    config: MetNoConfig,
    client: reqwest::blocking::Client,
}

impl MetNoClient {
    pub fn new(config: MetNoConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }

    fn url_for(&self, coordinates: Coordinates) -> String {
        // the API caches per 4-decimal coordinate
        format!(
            "{}/compact?lat={:.4}&lon={:.4}",
            self.config.base_url, coordinates.lat, coordinates.lng
        )
    }
}

impl ForecastProvider for MetNoClient {
    fn forecast_for(&self, coordinates: Coordinates) -> Result<ForecastSeries> {
        let url = self.url_for(coordinates);
        debug!(%url, "fetching forecast");

        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<LocationForecast>())?;

        let series = body.into_series();
        if series.is_empty() {
            return Err(RouterError::Provider(format!(
                "MET Norway returned no timeseries for {:.4},{:.4}",
                coordinates.lat, coordinates.lng
            )));
        }
        Ok(series)
    }
}

#[derive(Debug, Deserialize)]
pub struct LocationForecast {
    properties: Properties,
}

impl LocationForecast {
    pub fn into_series(self) -> ForecastSeries {
        self.properties
            .timeseries
            .into_iter()
            .map(TimeStep::into_entry)
            .collect::<Vec<_>>()
            .into()
    }
}

#[derive(Debug, Deserialize)]
struct Properties {
    #[serde(default)]
    timeseries: Vec<TimeStep>,
}

#[derive(Debug, Deserialize)]
struct TimeStep {
    time: String,
    data: StepData,
}

impl TimeStep {
    fn into_entry(self) -> ForecastEntry {
        let details = self.data.instant.details;
        let next_hour = self.data.next_1_hours;
        ForecastEntry {
            time: self.time,
            air_temperature: details.air_temperature,
            relative_humidity: details.relative_humidity,
            wind_speed: details.wind_speed,
            cloud_area_fraction: details.cloud_area_fraction,
            precipitation_amount: next_hour
                .as_ref()
                .and_then(|period| period.details.as_ref())
                .and_then(|details| details.precipitation_amount),
            symbol_code: next_hour
                .and_then(|period| period.summary)
                .map(|summary| summary.symbol_code),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StepData {
    instant: Instant,
    next_1_hours: Option<NextPeriod>,
}

#[derive(Debug, Deserialize)]
struct Instant {
    #[serde(default)]
    details: InstantDetails,
}

#[derive(Debug, Default, Deserialize)]
struct InstantDetails {
    air_temperature: Option<f64>,
    relative_humidity: Option<f64>,
    wind_speed: Option<f64>,
    cloud_area_fraction: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct NextPeriod {
    summary: Option<Summary>,
    details: Option<PeriodDetails>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    symbol_code: String,
}

#[derive(Debug, Deserialize)]
struct PeriodDetails {
    precipitation_amount: Option<f64>,
}
