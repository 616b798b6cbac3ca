//! Mapbox adapters: the Matrix API for travel-time and distance matrices,
//! and the Directions API for the geometry of a planned route.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, RouterError};
use crate::forecast::{Coordinates, Point};
use crate::graph::TravelMatrices;
use crate::planner::PlannedRoute;
use crate::polyline::{Directions, Polyline};
use crate::traits::{DirectionsProvider, TravelMatrixProvider};

/// Environment variable consulted by `MapboxConfig::from_env`.
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

#[derive(Debug, Clone)]
pub struct MapboxConfig {
    pub base_url: String,
    pub profile: String,
    pub access_token: String,
    pub timeout_secs: u64,
}

impl Default for MapboxConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mapbox.com".to_string(),
            profile: "mapbox/driving".to_string(),
            access_token: String::new(),
            timeout_secs: 10,
        }
    }
}

impl MapboxConfig {
    /// Defaults with the access token taken from `MAPBOX_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let access_token = std::env::var(ACCESS_TOKEN_ENV)
            .map_err(|_| RouterError::Provider(format!("{} is not set", ACCESS_TOKEN_ENV)))?;
        Ok(Self {
            access_token,
            ..Self::default()
        })
    }
}

fn build_client(config: &MapboxConfig) -> Result<reqwest::blocking::Client> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

fn coordinate_list(locations: &[Coordinates]) -> String {
    locations
        .iter()
        .map(|c| format!("{:.6},{:.6}", c.lng, c.lat))
        .collect::<Vec<_>>()
        .join(";")
}

/// GET and decode a Mapbox response. The URL carries the access token, so it
/// is stripped from transport errors.
fn get_json<T: DeserializeOwned>(client: &reqwest::blocking::Client, url: String) -> Result<T> {
    client
        .get(url)
        .send()
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.json::<T>())
        .map_err(|e| RouterError::Http(e.without_url()))
}

#[derive(Debug, Clone)]
pub struct MapboxMatrixClient {
    config: MapboxConfig,
    client: reqwest::blocking::Client,
}

impl MapboxMatrixClient {
    pub fn new(config: MapboxConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    fn url_for(&self, locations: &[Coordinates]) -> String {
        format!(
            "{}/directions-matrix/v1/{}/{}?annotations=duration,distance&access_token={}",
            self.config.base_url,
            self.config.profile,
            coordinate_list(locations),
            self.config.access_token
        )
    }
}

impl TravelMatrixProvider for MapboxMatrixClient {
    fn matrices_for(&self, locations: &[Coordinates]) -> Result<TravelMatrices> {
        if locations.is_empty() {
            return Ok(TravelMatrices::default());
        }

        debug!(locations = locations.len(), "requesting travel matrix");
        let body: MatrixResponse = get_json(&self.client, self.url_for(locations))?;
        body.into_matrices()
    }
}

#[derive(Debug, Deserialize)]
pub struct MatrixResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    durations: Option<Vec<Vec<Option<f64>>>>,
    distances: Option<Vec<Vec<Option<f64>>>>,
}

impl MatrixResponse {
    pub fn into_matrices(self) -> Result<TravelMatrices> {
        if self.code != "Ok" {
            return Err(RouterError::Provider(format!(
                "Mapbox matrix request failed: {} {}",
                self.code,
                self.message.unwrap_or_default()
            )));
        }
        match (self.durations, self.distances) {
            (Some(durations), Some(distances)) => Ok(TravelMatrices::new(durations, distances)),
            _ => Err(RouterError::Provider(
                "Mapbox matrix response lacks durations or distances".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MapboxDirectionsClient {
    config: MapboxConfig,
    client: reqwest::blocking::Client,
}

impl MapboxDirectionsClient {
    pub fn new(config: MapboxConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    fn url_for(&self, waypoints: &[Coordinates]) -> String {
        format!(
            "{}/directions/v5/{}/{}?geometries=geojson&steps=true&overview=full&access_token={}",
            self.config.base_url,
            self.config.profile,
            coordinate_list(waypoints),
            self.config.access_token
        )
    }
}

impl DirectionsProvider for MapboxDirectionsClient {
    fn directions_for(&self, route: &PlannedRoute, points: &[Point]) -> Result<Directions> {
        let waypoints = route.waypoints(points)?;
        if waypoints.len() < 2 {
            return Err(RouterError::NotEnoughPoints(waypoints.len()));
        }

        debug!(stops = waypoints.len(), "requesting directions");
        let body: DirectionsResponse = get_json(&self.client, self.url_for(&waypoints))?;
        body.into_directions()
    }
}

#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    geometry: LineString,
    distance: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct LineString {
    coordinates: Vec<[f64; 2]>,
}

impl DirectionsResponse {
    /// The first route Mapbox proposes; alternatives are ignored.
    pub fn into_directions(self) -> Result<Directions> {
        if self.code != "Ok" {
            return Err(RouterError::Provider(format!(
                "Mapbox directions request failed: {} {}",
                self.code,
                self.message.unwrap_or_default()
            )));
        }
        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RouterError::Provider("Mapbox directions returned no route".to_string()))?;

        Ok(Directions {
            geometry: Polyline::from_lng_lat(&route.geometry.coordinates),
            distance: route.distance,
            duration: route.duration,
        })
    }
}
