//! Haversine travel matrix provider (fallback when no routing service is
//! reachable).
//!
//! Uses great-circle distance scaled by a road coefficient, and an assumed
//! speed for travel time. Every pair is connected.

use crate::error::Result;
use crate::forecast::Coordinates;
use crate::graph::TravelMatrices;
use crate::traits::TravelMatrixProvider;

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Straight line to road distance.
const DEFAULT_ROAD_COEFFICIENT: f64 = 1.3;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone)]
pub struct HaversineMatrix {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
    pub road_coefficient: f64,
}

impl Default for HaversineMatrix {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            road_coefficient: DEFAULT_ROAD_COEFFICIENT,
        }
    }
}

impl HaversineMatrix {
    pub fn new(speed_kmh: f64, road_coefficient: f64) -> Self {
        Self {
            speed_kmh,
            road_coefficient,
        }
    }

    /// Great-circle distance between two points in kilometers.
    fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
        let lat1_rad = from.lat.to_radians();
        let lat2_rad = to.lat.to_radians();
        let delta_lat = (to.lat - from.lat).to_radians();
        let delta_lng = (to.lng - from.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    fn road_meters(&self, from: Coordinates, to: Coordinates) -> f64 {
        Self::haversine_km(from, to) * self.road_coefficient * 1000.0
    }

    fn meters_to_seconds(&self, meters: f64) -> f64 {
        let hours = meters / 1000.0 / self.speed_kmh;
        (hours * 3600.0).round()
    }
}

impl TravelMatrixProvider for HaversineMatrix {
    fn matrices_for(&self, locations: &[Coordinates]) -> Result<TravelMatrices> {
        let n = locations.len();
        let mut durations = vec![vec![Some(0.0); n]; n];
        let mut distances = vec![vec![Some(0.0); n]; n];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                if i != j {
                    let meters = self.road_meters(*from, *to);
                    distances[i][j] = Some(meters.round());
                    durations[i][j] = Some(self.meters_to_seconds(meters));
                }
            }
        }

        Ok(TravelMatrices::new(durations, distances))
    }
}
