//! Route geometry as decoded coordinate sequences.
//!
//! Directions services deliver GeoJSON `[lng, lat]` pairs; they are turned
//! into `Coordinates` at the adapter boundary.

use serde::{Deserialize, Serialize};

use crate::forecast::Coordinates;

/// A polyline representing a driven route between planned stops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinates>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinates>) -> Self {
        Self { points }
    }

    /// Build from GeoJSON LineString coordinates (`[lng, lat]`).
    pub fn from_lng_lat(pairs: &[[f64; 2]]) -> Self {
        Self {
            points: pairs.iter().map(|&[lng, lat]| Coordinates::new(lng, lat)).collect(),
        }
    }

    pub fn points(&self) -> &[Coordinates] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coordinates> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// GeoJSON-ordered pairs, for handing back to map renderers.
    pub fn to_lng_lat(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|c| [c.lng, c.lat]).collect()
    }
}

/// Driving directions through a route's stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directions {
    pub geometry: Polyline,
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
}
