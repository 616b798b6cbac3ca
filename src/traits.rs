//! Seams to the services that supply forecasts and travel matrices.
//!
//! The engine never fetches data itself; callers implement these for the
//! weather and routing services they use.

use crate::error::Result;
use crate::forecast::{Coordinates, ForecastSeries, Point};
use crate::graph::TravelMatrices;
use crate::planner::PlannedRoute;
use crate::polyline::Directions;

/// Provides the hourly forecast for a location.
pub trait ForecastProvider {
    fn forecast_for(&self, coordinates: Coordinates) -> Result<ForecastSeries>;
}

/// Provides travel-time and distance matrices for a set of locations.
///
/// The matrices are indexed by the provided location order.
pub trait TravelMatrixProvider {
    fn matrices_for(&self, locations: &[Coordinates]) -> Result<TravelMatrices>;
}

/// Provides driving directions along a planned route, in path order.
pub trait DirectionsProvider {
    fn directions_for(&self, route: &PlannedRoute, points: &[Point]) -> Result<Directions>;
}
