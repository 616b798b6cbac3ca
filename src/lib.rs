//! weather-router core
//!
//! Scores hourly forecasts into a discomfort value and orders a set of points
//! so that accumulated discomfort at simulated arrival times stays low.

pub mod error;
pub mod forecast;
pub mod score;
pub mod cache;
pub mod graph;
pub mod planner;
pub mod shortest_path;
pub mod session;
pub mod traits;
pub mod metno;
pub mod mapbox;
pub mod haversine;
pub mod polyline;

pub use error::{Result, RouterError};
