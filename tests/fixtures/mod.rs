//! Test fixtures for weather-router.
//!
//! Provides realistic test data including:
//! - Real Oslo area locations
//! - Forecast builders for hourly series and points

#![allow(dead_code)]

pub mod oslo_locations;
pub mod forecasts;

pub use forecasts::*;
pub use oslo_locations::*;
