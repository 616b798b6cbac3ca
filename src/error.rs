//! Error taxonomy for the routing engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("node {node} has no forecast series")]
    EmptyForecast { node: usize },

    #[error("incomplete weather data: missing or non-numeric {field}")]
    IncompleteWeatherData { field: &'static str },

    #[error("cannot plan on an empty graph")]
    EmptyGraph,

    #[error("start node {start} is not in the graph ({node_count} nodes)")]
    InvalidStart { start: usize, node_count: usize },

    #[error("at least 2 points are required to build a graph, got {0}")]
    NotEnoughPoints(usize),

    #[error("matrix shape mismatch: {0}")]
    MatrixShape(String),

    #[error("invalid matrix entry at ({row}, {col}): {value}")]
    InvalidMatrixEntry { row: usize, col: usize, value: f64 },

    #[error("graph has {graph} nodes but {points} points were supplied")]
    NodeCountMismatch { graph: usize, points: usize },

    #[error("route references node {0}, which is not a known point")]
    UnknownNode(usize),

    #[error("graph has not been built for the current points")]
    GraphNotBuilt,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider error: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, RouterError>;
