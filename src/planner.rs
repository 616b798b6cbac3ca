//! Nearest-neighbor route planner driven by weather at simulated arrival.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::ScoreCache;
use crate::error::{Result, RouterError};
use crate::forecast::{forecast_at, Coordinates, Point};
use crate::graph::{Edge, TravelGraph};
use crate::score::WeatherScore;

#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Scale each candidate's weather score by the edge distance.
    pub distance_important: bool,
}

/// Weather met on arrival at one step of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepWeather {
    pub node: usize,
    pub final_score: f64,
    pub symbol_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteStatus {
    /// Every node was visited.
    Complete,
    /// No unvisited node was reachable from `stranded_at`.
    Disconnected { stranded_at: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedRoute {
    pub path: Vec<usize>,
    /// One entry per step after the start.
    pub weather_details: Vec<StepWeather>,
    /// Simulated travel time from the start to the last node, in seconds.
    pub elapsed_seconds: f64,
    pub status: RouteStatus,
}

impl PlannedRoute {
    pub fn start(&self) -> Option<usize> {
        self.path.first().copied()
    }

    /// Coordinates of the stops in path order.
    pub fn waypoints(&self, points: &[Point]) -> Result<Vec<Coordinates>> {
        self.path
            .iter()
            .map(|&node| {
                points
                    .get(node)
                    .map(|point| point.coordinates)
                    .ok_or(RouterError::UnknownNode(node))
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.status == RouteStatus::Complete
    }

    /// Sum of the weather scores met along the route.
    pub fn total_weather_score(&self) -> f64 {
        self.weather_details.iter().map(|step| step.final_score).sum()
    }
}

struct Candidate<'g> {
    edge: &'g Edge,
    cost: f64,
    score: WeatherScore,
}

/// Greedy visiting order from `start`.
///
/// At each step every unvisited neighbor is scored with the forecast at its
/// simulated arrival time; the cheapest one is taken, the first edge in
/// enumeration order winning ties. Candidates whose forecast cannot be looked
/// up or scored are skipped. When nothing is reachable the route ends early
/// with `RouteStatus::Disconnected`.
pub fn nearest_neighbor(
    graph: &TravelGraph,
    points: &[Point],
    start: usize,
    cache: &ScoreCache,
    options: &PlanOptions,
) -> Result<PlannedRoute> {
    let node_count = graph.node_count();
    if node_count == 0 {
        return Err(RouterError::EmptyGraph);
    }
    if !graph.contains(start) {
        return Err(RouterError::InvalidStart { start, node_count });
    }
    if points.len() != node_count {
        return Err(RouterError::NodeCountMismatch {
            graph: node_count,
            points: points.len(),
        });
    }

    let mut visited = vec![false; node_count];
    visited[start] = true;
    let mut visited_count = 1;
    let mut path = vec![start];
    let mut weather_details = Vec::with_capacity(node_count - 1);
    let mut current = start;
    let mut elapsed = 0.0;
    let mut status = RouteStatus::Complete;

    while visited_count < node_count {
        let mut best: Option<Candidate<'_>> = None;

        for edge in graph.edges_from(current) {
            if visited[edge.target] {
                continue;
            }

            let arrival = elapsed + edge.travel_time;
            let score = match forecast_at(&points[edge.target], edge.target, arrival)
                .and_then(|entry| cache.get(edge.target, entry))
            {
                Ok(score) => score,
                Err(err) => {
                    warn!(node = edge.target, arrival, error = %err, "skipping candidate");
                    continue;
                }
            };

            let cost = if options.distance_important {
                edge.distance * score.final_score
            } else {
                score.final_score
            };

            if best.as_ref().is_none_or(|b| cost < b.cost) {
                best = Some(Candidate { edge, cost, score });
            }
        }

        let Some(chosen) = best else {
            debug!(node = current, visited = visited_count, "no reachable unvisited node");
            status = RouteStatus::Disconnected { stranded_at: current };
            break;
        };

        let target = chosen.edge.target;
        debug!(from = current, to = target, cost = chosen.cost, "next stop");
        visited[target] = true;
        visited_count += 1;
        path.push(target);
        elapsed += chosen.edge.travel_time;
        current = target;
        weather_details.push(StepWeather {
            node: target,
            final_score: chosen.score.final_score,
            symbol_code: chosen.score.symbol_code,
        });
    }

    Ok(PlannedRoute {
        path,
        weather_details,
        elapsed_seconds: elapsed,
        status,
    })
}

/// Run the planner once from every node in parallel, sharing one cache.
///
/// Results are in start-node order.
pub fn plan_from_every_start(
    graph: &TravelGraph,
    points: &[Point],
    cache: &ScoreCache,
    options: &PlanOptions,
) -> Vec<Result<PlannedRoute>> {
    (0..graph.node_count())
        .into_par_iter()
        .map(|start| nearest_neighbor(graph, points, start, cache, options))
        .collect()
}

/// Best route over all start nodes: most nodes visited, then lowest total
/// weather score, then lowest start index.
pub fn best_start_route(
    graph: &TravelGraph,
    points: &[Point],
    cache: &ScoreCache,
    options: &PlanOptions,
) -> Result<PlannedRoute> {
    let mut best: Option<PlannedRoute> = None;
    for route in plan_from_every_start(graph, points, cache, options) {
        let route = route?;
        let better = match &best {
            None => true,
            Some(current) => {
                route.path.len() > current.path.len()
                    || (route.path.len() == current.path.len()
                        && route.total_weather_score() < current.total_weather_score())
            }
        };
        if better {
            best = Some(route);
        }
    }
    best.ok_or(RouterError::EmptyGraph)
}
