//! Dijkstra search minimizing cumulative weather score instead of travel time.
//!
//! Arrival time is tracked next to cost: cost accumulates weather scores,
//! time accumulates travel time and only drives the forecast lookup.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cache::ScoreCache;
use crate::error::{Result, RouterError};
use crate::forecast::{forecast_at, Point};
use crate::graph::TravelGraph;

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-node results; unreachable nodes keep infinite distance and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPaths {
    pub start: usize,
    pub distances: Vec<f64>,
    pub predecessors: Vec<Option<usize>>,
    /// Simulated arrival time in seconds.
    pub times: Vec<f64>,
}

impl ShortestPaths {
    pub fn is_reachable(&self, node: usize) -> bool {
        self.distances.get(node).is_some_and(|d| d.is_finite())
    }

    /// Node sequence from the start to `target`, if reachable.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if !self.is_reachable(target) {
            return None;
        }
        let mut path = vec![target];
        let mut node = target;
        while let Some(prev) = self.predecessors[node] {
            path.push(prev);
            node = prev;
        }
        path.reverse();
        Some(path)
    }
}

pub fn weather_shortest_paths(
    graph: &TravelGraph,
    points: &[Point],
    start: usize,
    cache: &ScoreCache,
) -> Result<ShortestPaths> {
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

    let mut distances = vec![f64::INFINITY; node_count];
    let mut times = vec![f64::INFINITY; node_count];
    let mut predecessors = vec![None; node_count];
    let mut heap = BinaryHeap::new();

    distances[start] = 0.0;
    times[start] = 0.0;
    heap.push(State { cost: 0.0, node: start });

    while let Some(State { cost, node }) = heap.pop() {
        if cost > distances[node] {
            continue;
        }

        for edge in graph.edges_from(node) {
            let arrival = times[node] + edge.travel_time;
            let score = match forecast_at(&points[edge.target], edge.target, arrival)
                .and_then(|entry| cache.get(edge.target, entry))
            {
                Ok(score) => score,
                Err(err) => {
                    warn!(node = edge.target, arrival, error = %err, "skipping edge");
                    continue;
                }
            };

            let next_cost = cost + score.final_score;
            if next_cost < distances[edge.target] {
                distances[edge.target] = next_cost;
                times[edge.target] = arrival;
                predecessors[edge.target] = Some(node);
                heap.push(State {
                    cost: next_cost,
                    node: edge.target,
                });
            }
        }
    }

    Ok(ShortestPaths {
        start,
        distances,
        predecessors,
        times,
    })
}
