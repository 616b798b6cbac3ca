//! Travel graph built from point-to-point duration/distance matrices.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RouterError};

/// Square travel matrices indexed by node id.
///
/// `None` marks a pair the routing service could not connect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TravelMatrices {
    /// Travel time in seconds [i][j] from node i to node j.
    pub durations: Vec<Vec<Option<f64>>>,
    /// Distance in meters [i][j] from node i to node j.
    pub distances: Vec<Vec<Option<f64>>>,
}

impl TravelMatrices {
    pub fn new(durations: Vec<Vec<Option<f64>>>, distances: Vec<Vec<Option<f64>>>) -> Self {
        Self {
            durations,
            distances,
        }
    }

    pub fn size(&self) -> usize {
        self.durations.len()
    }
}

/// Directed connection between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    /// Seconds.
    pub travel_time: f64,
    /// Meters.
    pub distance: f64,
}

/// Adjacency lists; edges of each source are ordered by ascending target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelGraph {
    adjacency: Vec<Vec<Edge>>,
}

impl TravelGraph {
    /// Build the graph, emitting edge (i, j) for i != j iff both the duration
    /// and distance entries are present.
    pub fn from_matrices(matrices: &TravelMatrices) -> Result<Self> {
        let n = matrices.size();
        if n < 2 {
            return Err(RouterError::NotEnoughPoints(n));
        }
        if matrices.distances.len() != n {
            return Err(RouterError::MatrixShape(format!(
                "{} duration rows but {} distance rows",
                n,
                matrices.distances.len()
            )));
        }

        let mut adjacency = Vec::with_capacity(n);
        for (i, (durations, distances)) in matrices
            .durations
            .iter()
            .zip(&matrices.distances)
            .enumerate()
        {
            if durations.len() != n || distances.len() != n {
                return Err(RouterError::MatrixShape(format!(
                    "row {} has {} durations and {} distances, expected {}",
                    i,
                    durations.len(),
                    distances.len(),
                    n
                )));
            }

            let mut edges = Vec::new();
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (Some(travel_time), Some(distance)) = (durations[j], distances[j]) else {
                    continue;
                };
                check_entry(i, j, travel_time)?;
                check_entry(i, j, distance)?;
                edges.push(Edge {
                    source: i,
                    target: j,
                    travel_time,
                    distance,
                });
            }
            adjacency.push(edges);
        }

        Ok(Self { adjacency })
    }

    /// Graph directly from edge lists, for callers with their own routing data.
    /// Edges are sorted by target to keep enumeration order stable.
    pub fn from_edges(node_count: usize, edges: impl IntoIterator<Item = Edge>) -> Result<Self> {
        let mut adjacency = vec![Vec::new(); node_count];
        for edge in edges {
            if edge.source >= node_count || edge.target >= node_count {
                return Err(RouterError::MatrixShape(format!(
                    "edge {} -> {} outside {} nodes",
                    edge.source, edge.target, node_count
                )));
            }
            if edge.source == edge.target {
                continue;
            }
            check_entry(edge.source, edge.target, edge.travel_time)?;
            check_entry(edge.source, edge.target, edge.distance)?;
            adjacency[edge.source].push(edge);
        }
        for edges in &mut adjacency {
            edges.sort_by_key(|edge| edge.target);
        }
        Ok(Self { adjacency })
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn contains(&self, node: usize) -> bool {
        node < self.adjacency.len()
    }

    /// Outgoing edges of `node`; empty for unknown nodes.
    pub fn edges_from(&self, node: usize) -> &[Edge] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edge(&self, source: usize, target: usize) -> Option<&Edge> {
        self.edges_from(source).iter().find(|edge| edge.target == target)
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}

fn check_entry(row: usize, col: usize, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RouterError::InvalidMatrixEntry { row, col, value })
    }
}
