//! One planning session: the point set, its graph, and its score cache.
//!
//! Adding or clearing points drops the graph, so planning only ever runs on a
//! graph that covers every current point.

use tracing::{debug, info};

use crate::cache::ScoreCache;
use crate::error::{Result, RouterError};
use crate::forecast::{Coordinates, Point};
use crate::graph::TravelGraph;
use crate::planner::{best_start_route, nearest_neighbor, PlanOptions, PlannedRoute};
use crate::polyline::Directions;
use crate::shortest_path::{weather_shortest_paths, ShortestPaths};
use crate::traits::{DirectionsProvider, ForecastProvider, TravelMatrixProvider};

#[derive(Debug, Default)]
pub struct PlanningSession {
    points: Vec<Point>,
    graph: Option<TravelGraph>,
    cache: ScoreCache,
}

impl PlanningSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point and return its node id.
    pub fn add_point(&mut self, point: Point) -> usize {
        self.points.push(point);
        self.graph = None;
        self.points.len() - 1
    }

    /// Fetch the forecast for `coordinates` and add it as a point. Unnamed
    /// points are named `Point N` by position.
    pub fn add_location<F: ForecastProvider>(
        &mut self,
        coordinates: Coordinates,
        name: Option<String>,
        provider: &F,
    ) -> Result<usize> {
        let forecast = provider.forecast_for(coordinates)?;
        let name = name.unwrap_or_else(|| format!("Point {}", self.points.len() + 1));
        debug!(%name, hours = forecast.len(), "adding location");
        Ok(self.add_point(Point::new(coordinates, forecast).named(name)))
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn graph(&self) -> Option<&TravelGraph> {
        self.graph.as_ref()
    }

    pub fn cache(&self) -> &ScoreCache {
        &self.cache
    }

    /// Request matrices for the current points and build the graph.
    pub fn build_graph<M: TravelMatrixProvider>(&mut self, provider: &M) -> Result<&TravelGraph> {
        if self.points.len() < 2 {
            return Err(RouterError::NotEnoughPoints(self.points.len()));
        }
        let locations: Vec<Coordinates> = self.points.iter().map(|p| p.coordinates).collect();
        let matrices = provider.matrices_for(&locations)?;
        let graph = TravelGraph::from_matrices(&matrices)?;
        self.set_graph(graph)
    }

    /// Install a graph built elsewhere; it must cover exactly the current points.
    pub fn set_graph(&mut self, graph: TravelGraph) -> Result<&TravelGraph> {
        if graph.node_count() != self.points.len() {
            return Err(RouterError::NodeCountMismatch {
                graph: graph.node_count(),
                points: self.points.len(),
            });
        }
        info!(nodes = graph.node_count(), edges = graph.edge_count(), "graph ready");
        Ok(&*self.graph.insert(graph))
    }

    pub fn plan_route(&self, start: usize, options: &PlanOptions) -> Result<PlannedRoute> {
        let graph = self.graph.as_ref().ok_or(RouterError::GraphNotBuilt)?;
        let route = nearest_neighbor(graph, &self.points, start, &self.cache, options)?;
        info!(start, stops = route.path.len(), status = ?route.status, "route planned");
        Ok(route)
    }

    pub fn plan_best_route(&self, options: &PlanOptions) -> Result<PlannedRoute> {
        let graph = self.graph.as_ref().ok_or(RouterError::GraphNotBuilt)?;
        best_start_route(graph, &self.points, &self.cache, options)
    }

    pub fn shortest_paths(&self, start: usize) -> Result<ShortestPaths> {
        let graph = self.graph.as_ref().ok_or(RouterError::GraphNotBuilt)?;
        weather_shortest_paths(graph, &self.points, start, &self.cache)
    }

    /// Driving directions through the stops of `route`, in visiting order.
    pub fn directions_for<D: DirectionsProvider>(
        &self,
        route: &PlannedRoute,
        provider: &D,
    ) -> Result<Directions> {
        let directions = provider.directions_for(route, &self.points)?;
        debug!(
            stops = route.path.len(),
            vertices = directions.geometry.points().len(),
            "directions ready"
        );
        Ok(directions)
    }

    /// Forget all points, the graph and every cached score.
    pub fn reset(&mut self) {
        self.points.clear();
        self.graph = None;
        self.cache.clear();
    }
}
