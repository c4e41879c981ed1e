// Navigator: owns a node field and answers point-to-point path queries.
//
// Ties the pieces together for a host scene. A `Navigator` holds the
// `NavConfig`, the scene's `VisibilityOracle`, the current graph (if one has
// been built) and a `PathFinder` with its reusable scratch state.
//
// `generate_nodes` clamps the grid settings, discards any previous graph and
// builds a fresh one; node ids from an earlier graph are meaningless
// afterwards. Between rebuilds the graph is read-only.
//
// World-point queries snap each endpoint to its nearest visible node and
// search between those. An endpoint that sees no node is an error
// (`NavError::NoVisibleNode`); an unreachable destination is not, and yields
// the one-position fallback path from `pathfinding.rs`.
//
// See also: `builder.rs` (graph construction), `graph.rs`
// (`find_closest_node`), `traveler.rs` for an agent that follows the paths.

use crate::builder::{GraphBuilder, GridLayout};
use crate::config::{GridSettings, NavConfig, SearchSettings};
use crate::error::{NavError, NavResult};
use crate::graph::NodeGraph;
use crate::pathfinding::{PathFinder, PathResult};
use crate::types::{Bounds, FrameId, NodeId, Vec3};
use crate::visibility::VisibilityOracle;
use log::{debug, trace};

pub struct Navigator<O> {
    config: NavConfig,
    oracle: O,
    frame: Option<FrameId>,
    graph: Option<NodeGraph>,
    finder: PathFinder,
}

impl<O: VisibilityOracle + Sync> Navigator<O> {
    /// A navigator with no graph yet. Call `generate_nodes` before querying.
    pub fn new(config: NavConfig, oracle: O) -> Self {
        let grid = clamp_logged(&config.grid);
        let finder = PathFinder::new(config.search.clone());
        Self {
            config: NavConfig {
                grid,
                search: config.search,
            },
            oracle,
            frame: None,
            graph: None,
            finder,
        }
    }

    /// Record the host frame that built graphs will report.
    pub fn with_frame(mut self, frame: FrameId) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Replace the grid settings (clamped). Takes effect at the next
    /// `generate_nodes`.
    pub fn set_grid_settings(&mut self, grid: GridSettings) {
        self.config.grid = clamp_logged(&grid);
    }

    /// Replace the search settings. Applies to the next query.
    pub fn set_search_settings(&mut self, search: SearchSettings) {
        self.finder.set_settings(search.clone());
        self.config.search = search;
    }

    /// Discard the current graph and build a new one from the grid settings.
    pub fn generate_nodes(&mut self) -> &NodeGraph {
        let layout = GridLayout::from_settings(&self.config.grid);
        if self.graph.is_some() {
            trace!("discarding previous node graph");
        }
        trace!(
            "rebuilding {}x{} grid at {} with spacing ({:.3}, {:.3})",
            layout.dims.x_count,
            layout.dims.z_count,
            layout.center,
            layout.spacing_x,
            layout.spacing_z
        );
        let graph = GraphBuilder::new().build(&layout, self.frame, &self.oracle);
        self.graph.insert(graph)
    }

    pub fn graph(&self) -> Option<&NodeGraph> {
        self.graph.as_ref()
    }

    /// Ground-plane rectangle covered by the node field.
    pub fn bounds(&self) -> Bounds {
        self.config.grid.bounds()
    }

    /// Search between two nodes of the current graph.
    pub fn find_path(&mut self, start: NodeId, finish: NodeId) -> NavResult<PathResult> {
        let graph = self.graph.as_ref().ok_or(NavError::GraphNotBuilt)?;
        for id in [start, finish] {
            if graph.get(id).is_none() {
                return Err(NavError::UnknownNode(id));
            }
        }
        Ok(self.finder.find_path(graph, start, finish))
    }

    /// Like `find_path_between_points` but returns the full search result.
    pub fn plan(&mut self, start: Vec3, finish: Vec3) -> NavResult<PathResult> {
        let graph = self.graph.as_ref().ok_or(NavError::GraphNotBuilt)?;
        let bounds = self.config.grid.bounds();
        let closest = |point: Vec3| {
            if !point.is_finite() {
                return Err(NavError::NonFinitePoint { point });
            }
            if !bounds.contains(point) {
                debug!("query point {point} lies outside the node field");
            }
            graph
                .find_closest_node(point, &self.oracle)
                .ok_or(NavError::NoVisibleNode { point })
        };
        let start_node = closest(start)?;
        let finish_node = closest(finish)?;
        Ok(self.finder.find_path(graph, start_node, finish_node))
    }

    /// Positions of the path between the nodes nearest to `start` and
    /// `finish`. A single position means the endpoints snapped to the same
    /// node or no path exists; use `plan` to tell which.
    pub fn find_path_between_points(&mut self, start: Vec3, finish: Vec3) -> NavResult<Vec<Vec3>> {
        let result = self.plan(start, finish)?;
        let graph = self.graph.as_ref().ok_or(NavError::GraphNotBuilt)?;
        Ok(graph.positions_of(&result.nodes))
    }

    /// Nearest node that the navigator's oracle says can see `point`. `None`
    /// before the first build.
    pub fn find_closest_node(&self, point: Vec3) -> Option<NodeId> {
        self.find_closest_node_with(point, &self.oracle)
    }

    /// Nearest node visible from `point` under a caller-supplied oracle.
    pub fn find_closest_node_with<V>(&self, point: Vec3, oracle: &V) -> Option<NodeId>
    where
        V: VisibilityOracle + ?Sized,
    {
        self.graph.as_ref()?.find_closest_node(point, oracle)
    }
}

fn clamp_logged(grid: &GridSettings) -> GridSettings {
    let clamped = grid.clamped();
    if clamped != *grid {
        trace!("grid settings clamped from {grid:?} to {clamped:?}");
    }
    clamped
}
