// wayfield_nav: grid waypoint graphs and A* search for agents in a 3D scene.
//
// Lays a regular grid of waypoints over a rectangular field, links each
// waypoint to the neighbors it can see, and answers "how do I get from here
// to there" with A* over the resulting graph. Scene geometry stays outside:
// every line-of-sight question goes through a `VisibilityOracle` supplied by
// the host.
//
// Module overview:
// - `types.rs`:          Vec3, NodeId, FrameId, GridDims, Bounds.
// - `error.rs`:          NavError / ConfigError.
// - `config.rs`:         NavConfig (GridSettings + SearchSettings), JSON loading, clamping.
// - `visibility.rs`:     VisibilityOracle trait, closure impl, Unobstructed.
// - `obstacles.rs`:      ObstacleSet: static boxes and spheres as an oracle.
// - `graph.rs`:          Node, Edge, NodeGraph + nearest visible node lookup.
// - `builder.rs`:        Grid layout and parallel graph construction.
// - `priority_queue.rs`: Bucketed min-priority queue with membership tests (the open set).
// - `pathfinding.rs`:    PathFinder (A*), PathResult, SearchOutcome.
// - `navigator.rs`:      Navigator: config + oracle + current graph, point-to-point queries.
// - `traveler.rs`:       Traveler: follows a planned path frame by frame.
//
// **Critical constraint: determinism.** For a given config and a
// deterministic oracle, graph construction and search are pure: the same
// inputs yield the same node ids, edges and paths. Parallel construction
// collects results in node order, and the open set breaks priority ties by
// insertion order.

pub mod builder;
pub mod config;
pub mod error;
pub mod graph;
pub mod navigator;
pub mod obstacles;
pub mod pathfinding;
pub mod priority_queue;
pub mod traveler;
pub mod types;
pub mod visibility;

pub use config::{FrontierUpdate, GridSettings, NavConfig, SearchSettings};
pub use error::{ConfigError, NavError, NavResult};
pub use graph::{Edge, Node, NodeGraph};
pub use navigator::Navigator;
pub use obstacles::{Aabb, Obstacle, ObstacleSet, Sphere};
pub use pathfinding::{PathFinder, PathResult, SearchOutcome};
pub use traveler::Traveler;
pub use types::{Bounds, FrameId, GridDims, NodeId, Vec3};
pub use visibility::{Unobstructed, VisibilityOracle};
