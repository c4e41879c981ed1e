// Error types for graph assembly, navigation queries, and config loading.
//
// Search failure is NOT an error: an unreachable destination is reported
// through `PathResult::outcome` with the single-start-node fallback path
// (see `pathfinding.rs`). Errors here are for queries that cannot start
// (no graph, a non-finite endpoint, or an endpoint with no visible node) and for malformed
// hand-assembled graphs.

use crate::types::{NodeId, Vec3};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavError {
    #[error("query point {point} is not finite")]
    NonFinitePoint { point: Vec3 },

    #[error("no graph node is visible from {point}")]
    NoVisibleNode { point: Vec3 },

    #[error("navigation graph has not been built")]
    GraphNotBuilt,

    #[error("unknown graph node: {0}")]
    UnknownNode(NodeId),

    #[error("invalid edge cost {cost} between {from} and {to}")]
    InvalidCost { from: NodeId, to: NodeId, cost: f32 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type NavResult<T> = Result<T, NavError>;
