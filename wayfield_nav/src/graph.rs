// Immutable waypoint graph.
//
// A `NodeGraph` is a set of `Node`s (world positions) each owning its
// outgoing `Edge`s. Nodes are stored in a `Vec` indexed by `NodeId`, so
// lookup is O(1) and iteration order is fixed. Edges are directed but always
// created in mirrored pairs with equal cost, so connectivity is undirected.
//
// Graphs come from two places: `GraphBuilder` (a regular X×Z grid, see
// `builder.rs`), and `NodeGraph::from_links` for hand-assembled topologies.
// Neither offers mutation after construction; rebuilding means producing a
// whole new graph. Since a built graph is only ever read, it can be shared
// across threads and searched by several `PathFinder`s at once.
//
// Nearest-node lookup lives here too: a linear scan for the closest node that
// can see the query point.
//
// See also: `pathfinding.rs` for A* over this graph, `navigator.rs` which
// owns the current graph.

use crate::error::{NavError, NavResult};
use crate::types::{FrameId, GridDims, NodeId, Vec3};
use crate::visibility::VisibilityOracle;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A directed, costed connection. Owned by the origin node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub origin: NodeId,
    pub target: NodeId,
    /// Movement cost; for grid graphs, the Euclidean distance.
    pub cost: f32,
}

/// A waypoint and its outgoing edges. Grid nodes have at most 8.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Vec3,
    pub edges: SmallVec<[Edge; 8]>,
}

impl Node {
    /// The edge from this node to `target`, if they are linked.
    pub fn edge_to(&self, target: NodeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.target == target)
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct NodeGraph {
    nodes: Vec<Node>,
    dims: Option<GridDims>,
    frame: Option<FrameId>,
}

impl NodeGraph {
    /// Called by the grid builder with fully linked nodes in id order.
    pub(crate) fn from_grid(nodes: Vec<Node>, dims: GridDims, frame: Option<FrameId>) -> Self {
        debug_assert_eq!(nodes.len(), dims.node_count());
        Self {
            nodes,
            dims: Some(dims),
            frame,
        }
    }

    /// Assemble a graph from node positions and `(a, b, cost)` links. Node
    /// `i` gets `NodeId(i)`; each link yields an `a -> b` and a `b -> a` edge.
    pub fn from_links(
        positions: Vec<Vec3>,
        links: &[(NodeId, NodeId, f32)],
        frame: Option<FrameId>,
    ) -> NavResult<Self> {
        let mut nodes: Vec<Node> = positions
            .into_iter()
            .enumerate()
            .map(|(i, position)| Node {
                id: NodeId(i as u32),
                position,
                edges: SmallVec::new(),
            })
            .collect();

        for &(a, b, cost) in links {
            for id in [a, b] {
                if id.index() >= nodes.len() {
                    return Err(NavError::UnknownNode(id));
                }
            }
            if !cost.is_finite() || cost < 0.0 {
                return Err(NavError::InvalidCost { from: a, to: b, cost });
            }
            nodes[a.index()].edges.push(Edge {
                origin: a,
                target: b,
                cost,
            });
            nodes[b.index()].edges.push(Edge {
                origin: b,
                target: a,
                cost,
            });
        }

        Ok(Self {
            nodes,
            dims: None,
            frame,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Get a node by ID. Panics if the id did not come from this graph.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn position(&self, id: NodeId) -> Vec3 {
        self.node(id).position
    }

    /// Outgoing edges of a node.
    pub fn edges(&self, id: NodeId) -> &[Edge] {
        &self.node(id).edges
    }

    /// Grid cell `(i, j)`; `None` for hand-assembled graphs or out of range.
    pub fn node_at(&self, i: u32, j: u32) -> Option<&Node> {
        let dims = self.dims?;
        if i >= dims.x_count || j >= dims.z_count {
            return None;
        }
        self.get(dims.id_of(i, j))
    }

    pub fn dims(&self) -> Option<GridDims> {
        self.dims
    }

    pub fn frame(&self) -> Option<FrameId> {
        self.frame
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges (twice the number of links).
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.get(from)?.edge_to(to)
    }

    /// Sum of edge costs along `path`. `None` if two consecutive nodes are
    /// not linked. A single-node path costs zero.
    pub fn path_cost(&self, path: &[NodeId]) -> Option<f32> {
        path.windows(2)
            .map(|pair| self.edge_between(pair[0], pair[1]).map(|e| e.cost))
            .sum()
    }

    pub fn positions_of(&self, path: &[NodeId]) -> Vec<Vec3> {
        path.iter().map(|&id| self.position(id)).collect()
    }

    /// The node nearest to `point` (Euclidean) among those the oracle says
    /// can see it. `None` if the graph is empty or every node is obstructed.
    /// Ties go to the lowest id.
    ///
    /// O(N) per call; the oracle is only consulted for nodes closer than the
    /// best found so far.
    pub fn find_closest_node<O>(&self, point: Vec3, oracle: &O) -> Option<NodeId>
    where
        O: VisibilityOracle + ?Sized,
    {
        let mut closest = None;
        let mut closest_dist = f32::MAX;
        for node in &self.nodes {
            let dist = node.position.distance(point);
            if dist < closest_dist && !oracle.is_obstructed(node.position, point) {
                closest_dist = dist;
                closest = Some(node.id);
            }
        }
        closest
    }
}
